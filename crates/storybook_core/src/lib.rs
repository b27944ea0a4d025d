//! Core data types for the storybook MCP server.
//!
//! This crate provides the values that flow through one tool invocation
//! (request, generated story and image, saved artifacts, outcome), the
//! provider-neutral generation request/chunk types, and the immutable
//! process configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod art_style;
mod generation;
mod request;
mod settings;

pub use art_style::ArtStyle;
pub use artifact::{ArtifactKind, GenerationOutcome, SavedArtifact};
pub use generation::{
    ChunkPart, GenerateRequest, GenerateRequestBuilder, GeneratedImage, GeneratedStory,
    GenerationSettings, GenerationSettingsBuilder, InlineData, Modality, ResponseChunk,
};
pub use request::{IMAGE_EXTENSION, StorybookRequest, StorybookRequestBuilder};
pub use settings::{
    GeminiSettings, OutputSettings, StorySettings, StorybookConfig, StorybookConfigBuilder,
    StorybookSettings,
};
