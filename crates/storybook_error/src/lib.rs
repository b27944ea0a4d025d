//! Error types for the storybook MCP server.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storybook_error::{StorybookResult, ConfigError};
//!
//! fn load_key() -> StorybookResult<String> {
//!     Err(ConfigError::new("GEMINI_API_KEY is not set"))?
//! }
//!
//! assert!(load_key().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod gemini;
mod preview;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{StorybookError, StorybookErrorKind, StorybookResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use preview::{PreviewError, PreviewErrorKind};
pub use storage::{StorageError, StorageErrorKind};
