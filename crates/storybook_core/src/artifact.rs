//! Files produced by an invocation and the result handed back to the caller.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// What a saved file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Generated illustration
    #[display("image")]
    Image,
    /// Generated story text
    #[display("story")]
    Story,
    /// HTML preview document
    #[display("preview")]
    Preview,
}

/// A file written to disk. Nothing tracks it after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct SavedArtifact {
    /// Kind of payload
    kind: ArtifactKind,
    /// Absolute path of the written file
    path: PathBuf,
}

impl SavedArtifact {
    /// Record a written file.
    pub fn new(kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// Path as a borrowed `Path`.
    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

/// Final result of a successful `generate_storybook_image` invocation.
///
/// # Examples
///
/// ```
/// use storybook_core::GenerationOutcome;
///
/// let outcome = GenerationOutcome::new("/out/a.png", "/out/a_story.txt", "/out/a_preview.html");
/// assert!(outcome.success);
/// assert!(outcome.summary().contains("/out/a.png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    /// Always true; failures are reported as protocol errors instead
    pub success: bool,
    /// Saved illustration
    pub image_path: String,
    /// Saved story text
    pub story_path: String,
    /// Saved preview document
    pub html_path: String,
    /// Human-readable summary
    pub message: String,
}

impl GenerationOutcome {
    /// Bundle the three artifact paths into a success result.
    pub fn new(
        image_path: impl Into<String>,
        story_path: impl Into<String>,
        html_path: impl Into<String>,
    ) -> Self {
        let image_path = image_path.into();
        let story_path = story_path.into();
        let html_path = html_path.into();
        let message = format!(
            "Storybook page created!\n\nImage: {}\nStory: {}\nPreview: {}",
            image_path, story_path, html_path
        );
        Self {
            success: true,
            image_path,
            story_path,
            html_path,
            message,
        }
    }

    /// Text shown to the user alongside the structured result.
    pub fn summary(&self) -> &str {
        &self.message
    }
}
