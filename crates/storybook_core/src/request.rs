//! Validated tool invocation and the file names derived from it.

use crate::ArtStyle;
use chrono::{DateTime, Local};
use storybook_error::{BuilderError, BuilderErrorKind};

/// Extension given to saved illustrations.
pub const IMAGE_EXTENSION: &str = ".png";

/// One `generate_storybook_image` invocation.
///
/// `prompt` and `file_name` are non-empty after trimming; the builder refuses
/// anything else.
///
/// # Examples
///
/// ```
/// use storybook_core::{ArtStyle, StorybookRequest};
///
/// let request = StorybookRequest::builder()
///     .prompt("a friendly dragon")
///     .file_name("dragon.png")
///     .art_style(ArtStyle::Watercolor)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.story_file_name(), "dragon_story.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct StorybookRequest {
    /// Story subject
    prompt: String,
    /// Base name for the saved files
    file_name: String,
    /// Illustration style
    #[builder(default)]
    art_style: ArtStyle,
}

impl StorybookRequest {
    /// Start building a request.
    pub fn builder() -> StorybookRequestBuilder {
        StorybookRequestBuilder::default()
    }

    /// File name with a trailing `.png` removed.
    pub fn base_name(&self) -> &str {
        self.file_name
            .strip_suffix(IMAGE_EXTENSION)
            .unwrap_or(&self.file_name)
    }

    /// Name of the story file. Repeated invocations with the same name overwrite it.
    pub fn story_file_name(&self) -> String {
        format!("{}_story.txt", self.base_name())
    }

    /// Name of the image file.
    ///
    /// Kept verbatim when it already ends in `.png`, otherwise suffixed with a
    /// microsecond timestamp so back-to-back invocations do not collide.
    pub fn image_file_name(&self, now: DateTime<Local>) -> String {
        if self.file_name.ends_with(IMAGE_EXTENSION) {
            self.file_name.clone()
        } else {
            format!(
                "{}_{}{}",
                self.file_name,
                now.format("%Y%m%d_%H%M%S_%6f"),
                IMAGE_EXTENSION
            )
        }
    }

    /// Prompt sent to the image model.
    pub fn image_prompt(&self) -> String {
        self.art_style.illustrate(&self.prompt)
    }
}

impl StorybookRequestBuilder {
    /// Build the request, rejecting blank prompts and file names.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] when a required field is missing or blank.
    #[track_caller]
    pub fn build(&self) -> Result<StorybookRequest, BuilderError> {
        let request = self.build_internal().map_err(|e| {
            BuilderError::new(BuilderErrorKind::MissingField(e.to_string()))
        })?;
        for (field, value) in [("prompt", &request.prompt), ("fileName", &request.file_name)] {
            if value.trim().is_empty() {
                return Err(BuilderError::new(BuilderErrorKind::InvalidField {
                    field: field.to_string(),
                    reason: "must be a non-empty string".to_string(),
                }));
            }
        }
        Ok(request)
    }
}
