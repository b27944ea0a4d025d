//! Story and illustration generation on top of a streaming driver.

use crate::StorybookDriver;
use base64::Engine;
use futures_util::StreamExt;
use storybook_core::{
    ArtStyle, GenerateRequest, GeneratedImage, GeneratedStory, GenerationSettings, Modality,
    StorybookSettings,
};
use storybook_error::{GeminiError, GeminiErrorKind, StorybookResult};
use tracing::instrument;

/// Produces one story and one illustration per invocation.
///
/// Story generation is best-effort and always yields text. Image generation
/// takes the first inline payload and stops reading the stream there.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct StoryGenerator<D> {
    driver: D,
    settings: StorybookSettings,
}

impl<D: StorybookDriver> StoryGenerator<D> {
    /// Create a generator over `driver`.
    pub fn new(driver: D, settings: StorybookSettings) -> Self {
        Self { driver, settings }
    }

    /// Request sent for the story text.
    pub fn story_request(&self, prompt: &str) -> GenerateRequest {
        let gemini = self.settings.gemini();
        GenerateRequest::new(
            gemini.story_model().clone(),
            story_prompt(prompt),
            GenerationSettings::builder()
                .temperature(*gemini.story_temperature())
                .top_p(*gemini.story_top_p())
                .max_output_tokens(*gemini.story_max_output_tokens())
                .response_modalities(vec![Modality::Text])
                .build()
                .unwrap_or_default(),
        )
    }

    /// Request sent for the illustration.
    pub fn image_request(&self, prompt: &str, style: ArtStyle) -> GenerateRequest {
        GenerateRequest::new(
            self.settings.gemini().image_model().clone(),
            style.illustrate(prompt),
            GenerationSettings::builder()
                .response_modalities(vec![Modality::Text, Modality::Image])
                .build()
                .unwrap_or_default(),
        )
    }

    /// Generate the story, draining the whole stream.
    ///
    /// Never fails: an empty stream yields the fallback narrative and any
    /// error yields the fallback with the error appended.
    #[instrument(skip(self), fields(provider = self.driver.provider_name()))]
    pub async fn generate_story(&self, prompt: &str) -> GeneratedStory {
        match self.collect_story(prompt).await {
            Ok(text) if !text.trim().is_empty() => {
                tracing::info!(chars = text.len(), "Generated story");
                GeneratedStory::generated(text.trim())
            }
            Ok(_) => {
                tracing::warn!("Story stream produced no text, using fallback");
                GeneratedStory::fallback(self.settings.story().fallback_text().clone())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Story generation failed, using fallback");
                GeneratedStory::fallback(format!(
                    "{}\n\n(Story generation error: {})",
                    self.settings.story().fallback_text(),
                    e
                ))
            }
        }
    }

    async fn collect_story(&self, prompt: &str) -> StorybookResult<String> {
        let mut stream = self.driver.stream_content(&self.story_request(prompt)).await?;
        let mut text = String::new();
        let mut finish_reason = None;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            text.push_str(&chunk.text());
            if let Some(reason) = chunk.finish_reason() {
                finish_reason = Some(reason.clone());
            }
        }
        tracing::debug!(finish_reason = ?finish_reason, "Story stream finished");
        Ok(text)
    }

    /// Generate the illustration from the first inline payload in the stream.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::NoImageData`] if the stream ends without an
    /// inline payload, [`GeminiErrorKind::Base64Decode`] if the payload is not
    /// valid base64, or any error the stream reports before the payload.
    #[instrument(skip(self), fields(style = %style, provider = self.driver.provider_name()))]
    pub async fn generate_image(
        &self,
        prompt: &str,
        style: ArtStyle,
    ) -> StorybookResult<GeneratedImage> {
        let mut stream = self
            .driver
            .stream_content(&self.image_request(prompt, style))
            .await?;

        let mut finish_reason = None;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if let Some(inline) = chunk.inline_data() {
                let data = base64::engine::general_purpose::STANDARD
                    .decode(&inline.data)
                    .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;
                tracing::info!(mime_type = %inline.mime_type, size = data.len(), "Generated image");
                return Ok(GeneratedImage::new(inline.mime_type.clone(), data));
            }
            let text = chunk.text();
            if !text.is_empty() {
                tracing::debug!(text = %text, "Image stream text");
            }
            if let Some(reason) = chunk.finish_reason() {
                finish_reason = Some(reason.clone());
            }
        }

        tracing::warn!(finish_reason = ?finish_reason, "Image stream ended without inline data");
        Err(GeminiError::new(GeminiErrorKind::NoImageData).into())
    }
}

/// Instructions wrapped around the user's prompt for the story model.
pub fn story_prompt(prompt: &str) -> String {
    format!(
        "Write a short children's story (150 to 250 words) about: {}\n\n\
         Use simple, warm language that young readers can follow and give the \
         story a happy ending. Reply with the story text only, without a title.",
        prompt
    )
}
