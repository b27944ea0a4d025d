//! The `generate_storybook_image` tool.

use crate::tools::McpTool;
use crate::{McpError, McpResult};
use async_trait::async_trait;
use chrono::Local;
use serde_json::{Value, json};
use storybook_core::{ArtStyle, GenerationOutcome, StorybookConfig, StorybookRequest};
use storybook_error::StorybookResult;
use storybook_models::{GeminiClient, StoryGenerator, StorybookDriver};
use storybook_storage::{ArtifactWriter, DesktopLocator, PathResolver, PreviewComposer};
use tracing::{info, instrument};

/// Generates a story and an illustration, saves both with an HTML preview,
/// and returns the three paths.
pub struct GenerateStorybookTool<D> {
    generator: StoryGenerator<D>,
    writer: ArtifactWriter,
    preview: PreviewComposer,
}

impl GenerateStorybookTool<GeminiClient> {
    /// Wire the tool to Gemini using the process configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the Gemini client cannot be created.
    pub fn from_config(config: &StorybookConfig, locator: DesktopLocator) -> StorybookResult<Self> {
        let client = GeminiClient::from_config(config)?;
        let resolver = PathResolver::new(
            locator.clone(),
            config.working_dir().clone(),
            config.settings().output(),
        );
        Ok(Self::new(
            StoryGenerator::new(client, config.settings().clone()),
            ArtifactWriter::new(resolver, *config.save_to_desktop()),
            PreviewComposer::new(locator),
        ))
    }
}

impl<D: StorybookDriver> GenerateStorybookTool<D> {
    /// Assemble the tool from its parts.
    pub fn new(generator: StoryGenerator<D>, writer: ArtifactWriter, preview: PreviewComposer) -> Self {
        Self {
            generator,
            writer,
            preview,
        }
    }

    /// Run the whole pipeline for one validated request.
    ///
    /// The story is saved before the image is requested, so it stays on disk
    /// when image generation fails.
    #[instrument(skip(self), fields(file_name = %request.file_name()))]
    pub async fn generate(&self, request: &StorybookRequest) -> StorybookResult<GenerationOutcome> {
        let story = self.generator.generate_story(request.prompt()).await;
        let story_file = self
            .writer
            .save_text(story.text(), &request.story_file_name())
            .await?;

        let image = self
            .generator
            .generate_image(request.prompt(), *request.art_style())
            .await?;
        let image_file = self
            .writer
            .save_bytes(image.data(), &request.image_file_name(Local::now()))
            .await?;

        let preview = self
            .preview
            .build_preview(request.prompt(), story.text(), &image_file, &story_file)
            .await?;
        let opened = self.preview.open_preview(preview.as_path()).await;

        info!(
            story_fallback = *story.is_fallback(),
            preview = %opened,
            "Storybook page created"
        );

        Ok(GenerationOutcome::new(
            image_file.as_path().display().to_string(),
            story_file.as_path().display().to_string(),
            preview.as_path().display().to_string(),
        ))
    }

    fn parse_request(input: &Value) -> McpResult<StorybookRequest> {
        let prompt = required_str(input, "prompt")?;
        let file_name = required_str(input, "fileName")?;
        let art_style = input
            .get("artStyle")
            .and_then(Value::as_str)
            .map(ArtStyle::parse_or_default)
            .unwrap_or_default();

        Ok(StorybookRequest::builder()
            .prompt(prompt)
            .file_name(file_name)
            .art_style(art_style)
            .build()
            .map_err(|e| McpError::InvalidInput(e.kind().to_string()))?)
    }
}

fn required_str<'a>(input: &'a Value, field: &str) -> McpResult<&'a str> {
    input
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| McpError::InvalidInput(format!("Missing '{}' field", field)))
}

#[async_trait]
impl<D: StorybookDriver + 'static> McpTool for GenerateStorybookTool<D> {
    fn name(&self) -> &str {
        "generate_storybook_image"
    }

    fn description(&self) -> &str {
        "Generates a short children's story and a matching illustration from a prompt, \
         saves both with an HTML preview, and returns the file paths."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "What the story and illustration should be about"
                },
                "fileName": {
                    "type": "string",
                    "description": "Base name for the saved files; a trailing .png keeps the image name unchanged"
                },
                "artStyle": {
                    "type": "string",
                    "description": "Illustration style",
                    "enum": ArtStyle::names(),
                    "default": ArtStyle::default().to_string()
                }
            },
            "required": ["prompt", "fileName"]
        })
    }

    async fn execute(&self, input: Value) -> McpResult<Value> {
        let request = Self::parse_request(&input)?;
        let outcome = self.generate(&request).await?;
        serde_json::to_value(&outcome).map_err(|e| McpError::ToolExecutionFailed(e.to_string()))
    }
}
