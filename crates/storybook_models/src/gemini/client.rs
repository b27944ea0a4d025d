//! Gemini REST streaming client.

use super::protocol::GeminiRequest;
use super::sse::chunk_stream;
use crate::{ChunkStream, StorybookDriver};
use async_trait::async_trait;
use storybook_core::{GenerateRequest, StorybookConfig};
use storybook_error::{GeminiError, GeminiErrorKind, StorybookResult};
use tracing::instrument;

/// Client for `models/{model}:streamGenerateContent`.
///
/// # Examples
///
/// ```no_run
/// use storybook_core::{GenerateRequest, GenerationSettings};
/// use storybook_models::{GeminiClient, StorybookDriver};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClient::new("api-key", "https://generativelanguage.googleapis.com/v1beta")?;
/// let request = GenerateRequest::builder()
///     .model("gemini-2.0-flash")
///     .prompt("Tell me a story")
///     .settings(GenerationSettings::default())
///     .build()?;
/// let stream = client.stream_content(&request).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client for the given key and API root.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::MissingApiKey`] for a blank key, or
    /// [`GeminiErrorKind::ClientCreation`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> StorybookResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey).into());
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("storybook-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self {
            http,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the process configuration.
    ///
    /// # Errors
    ///
    /// See [`GeminiClient::new`].
    pub fn from_config(config: &StorybookConfig) -> StorybookResult<Self> {
        Self::new(
            config.api_key().clone(),
            config.settings().gemini().base_url().clone(),
        )
    }

    /// Streaming endpoint for `model`.
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, model
        )
    }
}

#[async_trait]
impl StorybookDriver for GeminiClient {
    #[instrument(skip(self, request), fields(model = %request.model()))]
    async fn stream_content(&self, request: &GenerateRequest) -> StorybookResult<ChunkStream> {
        let body = GeminiRequest::from(request);

        let response = self
            .http
            .post(self.endpoint(request.model()))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            tracing::error!(status = status.as_u16(), body = %message, "Gemini API error");
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            })
            .into());
        }

        tracing::debug!("Streaming response opened");
        Ok(chunk_stream(response.bytes_stream()))
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
