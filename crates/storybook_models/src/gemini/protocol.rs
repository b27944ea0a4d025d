//! Wire types for the Gemini `streamGenerateContent` REST endpoint.

use serde::{Deserialize, Serialize};
use storybook_core::{ChunkPart, GenerateRequest, InlineData, Modality, ResponseChunk};
use storybook_error::{GeminiError, GeminiErrorKind};

/// Request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A text or inline-data part. Unknown part kinds deserialize with both fields empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub thought: bool,
}

/// Inline data with MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String, // base64-encoded
}

/// Sampling configuration.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_modalities: Vec<Modality>,
}

/// One streamed response event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Error object Gemini sends in place of a response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

impl From<&GenerateRequest> for GeminiRequest {
    fn from(request: &GenerateRequest) -> Self {
        let settings = request.settings();
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt().clone()),
                    ..Default::default()
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: *settings.temperature(),
                top_p: *settings.top_p(),
                top_k: *settings.top_k(),
                max_output_tokens: *settings.max_output_tokens(),
                response_modalities: settings.response_modalities().clone(),
            }),
        }
    }
}

impl GeminiResponse {
    /// Convert to a provider-neutral chunk.
    ///
    /// Only the first candidate is read. Thought parts are dropped.
    pub fn into_chunk(self) -> Result<ResponseChunk, GeminiError> {
        if let Some(error) = self.error {
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: error.code,
                message: error.message,
            }));
        }

        let Some(candidate) = self.candidates.into_iter().next() else {
            if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(GeminiError::new(GeminiErrorKind::InvalidResponse(format!(
                    "prompt blocked: {}",
                    reason
                ))));
            }
            return Ok(ResponseChunk::default());
        };

        let parts = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|part| !part.thought)
            .flat_map(|part| {
                let text = part.text.map(ChunkPart::Text);
                let inline = part.inline_data.map(|blob| {
                    ChunkPart::InlineData(InlineData {
                        mime_type: blob.mime_type,
                        data: blob.data,
                    })
                });
                text.into_iter().chain(inline)
            })
            .collect();

        let chunk = ResponseChunk::new(parts);
        Ok(match candidate.finish_reason {
            Some(reason) => chunk.with_finish_reason(reason),
            None => chunk,
        })
    }
}
