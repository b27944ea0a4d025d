//! Provider-neutral request and streamed response types.

use serde::{Deserialize, Serialize};

/// Output modality requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    /// Text output
    #[display("TEXT")]
    Text,
    /// Image output
    #[display("IMAGE")]
    Image,
}

/// Sampling and output configuration for one request.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), default)]
pub struct GenerationSettings {
    /// Sampling temperature
    temperature: Option<f32>,
    /// Upper bound on generated tokens
    max_output_tokens: Option<u32>,
    /// Nucleus sampling cutoff
    top_p: Option<f32>,
    /// Top-k sampling cutoff
    top_k: Option<u32>,
    /// Requested output modalities; empty means provider default
    response_modalities: Vec<Modality>,
}

impl GenerationSettings {
    /// Start building settings; unset fields use the provider default.
    pub fn builder() -> GenerationSettingsBuilder {
        GenerationSettingsBuilder::default()
    }
}

/// One generation request against a streaming provider.
///
/// # Examples
///
/// ```
/// use storybook_core::{GenerateRequest, GenerationSettings};
///
/// let request = GenerateRequest::builder()
///     .model("gemini-2.0-flash")
///     .prompt("Tell me a story")
///     .settings(GenerationSettings::default())
///     .build()
///     .unwrap();
///
/// assert_eq!(request.model(), "gemini-2.0-flash");
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder, derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Model identifier
    model: String,
    /// Single user prompt
    prompt: String,
    /// Sampling configuration
    #[builder(default)]
    settings: GenerationSettings,
}

impl GenerateRequest {
    /// Create a request directly.
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            settings,
        }
    }

    /// Start building a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Base64 payload carried inline in a response part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineData {
    /// MIME type reported by the provider
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

/// One part of a streamed response chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkPart {
    /// Text fragment
    Text(String),
    /// Inline binary payload
    InlineData(InlineData),
}

/// One incrementally delivered fragment of a provider response.
///
/// # Examples
///
/// ```
/// use storybook_core::{ChunkPart, ResponseChunk};
///
/// let chunk = ResponseChunk::new(vec![
///     ChunkPart::Text("Once ".to_string()),
///     ChunkPart::Text("upon a time".to_string()),
/// ]);
/// assert_eq!(chunk.text(), "Once upon a time");
/// assert!(chunk.inline_data().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ResponseChunk {
    /// Parts in arrival order
    parts: Vec<ChunkPart>,
    /// Finish reason, present on the last chunk
    finish_reason: Option<String>,
}

impl ResponseChunk {
    /// Create a chunk from its parts.
    pub fn new(parts: Vec<ChunkPart>) -> Self {
        Self {
            parts,
            finish_reason: None,
        }
    }

    /// Chunk holding a single text fragment.
    pub fn text_fragment(text: impl Into<String>) -> Self {
        Self::new(vec![ChunkPart::Text(text.into())])
    }

    /// Chunk holding a single inline payload.
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(vec![ChunkPart::InlineData(InlineData {
            mime_type: mime_type.into(),
            data: data.into(),
        })])
    }

    /// Mark this chunk as the final one.
    pub fn with_finish_reason(mut self, reason: impl Into<String>) -> Self {
        self.finish_reason = Some(reason.into());
        self
    }

    /// Concatenated text of every text part.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                ChunkPart::Text(text) => Some(text.as_str()),
                ChunkPart::InlineData(_) => None,
            })
            .collect()
    }

    /// First inline payload in this chunk, if any.
    pub fn inline_data(&self) -> Option<&InlineData> {
        self.parts.iter().find_map(|part| match part {
            ChunkPart::InlineData(data) => Some(data),
            ChunkPart::Text(_) => None,
        })
    }
}

/// Story text produced once per invocation.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct GeneratedStory {
    /// Story text, never empty
    text: String,
    /// True when the text is the fallback narrative rather than model output
    is_fallback: bool,
}

impl GeneratedStory {
    /// Story produced by the model.
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_fallback: false,
        }
    }

    /// Fallback narrative used when generation produced nothing.
    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_fallback: true,
        }
    }
}

/// Decoded illustration bytes.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct GeneratedImage {
    /// MIME type reported by the provider
    mime_type: String,
    /// Decoded image bytes
    data: Vec<u8>,
}

impl GeneratedImage {
    /// Wrap decoded bytes.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }
}
