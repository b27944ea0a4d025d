//! Streaming provider abstraction.

use async_trait::async_trait;
use futures_util::Stream;
use std::pin::Pin;
use storybook_core::{GenerateRequest, ResponseChunk};
use storybook_error::StorybookResult;

/// Finite, lazily produced, non-restartable sequence of response chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = StorybookResult<ResponseChunk>> + Send>>;

/// A provider that answers a [`GenerateRequest`] with a chunk stream.
///
/// Dropping the stream stops consumption; callers that only need a prefix
/// (the first image) may drop it early.
#[async_trait]
pub trait StorybookDriver: Send + Sync {
    /// Open a streaming generation call.
    ///
    /// # Errors
    ///
    /// Returns an error if the call cannot be started. Failures after the
    /// stream is returned arrive as stream items.
    async fn stream_content(&self, request: &GenerateRequest) -> StorybookResult<ChunkStream>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}
