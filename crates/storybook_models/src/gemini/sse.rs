//! Server-sent event decoding for streamed Gemini responses.

use super::protocol::GeminiResponse;
use crate::ChunkStream;
use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt, future};
use storybook_error::{GeminiError, GeminiErrorKind, StorybookError};

/// Decode an SSE byte stream into response chunks.
///
/// Each `data:` payload is one JSON response. Empty payloads are skipped.
/// Transport failures surface as [`GeminiErrorKind::StreamInterrupted`] and
/// undecodable payloads as [`GeminiErrorKind::InvalidResponse`].
///
/// # Examples
///
/// ```
/// use futures_util::{StreamExt, stream};
/// use storybook_models::chunk_stream;
///
/// # #[tokio::main]
/// # async fn main() {
/// let body = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Once\"}]}}]}\n\n";
/// let bytes = stream::iter(vec![Ok::<_, std::io::Error>(body)]);
///
/// let mut chunks = chunk_stream(bytes);
/// let chunk = chunks.next().await.unwrap().unwrap();
/// assert_eq!(chunk.text(), "Once");
/// # }
/// ```
pub fn chunk_stream<S, B, E>(bytes: S) -> ChunkStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let chunks = bytes
        .eventsource()
        .map(|event| match event {
            Ok(event) if event.data.trim().is_empty() => None,
            Ok(event) => Some(decode_event(&event.data)),
            Err(e) => Some(Err(GeminiError::new(GeminiErrorKind::StreamInterrupted(
                e.to_string(),
            ))
            .into())),
        })
        .filter_map(future::ready);

    Box::pin(chunks)
}

fn decode_event(data: &str) -> Result<storybook_core::ResponseChunk, StorybookError> {
    let response: GeminiResponse = serde_json::from_str(data).map_err(|e| {
        tracing::debug!(error = %e, data, "Undecodable stream event");
        GeminiError::new(GeminiErrorKind::InvalidResponse(e.to_string()))
    })?;
    Ok(response.into_chunk()?)
}
