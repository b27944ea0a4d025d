//! Google Gemini streaming provider.
//!
//! Requests go to the REST `streamGenerateContent` endpoint with `alt=sse`;
//! each server-sent event carries one JSON response that is converted into a
//! provider-neutral [`ResponseChunk`](storybook_core::ResponseChunk).

mod client;
mod protocol;
mod sse;

pub use client::GeminiClient;
pub use sse::chunk_stream;
