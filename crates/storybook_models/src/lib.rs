//! Generation side of the storybook MCP server.
//!
//! [`StorybookDriver`] abstracts a streaming provider; [`GeminiClient`] is the
//! production implementation. [`StoryGenerator`] turns a driver into the two
//! operations a storybook page needs: a story that always arrives and an
//! illustration that either arrives or fails loudly.
//!
//! # Example
//!
//! ```no_run
//! use storybook_core::{ArtStyle, StorybookSettings};
//! use storybook_models::{GeminiClient, StoryGenerator};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = StorybookSettings::default();
//! let client = GeminiClient::new("api-key", settings.gemini().base_url().clone())?;
//! let generator = StoryGenerator::new(client, settings);
//!
//! let story = generator.generate_story("a friendly dragon").await;
//! let image = generator.generate_image("a friendly dragon", ArtStyle::Watercolor).await?;
//! println!("{} ({} bytes)", story.text(), image.data().len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;
mod gemini;
mod generator;

pub use driver::{ChunkStream, StorybookDriver};
pub use gemini::{GeminiClient, chunk_stream};
pub use generator::{StoryGenerator, story_prompt};
