//! File system side of the storybook MCP server.
//!
//! This crate decides where artifacts go, writes them with a single fallback
//! retry, and composes the HTML preview that shows the story next to its
//! illustration.
//!
//! # Example
//!
//! ```no_run
//! use storybook_core::OutputSettings;
//! use storybook_storage::{ArtifactWriter, DesktopLocator, PathResolver, PreviewComposer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let locator = DesktopLocator::from_env();
//! let resolver = PathResolver::new(locator.clone(), std::env::current_dir()?, &OutputSettings::default());
//! let writer = ArtifactWriter::new(resolver, true);
//!
//! let story = writer.save_text("Once upon a time...", "dragon_story.txt").await?;
//! let image = writer.save_bytes(&[0x89, b'P', b'N', b'G'], "dragon.png").await?;
//!
//! let composer = PreviewComposer::new(locator);
//! let preview = composer
//!     .build_preview("a dragon", "Once upon a time...", &image, &story)
//!     .await?;
//! composer.open_preview(preview.as_path()).await;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod preview;
mod resolver;
mod writer;

pub use preview::{OpenOutcome, PreviewComposer, PreviewOpener, SystemOpener, file_uri, render_preview};
pub use resolver::{DesktopLocator, PathResolver, Platform};
pub use storybook_error::{StorageError, StorageErrorKind};
pub use writer::ArtifactWriter;
