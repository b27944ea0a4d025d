//! Model Context Protocol (MCP) server for storybook generation.
//!
//! This crate exposes a single tool, `generate_storybook_image`, that writes a
//! short children's story, asks Gemini for a matching illustration, saves both
//! next to an HTML preview, and returns the paths.
//!
//! # Usage
//!
//! ```no_run
//! use rmcp::{ServiceExt, transport::stdio};
//! use std::sync::Arc;
//! use storybook_core::StorybookConfig;
//! use storybook_mcp::{GenerateStorybookTool, StorybookRouter, ToolRegistry};
//! use storybook_storage::DesktopLocator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = StorybookConfig::builder()
//!         .api_key("api-key")
//!         .working_dir(std::env::current_dir()?)
//!         .build()?;
//!
//!     let mut tools = ToolRegistry::new();
//!     tools.register(Arc::new(GenerateStorybookTool::from_config(
//!         &config,
//!         DesktopLocator::from_env(),
//!     )?));
//!
//!     let router = StorybookRouter::builder()
//!         .name("storybook")
//!         .version(env!("CARGO_PKG_VERSION"))
//!         .tools(tools)
//!         .build();
//!
//!     router.serve(stdio()).await?.waiting().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bootstrap;
mod error;
mod server;
pub mod tools;

pub use bootstrap::{Cli, parse_env_flag};
pub use error::{McpError, McpResult};
pub use server::{StorybookRouter, StorybookRouterBuilder};
pub use tools::{GenerateStorybookTool, McpTool, ToolRegistry};
