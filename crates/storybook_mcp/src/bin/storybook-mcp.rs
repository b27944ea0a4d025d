//! Storybook MCP server binary.

use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use std::sync::Arc;
use storybook_mcp::{Cli, GenerateStorybookTool, StorybookRouter, ToolRegistry};
use storybook_storage::DesktopLocator;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let env = |key: &str| std::env::var(key).ok();

    // stdout carries JSON-RPC, so logs go to stderr
    let level = if cli.debug_enabled(env) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    let settings = cli.load_settings()?;
    let config = match cli.resolve(env, settings, std::env::current_dir()?) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!(error = %e, "Cannot start without configuration");
            eprintln!(
                "storybook-mcp needs a Gemini API key.\n\
                 Pass --api-key <KEY>, set GEMINI_API_KEY, or add it to a .env file."
            );
            std::process::exit(1);
        }
    };

    tracing::info!(
        save_to_desktop = *config.save_to_desktop(),
        debug = *config.debug(),
        working_dir = %config.working_dir().display(),
        "Starting Storybook MCP server"
    );

    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(GenerateStorybookTool::from_config(
        &config,
        DesktopLocator::from_env(),
    )?));

    let router = StorybookRouter::builder()
        .name("storybook")
        .version(env!("CARGO_PKG_VERSION"))
        .tools(tools)
        .build();

    tracing::info!(tools = router.tool_list().len(), "Server ready, listening on stdio");

    let service = router.serve(stdio()).await.inspect_err(|e| {
        tracing::error!(error = ?e, "MCP serve error");
    })?;
    service.waiting().await?;

    Ok(())
}
