//! Command-line parsing and one-time configuration resolution.

use clap::Parser;
use std::path::PathBuf;
use storybook_core::{StorybookConfig, StorybookSettings};
use storybook_error::{ConfigError, StorybookResult};

/// Command-line arguments for the storybook MCP server.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "storybook-mcp")]
#[command(about = "MCP server that turns a prompt into an illustrated storybook page")]
#[command(version)]
pub struct Cli {
    /// Gemini API key (overrides GEMINI_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Save artifacts to the desktop instead of ./generated_storybooks (overrides SAVE_TO_DESKTOP)
    #[arg(long)]
    pub save_to_desktop: bool,

    /// Enable debug logging (overrides DEBUG)
    #[arg(long)]
    pub debug: bool,

    /// Additional settings file layered over the defaults
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// `"true"` / `"false"`, ignoring case. Anything else is treated as unset.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

impl Cli {
    /// Debug level requested by the flag or `DEBUG`, before any other setting is read.
    pub fn debug_enabled(&self, env: impl Fn(&str) -> Option<String>) -> bool {
        self.debug || env("DEBUG").as_deref().and_then(parse_env_flag).unwrap_or(false)
    }

    /// Build the process configuration.
    ///
    /// Explicit flags win over environment values, which win over defaults.
    /// `env` is consulted for `GEMINI_API_KEY`, `SAVE_TO_DESKTOP` and `DEBUG`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if no API key is available or the settings
    /// files cannot be loaded.
    pub fn resolve(
        &self,
        env: impl Fn(&str) -> Option<String>,
        settings: StorybookSettings,
        working_dir: impl Into<PathBuf>,
    ) -> StorybookResult<StorybookConfig> {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| env("GEMINI_API_KEY"))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::new("No Gemini API key provided (use --api-key or GEMINI_API_KEY)")
            })?;

        let save_to_desktop = self.save_to_desktop
            || env("SAVE_TO_DESKTOP")
                .as_deref()
                .and_then(parse_env_flag)
                .unwrap_or(false);

        StorybookConfig::builder()
            .api_key(api_key)
            .save_to_desktop(save_to_desktop)
            .debug(self.debug_enabled(&env))
            .settings(settings)
            .working_dir(working_dir.into())
            .build()
    }

    /// Load settings, honoring `--config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a settings layer cannot be read or parsed.
    pub fn load_settings(&self) -> StorybookResult<StorybookSettings> {
        StorybookSettings::load(self.config.as_deref())
    }
}
