//! Layered settings file and the immutable process configuration.

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storybook_error::{ConfigError, StorybookResult};
use tracing::debug;

/// Bundled default settings.
const DEFAULT_SETTINGS: &str = include_str!("../../../storybook.toml");

/// Gemini endpoint, models, and story sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GeminiSettings {
    /// API root, without a trailing slash
    base_url: String,
    /// Model used for story text
    story_model: String,
    /// Model used for illustrations
    image_model: String,
    /// Story sampling temperature
    story_temperature: f32,
    /// Story nucleus sampling cutoff
    story_top_p: f32,
    /// Story length bound
    story_max_output_tokens: u32,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            story_model: "gemini-2.0-flash".to_string(),
            image_model: "gemini-2.0-flash-preview-image-generation".to_string(),
            story_temperature: 0.7,
            story_top_p: 0.9,
            story_max_output_tokens: 1024,
        }
    }
}

/// Where artifacts land relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct OutputSettings {
    /// Directory used in working-directory mode
    working_subdir: String,
    /// Directory used after a failed write
    fallback_subdir: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            working_subdir: "generated_storybooks".to_string(),
            fallback_subdir: "output".to_string(),
        }
    }
}

/// Story generation behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StorySettings {
    /// Narrative returned when the model produces no text
    fallback_text: String,
}

impl Default for StorySettings {
    fn default() -> Self {
        Self {
            fallback_text: "Once upon a time, a curious little adventurer set out to explore the world. Along the way they made new friends, discovered wonderful surprises, and learned that kindness is the greatest treasure of all. The end.".to_string(),
        }
    }
}

/// Settings read from `storybook.toml` layers.
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct StorybookSettings {
    /// Gemini endpoint and models
    gemini: GeminiSettings,
    /// Output directory names
    output: OutputSettings,
    /// Story behavior
    story: StorySettings,
}

impl StorybookSettings {
    /// Load settings with precedence: explicit file > current dir > home dir > bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a layer cannot be read or parsed, or if
    /// `extra` names a file that does not exist.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use storybook_core::StorybookSettings;
    ///
    /// let settings = StorybookSettings::load(None).unwrap();
    /// assert!(!settings.gemini().image_model().is_empty());
    /// ```
    pub fn load(extra: Option<&Path>) -> StorybookResult<Self> {
        debug!(extra = ?extra, "Loading storybook settings");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_settings = home.join(".config/storybook/storybook.toml");
            builder = builder.add_source(File::from(home_settings).required(false));
        }

        builder = builder.add_source(File::with_name("storybook").required(false));

        if let Some(path) = extra {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        Ok(builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build settings: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?)
    }

    /// Parse settings from a TOML string layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the string is not valid settings TOML.
    pub fn from_toml_str(overrides: &str) -> StorybookResult<Self> {
        Ok(Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build settings: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?)
    }

    /// The bundled defaults alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the bundled file fails to parse.
    pub fn bundled() -> StorybookResult<Self> {
        Self::from_toml_str("")
    }
}

/// Immutable configuration established once at startup.
///
/// # Examples
///
/// ```
/// use storybook_core::StorybookConfig;
///
/// let config = StorybookConfig::builder()
///     .api_key("secret")
///     .save_to_desktop(true)
///     .working_dir("/tmp")
///     .build()
///     .unwrap();
///
/// assert!(*config.save_to_desktop());
/// assert!(!format!("{:?}", config).contains("secret"));
/// ```
#[derive(Clone, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct StorybookConfig {
    /// Gemini API key
    api_key: String,
    /// Save to the desktop instead of the working directory
    #[builder(default)]
    save_to_desktop: bool,
    /// Verbose logging
    #[builder(default)]
    debug: bool,
    /// Layered settings
    #[builder(default)]
    settings: StorybookSettings,
    /// Directory relative paths resolve against
    working_dir: PathBuf,
}

impl StorybookConfig {
    /// Start building a configuration.
    pub fn builder() -> StorybookConfigBuilder {
        StorybookConfigBuilder::default()
    }
}

impl std::fmt::Debug for StorybookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorybookConfig")
            .field("api_key", &"[REDACTED]")
            .field("save_to_desktop", &self.save_to_desktop)
            .field("debug", &self.debug)
            .field("settings", &self.settings)
            .field("working_dir", &self.working_dir)
            .finish()
    }
}

impl StorybookConfigBuilder {
    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the API key is missing or blank, or the
    /// working directory was not set.
    #[track_caller]
    pub fn build(&self) -> StorybookResult<StorybookConfig> {
        let config = self
            .build_internal()
            .map_err(|e| ConfigError::new(e.to_string()))?;
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::new(
                "No Gemini API key provided (use --api-key or GEMINI_API_KEY)",
            )
            .into());
        }
        Ok(config)
    }
}
