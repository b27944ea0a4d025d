//! Output directory resolution.
//!
//! Desktop lookup depends on the operating system and a handful of
//! environment values. Those are captured once into a [`DesktopLocator`] so
//! the policy can be exercised for any platform from any host.

use std::path::{Path, PathBuf};
use storybook_core::OutputSettings;
use storybook_error::{StorageError, StorageErrorKind, StorybookResult};

/// Operating system family, as far as desktop lookup is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Platform {
    /// Microsoft Windows
    #[strum(serialize = "windows")]
    Windows,
    /// Apple macOS
    #[strum(serialize = "macos")]
    MacOs,
    /// Linux and other Unix-likes
    #[strum(serialize = "unix")]
    Unix,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Unix
        }
    }
}

/// Snapshot of the platform facts used to find the desktop and detect a display.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct DesktopLocator {
    platform: Platform,
    home: PathBuf,
    user_profile: Option<PathBuf>,
    xdg_desktop_dir: Option<PathBuf>,
    display: Option<String>,
}

impl DesktopLocator {
    /// Locator with explicit facts and no environment overrides.
    pub fn new(platform: Platform, home: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            home: home.into(),
            user_profile: None,
            xdg_desktop_dir: None,
            display: None,
        }
    }

    /// Capture the facts of the running process.
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var_os(key).filter(|value| !value.is_empty());
        Self {
            platform: Platform::current(),
            home: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            user_profile: non_empty("USERPROFILE").map(PathBuf::from),
            xdg_desktop_dir: non_empty("XDG_DESKTOP_DIR").map(PathBuf::from),
            display: non_empty("DISPLAY").and_then(|value| value.into_string().ok()),
        }
    }

    /// Set `USERPROFILE`.
    pub fn with_user_profile(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_profile = Some(path.into());
        self
    }

    /// Set `XDG_DESKTOP_DIR`.
    pub fn with_xdg_desktop_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.xdg_desktop_dir = Some(path.into());
        self
    }

    /// Set `DISPLAY`.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Desktop directory under this platform's policy.
    ///
    /// - Windows: `USERPROFILE\Desktop` (or `home\Desktop` without a profile),
    ///   falling back to home when that directory is missing.
    /// - macOS: `home/Desktop`, unchecked.
    /// - Unix: `XDG_DESKTOP_DIR` when it exists, then `home/Desktop` when it
    ///   exists, then home.
    pub fn desktop_dir(&self) -> PathBuf {
        match self.platform {
            Platform::Windows => {
                let profile = self.user_profile.as_ref().unwrap_or(&self.home);
                let desktop = profile.join("Desktop");
                if desktop.is_dir() {
                    desktop
                } else {
                    self.home.clone()
                }
            }
            Platform::MacOs => self.home.join("Desktop"),
            Platform::Unix => {
                if let Some(xdg) = self.xdg_desktop_dir.as_ref().filter(|dir| dir.is_dir()) {
                    return xdg.clone();
                }
                let desktop = self.home.join("Desktop");
                if desktop.is_dir() {
                    desktop
                } else {
                    self.home.clone()
                }
            }
        }
    }

    /// True when no graphical session is available to show a preview.
    pub fn is_headless(&self) -> bool {
        self.display.is_none() && self.platform == Platform::Unix
    }
}

/// Resolves and creates the directory artifacts are written to.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct PathResolver {
    locator: DesktopLocator,
    working_dir: PathBuf,
    working_subdir: String,
    fallback_subdir: String,
}

impl PathResolver {
    /// Resolver rooted at `working_dir` with the configured subdirectory names.
    pub fn new(
        locator: DesktopLocator,
        working_dir: impl Into<PathBuf>,
        output: &OutputSettings,
    ) -> Self {
        Self {
            locator,
            working_dir: working_dir.into(),
            working_subdir: output.working_subdir().clone(),
            fallback_subdir: output.fallback_subdir().clone(),
        }
    }

    /// Resolve the output directory for the save mode and make sure it exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::DirectoryCreation`] if the directory cannot be created.
    #[tracing::instrument(skip(self))]
    pub fn resolve_output_directory(&self, save_to_desktop: bool) -> StorybookResult<PathBuf> {
        let dir = if save_to_desktop {
            self.locator.desktop_dir()
        } else {
            self.working_dir.join(&self.working_subdir)
        };
        ensure_directory(&dir)?;
        tracing::debug!(path = %dir.display(), "Resolved output directory");
        Ok(dir)
    }

    /// Create and return the directory used after a failed write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::DirectoryCreation`] if the directory cannot be created.
    pub fn fallback_directory(&self) -> StorybookResult<PathBuf> {
        let dir = self.working_dir.join(&self.fallback_subdir);
        ensure_directory(&dir)?;
        Ok(dir)
    }
}

fn ensure_directory(dir: &Path) -> StorybookResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryCreation(format!(
            "{}: {}",
            dir.display(),
            e
        )))
    })?;
    Ok(())
}
