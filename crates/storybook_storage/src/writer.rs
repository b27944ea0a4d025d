//! Artifact persistence with a single fallback retry.

use crate::PathResolver;
use std::path::{Component, Path, PathBuf};
use storybook_core::{ArtifactKind, SavedArtifact};
use storybook_error::{StorageError, StorageErrorKind, StorybookResult};

/// Writes generated payloads into the resolved output directory.
///
/// A failed resolution or write is retried exactly once in the fallback
/// directory; a second failure is returned to the caller. Writes overwrite
/// whatever is already at the target path.
///
/// # Examples
///
/// ```no_run
/// use storybook_core::OutputSettings;
/// use storybook_storage::{ArtifactWriter, DesktopLocator, PathResolver, Platform};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let locator = DesktopLocator::new(Platform::current(), "/tmp");
/// let resolver = PathResolver::new(locator, "/tmp", &OutputSettings::default());
/// let writer = ArtifactWriter::new(resolver, false);
///
/// let story = writer.save_text("Once upon a time...", "dragon_story.txt").await?;
/// assert!(story.as_path().ends_with("generated_storybooks/dragon_story.txt"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct ArtifactWriter {
    resolver: PathResolver,
    save_to_desktop: bool,
}

impl ArtifactWriter {
    /// Create a writer for the given save mode.
    pub fn new(resolver: PathResolver, save_to_desktop: bool) -> Self {
        Self {
            resolver,
            save_to_desktop,
        }
    }

    /// Save an image payload.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if both the primary and fallback writes fail,
    /// or the file name is not a plain file name.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn save_bytes(&self, data: &[u8], file_name: &str) -> StorybookResult<SavedArtifact> {
        self.save(ArtifactKind::Image, data, file_name).await
    }

    /// Save a UTF-8 story.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if both the primary and fallback writes fail,
    /// or the file name is not a plain file name.
    #[tracing::instrument(skip(self, text), fields(size = text.len()))]
    pub async fn save_text(&self, text: &str, file_name: &str) -> StorybookResult<SavedArtifact> {
        self.save(ArtifactKind::Story, text.as_bytes(), file_name).await
    }

    async fn save(
        &self,
        kind: ArtifactKind,
        data: &[u8],
        file_name: &str,
    ) -> StorybookResult<SavedArtifact> {
        validate_file_name(file_name)?;

        let primary = match self.resolver.resolve_output_directory(self.save_to_desktop) {
            Ok(dir) => write_file(&dir.join(file_name), data).await,
            Err(e) => Err(e),
        };

        let path = match primary {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    file_name,
                    "Write failed, retrying in fallback directory"
                );
                let dir = self.resolver.fallback_directory()?;
                write_file(&dir.join(file_name), data).await?
            }
        };

        tracing::info!(kind = %kind, path = %path.display(), size = data.len(), "Saved artifact");
        Ok(SavedArtifact::new(kind, path))
    }
}

/// Write `data` to `path`, replacing any existing file.
pub(crate) async fn write_file(path: &Path, data: &[u8]) -> StorybookResult<PathBuf> {
    tokio::fs::write(path, data).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    Ok(std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()))
}

fn validate_file_name(file_name: &str) -> StorybookResult<()> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
            "'{}' is not a plain file name",
            file_name
        )))
        .into()),
    }
}
