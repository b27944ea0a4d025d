//! HTML preview rendering and best-effort opening.

use crate::{DesktopLocator, writer::write_file};
use std::path::Path;
use std::sync::Arc;
use storybook_core::{ArtifactKind, SavedArtifact};
use storybook_error::{PreviewError, PreviewErrorKind, StorageError, StorageErrorKind, StorybookResult};

const PREVIEW_TEMPLATE: &str = include_str!("../templates/preview.html");

/// Launches a document in the platform's default viewer.
pub trait PreviewOpener: Send + Sync {
    /// Open `path`, blocking until the launcher returns.
    fn open(&self, path: &Path) -> Result<(), PreviewError>;
}

/// Opener backed by the desktop's default application.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl PreviewOpener for SystemOpener {
    fn open(&self, path: &Path) -> Result<(), PreviewError> {
        open::that(path).map_err(|e| {
            PreviewError::new(PreviewErrorKind::Open(format!("{}: {}", path.display(), e)))
        })
    }
}

/// What happened when the preview was handed to the desktop.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum OpenOutcome {
    /// The default viewer accepted the document
    #[display("opened")]
    Opened,
    /// No graphical session; nothing was launched
    #[display("skipped (headless)")]
    SkippedHeadless,
    /// Launching failed; the invocation still succeeds
    #[display("failed: {}", _0)]
    Failed(String),
}

/// Renders the preview page and tries to show it.
#[derive(Clone)]
pub struct PreviewComposer {
    locator: DesktopLocator,
    opener: Arc<dyn PreviewOpener>,
}

impl std::fmt::Debug for PreviewComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewComposer")
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

impl PreviewComposer {
    /// Composer that opens previews with the system default viewer.
    pub fn new(locator: DesktopLocator) -> Self {
        Self::with_opener(locator, Arc::new(SystemOpener))
    }

    /// Composer with a custom opener.
    pub fn with_opener(locator: DesktopLocator, opener: Arc<dyn PreviewOpener>) -> Self {
        Self { locator, opener }
    }

    /// Render and write `<image stem>_preview.html` next to the image.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewErrorKind::Render`] if the template fails, or a
    /// [`StorageError`] if the document cannot be written.
    #[tracing::instrument(skip(self, story), fields(image = %image.as_path().display()))]
    pub async fn build_preview(
        &self,
        prompt: &str,
        story: &str,
        image: &SavedArtifact,
        story_file: &SavedArtifact,
    ) -> StorybookResult<SavedArtifact> {
        let html = render_preview(prompt, story, image.as_path(), story_file.as_path())?;

        let image_path = image.as_path();
        let stem = image_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::InvalidPath(format!(
                    "{} has no file name",
                    image_path.display()
                )))
            })?;
        let target = image_path.with_file_name(format!("{}_preview.html", stem));

        let path = write_file(&target, html.as_bytes()).await?;
        tracing::info!(path = %path.display(), "Wrote preview");
        Ok(SavedArtifact::new(ArtifactKind::Preview, path))
    }

    /// Try to show the preview. Never fails the caller.
    #[tracing::instrument(skip(self))]
    pub async fn open_preview(&self, path: &Path) -> OpenOutcome {
        if self.locator.is_headless() {
            tracing::info!("No display available, skipping preview");
            return OpenOutcome::SkippedHeadless;
        }

        let opener = Arc::clone(&self.opener);
        let target = path.to_path_buf();
        let outcome = match tokio::task::spawn_blocking(move || opener.open(&target)).await {
            Ok(Ok(())) => OpenOutcome::Opened,
            Ok(Err(e)) => OpenOutcome::Failed(e.to_string()),
            Err(e) => OpenOutcome::Failed(format!("opener task failed: {}", e)),
        };

        match &outcome {
            OpenOutcome::Failed(reason) => tracing::warn!(reason = %reason, "Could not open preview"),
            _ => tracing::debug!("Opened preview"),
        }
        outcome
    }
}

/// Render the preview document.
///
/// Every value is HTML-escaped; line breaks in the story survive through
/// `white-space: pre-wrap`.
///
/// # Errors
///
/// Returns [`PreviewErrorKind::Render`] if the template cannot be rendered.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use storybook_storage::render_preview;
///
/// let html = render_preview(
///     "a <brave> dragon",
///     "Once upon a time",
///     Path::new("/out/dragon.png"),
///     Path::new("/out/dragon_story.txt"),
/// )
/// .unwrap();
///
/// assert!(html.contains("a &lt;brave&gt; dragon"));
/// assert!(html.contains("Once upon a time"));
/// ```
pub fn render_preview(
    prompt: &str,
    story: &str,
    image_path: &Path,
    story_path: &Path,
) -> StorybookResult<String> {
    let mut context = tera::Context::new();
    context.insert("prompt", prompt);
    context.insert("story", story);
    context.insert("image_uri", &file_uri(image_path));
    context.insert("image_path", &image_path.display().to_string());
    context.insert("story_path", &story_path.display().to_string());

    Ok(tera::Tera::one_off(PREVIEW_TEMPLATE, &context, true)
        .map_err(|e| PreviewError::new(PreviewErrorKind::Render(e.to_string())))?)
}

/// `file://` URI for an absolute path, with Windows separators normalized.
pub fn file_uri(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let mut uri = String::from("file://");
    if !normalized.starts_with('/') {
        uri.push('/');
    }
    for ch in normalized.chars() {
        match ch {
            ' ' => uri.push_str("%20"),
            '#' => uri.push_str("%23"),
            '?' => uri.push_str("%3F"),
            '%' => uri.push_str("%25"),
            _ => uri.push(ch),
        }
    }
    uri
}
