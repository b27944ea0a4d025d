//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, GeminiError, PreviewError, StorageError};

/// Every error condition a storybook invocation can hit.
///
/// # Examples
///
/// ```
/// use storybook_error::{StorybookError, StorybookErrorKind, GeminiError, GeminiErrorKind};
///
/// let err: StorybookError = GeminiError::new(GeminiErrorKind::NoImageData).into();
/// assert!(matches!(err.kind(), StorybookErrorKind::Gemini(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StorybookErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder/validation error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Gemini provider error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// File system error
    #[from(StorageError)]
    Storage(StorageError),
    /// Preview rendering or opening error
    #[from(PreviewError)]
    Preview(PreviewError),
}

/// Storybook error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storybook Error: {}", _0)]
pub struct StorybookError(Box<StorybookErrorKind>);

impl StorybookError {
    /// Create a new error from a kind.
    pub fn new(kind: StorybookErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorybookErrorKind {
        &self.0
    }
}

impl<T> From<T> for StorybookError
where
    T: Into<StorybookErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for storybook operations.
pub type StorybookResult<T> = std::result::Result<T, StorybookError>;
