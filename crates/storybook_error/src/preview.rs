//! Preview document error types.

/// Kinds of preview errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PreviewErrorKind {
    /// Template rendering failed
    #[display("Failed to render preview: {}", _0)]
    Render(String),
    /// The platform opener failed
    #[display("Failed to open preview: {}", _0)]
    Open(String),
}

/// Preview error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Preview Error: {} at line {} in {}", kind, line, file)]
pub struct PreviewError {
    /// The kind of error that occurred
    pub kind: PreviewErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PreviewError {
    /// Create a new preview error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PreviewErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
