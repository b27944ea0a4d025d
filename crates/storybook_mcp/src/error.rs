//! Error types for MCP server.

use rmcp::ErrorData;
use storybook_error::{StorybookError, StorybookErrorKind};

/// Errors that can occur in the MCP server.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum McpError {
    /// Tool not found
    #[display("Tool not found: {}", _0)]
    ToolNotFound(String),

    /// Invalid tool input
    #[display("Invalid tool input: {}", _0)]
    InvalidInput(String),

    /// Tool execution failed
    #[display("Tool execution failed: {}", _0)]
    ToolExecutionFailed(String),
}

impl std::error::Error for McpError {}

/// Result type for MCP operations.
pub type McpResult<T> = Result<T, McpError>;

/// Validation failures are the caller's fault; everything else is ours.
impl From<StorybookError> for McpError {
    fn from(err: StorybookError) -> Self {
        match err.kind() {
            StorybookErrorKind::Builder(e) => Self::InvalidInput(e.kind().to_string()),
            _ => Self::ToolExecutionFailed(err.to_string()),
        }
    }
}

impl From<McpError> for ErrorData {
    fn from(err: McpError) -> Self {
        match err {
            McpError::ToolNotFound(_) | McpError::InvalidInput(_) => {
                ErrorData::invalid_params(err.to_string(), None)
            }
            McpError::ToolExecutionFailed(_) => ErrorData::internal_error(err.to_string(), None),
        }
    }
}
