//! Tool-specific error types.

use thiserror::Error;

use super::outcome::ErrorKind;
use super::validator::ValidationError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Two definitions were registered under the same name.
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    /// A tool's parameter schema is inconsistent.
    #[error("Invalid schema for tool '{tool}': {reason}")]
    InvalidSchema { tool: String, reason: String },

    /// Invalid arguments were provided to the tool.
    #[error("{0}")]
    InvalidArguments(#[from] ValidationError),

    /// The tool handler failed.
    #[error("{0}")]
    ExecutionFailed(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid schema" error.
    pub fn invalid_schema(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The error kind reported to clients.
    ///
    /// Registry construction errors never reach a client; they map to
    /// `InternalError` for completeness.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::ToolNotFound,
            Self::InvalidArguments(_) => ErrorKind::InvalidArguments,
            Self::ExecutionFailed(_) => ErrorKind::HandlerError,
            Self::DuplicateTool(_) | Self::InvalidSchema { .. } | Self::Internal(_) => {
                ErrorKind::InternalError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ToolError::not_found("nope");
        assert_eq!(err.to_string(), "Unknown tool: nope");
        assert_eq!(err.kind(), ErrorKind::ToolNotFound);
    }

    #[test]
    fn test_validation_error_converts() {
        let err: ToolError = ValidationError::MissingParameter("b".into()).into();
        assert_eq!(err.kind(), ErrorKind::InvalidArguments);
        assert_eq!(err.to_string(), "Missing required parameter: b");
    }

    #[test]
    fn test_execution_failed_is_handler_error() {
        let err = ToolError::execution_failed("boom");
        assert_eq!(err.kind(), ErrorKind::HandlerError);
        assert_eq!(err.to_string(), "boom");
    }
}
