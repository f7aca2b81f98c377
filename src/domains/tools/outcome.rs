//! Invocation requests and outcomes.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

use super::error::ToolError;
use super::schema::JsonObject;

/// Classification of a failed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The requested name is not registered.
    ToolNotFound,
    /// A required parameter is missing or a parameter has the wrong type.
    InvalidArguments,
    /// The handler failed while executing.
    HandlerError,
    /// Failure inside the dispatcher itself.
    InternalError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToolNotFound => "ToolNotFound",
            Self::InvalidArguments => "InvalidArguments",
            Self::HandlerError => "HandlerError",
            Self::InternalError => "InternalError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to run one named tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: JsonObject,
}

impl InvocationRequest {
    pub fn new(name: impl Into<String>, arguments: JsonObject) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Result of one invocation attempt.
///
/// Serializes as `{"ok": true, "text": ...}` or
/// `{"ok": false, "errorKind": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success { text: String },
    Failure { kind: ErrorKind, message: String },
}

impl Serialize for ToolOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Self::Success { text } => {
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("text", text)?;
            }
            Self::Failure { kind, message } => {
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("errorKind", kind)?;
                map.serialize_entry("message", message)?;
            }
        }
        map.end()
    }
}

impl ToolOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Error kind of a failure, `None` on success.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Payload text on success, message on failure.
    pub fn text(&self) -> &str {
        match self {
            Self::Success { text } => text,
            Self::Failure { message, .. } => message,
        }
    }

    /// Convert into an MCP tool result. Failures become `isError` results so
    /// that they reach the client as content rather than as protocol errors.
    pub fn into_call_result(self) -> CallToolResult {
        match self {
            Self::Success { text } => CallToolResult::success(vec![Content::text(text)]),
            Self::Failure { message, .. } => CallToolResult::error(vec![Content::text(message)]),
        }
    }
}

impl From<ToolError> for ToolOutcome {
    fn from(err: ToolError) -> Self {
        Self::failure(err.kind(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_wire_shape() {
        let value = serde_json::to_value(ToolOutcome::success("8")).unwrap();
        assert_eq!(value, json!({"ok": true, "text": "8"}));
    }

    #[test]
    fn test_failure_wire_shape() {
        let outcome = ToolOutcome::failure(ErrorKind::ToolNotFound, "Unknown tool: x");
        let value = serde_json::to_value(outcome).unwrap();
        assert_eq!(
            value,
            json!({"ok": false, "errorKind": "ToolNotFound", "message": "Unknown tool: x"})
        );
    }

    #[test]
    fn test_from_tool_error() {
        let outcome: ToolOutcome = ToolError::not_found("x").into();
        assert_eq!(outcome.error_kind(), Some(ErrorKind::ToolNotFound));
        assert_eq!(outcome.text(), "Unknown tool: x");
    }

    #[test]
    fn test_failure_becomes_error_result() {
        let result = ToolOutcome::failure(ErrorKind::HandlerError, "boom").into_call_result();
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_request_arguments_default_to_empty() {
        let request: InvocationRequest = serde_json::from_value(json!({"name": "echo"})).unwrap();
        assert!(request.arguments.is_empty());
    }
}
