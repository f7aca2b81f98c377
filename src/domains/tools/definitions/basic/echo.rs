//! Echo tool definition.
//!
//! Echoes a message back with a prefix.

use tracing::info;

use crate::domains::tools::definitions::common::str_arg;
use crate::domains::tools::handlers::{ToolContext, ToolHandler};
use crate::domains::tools::registry::ToolDefinition;
use crate::domains::tools::schema::{JsonObject, ParamSpec, ParamType, ParameterSchema};

/// Prefix used when the caller does not supply one.
pub const DEFAULT_PREFIX: &str = "Echo: ";

/// Echo tool - returns the message with a prefix.
pub struct EchoTool;

impl EchoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "echo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Echo back the input message with optional prefix";

    pub fn schema() -> ParameterSchema {
        ParameterSchema::new()
            .param(ParamSpec::required(
                "message",
                ParamType::String,
                "Message to echo back",
            ))
            .param(
                ParamSpec::optional(
                    "prefix",
                    ParamType::String,
                    "Optional prefix to add to the message",
                )
                .with_default(DEFAULT_PREFIX),
            )
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Self)
    }

    pub fn execute(message: &str, prefix: &str) -> String {
        format!("{}{}", prefix, message)
    }
}

#[async_trait::async_trait]
impl ToolHandler for EchoTool {
    async fn call(&self, arguments: &JsonObject, _context: &ToolContext<'_>) -> anyhow::Result<String> {
        let message = str_arg(arguments, "message")?;
        let prefix = str_arg(arguments, "prefix")?;
        info!("echo: '{}'", message);
        Ok(Self::execute(message, prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute() {
        assert_eq!(EchoTool::execute("hi", DEFAULT_PREFIX), "Echo: hi");
        assert_eq!(EchoTool::execute("hi", "X: "), "X: hi");
        assert_eq!(EchoTool::execute("", ""), "");
    }

    #[test]
    fn test_schema() {
        assert_eq!(EchoTool::schema().required_names(), vec!["message"]);
    }
}
