//! Hello world tool definition.
//!
//! The simplest possible tool: greets a name, defaulting to "World".

use chrono::Local;
use tracing::{debug, info};

use crate::domains::tools::definitions::common::str_arg;
use crate::domains::tools::handlers::{ToolContext, ToolHandler};
use crate::domains::tools::registry::ToolDefinition;
use crate::domains::tools::schema::{JsonObject, ParamSpec, ParamType, ParameterSchema};

// ============================================================================
// Tool Definition
// ============================================================================

/// Hello world tool - returns a greeting.
pub struct HelloWorldTool;

impl HelloWorldTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "hello_world";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "A simple greeting tool that returns a hello message";

    /// Parameters accepted by this tool.
    pub fn schema() -> ParameterSchema {
        ParameterSchema::new().param(
            ParamSpec::optional("name", ParamType::String, "Name to greet (optional)")
                .with_default("World"),
        )
    }

    /// Registry entry for this tool.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Self)
    }

    /// Build the greeting for `name`.
    pub fn execute(name: &str) -> String {
        let timestamp = Local::now().to_rfc3339();
        format!("Hello, {}! 👋\n\nGenerated at: {}", name, timestamp)
    }
}

#[async_trait::async_trait]
impl ToolHandler for HelloWorldTool {
    async fn call(&self, arguments: &JsonObject, _context: &ToolContext<'_>) -> anyhow::Result<String> {
        debug!("Arguments: {:?}", arguments);
        let name = str_arg(arguments, "name")?;
        info!("hello_world greeting for '{}'", name);
        Ok(Self::execute(name))
    }
}
