//! Addition tool definition.

use tracing::info;

use crate::domains::tools::definitions::common::number_arg;
use crate::domains::tools::handlers::{ToolContext, ToolHandler};
use crate::domains::tools::registry::ToolDefinition;
use crate::domains::tools::schema::{JsonObject, ParamSpec, ParamType, ParameterSchema};

/// Math add tool - adds two numbers.
pub struct MathAddTool;

impl MathAddTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "math_add";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add two numbers together";

    pub fn schema() -> ParameterSchema {
        ParameterSchema::new()
            .param(ParamSpec::required("a", ParamType::Number, "First number"))
            .param(ParamSpec::required("b", ParamType::Number, "Second number"))
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Self)
    }

    /// Format `a + b = sum`.
    pub fn execute(a: f64, b: f64) -> String {
        format!("{} + {} = {}", a, b, a + b)
    }
}

#[async_trait::async_trait]
impl ToolHandler for MathAddTool {
    async fn call(&self, arguments: &JsonObject, _context: &ToolContext<'_>) -> anyhow::Result<String> {
        let a = number_arg(arguments, "a")?;
        let b = number_arg(arguments, "b")?;
        let text = Self::execute(a, b);
        info!("math_add: {}", text);
        Ok(text)
    }
}
