//! Debug information tool definition.
//!
//! Reports server identity, uptime and request statistics, and optionally
//! the registered tool catalogue.

use chrono::Local;
use serde_json::{Value, json};
use tracing::info;

use crate::domains::tools::definitions::common::bool_arg;
use crate::domains::tools::handlers::{ToolContext, ToolHandler};
use crate::domains::tools::registry::ToolDefinition;
use crate::domains::tools::schema::{JsonObject, ParamSpec, ParamType, ParameterSchema};

/// Header line of the debug report.
pub const REPORT_HEADER: &str = "🔍 MCP Server Debug Information";

/// Debug info tool - server introspection.
pub struct DebugInfoTool;

impl DebugInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "debug_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get debug information about the MCP server";

    pub fn schema() -> ParameterSchema {
        ParameterSchema::new()
            .param(
                ParamSpec::optional(
                    "include_tools",
                    ParamType::Boolean,
                    "Include tool information in response",
                )
                .with_default(true),
            )
            .param(
                ParamSpec::optional(
                    "include_stats",
                    ParamType::Boolean,
                    "Include server statistics",
                )
                .with_default(true),
            )
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Self)
    }

    /// Collect the report as JSON.
    pub fn collect(context: &ToolContext<'_>, include_tools: bool, include_stats: bool) -> Value {
        let stats = context.stats;
        let uptime_seconds = stats.uptime_seconds();

        let mut report = json!({
            "server_name": stats.server_name(),
            "server_version": stats.server_version(),
            "start_time": stats.started_at().to_rfc3339(),
            "uptime_seconds": uptime_seconds,
            "request_count": stats.request_count(),
            "timestamp": Local::now().to_rfc3339(),
        });

        if include_tools {
            let tools: Vec<Value> = context
                .registry
                .list_all()
                .iter()
                .map(|t| {
                    json!({
                        "name": t.name(),
                        "description": t.description(),
                        "required_params": t.schema().required_names(),
                    })
                })
                .collect();
            report["tools"] = Value::Array(tools);
        }

        if include_stats {
            let minutes = (uptime_seconds / 60.0).max(1.0);
            report["statistics"] = json!({
                "tools_available": context.registry.len(),
                "avg_requests_per_minute": stats.request_count() as f64 / minutes,
            });
        }

        report
    }
}

#[async_trait::async_trait]
impl ToolHandler for DebugInfoTool {
    async fn call(&self, arguments: &JsonObject, context: &ToolContext<'_>) -> anyhow::Result<String> {
        let include_tools = bool_arg(arguments, "include_tools")?;
        let include_stats = bool_arg(arguments, "include_stats")?;

        let report = Self::collect(context, include_tools, include_stats);
        let text = format!("{}\n\n{}", REPORT_HEADER, serde_json::to_string_pretty(&report)?);

        info!("debug_info completed");
        Ok(text)
    }
}
