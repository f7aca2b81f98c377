//! Current time tool definition.
//!
//! Reports the local system time in one of three formats. A timezone other
//! than `local` is echoed back in the result but no conversion is applied.

use std::str::FromStr;

use anyhow::bail;
use chrono::{DateTime, Local};
use tracing::info;

use crate::domains::tools::definitions::common::str_arg;
use crate::domains::tools::handlers::{ToolContext, ToolHandler};
use crate::domains::tools::registry::ToolDefinition;
use crate::domains::tools::schema::{JsonObject, ParamSpec, ParamType, ParameterSchema};

/// Output format for the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// RFC 3339.
    Iso,
    /// `YYYY-MM-DD HH:MM:SS`.
    Readable,
    /// Unix seconds with microsecond fraction.
    Timestamp,
}

impl FromStr for TimeFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iso" => Ok(Self::Iso),
            "readable" => Ok(Self::Readable),
            "timestamp" => Ok(Self::Timestamp),
            other => bail!("Unknown time format: {}", other),
        }
    }
}

/// Get time tool - returns the current time.
pub struct GetTimeTool;

impl GetTimeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_time";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get current time in various formats";

    pub fn schema() -> ParameterSchema {
        ParameterSchema::new()
            .param(
                ParamSpec::optional(
                    "format",
                    ParamType::String,
                    "Time format: 'iso', 'readable', or 'timestamp'",
                )
                .with_default("readable")
                .one_of(&["iso", "readable", "timestamp"]),
            )
            .param(
                ParamSpec::optional(
                    "timezone",
                    ParamType::String,
                    "Timezone (e.g., 'UTC', 'US/Eastern')",
                )
                .with_default("local"),
            )
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(Self::NAME, Self::DESCRIPTION, Self::schema(), Self)
    }

    /// Render `now` in the requested format.
    pub fn execute(now: DateTime<Local>, format: TimeFormat, timezone: &str) -> String {
        let time = match format {
            TimeFormat::Iso => now.to_rfc3339(),
            TimeFormat::Readable => now.format("%Y-%m-%d %H:%M:%S").to_string(),
            TimeFormat::Timestamp => {
                format!("{}.{:06}", now.timestamp(), now.timestamp_subsec_micros())
            }
        };

        let mut response = format!("Current time: {}", time);
        if timezone != "local" {
            response.push_str(&format!(" (requested timezone: {})", timezone));
        }
        response
    }
}

#[async_trait::async_trait]
impl ToolHandler for GetTimeTool {
    async fn call(&self, arguments: &JsonObject, _context: &ToolContext<'_>) -> anyhow::Result<String> {
        let format: TimeFormat = str_arg(arguments, "format")?.parse()?;
        let timezone = str_arg(arguments, "timezone")?;
        info!("get_time: format={:?}", format);
        Ok(Self::execute(Local::now(), format, timezone))
    }
}
