//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tools domain configuration.
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the tools domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Reject argument keys that a tool's schema does not declare.
    pub strict_arguments: bool,

    /// File receiving one JSON line per tool invocation.
    pub invocation_log: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "simple-mcp-debug".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            tools: ToolsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = parse_flag(&timestamps).unwrap_or(true);
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(strict) = std::env::var("MCP_STRICT_ARGUMENTS") {
            match parse_flag(&strict) {
                Some(flag) => config.tools.strict_arguments = flag,
                None => warn!("Ignoring invalid MCP_STRICT_ARGUMENTS value: {}", strict),
            }
            info!("Strict argument validation: {}", config.tools.strict_arguments);
        }

        if let Ok(path) = std::env::var("MCP_INVOCATION_LOG") {
            if !path.is_empty() {
                config.tools.invocation_log = Some(PathBuf::from(path));
            }
        }

        config
    }
}

/// Parse a boolean-ish environment value.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "simple-mcp-debug");
        assert_eq!(config.logging.level, "info");
        assert!(!config.tools.strict_arguments);
        assert!(config.tools.invocation_log.is_none());
    }

    #[test]
    fn test_server_name_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "tutorial");
        }
        let config = Config::from_env();
        assert_eq!(config.server.name, "tutorial");
        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
        }
    }

    #[test]
    fn test_tools_config_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_STRICT_ARGUMENTS", "true");
            std::env::set_var("MCP_INVOCATION_LOG", "/tmp/invocations.jsonl");
        }
        let config = Config::from_env();
        assert!(config.tools.strict_arguments);
        assert_eq!(
            config.tools.invocation_log.as_deref(),
            Some(std::path::Path::new("/tmp/invocations.jsonl"))
        );
        unsafe {
            std::env::remove_var("MCP_STRICT_ARGUMENTS");
            std::env::remove_var("MCP_INVOCATION_LOG");
        }
    }

    #[test]
    fn test_invalid_strict_flag_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_STRICT_ARGUMENTS", "maybe");
        }
        let config = Config::from_env();
        assert!(!config.tools.strict_arguments);
        unsafe {
            std::env::remove_var("MCP_STRICT_ARGUMENTS");
        }
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("perhaps"), None);
    }
}
