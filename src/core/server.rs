//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool discovery and invocation to the
//! [`Dispatcher`].
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and collected into an immutable `ToolRegistry` at startup. The server
//! never inspects tools itself: `tools/list` maps to `Dispatcher::discover`
//! and `tools/call` maps to `Dispatcher::invoke`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::config::Config;
use super::error::Result;
use crate::domains::tools::{
    ArgumentValidator, Dispatcher, JsonObject, JsonlSink, ServerStats, ToolDescriptor,
    ToolOutcome, ToolRegistry,
};

/// Instructions sent to clients on initialization.
const INSTRUCTIONS: &str = "A simple MCP server for learning and debugging the protocol. \
     Use list_tools to discover hello_world, echo, get_time, math_add and debug_info.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. It is cheap to
/// clone; clones share the same dispatcher and registry.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool discovery and invocation.
    dispatcher: Arc<Dispatcher>,
}

impl McpServer {
    /// Create a new MCP server with the built-in tools.
    pub fn new(config: Config) -> Result<Self> {
        let registry = Arc::new(ToolRegistry::builtin()?);
        Ok(Self::with_registry(config, registry))
    }

    /// Create a new MCP server serving the given registry.
    pub fn with_registry(config: Config, registry: Arc<ToolRegistry>) -> Self {
        let stats = Arc::new(ServerStats::new(
            config.server.name.clone(),
            config.server.version.clone(),
        ));

        let validator = if config.tools.strict_arguments {
            ArgumentValidator::strict()
        } else {
            ArgumentValidator::new()
        };

        let mut dispatcher = Dispatcher::new(registry, stats).with_validator(validator);

        if let Some(path) = &config.tools.invocation_log {
            match JsonlSink::open(path) {
                Ok(sink) => {
                    info!("Recording invocations to {}", path.display());
                    dispatcher = dispatcher.with_sink(Arc::new(sink));
                }
                Err(e) => warn!("Invocation log {} unavailable: {}", path.display(), e),
            }
        }

        info!("Registered {} tools", dispatcher.registry().len());

        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Describe all tools as MCP tool models, counting the request.
    pub fn discover(&self) -> Vec<Tool> {
        let count = self.dispatcher.stats().record_request();
        let tools: Vec<Tool> = self
            .dispatcher
            .discover()
            .iter()
            .map(ToolDescriptor::to_tool)
            .collect();
        info!("list_tools request #{}: returning {} tools", count, tools.len());
        tools
    }

    /// Invoke a tool by name, counting the request.
    pub async fn invoke(&self, name: &str, arguments: &JsonObject) -> ToolOutcome {
        let count = self.dispatcher.stats().record_request();
        info!("call_tool request #{}: {}", count, name);
        self.dispatcher.invoke(name, arguments).await
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools as JSON (for HTTP transport).
    pub fn list_tools_json(&self) -> Vec<serde_json::Value> {
        self.discover()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        };
        info.server_info.name = self.name().to_string();
        info.server_info.version = self.version().to_string();
        info
    }

    #[instrument(skip_all)]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.discover(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        let outcome = self.invoke(request.name.as_ref(), &arguments).await;
        Ok(outcome.into_call_result())
    }
}
