//! Tool Registry - the fixed catalogue of tools available to clients.
//!
//! The registry is built once at startup and never changes afterwards, so it
//! can be shared between concurrent invocations without synchronization.
//! Construction is the only place where the catalogue is checked: duplicate
//! names or inconsistent schemas fail startup rather than a request.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;
use serde::Serialize;

use super::definitions::{DebugInfoTool, EchoTool, GetTimeTool, HelloWorldTool, MathAddTool};
use super::error::ToolError;
use super::handlers::ToolHandler;
use super::schema::ParameterSchema;

// ============================================================================
// Tool Definition
// ============================================================================

/// Identity, contract and behaviour of one tool.
#[derive(Clone)]
pub struct ToolDefinition {
    name: String,
    description: String,
    schema: ParameterSchema,
    handler: Arc<dyn ToolHandler>,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ParameterSchema,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            handler: Arc::new(handler),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    pub fn handler(&self) -> &dyn ToolHandler {
        self.handler.as_ref()
    }

    /// Outward-facing view of this tool, without its handler.
    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            parameter_schema: self.schema.clone(),
        }
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Transport-safe description of a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameter_schema: ParameterSchema,
}

impl ToolDescriptor {
    /// Create a Tool model for this descriptor (MCP metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.description.clone().into()),
            input_schema: Arc::new(self.parameter_schema.to_json_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Immutable catalogue of tool definitions, in registration order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Build a registry from a list of definitions.
    ///
    /// Fails if two definitions share a name or a schema is inconsistent.
    pub fn new(definitions: Vec<ToolDefinition>) -> Result<Self, ToolError> {
        let mut index = HashMap::with_capacity(definitions.len());

        for (position, definition) in definitions.iter().enumerate() {
            definition
                .schema
                .check()
                .map_err(|reason| ToolError::invalid_schema(&definition.name, reason))?;

            if index.insert(definition.name.clone(), position).is_some() {
                return Err(ToolError::DuplicateTool(definition.name.clone()));
            }
        }

        Ok(Self {
            tools: definitions,
            index,
        })
    }

    /// Registry holding the built-in tools.
    pub fn builtin() -> Result<Self, ToolError> {
        Self::new(vec![
            HelloWorldTool::definition(),
            EchoTool::definition(),
            GetTimeTool::definition(),
            MathAddTool::definition(),
            DebugInfoTool::definition(),
        ])
    }

    /// Every registered tool, in registration order.
    pub fn list_all(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Find a tool by name.
    pub fn lookup(&self, name: &str) -> Result<&ToolDefinition, ToolError> {
        self.index
            .get(name)
            .map(|&position| &self.tools[position])
            .ok_or_else(|| ToolError::not_found(name))
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
