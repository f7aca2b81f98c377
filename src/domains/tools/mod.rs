//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to perform
//! specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Typed parameter declarations
//! - `validator.rs` - Argument checking and default injection
//! - `registry.rs` - Immutable tool catalogue
//! - `dispatcher.rs` - Discovery and invocation entry points for transports
//! - `sink.rs` - Per-invocation structured logging
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Declare its `schema()` and implement `ToolHandler`
//! 3. Export in `definitions/mod.rs`
//! 4. Add its `definition()` to `ToolRegistry::builtin()`

pub mod definitions;
mod dispatcher;
mod error;
mod handlers;
mod outcome;
mod registry;
pub mod schema;
pub mod sink;
mod validator;

pub use dispatcher::Dispatcher;
pub use error::ToolError;
pub use handlers::{ServerStats, ToolContext, ToolHandler};
pub use outcome::{ErrorKind, InvocationRequest, ToolOutcome};
pub use registry::{ToolDefinition, ToolDescriptor, ToolRegistry};
pub use schema::{JsonObject, ParamSpec, ParamType, ParameterSchema, Presence};
pub use sink::{InvocationRecord, InvocationSink, JsonlSink, TracingSink};
pub use validator::{ArgumentValidator, ValidationError};
