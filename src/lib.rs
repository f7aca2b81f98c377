//! Simple MCP Server Library
//!
//! A small Model Context Protocol (MCP) server for learning and debugging
//! the protocol. It exposes a handful of tools with typed parameter schemas
//! and routes every invocation through a single dispatcher that validates
//! arguments, contains handler failures and logs each call.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the rmcp server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Tool schemas, registry, validation and dispatch
//!
//! # Example
//!
//! ```rust,no_run
//! use simple_mcp_server::{Config, McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
