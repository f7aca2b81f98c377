//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod basic;
mod common;
pub mod system;

pub use basic::{EchoTool, HelloWorldTool, MathAddTool};
pub use system::{DebugInfoTool, GetTimeTool, TimeFormat};
