//! Domains module containing business logic organized by bounded contexts.
//!
//! The server exposes a single domain, tools, covering tool declaration,
//! discovery and invocation.

pub mod tools;
