//! Tool handler trait and the context handlers run in.
//!
//! A handler receives the effective argument map (already validated, with
//! defaults applied) and returns the text payload. Any error it returns is
//! reported to the client as a handler failure; the dispatcher never lets it
//! escape.

use chrono::{DateTime, Local};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use super::registry::ToolRegistry;
use super::schema::JsonObject;

/// Trait implemented by every tool's behaviour.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with validated arguments.
    async fn call(&self, arguments: &JsonObject, context: &ToolContext<'_>) -> anyhow::Result<String>;
}

/// Read-only view of the server handed to handlers.
///
/// Handlers can inspect the registry and server statistics but cannot
/// modify either.
#[derive(Clone, Copy)]
pub struct ToolContext<'a> {
    pub registry: &'a ToolRegistry,
    pub stats: &'a ServerStats,
}

impl<'a> ToolContext<'a> {
    pub fn new(registry: &'a ToolRegistry, stats: &'a ServerStats) -> Self {
        Self { registry, stats }
    }
}

// ============================================================================
// Server Statistics
// ============================================================================

/// Process-lifetime server statistics.
#[derive(Debug)]
pub struct ServerStats {
    server_name: String,
    server_version: String,
    started_at: DateTime<Local>,
    started: Instant,
    request_count: AtomicU64,
}

impl ServerStats {
    pub fn new(server_name: impl Into<String>, server_version: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            server_version: server_version.into(),
            started_at: Local::now(),
            started: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn server_version(&self) -> &str {
        &self.server_version
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Count one request, returning its sequence number.
    pub fn record_request(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_counter() {
        let stats = ServerStats::new("test", "0.0.0");
        assert_eq!(stats.request_count(), 0);
        assert_eq!(stats.record_request(), 1);
        assert_eq!(stats.record_request(), 2);
        assert_eq!(stats.request_count(), 2);
        assert_eq!(stats.server_name(), "test");
    }

    #[test]
    fn test_uptime_is_monotonic() {
        let stats = ServerStats::new("test", "0.0.0");
        let first = stats.uptime_seconds();
        assert!(stats.uptime_seconds() >= first);
        assert!(stats.started_at() <= Local::now());
    }
}
