//! Dispatcher - the protocol-facing side of the tools domain.
//!
//! Transports only ever talk to the dispatcher. It lists the registry for
//! discovery and runs invocations through lookup, validation and execution,
//! turning every failure into a [`ToolOutcome`] so nothing a handler does can
//! break the connection or the process.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, instrument, warn};

use super::error::ToolError;
use super::handlers::{ServerStats, ToolContext};
use super::outcome::{InvocationRequest, ToolOutcome};
use super::registry::{ToolDescriptor, ToolRegistry};
use super::schema::JsonObject;
use super::sink::{InvocationRecord, InvocationSink, TracingSink};
use super::validator::ArgumentValidator;

/// Routes discovery and invocation requests to the registry.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    stats: Arc<ServerStats>,
    validator: ArgumentValidator,
    sinks: Vec<Arc<dyn InvocationSink>>,
}

impl Dispatcher {
    /// Create a dispatcher that logs invocations through `tracing`.
    pub fn new(registry: Arc<ToolRegistry>, stats: Arc<ServerStats>) -> Self {
        Self {
            registry,
            stats,
            validator: ArgumentValidator::new(),
            sinks: vec![Arc::new(TracingSink)],
        }
    }

    /// Replace the argument validator.
    pub fn with_validator(mut self, validator: ArgumentValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Add a sink that receives every invocation record.
    pub fn with_sink(mut self, sink: Arc<dyn InvocationSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn stats(&self) -> &ServerStats {
        &self.stats
    }

    /// Describe every registered tool, in registration order.
    pub fn discover(&self) -> Vec<ToolDescriptor> {
        let descriptors: Vec<_> = self
            .registry
            .list_all()
            .iter()
            .map(|t| t.descriptor())
            .collect();
        debug!("Discovered {} tools", descriptors.len());
        descriptors
    }

    /// Run one invocation request.
    pub async fn dispatch(&self, request: InvocationRequest) -> ToolOutcome {
        self.invoke(&request.name, &request.arguments).await
    }

    /// Validate, execute and log one call of the tool `name`.
    #[instrument(skip(self, arguments))]
    pub async fn invoke(&self, name: &str, arguments: &JsonObject) -> ToolOutcome {
        let started = Instant::now();

        let outcome = match self.execute(name, arguments).await {
            Ok(text) => ToolOutcome::success(text),
            Err(e) => ToolOutcome::from(e),
        };

        self.log_outcome(name, started, &outcome);
        outcome
    }

    async fn execute(&self, name: &str, arguments: &JsonObject) -> Result<String, ToolError> {
        let definition = self.registry.lookup(name)?;
        let effective = self.validator.validate(definition.schema(), arguments)?;
        debug!(tool = name, "Arguments validated");

        let context = ToolContext::new(&self.registry, &self.stats);
        let call = definition.handler().call(&effective, &context);

        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ToolError::execution_failed(format!("{e:#}"))),
            Err(panic) => Err(ToolError::execution_failed(panic_message(panic.as_ref()))),
        }
    }

    fn log_outcome(&self, name: &str, started: Instant, outcome: &ToolOutcome) {
        let detail = match outcome {
            ToolOutcome::Success { text } => format!("{} bytes", text.len()),
            ToolOutcome::Failure { kind, message } => format!("{kind}: {message}"),
        };

        let record = InvocationRecord {
            timestamp: Utc::now(),
            tool: name.to_string(),
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
            success: outcome.is_success(),
            detail,
        };

        for sink in &self.sinks {
            if let Err(e) = sink.record(&record) {
                warn!("Failed to record invocation of {}: {}", name, e);
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("handler panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("handler panicked: {s}")
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Error, Result};
    use crate::domains::tools::handlers::ToolHandler;
    use crate::domains::tools::outcome::ErrorKind;
    use crate::domains::tools::registry::ToolDefinition;
    use crate::domains::tools::schema::{ParamSpec, ParamType, ParameterSchema};
    use serde_json::json;
    use std::sync::Mutex;

    struct Failing;

    #[async_trait::async_trait]
    impl ToolHandler for Failing {
        async fn call(&self, _: &JsonObject, _: &ToolContext<'_>) -> anyhow::Result<String> {
            anyhow::bail!("disk on fire")
        }
    }

    struct Panicking;

    #[async_trait::async_trait]
    impl ToolHandler for Panicking {
        async fn call(&self, _: &JsonObject, _: &ToolContext<'_>) -> anyhow::Result<String> {
            panic!("unexpected state")
        }
    }

    struct EchoArgs;

    #[async_trait::async_trait]
    impl ToolHandler for EchoArgs {
        async fn call(&self, args: &JsonObject, _: &ToolContext<'_>) -> anyhow::Result<String> {
            Ok(serde_json::to_string(args)?)
        }
    }

    #[derive(Default)]
    struct Collecting(Mutex<Vec<InvocationRecord>>);

    impl InvocationSink for Collecting {
        fn record(&self, record: &InvocationRecord) -> Result<()> {
            self.0.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct Broken;

    impl InvocationSink for Broken {
        fn record(&self, _: &InvocationRecord) -> Result<()> {
            Err(Error::internal("sink unavailable"))
        }
    }

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap_or_default()
    }

    fn dispatcher_with(definitions: Vec<ToolDefinition>) -> Dispatcher {
        let registry = Arc::new(ToolRegistry::new(definitions).unwrap());
        Dispatcher::new(registry, Arc::new(ServerStats::new("test", "0.0.0")))
    }

    fn builtin() -> Dispatcher {
        let registry = Arc::new(ToolRegistry::builtin().unwrap());
        Dispatcher::new(registry, Arc::new(ServerStats::new("test", "0.0.0")))
    }

    #[test]
    fn test_discover_matches_registry_order() {
        let dispatcher = builtin();
        let first = dispatcher.discover();
        let names: Vec<_> = first.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["hello_world", "echo", "get_time", "math_add", "debug_info"]
        );
        assert_eq!(first, dispatcher.discover());
    }

    #[test]
    fn test_discover_empty_registry() {
        assert!(dispatcher_with(Vec::new()).discover().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let dispatcher = builtin();
        let outcome = dispatcher.invoke("unknown_tool", &JsonObject::new()).await;
        assert_eq!(outcome.error_kind(), Some(ErrorKind::ToolNotFound));
        assert_eq!(outcome.text(), "Unknown tool: unknown_tool");

        let outcome = dispatcher.invoke("math_add", &args(json!({"a": 1, "b": 2}))).await;
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_invalid_arguments_name_the_parameter() {
        let outcome = builtin().invoke("math_add", &args(json!({"a": 5}))).await;
        assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidArguments));
        assert!(outcome.text().contains('b'));
    }

    #[tokio::test]
    async fn test_handler_error_is_contained() {
        let dispatcher = dispatcher_with(vec![
            ToolDefinition::new("failing", "fails", ParameterSchema::new(), Failing),
            ToolDefinition::new("args", "echoes args", ParameterSchema::new(), EchoArgs),
        ]);

        let outcome = dispatcher.invoke("failing", &JsonObject::new()).await;
        assert_eq!(outcome.error_kind(), Some(ErrorKind::HandlerError));
        assert_eq!(outcome.text(), "disk on fire");

        let outcome = dispatcher.invoke("args", &JsonObject::new()).await;
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_handler_panic_is_contained() {
        let dispatcher = dispatcher_with(vec![
            ToolDefinition::new("panicking", "panics", ParameterSchema::new(), Panicking),
            ToolDefinition::new("args", "echoes args", ParameterSchema::new(), EchoArgs),
        ]);

        let outcome = dispatcher.invoke("panicking", &JsonObject::new()).await;
        assert_eq!(outcome.error_kind(), Some(ErrorKind::HandlerError));
        assert!(outcome.text().contains("unexpected state"));

        assert!(dispatcher.invoke("args", &JsonObject::new()).await.is_success());
    }

    #[tokio::test]
    async fn test_handler_sees_defaults_and_extra_keys() {
        let schema = ParameterSchema::new()
            .param(ParamSpec::optional("n", ParamType::Number, "n").with_default(7));
        let dispatcher = dispatcher_with(vec![ToolDefinition::new("args", "args", schema, EchoArgs)]);

        let outcome = dispatcher.invoke("args", &args(json!({"extra": "kept"}))).await;
        let seen: serde_json::Value = serde_json::from_str(outcome.text()).unwrap();
        assert_eq!(seen, json!({"n": 7, "extra": "kept"}));
    }

    #[tokio::test]
    async fn test_strict_validator_rejects_extra_keys() {
        let dispatcher = builtin().with_validator(ArgumentValidator::strict());
        let outcome = dispatcher
            .invoke("echo", &args(json!({"message": "hi", "loud": true})))
            .await;
        assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidArguments));
        assert!(outcome.text().contains("loud"));
    }

    #[tokio::test]
    async fn test_every_outcome_is_recorded() {
        let collecting = Arc::new(Collecting::default());
        let dispatcher = builtin().with_sink(collecting.clone());

        dispatcher.invoke("echo", &args(json!({"message": "hi"}))).await;
        dispatcher.invoke("nope", &JsonObject::new()).await;

        let records = collecting.0.lock().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tool, "echo");
        assert!(records[0].success);
        assert!(records[0].duration_ms >= 0.0);
        assert!(!records[1].success);
        assert!(records[1].detail.starts_with("ToolNotFound"));
    }

    #[tokio::test]
    async fn test_broken_sink_does_not_block_response() {
        let dispatcher = builtin().with_sink(Arc::new(Broken));
        let outcome = dispatcher
            .dispatch(InvocationRequest::new("hello_world", JsonObject::new()))
            .await;
        assert!(outcome.is_success());
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn Any + Send> = Box::new("oops");
        assert_eq!(panic_message(boxed.as_ref()), "handler panicked: oops");
        let boxed: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(boxed.as_ref()), "handler panicked");
    }
}
