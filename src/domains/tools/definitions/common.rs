//! Argument accessors shared by the tool definitions.
//!
//! Handlers receive arguments that have already been validated, so these
//! only fail if a definition's schema and its handler disagree.

use anyhow::{Context, anyhow};
use serde_json::Value;

use crate::domains::tools::schema::JsonObject;

fn arg<'a>(arguments: &'a JsonObject, name: &str) -> anyhow::Result<&'a Value> {
    arguments
        .get(name)
        .ok_or_else(|| anyhow!("Missing parameter: {}", name))
}

/// Get a string argument.
pub fn str_arg<'a>(arguments: &'a JsonObject, name: &str) -> anyhow::Result<&'a str> {
    arg(arguments, name)?
        .as_str()
        .with_context(|| format!("Parameter '{}' is not a string", name))
}

/// Get an optional string argument.
pub fn opt_str_arg<'a>(arguments: &'a JsonObject, name: &str) -> Option<&'a str> {
    arguments.get(name).and_then(Value::as_str)
}

/// Get a numeric argument as `f64`.
pub fn number_arg(arguments: &JsonObject, name: &str) -> anyhow::Result<f64> {
    arg(arguments, name)?
        .as_f64()
        .with_context(|| format!("Parameter '{}' is not a number", name))
}

/// Get a boolean argument.
pub fn bool_arg(arguments: &JsonObject, name: &str) -> anyhow::Result<bool> {
    arg(arguments, name)?
        .as_bool()
        .with_context(|| format!("Parameter '{}' is not a boolean", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args() -> JsonObject {
        json!({"s": "text", "n": 3, "f": 1.5, "b": false})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_accessors() {
        let args = args();
        assert_eq!(str_arg(&args, "s").unwrap(), "text");
        assert_eq!(number_arg(&args, "n").unwrap(), 3.0);
        assert_eq!(number_arg(&args, "f").unwrap(), 1.5);
        assert!(!bool_arg(&args, "b").unwrap());
        assert_eq!(opt_str_arg(&args, "missing"), None);
    }

    #[test]
    fn test_accessor_errors_name_the_parameter() {
        let args = args();
        let err = str_arg(&args, "n").unwrap_err();
        assert!(err.to_string().contains("'n'"));
        let err = number_arg(&args, "missing").unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
