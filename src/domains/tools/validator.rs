//! Argument validation against a tool's parameter schema.
//!
//! Validation is fail-fast: the first violation is reported. Required
//! parameters are checked before types, both in schema declaration order.
//! Defaults are filled in for absent optional parameters so handlers never
//! see a defaulted parameter as missing. Keys the schema does not declare are
//! passed through untouched unless strict mode is enabled.

use thiserror::Error;

use super::schema::{JsonObject, ParamType, ParameterSchema, value_kind};

/// The first argument violation found during validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid type for parameter '{param}': expected {expected}, got {actual}")]
    TypeMismatch {
        param: String,
        expected: ParamType,
        actual: &'static str,
    },

    /// Only produced in strict mode.
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}

impl ValidationError {
    /// Name of the offending parameter.
    pub fn param(&self) -> &str {
        match self {
            Self::MissingParameter(p) | Self::UnknownParameter(p) => p,
            Self::TypeMismatch { param, .. } => param,
        }
    }
}

/// Validates raw arguments and produces the effective argument map.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentValidator {
    strict: bool,
}

impl ArgumentValidator {
    /// A validator that tolerates unknown keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator that rejects keys the schema does not declare.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Validate `arguments` against `schema`, returning the arguments with
    /// defaults applied.
    pub fn validate(
        &self,
        schema: &ParameterSchema,
        arguments: &JsonObject,
    ) -> Result<JsonObject, ValidationError> {
        for spec in schema.params() {
            if spec.is_required() && !arguments.contains_key(spec.name) {
                return Err(ValidationError::MissingParameter(spec.name.to_string()));
            }
        }

        for spec in schema.params() {
            if let Some(value) = arguments.get(spec.name) {
                if !spec.param_type.matches(value) {
                    return Err(ValidationError::TypeMismatch {
                        param: spec.name.to_string(),
                        expected: spec.param_type,
                        actual: value_kind(value),
                    });
                }
            }
        }

        if self.strict {
            if let Some(key) = arguments.keys().find(|k| !schema.contains(k)) {
                return Err(ValidationError::UnknownParameter(key.clone()));
            }
        }

        let mut effective = arguments.clone();
        for spec in schema.params() {
            if let Some(default) = spec.default_value() {
                if !effective.contains_key(spec.name) {
                    effective.insert(spec.name.to_string(), default.clone());
                }
            }
        }

        Ok(effective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::ParamSpec;
    use serde_json::json;

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap_or_default()
    }

    fn add_schema() -> ParameterSchema {
        ParameterSchema::new()
            .param(ParamSpec::required("a", ParamType::Number, "First number"))
            .param(ParamSpec::required("b", ParamType::Number, "Second number"))
    }

    #[test]
    fn test_missing_required() {
        let err = ArgumentValidator::new()
            .validate(&add_schema(), &args(json!({"a": 5})))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingParameter("b".into()));
        assert_eq!(err.to_string(), "Missing required parameter: b");
    }

    #[test]
    fn test_required_checked_before_types() {
        // `a` has the wrong type but the missing `b` is reported first.
        let err = ArgumentValidator::new()
            .validate(&add_schema(), &args(json!({"a": "five"})))
            .unwrap_err();
        assert_eq!(err.param(), "b");
    }

    #[test]
    fn test_type_mismatch_in_declaration_order() {
        let err = ArgumentValidator::new()
            .validate(&add_schema(), &args(json!({"b": true, "a": "x"})))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                param: "a".into(),
                expected: ParamType::Number,
                actual: "string",
            }
        );
        assert!(err.to_string().contains("expected number, got string"));
    }

    #[test]
    fn test_integer_and_float_numbers() {
        let effective = ArgumentValidator::new()
            .validate(&add_schema(), &args(json!({"a": 1, "b": 2.5})))
            .unwrap();
        assert_eq!(effective["b"], json!(2.5));
    }

    #[test]
    fn test_defaults_are_filled() {
        let schema = ParameterSchema::new()
            .param(ParamSpec::required("message", ParamType::String, "Message"))
            .param(ParamSpec::optional("prefix", ParamType::String, "Prefix").with_default("Echo: "))
            .param(ParamSpec::optional("note", ParamType::String, "No default"));

        let effective = ArgumentValidator::new()
            .validate(&schema, &args(json!({"message": "hi"})))
            .unwrap();
        assert_eq!(effective["prefix"], "Echo: ");
        assert!(!effective.contains_key("note"));
    }

    #[test]
    fn test_supplied_value_wins_over_default() {
        let schema = ParameterSchema::new()
            .param(ParamSpec::optional("name", ParamType::String, "Name").with_default("World"));
        let effective = ArgumentValidator::new()
            .validate(&schema, &args(json!({"name": "Ada"})))
            .unwrap();
        assert_eq!(effective["name"], "Ada");
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let effective = ArgumentValidator::new()
            .validate(&add_schema(), &args(json!({"a": 1, "b": 2, "extra": [1, 2]})))
            .unwrap();
        assert_eq!(effective["extra"], json!([1, 2]));
    }

    #[test]
    fn test_strict_rejects_unknown_keys() {
        let validator = ArgumentValidator::strict();
        assert!(validator.is_strict());
        let err = validator
            .validate(&add_schema(), &args(json!({"a": 1, "b": 2, "extra": true})))
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownParameter("extra".into()));
    }

    #[test]
    fn test_null_is_a_type_mismatch() {
        let err = ArgumentValidator::new()
            .validate(&add_schema(), &args(json!({"a": null, "b": 1})))
            .unwrap_err();
        assert!(err.to_string().contains("got null"));
    }
}
