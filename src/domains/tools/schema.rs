//! Parameter schemas for tool definitions.
//!
//! Every tool declares its parameters explicitly with a [`ParamType`] tag so
//! that arguments can be checked without reflection. The schema is kept in
//! declaration order, which is also the order validation runs in and the
//! order parameters are advertised to clients.

use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Map, Value, json};

/// JSON object type used for tool arguments.
pub type JsonObject = Map<String, Value>;

// ============================================================================
// Parameter Types
// ============================================================================

/// The kind of value a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    /// Integers and floating-point values are both accepted.
    Number,
    Boolean,
    Object,
    Array,
}

impl ParamType {
    /// Name of the type as it appears in JSON Schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Whether `value` is of this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the runtime kind of a JSON value, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Parameter Specification
// ============================================================================

/// Whether a parameter must be supplied.
///
/// A required parameter cannot carry a default; a parameter with a default is
/// always optional.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    Optional { default: Option<Value> },
}

/// Declaration of a single tool parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub param_type: ParamType,
    pub presence: Presence,
    pub description: &'static str,
    /// Advertised set of accepted values, if the parameter is an enumeration.
    pub allowed: Vec<&'static str>,
}

impl ParamSpec {
    /// Declare a required parameter.
    pub fn required(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self {
            name,
            param_type,
            presence: Presence::Required,
            description,
            allowed: Vec::new(),
        }
    }

    /// Declare an optional parameter without a default.
    pub fn optional(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self {
            name,
            param_type,
            presence: Presence::Optional { default: None },
            description,
            allowed: Vec::new(),
        }
    }

    /// Attach a default value, making the parameter optional.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.presence = Presence::Optional {
            default: Some(default.into()),
        };
        self
    }

    /// Advertise an enumeration of accepted values.
    pub fn one_of(mut self, values: &[&'static str]) -> Self {
        self.allowed = values.to_vec();
        self
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    pub fn default_value(&self) -> Option<&Value> {
        match &self.presence {
            Presence::Optional { default } => default.as_ref(),
            Presence::Required => None,
        }
    }

    /// JSON Schema property object for this parameter.
    pub fn to_json_schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.param_type.as_str()));
        prop.insert("description".into(), json!(self.description));
        if let Some(default) = self.default_value() {
            prop.insert("default".into(), default.clone());
        }
        if !self.allowed.is_empty() {
            prop.insert("enum".into(), json!(self.allowed));
        }
        Value::Object(prop)
    }
}

impl Serialize for ParamSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.param_type)?;
        map.serialize_entry("required", &self.is_required())?;
        if let Some(default) = self.default_value() {
            map.serialize_entry("default", default)?;
        }
        map.serialize_entry("description", self.description)?;
        if !self.allowed.is_empty() {
            map.serialize_entry("enum", &self.allowed)?;
        }
        map.end()
    }
}

// ============================================================================
// Parameter Schema
// ============================================================================

/// Ordered collection of parameter declarations for one tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSchema {
    params: Vec<ParamSpec>,
}

impl ParameterSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter declaration.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Parameters in declaration order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of the required parameters, in declaration order.
    pub fn required_names(&self) -> Vec<&'static str> {
        self.params
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Check the schema is internally consistent.
    ///
    /// Returns a description of the first problem found: a parameter declared
    /// twice, or a default whose type disagrees with the declared type.
    pub fn check(&self) -> Result<(), String> {
        for (i, spec) in self.params.iter().enumerate() {
            if self.params[..i].iter().any(|p| p.name == spec.name) {
                return Err(format!("parameter '{}' declared more than once", spec.name));
            }
            match spec.default_value() {
                Some(default) if !spec.param_type.matches(default) => {
                    return Err(format!(
                        "default for parameter '{}' is {}, expected {}",
                        spec.name,
                        value_kind(default),
                        spec.param_type
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Render as a JSON Schema object suitable for an MCP `inputSchema`.
    pub fn to_json_schema(&self) -> JsonObject {
        let properties: JsonObject = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.to_json_schema()))
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(self.required_names()));
        schema
    }
}

impl Serialize for ParameterSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.params.len()))?;
        for spec in &self.params {
            map.serialize_entry(spec.name, spec)?;
        }
        map.end()
    }
}
