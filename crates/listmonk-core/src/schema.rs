//! JSON schema types for tool parameters.
//!
//! Tool input shapes are declared with [`ToolSchema`] and serialized into
//! the JSON Schema objects MCP clients expect in `tools/list`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// JSON schema for one value in a tool's input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ToolSchema {
    /// String type with optional constraints.
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        format: Option<String>,
        #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
        values: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
    /// Integer type.
    Integer {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        minimum: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        maximum: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<i64>,
    },
    /// Boolean type.
    Boolean {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<bool>,
    },
    /// Array type with item schema.
    Array {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        items: Box<ToolSchema>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_items: Option<usize>,
    },
    /// Object type with property schemas. No properties means free-form.
    Object {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        properties: BTreeMap<String, ToolSchema>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        required: Vec<String>,
    },
}

impl ToolSchema {
    /// Creates a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::String {
            description: None,
            min_length: None,
            max_length: None,
            format: None,
            values: None,
            default: None,
        }
    }

    /// Creates a string schema with length constraints.
    #[must_use]
    pub fn string_with_length(min: Option<usize>, max: Option<usize>) -> Self {
        Self::String {
            description: None,
            min_length: min,
            max_length: max,
            format: None,
            values: None,
            default: None,
        }
    }

    /// Creates a string schema with a format hint such as `email`.
    #[must_use]
    pub fn string_format(format: &str) -> Self {
        Self::String {
            description: None,
            min_length: None,
            max_length: None,
            format: Some(format.to_string()),
            values: None,
            default: None,
        }
    }

    /// Creates a string schema with enumerated values.
    #[must_use]
    pub fn string_enum(values: &[&str]) -> Self {
        Self::String {
            description: None,
            min_length: None,
            max_length: None,
            format: None,
            values: Some(values.iter().map(|v| (*v).to_string()).collect()),
            default: None,
        }
    }

    /// Creates an integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self::Integer {
            description: None,
            minimum: None,
            maximum: None,
            default: None,
        }
    }

    /// Creates an integer schema with range constraints.
    #[must_use]
    pub fn integer_range(min: Option<i64>, max: Option<i64>) -> Self {
        Self::Integer {
            description: None,
            minimum: min,
            maximum: max,
            default: None,
        }
    }

    /// Positive integer identifier.
    #[must_use]
    pub fn id() -> Self {
        Self::integer_range(Some(1), None)
    }

    /// Creates a boolean schema.
    #[must_use]
    pub fn boolean() -> Self {
        Self::Boolean {
            description: None,
            default: None,
        }
    }

    /// Creates an array schema.
    #[must_use]
    pub fn array(items: Self) -> Self {
        Self::Array {
            description: None,
            items: Box::new(items),
            min_items: None,
        }
    }

    /// Creates a free-form object schema.
    #[must_use]
    pub fn any_object() -> Self {
        Self::Object {
            description: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    /// Creates an object schema.
    #[must_use]
    pub fn object<'a>(
        properties: impl IntoIterator<Item = (&'a str, Self)>,
        required: &[&str],
    ) -> Self {
        Self::Object {
            description: None,
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            required: required.iter().map(|r| (*r).to_string()).collect(),
        }
    }

    /// Attach a human readable description.
    #[must_use]
    pub fn describe(mut self, text: &str) -> Self {
        let slot = match &mut self {
            Self::String { description, .. }
            | Self::Integer { description, .. }
            | Self::Boolean { description, .. }
            | Self::Array { description, .. }
            | Self::Object { description, .. } => description,
        };
        *slot = Some(text.to_string());
        self
    }

    /// Require at least `n` items. No effect on non-array schemas.
    #[must_use]
    pub fn min_items(mut self, n: usize) -> Self {
        if let Self::Array { min_items, .. } = &mut self {
            *min_items = Some(n);
        }
        self
    }

    /// Attach a default value. Mismatched types are ignored.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        match &mut self {
            Self::String { default, .. } => *default = value.as_str().map(str::to_string),
            Self::Integer { default, .. } => *default = value.as_i64(),
            Self::Boolean { default, .. } => *default = value.as_bool(),
            Self::Array { .. } | Self::Object { .. } => {}
        }
        self
    }

    /// Names of the required properties of an object schema.
    pub fn required(&self) -> &[String] {
        match self {
            Self::Object { required, .. } => required,
            _ => &[],
        }
    }

    /// Serialize into a JSON object as used by MCP `inputSchema`.
    pub fn to_json_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
