use super::ReferenceOr;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// OpenAPI Schema object (3.0 and 3.1 flavours).
///
/// Only the keywords the Markdown renderer reads are modelled; everything else in the
/// source document is ignored on load.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Declared type names in declaration order (`type: string` or `type: [string, "null"]`)
    #[serde(rename = "type", default, deserialize_with = "deserialize_types")]
    pub types: Vec<String>,
    /// OpenAPI 3.0 `nullable`
    #[serde(default)]
    pub nullable: bool,
    /// Format hint (e.g., "int64", "date-time")
    pub format: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    pub default: Option<Value>,
    pub example: Option<Value>,
    /// Allowed values, in declaration order
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<Value>,

    // String constraints
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,

    // Numeric constraints
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: Option<ExclusiveBound>,
    pub exclusive_maximum: Option<ExclusiveBound>,
    pub multiple_of: Option<f64>,

    // Array constraints
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    #[serde(default)]
    pub unique_items: bool,

    // Object constraints
    pub min_properties: Option<u64>,
    pub max_properties: Option<u64>,

    /// Properties for object types
    #[serde(default)]
    pub properties: HashMap<String, ReferenceOr<Schema>>,
    /// Required property names for object types
    #[serde(default)]
    pub required: Vec<String>,
    /// Items schema for array types
    pub items: Option<Box<ReferenceOr<Schema>>>,

    #[serde(default)]
    pub one_of: Vec<ReferenceOr<Schema>>,
    #[serde(default)]
    pub any_of: Vec<ReferenceOr<Schema>>,
    #[serde(default)]
    pub all_of: Vec<ReferenceOr<Schema>>,
}

/// `exclusiveMinimum` / `exclusiveMaximum` in either the 3.0 boolean form or the 3.1
/// numeric form.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExclusiveBound {
    /// 3.0: makes `minimum`/`maximum` exclusive
    Flag(bool),
    /// 3.1: the exclusive bound itself
    Value(f64),
}

/// A numeric bound together with its exclusivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub value: f64,
    pub exclusive: bool,
}

impl Schema {
    /// Creates a schema with a single declared type
    pub fn typed(type_name: &str) -> Self {
        Self {
            types: vec![type_name.to_string()],
            ..Default::default()
        }
    }

    /// Whether `type_name` is among the declared types
    pub fn is_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }

    /// The effective lower numeric bound
    pub fn lower_bound(&self) -> Option<Bound> {
        effective_bound(self.minimum, self.exclusive_minimum)
    }

    /// The effective upper numeric bound
    pub fn upper_bound(&self) -> Option<Bound> {
        effective_bound(self.maximum, self.exclusive_maximum)
    }

    /// The first non-empty composition list as `(keyword, members)`, checked in the order
    /// oneOf, anyOf, allOf.
    pub fn composition(&self) -> Option<(Composition, &[ReferenceOr<Schema>])> {
        [
            (Composition::OneOf, &self.one_of),
            (Composition::AnyOf, &self.any_of),
            (Composition::AllOf, &self.all_of),
        ]
        .into_iter()
        .find(|(_, members)| !members.is_empty())
        .map(|(keyword, members)| (keyword, members.as_slice()))
    }
}

/// Schema composition keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    OneOf,
    AnyOf,
    AllOf,
}

impl Composition {
    /// The keyword as it appears in the document
    pub fn keyword(&self) -> &'static str {
        match self {
            Composition::OneOf => "oneOf",
            Composition::AnyOf => "anyOf",
            Composition::AllOf => "allOf",
        }
    }

    /// Plain-language meaning of the keyword
    pub fn meaning(&self) -> &'static str {
        match self {
            Composition::OneOf => "one of the following",
            Composition::AnyOf => "any of the following",
            Composition::AllOf => "all of the following",
        }
    }

    /// Label used for each member: alternatives are options, allOf parts are schemas
    pub fn member_label(&self) -> &'static str {
        match self {
            Composition::OneOf | Composition::AnyOf => "Option",
            Composition::AllOf => "Schema",
        }
    }
}

fn effective_bound(inclusive: Option<f64>, exclusive: Option<ExclusiveBound>) -> Option<Bound> {
    match exclusive {
        Some(ExclusiveBound::Value(value)) => Some(Bound {
            value,
            exclusive: true,
        }),
        Some(ExclusiveBound::Flag(flag)) => inclusive.map(|value| Bound {
            value,
            exclusive: flag,
        }),
        None => inclusive.map(|value| Bound {
            value,
            exclusive: false,
        }),
    }
}

/// `type` as a single name or a list of names. Non-string entries (such as an unquoted YAML
/// `null`) are dropped and any other shape counts as untyped.
fn deserialize_types<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) => vec![name],
        Value::Array(names) => names
            .into_iter()
            .filter_map(|name| match name {
                Value::String(name) => Some(name),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
