//! Leaf formatting helpers: type names, validation constraints, polymorphic values, JSON
//! example bodies and canonical key ordering.

use crate::model::{Bound, Schema};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Returns the display type of a schema.
///
/// Absent schemas and schemas without a declared type are `unknown`; several declared types
/// are joined with ` | ` in declaration order.
pub fn format_type(schema: Option<&Schema>) -> String {
    match schema.map(|s| s.types.as_slice()) {
        None | Some([]) => "unknown".to_string(),
        Some([single]) => single.clone(),
        Some(types) => types.join(" | "),
    }
}

/// Returns a comma-separated list of the validation constraints of a schema, or an empty
/// string if there are none.
///
/// Lower bounds of `0` on lengths and counts are the implicit default and are left out;
/// upper bounds are listed whenever they are present, including `0`.
pub fn format_constraints(schema: Option<&Schema>) -> String {
    let Some(schema) = schema else {
        return String::new();
    };

    let mut constraints = Vec::new();

    // String constraints
    if let Some(min) = schema.min_length.filter(|&n| n > 0) {
        constraints.push(format!("minLength: {}", min));
    }
    if let Some(max) = schema.max_length {
        constraints.push(format!("maxLength: {}", max));
    }
    if let Some(pattern) = schema.pattern.as_deref().filter(|p| !p.is_empty()) {
        constraints.push(format!("pattern: `{}`", pattern));
    }

    // Number constraints
    if let Some(bound) = schema.lower_bound() {
        constraints.push(format_bound("min", bound));
    }
    if let Some(bound) = schema.upper_bound() {
        constraints.push(format_bound("max", bound));
    }
    if let Some(multiple) = schema.multiple_of {
        constraints.push(format!("multipleOf: {}", multiple));
    }

    // Array constraints
    if let Some(min) = schema.min_items.filter(|&n| n > 0) {
        constraints.push(format!("minItems: {}", min));
    }
    if let Some(max) = schema.max_items {
        constraints.push(format!("maxItems: {}", max));
    }
    if schema.unique_items {
        constraints.push("uniqueItems: true".to_string());
    }

    // Object constraints
    if let Some(min) = schema.min_properties.filter(|&n| n > 0) {
        constraints.push(format!("minProperties: {}", min));
    }
    if let Some(max) = schema.max_properties {
        constraints.push(format!("maxProperties: {}", max));
    }

    constraints.join(", ")
}

fn format_bound(label: &str, bound: Bound) -> String {
    let exclusive = if bound.exclusive { " (exclusive)" } else { "" };
    format!("{}: {}{}", label, bound.value, exclusive)
}

/// Plain-text rendering of a polymorphic value.
///
/// Strings are printed without quotes, `null` as `<nil>`, lists as `[a b c]` in their
/// declared order and maps as `map[k1:v1 k2:v2]` with sorted keys.
pub struct ValueDisplay<'a>(pub &'a Value);

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Null => f.write_str("<nil>"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => match n.as_f64() {
                Some(float) if n.is_f64() => write!(f, "{}", float),
                _ => write!(f, "{}", n),
            },
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", ValueDisplay(item))?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                f.write_str("map[")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{}", key, ValueDisplay(&map[key.as_str()]))?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Formats an enum list the same way as any other list value
pub fn format_enum(values: &[Value]) -> String {
    ValueDisplay(&Value::Array(values.to_vec())).to_string()
}

/// Pretty-prints a value as JSON with two-space indentation; an absent value is `{}`.
pub fn format_json<T: Serialize + ?Sized>(value: Option<&T>) -> serde_json::Result<String> {
    match value {
        None => Ok("{}".to_string()),
        Some(value) => serde_json::to_string_pretty(value),
    }
}

/// Returns the keys of a map in ascending byte-wise order.
///
/// Every map whose contents end up in the output is traversed through this function so that
/// identical documents always render identically.
pub fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

/// Key/value pairs of a map in [`sorted_keys`] order
pub fn sorted_entries<V>(map: &HashMap<String, V>) -> Vec<(&str, &V)> {
    sorted_keys(map)
        .into_iter()
        .map(|key| (key, &map[key]))
        .collect()
}
