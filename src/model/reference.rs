//! Local `$ref` handling.
//!
//! OpenAPI documents share definitions through `#/components/<kind>/<name>` pointers. The
//! renderers never see a pointer directly: they ask [`Components::resolve`] for the target
//! and treat anything that cannot be resolved as missing data.

use super::{Example, Header, Parameter, RequestBody, Response, Schema};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

/// Maximum number of `$ref` hops followed before a chain is treated as unresolvable.
pub const MAX_REFERENCE_HOPS: usize = 32;

/// Either an inline value or a pointer to a shared definition.
///
/// Deserialization never fails on the element itself: an object with a string `$ref` is a
/// reference, anything else is parsed as `T`, and a malformed `T` is logged and replaced by
/// `T::default()` so the rest of the document stays loadable.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceOr<T> {
    /// A `{ "$ref": "..." }` object
    Reference { reference: String },
    /// An inline definition
    Item(T),
}

impl<'de, T> Deserialize<'de> for ReferenceOr<T>
where
    T: DeserializeOwned + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        if let Some(reference) = value.get("$ref").and_then(Value::as_str) {
            return Ok(ReferenceOr::Reference {
                reference: reference.to_string(),
            });
        }

        match serde_json::from_value(value) {
            Ok(item) => Ok(ReferenceOr::Item(item)),
            Err(err) => {
                warn!(
                    "Ignoring malformed {}: {}",
                    std::any::type_name::<T>().rsplit("::").next().unwrap_or("definition"),
                    err
                );
                Ok(ReferenceOr::Item(T::default()))
            }
        }
    }
}

impl<T> ReferenceOr<T> {
    /// Creates a reference to `#/components/<kind>/<name>`-style targets
    pub fn reference(target: impl Into<String>) -> Self {
        ReferenceOr::Reference {
            reference: target.into(),
        }
    }

    /// Returns the inline value, if this is not a reference
    pub fn as_item(&self) -> Option<&T> {
        match self {
            ReferenceOr::Item(item) => Some(item),
            ReferenceOr::Reference { .. } => None,
        }
    }
}

impl<T> From<T> for ReferenceOr<T> {
    fn from(item: T) -> Self {
        ReferenceOr::Item(item)
    }
}

/// OpenAPI Components object, restricted to the sections an endpoint can point into.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default)]
    pub schemas: HashMap<String, ReferenceOr<Schema>>,
    #[serde(default)]
    pub parameters: HashMap<String, ReferenceOr<Parameter>>,
    #[serde(default)]
    pub request_bodies: HashMap<String, ReferenceOr<RequestBody>>,
    #[serde(default)]
    pub responses: HashMap<String, ReferenceOr<Response>>,
    #[serde(default)]
    pub headers: HashMap<String, ReferenceOr<Header>>,
    #[serde(default)]
    pub examples: HashMap<String, ReferenceOr<Example>>,
}

/// A definition kind that can live under `#/components/`.
pub trait Component: Sized {
    /// Section name in the pointer, e.g. `schemas`
    const KIND: &'static str;

    /// The section of `components` holding definitions of this kind
    fn registry(components: &Components) -> &HashMap<String, ReferenceOr<Self>>;
}

macro_rules! component {
    ($ty:ty, $kind:literal, $field:ident) => {
        impl Component for $ty {
            const KIND: &'static str = $kind;

            fn registry(components: &Components) -> &HashMap<String, ReferenceOr<Self>> {
                &components.$field
            }
        }
    };
}

component!(Schema, "schemas", schemas);
component!(Parameter, "parameters", parameters);
component!(RequestBody, "requestBodies", request_bodies);
component!(Response, "responses", responses);
component!(Header, "headers", headers);
component!(Example, "examples", examples);

impl Components {
    /// Resolves an inline value or a local reference chain to its definition.
    ///
    /// External references, pointers into the wrong section, dangling names and chains longer
    /// than [`MAX_REFERENCE_HOPS`] all resolve to `None`.
    pub fn resolve<'a, T: Component>(&'a self, value: &'a ReferenceOr<T>) -> Option<&'a T> {
        let mut current = value;

        for _ in 0..MAX_REFERENCE_HOPS {
            let reference = match current {
                ReferenceOr::Item(item) => return Some(item),
                ReferenceOr::Reference { reference } => reference,
            };

            let Some(name) = local_name(reference, T::KIND) else {
                warn!("Unsupported reference: {}", reference);
                return None;
            };

            match T::registry(self).get(&*name) {
                Some(next) => current = next,
                None => {
                    warn!("Unresolved reference: {}", reference);
                    return None;
                }
            }
        }

        warn!(
            "Reference chain exceeds {} hops, giving up",
            MAX_REFERENCE_HOPS
        );
        None
    }

    /// Resolves an optional boxed or inline schema slot
    pub fn resolve_schema<'a>(
        &'a self,
        schema: Option<&'a ReferenceOr<Schema>>,
    ) -> Option<&'a Schema> {
        schema.and_then(|s| self.resolve(s))
    }
}

/// Extracts the component name from `#/components/<kind>/<name>`, undoing JSON pointer escapes.
fn local_name<'r>(reference: &'r str, kind: &str) -> Option<Cow<'r, str>> {
    let name = reference
        .strip_prefix("#/components/")?
        .strip_prefix(kind)?
        .strip_prefix('/')?;

    if name.is_empty() || name.contains('/') {
        return None;
    }

    if name.contains('~') {
        Some(Cow::Owned(name.replace("~1", "/").replace("~0", "~")))
    } else {
        Some(Cow::Borrowed(name))
    }
}
