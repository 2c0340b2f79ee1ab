//! In-memory model of an OpenAPI document.
//!
//! The model mirrors the parts of OpenAPI 3.0/3.1 that describe a single endpoint: path items,
//! operations, parameters, bodies, responses, security and the schemas they reference. It is
//! loaded leniently (unknown fields are ignored, nothing is validated) and never mutated by
//! the renderers.
//!
//! Map-typed fields are plain `HashMap`s, so their iteration order is unspecified. Anything
//! that turns them into text must go through [`crate::formatter::sorted_keys`].

mod reference;
mod schema;

pub use reference::{Component, Components, ReferenceOr, MAX_REFERENCE_HOPS};
pub use schema::{Bound, Composition, ExclusiveBound, Schema};

use clap::ValueEnum;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Complete OpenAPI document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version
    #[serde(default)]
    pub openapi: String,
    /// API info
    pub info: Option<Info>,
    /// Base URLs
    #[serde(default)]
    pub servers: Vec<Server>,
    /// API paths
    #[serde(default)]
    pub paths: HashMap<String, PathItem>,
    /// Shared definitions
    #[serde(default)]
    pub components: Components,
    /// Document-level security requirements
    pub security: Option<Vec<SecurityRequirement>>,
}

/// OpenAPI Info object
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Info {
    /// API title
    #[serde(default)]
    pub title: String,
    /// API version
    #[serde(default)]
    pub version: String,
    /// API description
    pub description: Option<String>,
}

/// OpenAPI Server object
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Server {
    pub url: String,
    pub description: Option<String>,
}

/// Scheme name -> required scopes
pub type SecurityRequirement = HashMap<String, Vec<String>>;

/// OpenAPI PathItem object - represents all operations for a single path
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub patch: Option<Operation>,
    pub head: Option<Operation>,
    pub options: Option<Operation>,
    pub trace: Option<Operation>,
}

impl PathItem {
    /// The operation registered for `method`, if any
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// All defined operations in canonical method order (see [`HttpMethod::ALL`])
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> + '_ {
        HttpMethod::ALL
            .into_iter()
            .filter_map(move |method| self.operation(method).map(|op| (method, op)))
    }
}

/// HTTP methods an OpenAPI path item can describe.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
    /// TRACE
    Trace,
}

impl HttpMethod {
    /// Canonical rendering order
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    /// Upper-case method name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OpenAPI Operation object - represents a single API operation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub operation_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
    /// Parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<ReferenceOr<Parameter>>,
    pub request_body: Option<ReferenceOr<RequestBody>>,
    /// Status code -> response
    #[serde(default)]
    pub responses: HashMap<String, ReferenceOr<Response>>,
    /// Operation-level requirements; the document-level list is not applied here
    pub security: Option<Vec<SecurityRequirement>>,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    /// Parameter location (path, query, header, cookie)
    #[serde(rename = "in", default)]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub deprecated: bool,
    pub description: Option<String>,
    pub schema: Option<ReferenceOr<Schema>>,
}

/// OpenAPI RequestBody object
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBody {
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Content type -> media type
    #[serde(default)]
    pub content: HashMap<String, MediaType>,
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaType {
    pub schema: Option<ReferenceOr<Schema>>,
    /// Example name -> example
    #[serde(default)]
    pub examples: HashMap<String, ReferenceOr<Example>>,
}

/// OpenAPI Response object
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    pub description: Option<String>,
    /// Header name -> header
    #[serde(default)]
    pub headers: HashMap<String, ReferenceOr<Header>>,
    /// Content type -> media type
    #[serde(default)]
    pub content: HashMap<String, MediaType>,
}

/// OpenAPI Header object
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Header {
    pub description: Option<String>,
    pub schema: Option<ReferenceOr<Schema>>,
}

/// OpenAPI Example object
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Example {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub value: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_value_enum() {
        assert_eq!(HttpMethod::from_str("GET", true).unwrap(), HttpMethod::Get);
        assert_eq!(HttpMethod::from_str("delete", true).unwrap(), HttpMethod::Delete);
        assert_eq!(HttpMethod::from_str("Options", true).unwrap(), HttpMethod::Options);
        assert!(HttpMethod::from_str("FETCH", true).is_err());
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }

    #[test]
    fn test_operations_in_canonical_order() {
        let item = PathItem {
            trace: Some(Operation::default()),
            delete: Some(Operation::default()),
            post: Some(Operation::default()),
            get: Some(Operation::default()),
            ..Default::default()
        };

        let methods: Vec<_> = item.operations().map(|(method, _)| method).collect();
        assert_eq!(
            methods,
            vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete, HttpMethod::Trace]
        );
    }

    #[test]
    fn test_empty_path_item_has_no_operations() {
        assert_eq!(PathItem::default().operations().count(), 0);
    }

    #[test]
    fn test_deserialize_operation() {
        let yaml = r#"
summary: Get item
operationId: getItem
tags: [Items]
parameters:
  - name: id
    in: path
    required: true
    schema:
      type: string
  - $ref: '#/components/parameters/Limit'
responses:
  '200':
    description: OK
    content:
      application/json:
        schema:
          $ref: '#/components/schemas/Item'
security:
  - api_key: []
"#;
        let operation: Operation = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(operation.operation_id.as_deref(), Some("getItem"));
        assert_eq!(operation.parameters.len(), 2);
        assert_eq!(operation.parameters[0].as_item().unwrap().location, "path");
        assert_eq!(
            operation.parameters[1],
            ReferenceOr::reference("#/components/parameters/Limit")
        );

        let response = operation.responses["200"].as_item().unwrap();
        assert_eq!(response.description.as_deref(), Some("OK"));
        assert!(response.content.contains_key("application/json"));

        let security = operation.security.unwrap();
        assert_eq!(security[0]["api_key"], Vec::<String>::new());
    }

    #[test]
    fn test_deserialize_parameter_without_name() {
        let parameter: Parameter = serde_yaml::from_str("in: query\nrequired: true").unwrap();
        assert_eq!(parameter.name, "");
        assert_eq!(parameter.location, "query");
        assert!(parameter.required);
    }
}
