//! docfinder - Markdown documentation for a single endpoint of an OpenAPI document.
//!
//! Given an OpenAPI 3.0 or 3.1 document and an endpoint path, the library renders the
//! endpoint's operations as Markdown. Output is deterministic: every map is emitted in sorted
//! key order and operations follow a fixed method order, so the same input always produces
//! byte-identical text.
//!
//! # Architecture
//!
//! 1. [`loader`] - Validates, reads and deserializes the document, and locates the endpoint
//! 2. [`model`] - The subset of the OpenAPI object model that is rendered, with `$ref` resolution
//! 3. [`formatter`] - Type strings, constraint summaries, enum lists and sorted iteration
//! 4. [`schema_renderer`] - Depth-bounded, indented rendering of schemas
//! 5. [`operation_renderer`] - One operation with parameters, bodies, responses and security
//! 6. [`generator`] - The endpoint document: header, base URLs and every selected operation
//! 7. [`output`] - Writes the Markdown to stdout or a file
//!
//! # Example Usage
//!
//! ```no_run
//! use docfinder::{
//!     generator::MarkdownGenerator,
//!     loader::{find_path_item, load_document},
//! };
//! use std::path::Path;
//!
//! let doc = load_document(Path::new("openapi.yaml")).unwrap();
//! let (_, path_item) = find_path_item(&doc, "/users/{id}").unwrap();
//!
//! let generator = MarkdownGenerator::new(&doc);
//! let markdown = generator.generate_markdown("/users/{id}", Some(path_item), "GET");
//! println!("{}", markdown);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod error;
pub mod formatter;
pub mod generator;
pub mod loader;
pub mod markdown;
pub mod model;
pub mod operation_renderer;
pub mod output;
pub mod schema_renderer;
