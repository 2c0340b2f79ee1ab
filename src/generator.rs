use crate::markdown;
use crate::model::{OpenApiDocument, PathItem};
use crate::operation_renderer::OperationRenderer;
use log::debug;

/// Markdown documentation generator for single endpoints of an OpenAPI document
pub struct MarkdownGenerator<'a> {
    doc: &'a OpenApiDocument,
}

impl<'a> MarkdownGenerator<'a> {
    /// Create a new MarkdownGenerator for `doc`
    pub fn new(doc: &'a OpenApiDocument) -> Self {
        Self { doc }
    }

    /// Generates the Markdown documentation of one endpoint.
    ///
    /// `path` is the endpoint path as it should appear in headings (e.g. `/users/{id}`) and
    /// `path_item` its definition. `method_filter` is an upper-case HTTP method such as `GET`;
    /// an empty filter renders every operation. Operations are emitted in the order GET, PUT,
    /// POST, DELETE, PATCH, HEAD, OPTIONS, TRACE.
    ///
    /// Returns an empty string when there is no path item.
    pub fn generate_markdown(
        &self,
        path: &str,
        path_item: Option<&PathItem>,
        method_filter: &str,
    ) -> String {
        let Some(path_item) = path_item else {
            return String::new();
        };

        debug!("Generating markdown for {} (filter: {:?})", path, method_filter);

        let mut md = String::new();
        self.write_header(&mut md, path);
        self.write_operations(&mut md, path, path_item, method_filter);
        md
    }

    /// Endpoint heading, API metadata and base URLs
    fn write_header(&self, md: &mut String, path: &str) {
        md.push_str(&format!("# API Endpoint: {}\n\n", path));

        if let Some(info) = &self.doc.info {
            md.push_str(&format!("**API:** {} {}\n\n", info.title, info.version));
        }

        if !self.doc.servers.is_empty() {
            md.push_str("**Base URL(s):**\n");
            for server in &self.doc.servers {
                match markdown::non_empty(server.description.as_ref()) {
                    Some(description) => {
                        md.push_str(&format!("- `{}` - {}\n", server.url, description))
                    }
                    None => md.push_str(&format!("- `{}`\n", server.url)),
                }
            }
            md.push('\n');
        }
    }

    fn write_operations(
        &self,
        md: &mut String,
        path: &str,
        path_item: &PathItem,
        method_filter: &str,
    ) {
        let renderer = OperationRenderer::new(&self.doc.components);

        for (method, operation) in path_item.operations() {
            if let Some(fragment) =
                renderer.render_filtered(method.as_str(), path, operation, method_filter)
            {
                md.push_str(&fragment);
            }
        }
    }
}
