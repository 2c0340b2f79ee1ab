//! Markdown rendering of a single HTTP operation.

use crate::formatter::{format_json, format_type, sorted_entries, ValueDisplay};
use crate::markdown::{
    self, deprecated_marker, required_marker, HEADER_EXAMPLES, HEADER_HEADERS,
    HEADER_PARAMETERS, HEADER_REQUEST_BODY, HEADER_RESPONSES, HEADER_SCHEMA, HEADER_SECURITY,
    SEPARATOR_OPERATION, WARNING_DEPRECATED_OPERATION,
};
use crate::model::{
    Components, Example, Header, MediaType, Operation, Parameter, ReferenceOr, RequestBody,
    Response, SecurityRequirement,
};
use crate::schema_renderer::{write_inline_details, SchemaRenderer, MAX_RECURSION_DEPTH};
use log::{debug, warn};
use std::collections::HashMap;

/// Renders operations: metadata, parameters, request body, responses and security.
pub struct OperationRenderer<'a> {
    components: &'a Components,
    schemas: SchemaRenderer<'a>,
}

impl<'a> OperationRenderer<'a> {
    /// Create a new OperationRenderer resolving references against `components`
    pub fn new(components: &'a Components) -> Self {
        Self {
            components,
            schemas: SchemaRenderer::new(components),
        }
    }

    /// Renders `operation` unless `method_filter` is non-empty and differs from `method`.
    ///
    /// The comparison is case-sensitive; callers pass upper-case method names.
    pub fn render_filtered(
        &self,
        method: &str,
        path: &str,
        operation: &Operation,
        method_filter: &str,
    ) -> Option<String> {
        if !method_filter.is_empty() && method != method_filter {
            debug!("Skipping {} {} (filter: {})", method, path, method_filter);
            return None;
        }
        Some(self.render(method, path, operation))
    }

    /// Renders one operation, terminated by a horizontal rule.
    pub fn render(&self, method: &str, path: &str, operation: &Operation) -> String {
        debug!("Rendering operation: {} {}", method.to_uppercase(), path);

        let mut md = String::new();
        md.push_str(&format!("## {} {}\n\n", method.to_uppercase(), path));

        self.write_metadata(&mut md, operation);
        self.write_parameters(&mut md, &operation.parameters);
        if let Some(body) = &operation.request_body {
            self.write_request_body(&mut md, body);
        }
        self.write_responses(&mut md, &operation.responses);
        self.write_security(&mut md, operation.security.as_deref());

        md.push_str(SEPARATOR_OPERATION);
        md
    }

    fn write_metadata(&self, md: &mut String, operation: &Operation) {
        if operation.deprecated {
            md.push_str(WARNING_DEPRECATED_OPERATION);
        }

        if let Some(summary) = markdown::non_empty(operation.summary.as_ref()) {
            md.push_str(&format!("**Summary:** {}\n\n", summary));
        }
        if let Some(description) = markdown::non_empty(operation.description.as_ref()) {
            md.push_str(&format!("**Description:** {}\n\n", description));
        }
        if let Some(id) = markdown::non_empty(operation.operation_id.as_ref()) {
            md.push_str(&format!("**Operation ID:** `{}`\n\n", id));
        }
        if !operation.tags.is_empty() {
            md.push_str(&format!("**Tags:** {}\n\n", operation.tags.join(", ")));
        }
    }

    /// Parameters keep their declaration order.
    fn write_parameters(&self, md: &mut String, parameters: &[ReferenceOr<Parameter>]) {
        if parameters.is_empty() {
            return;
        }

        md.push_str(HEADER_PARAMETERS);

        for parameter in parameters {
            let Some(param) = self.components.resolve(parameter) else {
                continue;
            };

            md.push_str(&format!(
                "- **{}** ({}){}{}\n",
                param.name,
                param.location,
                required_marker(param.required),
                deprecated_marker(param.deprecated)
            ));

            if let Some(description) = markdown::non_empty(param.description.as_ref()) {
                md.push_str(&format!("  - Description: {}\n", description));
            }

            if let Some(schema) = self.components.resolve_schema(param.schema.as_ref()) {
                write_inline_details(md, schema, "  ", false);
            }
        }

        md.push('\n');
    }

    fn write_request_body(&self, md: &mut String, body: &ReferenceOr<RequestBody>) {
        let Some(body) = self.components.resolve(body) else {
            return;
        };

        md.push_str(HEADER_REQUEST_BODY);

        if let Some(description) = markdown::non_empty(body.description.as_ref()) {
            md.push_str(&format!("{}\n\n", description));
        }

        if body.required {
            md.push_str("**Required:** (required)\n\n");
        } else {
            md.push_str("**Required:** (optional)\n\n");
        }

        self.write_content(md, &body.content);

        md.push('\n');
    }

    fn write_responses(&self, md: &mut String, responses: &HashMap<String, ReferenceOr<Response>>) {
        if responses.is_empty() {
            return;
        }

        md.push_str(HEADER_RESPONSES);

        for (status, response) in sorted_entries(responses) {
            let Some(response) = self.components.resolve(response) else {
                continue;
            };

            md.push_str(&format!("#### {}\n\n", status));

            // Written whenever present, even if empty
            if let Some(description) = &response.description {
                md.push_str(&format!("{}\n\n", description));
            }

            self.write_response_headers(md, &response.headers);
            self.write_content(md, &response.content);

            md.push('\n');
        }
    }

    fn write_response_headers(
        &self,
        md: &mut String,
        headers: &HashMap<String, ReferenceOr<Header>>,
    ) {
        if headers.is_empty() {
            return;
        }

        md.push_str(HEADER_HEADERS);

        for (name, header) in sorted_entries(headers) {
            let Some(header) = self.components.resolve(header) else {
                continue;
            };

            match markdown::non_empty(header.description.as_ref()) {
                Some(description) => md.push_str(&format!("- `{}` - {}\n", name, description)),
                None => md.push_str(&format!("- `{}`\n", name)),
            }

            if let Some(schema) = self.components.resolve_schema(header.schema.as_ref()) {
                md.push_str(&format!("  - Type: `{}`\n", format_type(Some(schema))));
            }
        }

        md.push('\n');
    }

    /// Content-type blocks shared by request bodies and responses.
    fn write_content(&self, md: &mut String, content: &HashMap<String, MediaType>) {
        for (content_type, media_type) in sorted_entries(content) {
            md.push_str(&format!("**Content-Type:** `{}`\n\n", content_type));

            if let Some(schema) = self.components.resolve_schema(media_type.schema.as_ref()) {
                md.push_str(HEADER_SCHEMA);
                md.push_str(&self.schemas.render(Some(schema), 0, MAX_RECURSION_DEPTH));
            }

            self.write_examples(md, &media_type.examples);
        }
    }

    fn write_examples(&self, md: &mut String, examples: &HashMap<String, ReferenceOr<Example>>) {
        if examples.is_empty() {
            return;
        }

        md.push_str(HEADER_EXAMPLES);

        for (name, example) in sorted_entries(examples) {
            let Some(example) = self.components.resolve(example) else {
                continue;
            };

            match markdown::non_empty(example.summary.as_ref()) {
                Some(summary) => md.push_str(&format!("*{}* (`{}`):\n\n", summary, name)),
                None => md.push_str(&format!("*Example: `{}`*:\n\n", name)),
            }

            match format_json(example.value.as_ref()) {
                Ok(json) => md.push_str(&format!("```json\n{}\n```\n\n", json)),
                Err(err) => {
                    warn!("Example {} is not serializable as JSON: {}", name, err);
                    let text = example
                        .value
                        .as_ref()
                        .map(|value| ValueDisplay(value).to_string())
                        .unwrap_or_else(|| "<nil>".to_string());
                    md.push_str(&format!("```\n{}\n```\n\n", text));
                }
            }
        }
    }

    /// Only the operation's own requirements are listed.
    fn write_security(&self, md: &mut String, security: Option<&[SecurityRequirement]>) {
        let Some(requirements) = security.filter(|requirements| !requirements.is_empty()) else {
            return;
        };

        md.push_str(HEADER_SECURITY);

        for requirement in requirements {
            for (scheme, scopes) in sorted_entries(requirement) {
                if scopes.is_empty() {
                    md.push_str(&format!("- **{}**\n", scheme));
                } else {
                    md.push_str(&format!("- **{}**: {}\n", scheme, scopes.join(", ")));
                }
            }
        }

        md.push('\n');
    }
}
