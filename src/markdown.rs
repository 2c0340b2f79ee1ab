//! Markdown building blocks shared by the renderers.

pub const HEADER_PARAMETERS: &str = "### Parameters\n\n";
pub const HEADER_REQUEST_BODY: &str = "### Request Body\n\n";
pub const HEADER_RESPONSES: &str = "### Responses\n\n";
pub const HEADER_SECURITY: &str = "### Security\n\n";
pub const HEADER_EXAMPLES: &str = "\n**Examples:**\n\n";
pub const HEADER_HEADERS: &str = "**Headers:**\n\n";
pub const HEADER_SCHEMA: &str = "**Schema:**\n\n";

pub const SEPARATOR_OPERATION: &str = "---\n\n";
pub const MARKER_REQUIRED: &str = " **(required)**";
pub const MARKER_DEPRECATED: &str = " ⚠️ *deprecated*";
pub const WARNING_DEPRECATED_OPERATION: &str = concat!(
    "⚠️ **DEPRECATED** - This operation is deprecated ",
    "and may be removed in a future version.\n\n"
);

/// Two spaces per indentation level
pub fn indent(level: usize) -> String {
    "  ".repeat(level)
}

/// `MARKER_REQUIRED` when `required`, otherwise nothing
pub fn required_marker(required: bool) -> &'static str {
    if required {
        MARKER_REQUIRED
    } else {
        ""
    }
}

/// `MARKER_DEPRECATED` when `deprecated`, otherwise nothing
pub fn deprecated_marker(deprecated: bool) -> &'static str {
    if deprecated {
        MARKER_DEPRECATED
    } else {
        ""
    }
}

/// Returns the string only if it is present and non-empty
pub fn non_empty(text: Option<&String>) -> Option<&str> {
    text.map(String::as_str).filter(|s| !s.is_empty())
}
