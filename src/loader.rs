//! Loading OpenAPI documents from disk and locating endpoints in them.
//!
//! Documents are deserialized leniently: there is no OpenAPI validation, so files with minor
//! schema violations remain usable as long as the structure the renderers read is present.

use crate::error::{Error, Result};
use crate::model::{OpenApiDocument, PathItem};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Largest accepted input file (100 MiB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Accepted input file extensions
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Checks that `path` is an existing, reasonably sized YAML or JSON file.
///
/// # Errors
///
/// Returns an error if the file is missing, is a directory, exceeds [`MAX_FILE_SIZE`] or has
/// an extension other than `.yaml`, `.yml` or `.json`.
pub fn validate_input_file(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::IoError(err),
    })?;

    if metadata.is_dir() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(Error::FileTooLarge {
            file: path.to_path_buf(),
            size: metadata.len(),
            limit: MAX_FILE_SIZE,
        });
    }

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        let shown = if extension.is_empty() {
            "(none)".to_string()
        } else {
            format!(".{}", extension)
        };
        return Err(Error::UnsupportedExtension(shown));
    }

    Ok(())
}

/// Validates, reads and deserializes an OpenAPI document.
///
/// `.json` files are parsed as JSON, everything else as YAML.
pub fn load_document(path: &Path) -> Result<OpenApiDocument> {
    validate_input_file(path)?;

    debug!("Reading OpenAPI document: {}", path.display());
    let content = fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let doc = if is_json {
        parse_json(&content)
    } else {
        parse_yaml(&content)
    }
    .map_err(|err| err.in_file(path))?;

    info!(
        "Loaded OpenAPI {} document with {} paths",
        if doc.openapi.is_empty() { "(unversioned)" } else { doc.openapi.as_str() },
        doc.paths.len()
    );
    Ok(doc)
}

/// Parses a JSON OpenAPI document
pub fn parse_json(content: &str) -> Result<OpenApiDocument> {
    Ok(serde_json::from_str(content)?)
}

/// Parses a YAML OpenAPI document
pub fn parse_yaml(content: &str) -> Result<OpenApiDocument> {
    Ok(serde_yaml::from_str(content)?)
}

/// Prefixes the endpoint path with `/` when it is missing.
pub fn normalize_endpoint_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Finds the path item for `endpoint_path`.
///
/// An exact key match wins. Otherwise templated segments are compared by position only, so
/// `/items/{id}` finds a document path declared as `/items/{itemId}`. The returned key is the
/// path as declared in the document.
pub fn find_path_item<'a>(
    doc: &'a OpenApiDocument,
    endpoint_path: &str,
) -> Result<(&'a str, &'a PathItem)> {
    if doc.paths.is_empty() {
        return Err(Error::NoPaths);
    }

    if let Some((key, item)) = doc.paths.get_key_value(endpoint_path) {
        return Ok((key.as_str(), item));
    }

    let wanted = template_shape(endpoint_path);
    let mut candidates: Vec<(&String, &PathItem)> = doc
        .paths
        .iter()
        .filter(|(key, _)| template_shape(key) == wanted)
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(b.0));

    match candidates.into_iter().next() {
        Some((key, item)) => {
            debug!("Matched {} to document path {}", endpoint_path, key);
            Ok((key.as_str(), item))
        }
        None => Err(Error::EndpointNotFound(endpoint_path.to_string())),
    }
}

/// Path segments with every `{param}` replaced by a placeholder
fn template_shape(path: &str) -> Vec<&str> {
    path.split('/')
        .map(|segment| {
            if segment.starts_with('{') && segment.ends_with('}') {
                "{}"
            } else {
                segment
            }
        })
        .collect()
}
