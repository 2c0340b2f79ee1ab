use crate::generator::MarkdownGenerator;
use crate::loader::{find_path_item, load_document, normalize_endpoint_path, validate_input_file};
use crate::model::HttpMethod;
use crate::output::{write_to_file, write_to_stdout};
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::path::PathBuf;

/// docfinder - Extract the documentation of one API endpoint from an OpenAPI file as Markdown
#[derive(Parser, Debug)]
#[command(name = "docfinder")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example:\n  docfinder /app/v1/events/{id} openapi.yaml")]
pub struct CliArgs {
    /// API endpoint path to extract documentation for (e.g., /users/{id})
    #[arg(value_name = "ENDPOINT_PATH")]
    pub endpoint_path: String,

    /// Path to the OpenAPI specification file (.yaml, .yml or .json)
    #[arg(value_name = "OPENAPI_FILE")]
    pub openapi_file: PathBuf,

    /// Only document this HTTP method (e.g., GET); all methods if not specified
    #[arg(short = 'm', long = "method", value_enum, ignore_case = true)]
    pub method: Option<HttpMethod>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate, normalize and log already-parsed arguments
pub fn parse_args_from_parsed(mut args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    validate_input_file(&args.openapi_file)?;

    args.endpoint_path = normalize_endpoint_path(&args.endpoint_path);

    info!("Endpoint: {}", args.endpoint_path);
    info!("OpenAPI file: {}", args.openapi_file.display());
    match &args.method {
        Some(method) => info!("Method: {}", method),
        None => info!("Method: all"),
    }
    match &args.output_path {
        Some(output) => info!("Output file: {}", output.display()),
        None => info!("Output: stdout"),
    }

    Ok(args)
}

/// Renders the requested endpoint of the loaded document.
///
/// Returns the Markdown rather than writing it, so the workflow can be driven without touching
/// stdout.
pub fn render(args: &CliArgs) -> Result<String> {
    info!("Loading OpenAPI document...");
    let doc = load_document(&args.openapi_file)
        .with_context(|| format!("Failed to load {}", args.openapi_file.display()))?;

    let (document_path, path_item) = find_path_item(&doc, &args.endpoint_path)?;
    if document_path != args.endpoint_path {
        info!(
            "Endpoint {} is declared as {}",
            args.endpoint_path, document_path
        );
    }

    if let Some(method) = args.method {
        if path_item.operation(method).is_none() {
            warn!("{} {} is not defined in the document", method, document_path);
        }
    }
    let method_filter = args.method.map(|method| method.as_str()).unwrap_or("");

    info!("Rendering markdown...");
    let generator = MarkdownGenerator::new(&doc);
    Ok(generator.generate_markdown(&args.endpoint_path, Some(path_item), method_filter))
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    let markdown = render(&args)?;

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&markdown, output_path)?;
        info!("Successfully wrote documentation to {}", output_path.display());
    } else {
        write_to_stdout(&markdown)?;
    }

    info!("Summary:");
    info!("  - Endpoint: {}", args.endpoint_path);
    info!("  - Operations rendered: {}", markdown.matches("\n## ").count());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"
openapi: 3.0.3
info:
  title: Events API
  version: 1.0.0
paths:
  /app/v1/events/{id}:
    get:
      summary: Get event
    delete:
      summary: Delete event
"#;

    fn write_document(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("openapi.yaml");
        fs::write(&path, DOCUMENT).unwrap();
        path
    }

    fn args(endpoint: &str, file: PathBuf, method: Option<HttpMethod>) -> CliArgs {
        CliArgs {
            endpoint_path: endpoint.to_string(),
            openapi_file: file,
            method,
            output_path: None,
            verbose: false,
        }
    }

    #[test]
    fn test_cli_parsing() {
        let parsed = CliArgs::try_parse_from([
            "docfinder",
            "/items/{id}",
            "openapi.yaml",
            "--method",
            "post",
            "-o",
            "out.md",
            "-v",
        ])
        .unwrap();

        assert_eq!(parsed.endpoint_path, "/items/{id}");
        assert_eq!(parsed.openapi_file, PathBuf::from("openapi.yaml"));
        assert_eq!(parsed.method, Some(HttpMethod::Post));
        assert_eq!(parsed.output_path, Some(PathBuf::from("out.md")));
        assert!(parsed.verbose);
    }

    #[test]
    fn test_cli_requires_two_positionals() {
        assert!(CliArgs::try_parse_from(["docfinder", "/items"]).is_err());
    }

    #[test]
    fn test_parse_args_normalizes() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_document(&temp_dir);

        let parsed = parse_args_from_parsed(args("app/v1/events/{id}", file, None)).unwrap();
        assert_eq!(parsed.endpoint_path, "/app/v1/events/{id}");
    }

    #[test]
    fn test_cli_method_ignores_case() {
        for spelling in ["DELETE", "delete", "Delete"] {
            let parsed =
                CliArgs::try_parse_from(["docfinder", "/x", "openapi.yaml", "-m", spelling])
                    .unwrap();
            assert_eq!(parsed.method, Some(HttpMethod::Delete));
        }
    }

    #[test]
    fn test_cli_rejects_unknown_method() {
        let result =
            CliArgs::try_parse_from(["docfinder", "/x", "openapi.yaml", "--method", "FETCH"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_args_rejects_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.yaml");

        let err = parse_args_from_parsed(args("/x", missing, None)).unwrap_err();
        assert!(err.to_string().contains("file does not exist"));
    }

    #[test]
    fn test_render_all_methods() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_document(&temp_dir);

        let markdown = render(&args("/app/v1/events/{id}", file, None)).unwrap();
        assert!(markdown.starts_with("# API Endpoint: /app/v1/events/{id}\n\n"));
        assert!(markdown.contains("**API:** Events API 1.0.0"));
        assert!(markdown.contains("## GET /app/v1/events/{id}"));
        assert!(markdown.contains("## DELETE /app/v1/events/{id}"));
    }

    #[test]
    fn test_render_filtered_method() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_document(&temp_dir);

        let cli_args = args("/app/v1/events/{id}", file, Some(HttpMethod::Delete));
        let markdown = render(&cli_args).unwrap();
        assert!(markdown.contains("## DELETE /app/v1/events/{id}"));
        assert!(!markdown.contains("## GET"));
    }

    #[test]
    fn test_render_method_missing_from_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_document(&temp_dir);

        let cli_args = args("/app/v1/events/{id}", file, Some(HttpMethod::Post));
        let markdown = render(&cli_args).unwrap();
        assert!(markdown.starts_with("# API Endpoint: /app/v1/events/{id}\n\n"));
        assert!(!markdown.contains("## "));
    }

    #[test]
    fn test_render_unknown_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_document(&temp_dir);

        let err = render(&args("/app/v2/events", file, None)).unwrap_err();
        assert!(err.to_string().contains("endpoint not found: /app/v2/events"));
    }

    #[test]
    fn test_run_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_document(&temp_dir);
        let output = temp_dir.path().join("docs").join("events.md");

        let mut cli_args = args("/app/v1/events/{id}", file, Some(HttpMethod::Get));
        cli_args.output_path = Some(output.clone());
        run(cli_args).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("## GET /app/v1/events/{id}"));
        assert!(written.ends_with("---\n\n"));
    }
}
