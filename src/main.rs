//! docfinder - Command-line tool for extracting single-endpoint documentation.
//!
//! This binary loads an OpenAPI 3.x document (YAML or JSON), finds one endpoint path in it
//! and prints that endpoint's operations as Markdown: parameters, request bodies, responses,
//! schemas, examples and security requirements.
//!
//! # Usage
//!
//! ```bash
//! docfinder [OPTIONS] <ENDPOINT_PATH> <OPENAPI_FILE>
//! ```
//!
//! # Examples
//!
//! Document every method of an endpoint:
//! ```bash
//! docfinder /users/{id} openapi.yaml
//! ```
//!
//! Document only the POST operation and write it to a file:
//! ```bash
//! docfinder /users openapi.json -m POST -o docs/users.md
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! docfinder /users openapi.yaml -v
//! ```

use anyhow::Result;
use clap::Parser;
use docfinder::cli;
use log::info;

fn main() -> Result<()> {
    // Parse once up front so the verbose flag can configure the logger
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Logs go to stderr; stdout carries only the Markdown
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .target(env_logger::Target::Stderr)
        .init();

    info!("docfinder starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    cli::run(args)?;

    info!("Endpoint documentation generated successfully");

    Ok(())
}
