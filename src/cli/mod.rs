//! # CLI Module
//!
//! Command-line interface for routedoc. Every command reads a router
//! manifest (see [`crate::manifest`]) and works on the route table built
//! from it.
//!
//! ## Commands
//!
//! - `build`: register every route into an OpenAPI document and print or
//!   write it as YAML or JSON
//! - `list-routes`: display every URI with its resource and documented methods
//! - `path`: print the path item resolved for a single URI
//!
//! ## Exit Status
//!
//! `build` exits non-zero when any route could not be registered; the
//! document is still written with the routes that succeeded. `path` exits
//! non-zero for a URI no resource is bound to.
//!
//! ## Usage Example
//!
//! ```bash
//! # Build the document as JSON
//! routedoc build --manifest app.yaml --title "Swagger Petstore" --format json
//!
//! # Show the route table
//! routedoc list-routes --manifest app.yaml
//!
//! # Inspect one path
//! routedoc path --manifest app.yaml --uri /hi
//! ```

use crate::env::{AppConfig, OutputFormat};
use crate::manifest;
use crate::open_api::ApiSpec;
use crate::plugin::RouterPlugin;
use crate::route_table::RouteTableBuilder;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

///////////////////////////////////////////////////////////////////////////////
//****                        Private Structs                            ****//
///////////////////////////////////////////////////////////////////////////////

#[derive(Parser)]
#[command(name = "routedoc")]
#[command(about = "Build OpenAPI path specifications from router docstrings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

///////////////////////////////////////////////////////////////////////////////
//****                         Private Types                             ****//
///////////////////////////////////////////////////////////////////////////////

#[derive(Subcommand)]
enum Commands {
    /// Build the OpenAPI document for every route of a manifest
    #[command(name = "build")]
    Build {
        #[arg(long)]
        manifest: PathBuf,
        #[arg(long, default_value = "API")]
        title: String,
        #[arg(long = "api-version", default_value = "1.0.0")]
        api_version: String,
        #[arg(long, help = "Description placed in the info object")]
        description: Option<String>,
        #[arg(long, value_enum, help = "Output format (default: ROUTEDOC_OUTPUT_FORMAT)")]
        format: Option<OutputFormat>,
        #[arg(long, help = "Write to this file instead of stdout")]
        output: Option<PathBuf>,
    },
    /// List every route discovered in a manifest
    #[command(name = "list-routes")]
    ListRoutes {
        #[arg(long)]
        manifest: PathBuf,
    },
    /// Print the path item resolved for one URI
    #[command(name = "path")]
    Path {
        #[arg(long)]
        manifest: PathBuf,
        #[arg(long)]
        uri: String,
    },
}

///////////////////////////////////////////////////////////////////////////////
//****                       Public Functions                            ****//
///////////////////////////////////////////////////////////////////////////////

/// Parse the command line and run the selected command
pub fn parse_cli_commands(config: &AppConfig) -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            manifest,
            title,
            api_version,
            description,
            format,
            output,
        } => build(
            config,
            &manifest,
            &title,
            &api_version,
            description,
            format.unwrap_or(config.output_format),
            output.as_deref(),
        ),
        Commands::ListRoutes { manifest } => list_routes(config, &manifest),
        Commands::Path { manifest, uri } => print_path(config, &manifest, &uri),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
//****                       Private Functions                           ****//
///////////////////////////////////////////////////////////////////////////////

fn load_plugin(config: &AppConfig, manifest_path: &Path) -> Result<RouterPlugin, Box<dyn Error>> {
    let router = manifest::load(manifest_path)?;
    let builder = RouteTableBuilder::new(config.cache_enabled)
        .with_responder_module(&config.responder_module);
    Ok(RouterPlugin::with_builder(Arc::new(router), builder))
}

fn build(
    config: &AppConfig,
    manifest_path: &Path,
    title: &str,
    api_version: &str,
    description: Option<String>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<bool, Box<dyn Error>> {
    let plugin = load_plugin(config, manifest_path)?;

    let mut spec = ApiSpec::new(title, api_version, &config.openapi_version);
    if let Some(description) = description {
        spec = spec.with_info("description", json!(description));
    }

    let report = plugin.auto_build_spec(&mut spec)?;
    for (uri, e) in &report.failures {
        error!("Failed to register '{}': {}", uri, e);
    }

    let rendered = match format {
        OutputFormat::Yaml => spec.to_yaml()?,
        OutputFormat::Json => spec.to_json()?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            info!("Wrote {} paths to {}", report.registered.len(), path.display());
            println!("Wrote {} paths to {}", report.registered.len(), path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(report.is_success())
}

fn list_routes(config: &AppConfig, manifest_path: &Path) -> Result<bool, Box<dyn Error>> {
    let plugin = load_plugin(config, manifest_path)?;
    let table = plugin.route_table()?;

    // Header
    println!("\n{:<30} | {:<25} | {:<30}", "Path", "Resource", "Methods");
    println!("{:-<90}", "");

    for (uri, entry) in table.iter() {
        let methods: Vec<&str> = entry.methods.keys().map(String::as_str).collect();
        println!(
            "{:<30} | {:<25} | {:<30}",
            uri,
            entry.resource.name,
            methods.join(",")
        );
    }
    Ok(true)
}

fn print_path(config: &AppConfig, manifest_path: &Path, uri: &str) -> Result<bool, Box<dyn Error>> {
    let plugin = load_plugin(config, manifest_path)?;

    let mut spec = ApiSpec::new("", "", &config.openapi_version);
    plugin.path(&mut spec, uri)?;

    let path_item = spec.path(uri).cloned().unwrap_or_default();
    println!("{}", serde_json::to_string_pretty(&path_item)?);
    Ok(true)
}
