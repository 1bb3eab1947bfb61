use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use bindinfo_core::diagnostics::validate_to_diagnostics;
use bindinfo_core::schema::build_schema;
use bindinfo_core::{Aggregation, BindContext, BindingConfig, FrameworkMetadata, Messages, complete, hover, validate};

mod request;

use request::Request;

const DEFAULT_TRACE_FILTER: &str = "bindinfo=info,bindinfo_core=info";

#[derive(Debug, Parser)]
#[command(
    name = "bindinfo",
    author,
    version,
    about = "Diagnostics, completion and hover for binding info literals",
    long_about = None
)]
struct CliArgs {
    #[command(subcommand)]
    command: Commands,

    /// Configuration section (JSON), merged over the defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Message catalog overrides (JSON object of message id to template)
    #[arg(long, global = true, value_name = "FILE")]
    messages: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report issues for every binding in the request.
    Diagnose {
        #[arg(value_name = "REQUEST")]
        request: PathBuf,
        /// Print LSP diagnostics instead of plain issues
        #[arg(long)]
        lsp: bool,
    },
    /// Completion items at the request's cursor.
    Complete {
        #[arg(value_name = "REQUEST")]
        request: PathBuf,
    },
    /// Hover for the key at the request's cursor.
    Hover {
        #[arg(value_name = "REQUEST")]
        request: PathBuf,
    },
    /// Dump the binding info schema derived from a metadata snapshot.
    Schema {
        #[arg(value_name = "METADATA")]
        metadata: PathBuf,
        /// Element type of the aggregation to build the list binding schema for
        #[arg(long, value_name = "NAME")]
        aggregation_type: Option<String>,
    },
}

pub(crate) fn read_file_content(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file '{}'", path.display()))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_FILTER));
    let _ = fmt().with_writer(std::io::stderr).with_env_filter(filter).try_init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BindingConfig> {
    match path {
        Some(p) => BindingConfig::from_json(&read_file_content(p)?)
            .with_context(|| format!("Invalid configuration in '{}'", p.display())),
        None => Ok(BindingConfig::default()),
    }
}

fn load_messages(path: Option<&Path>) -> anyhow::Result<Option<Messages>> {
    match path {
        Some(p) => Messages::from_json(&read_file_content(p)?)
            .map(Some)
            .with_context(|| format!("Invalid message catalog in '{}'", p.display())),
        None => Ok(None),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let CliArgs {
        command,
        config,
        messages,
    } = CliArgs::parse();
    let config = load_config(config.as_deref())?;
    let catalog = load_messages(messages.as_deref())?;
    let messages: &Messages = match &catalog {
        Some(catalog) => catalog,
        None => Messages::english(),
    };

    match command {
        Commands::Diagnose { request, lsp } => {
            let request = Request::load(&request)?;
            let ctx = request.context(&config, messages);
            if lsp {
                print_json(&validate_to_diagnostics(&ctx, &request.template))
            } else {
                let issues = validate(&ctx, &request.template);
                tracing::debug!("{} issue(s)", issues.len());
                print_json(&issues)
            }
        }
        Commands::Complete { request } => {
            let request = Request::load(&request)?;
            let ctx = request.context(&config, messages);
            if ctx.position.is_none() {
                tracing::info!("request has no cursor; nothing to complete");
            }
            print_json(&complete(&ctx, &request.template))
        }
        Commands::Hover { request } => {
            let request = Request::load(&request)?;
            let ctx = request.context(&config, messages);
            print_json(&hover(&ctx, &request.template))
        }
        Commands::Schema {
            metadata,
            aggregation_type,
        } => {
            let metadata = FrameworkMetadata::from_json(&read_file_content(&metadata)?)
                .with_context(|| format!("Invalid metadata in '{}'", metadata.display()))?;
            let aggregation = aggregation_type.map(|type_name| Aggregation {
                name: "aggregation".to_string(),
                type_name: Some(type_name),
            });
            let ctx = BindContext::new(&metadata, "", &config).with_messages(messages);
            print_json(&build_schema(&ctx, aggregation.as_ref()))
        }
    }
}
