//! ORMEDM Command-Line Tool
//!
//! Builds the EDM schema of a metamodel snapshot and prints it.

mod config;
mod formatter;

use clap::Parser;
use formatter::OutputFormat;
use ormedm_core::{build_schema, Metamodel};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// ORMEDM Command-Line Tool
#[derive(Parser, Debug)]
#[command(name = "ormedm")]
#[command(version, about = "Build an entity data model from an ORM metamodel")]
pub struct Args {
    /// Metamodel snapshot (JSON)
    pub metamodel: PathBuf,

    /// Build configuration (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Schema namespace, overriding the configuration
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Entity container name, overriding the configuration
    #[arg(long)]
    pub container: Option<String>,

    /// Write a binary snapshot of the built schema to this file
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ormedm=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let metamodel = Metamodel::from_path(&args.metamodel)?;
    let config = config::load(
        args.config.as_deref(),
        args.namespace.as_deref(),
        args.container.as_deref(),
    )?;

    let schema = build_schema(&metamodel, &config)?;

    if let Some(path) = &args.snapshot {
        let bytes = schema.to_bytes()?;
        std::fs::write(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "Schema snapshot written");
    }

    let formatter = formatter::create_formatter(args.format);
    println!("{}", formatter.format_schema(&schema));
    Ok(())
}
