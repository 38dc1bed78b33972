//! clientgen Code Generator
//!
//! Generates a typed async Rust HTTP client from an API document.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clientgen_define::Document;
use clientgen_gen::cargo_gen::write_cargo_toml;
use clientgen_gen::config::{DEFAULT_CLIENT_NAME, DEFAULT_CRATE_NAME, GeneratorConfig};
use clientgen_gen::errors::GeneratorError;
use clientgen_gen::output::generate_and_write;
use tracing::{debug, info};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// clientgen code generator - transforms API documents into typed Rust clients
#[derive(Parser, Debug)]
#[command(name = "clientgen-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API document to generate from (JSON or YAML)
    spec: PathBuf,

    /// Output file for the generated client
    #[arg(short, long, default_value = "client_gen.rs")]
    output: PathBuf,

    /// Name of the generated client struct
    #[arg(long, default_value = DEFAULT_CLIENT_NAME)]
    client_name: String,

    /// Base URL baked into the client (defaults to the document's first server)
    #[arg(long)]
    base_url: Option<String>,

    /// Attempts per request, including the first
    #[arg(long, default_value_t = clientgen::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Linear backoff unit in milliseconds
    #[arg(long, default_value_t = 100)]
    backoff_ms: u64,

    /// Also write a Cargo.toml for a standalone client crate into this directory
    #[arg(long)]
    manifest_dir: Option<PathBuf>,

    /// Package name used in the generated Cargo.toml
    #[arg(long, default_value = DEFAULT_CRATE_NAME)]
    crate_name: String,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let config = GeneratorConfig::default()
            .with_client_name(&self.client_name)
            .with_max_attempts(self.max_attempts)
            .with_backoff_unit(Duration::from_millis(self.backoff_ms))
            .with_crate_name(&self.crate_name);

        match &self.base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }
}

/// Initialize tracing subscriber based on verbosity level and output format.
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,clientgen_gen=info".to_string(),
            2 => "info,clientgen_gen=debug,clientgen_define=debug".to_string(),
            _ => "debug,clientgen_gen=trace,clientgen_define=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    let config = cli.config();
    debug!(?config, spec = %cli.spec.display(), dry_run = cli.dry_run, "starting generation");

    let doc = Document::load(&cli.spec)?;
    info!(
        title = %doc.info.title,
        schemas = doc.schemas().len(),
        operations = doc.operations().count(),
        "loaded API document"
    );

    generate_and_write(&doc, &config, &cli.output, cli.dry_run)?;

    if let Some(manifest_dir) = &cli.manifest_dir {
        write_cargo_toml(manifest_dir, &config.crate_name, cli.dry_run)?;
    }

    if !cli.dry_run {
        info!(output = %cli.output.display(), "generation complete");
    }

    Ok(())
}
