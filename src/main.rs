//! cfdns - command-line DNS record management for a Cloudflare zone
//!
//! Subcommands:
//! - `add <subdomain> --type <T> --content <C>`
//! - `delete <subdomain>`
//! - `update <subdomain> --type <T> --content <C>`
//! - `list`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cfdns::commands::{self, Command};
use cfdns::{CloudflareClient, Config};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

//==============================================================================
// Main
//==============================================================================

/// Manage DNS records in a Cloudflare zone
///
/// Reads CLOUDFLARE_API_TOKEN, CLOUDFLARE_ZONE_ID and CLOUDFLARE_DOMAIN_NAME
/// from the environment (or from the file given with --config).
#[derive(Debug, Parser)]
#[command(name = "cfdns")]
#[command(version = VERSION)]
struct Args {
    /// Optional TOML config file; environment variables take precedence
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config).context("configuration error")?;
    init_logging(args.verbose || config.verbose);

    let client = CloudflareClient::new(config).context("Cloudflare client failed")?;

    let mut out = std::io::stdout().lock();
    commands::run(args.command, &client, &mut out).await
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "cfdns=debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
