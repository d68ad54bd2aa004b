//! crude-or-rude-server: headline analysis tools over stdio.
//!
//! Speaks line-delimited JSON-RPC on stdin/stdout. Logs go to stderr.

use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;
use tracing::info;

use crude_or_rude::config::{Config, Secrets};
use crude_or_rude::server::ToolServer;
use crude_or_rude::AnalysisService;

/// Crude or Rude tool server
#[derive(Parser)]
#[command(name = "crude-or-rude-server")]
#[command(version = crude_or_rude::PKG_VERSION)]
#[command(about = "Crude oil headline analysis tools over stdio JSON-RPC")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Rule-based decisions only.
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    // stdout carries the protocol; logs must stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load_or_default(args.config.as_deref())?;
    let api_key = if args.offline {
        None
    } else {
        Secrets::load()?.anthropic_api_key()
    };

    let pipeline = config.pipeline_builder(api_key).build()?;
    let service = AnalysisService::new(Arc::new(pipeline))
        .with_max_batch_size(config.limits.max_batch_size);

    info!(
        version = crude_or_rude::PKG_VERSION,
        max_batch_size = service.max_batch_size(),
        "crude-or-rude-server starting"
    );

    let server = ToolServer::new(service);
    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    Ok(())
}
