//! Immersa gateway.
//!
//! ```text
//!  browser ──▶ /immersa/          ──▶ app shell
//!          ──▶ /immersa/list/     ──▶ app shell
//!          ──▶ /immersa/segments/* ──▶ session token ──▶ LiveOps /segments/*
//! ```
//!
//! Configuration comes from an optional TOML file (`--config`) plus the
//! `LIVEOPS_SERVICE_URL` and `IMMERSA_BIND_ADDRESS` environment variables.

use std::path::PathBuf;

use clap::Parser;

use immersa_gateway::lifecycle::{self, signals, Shutdown};

#[derive(Parser)]
#[command(name = "immersa-gateway")]
#[command(about = "Serves the Immersa views and relays segment calls to LiveOps", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let prepared = match lifecycle::prepare(cli.config.as_deref()).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("immersa-gateway: {}", e);
            std::process::exit(1);
        }
    };

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    prepared
        .server
        .run(prepared.listener, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
