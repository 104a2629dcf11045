//! Simulated network optical drive.
//!
//! Serves the device's HTTP surface with scriptable behavior (listing waits,
//! overflow mode, failure injection) so the controller can be developed and
//! integration-tested without hardware.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use clap::Parser;

#[path = "odectl_sim/state.rs"]
mod state;
use self::state::*;
#[path = "odectl_sim/handlers.rs"]
mod handlers;
use self::handlers::*;

#[derive(Parser)]
#[command(name = "odectl-sim")]
#[command(about = "Simulated network optical drive (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Catalog of image names
    #[arg(
        long,
        default_value = "alpha.iso,beta.iso,gamma.iso",
        value_delimiter = ','
    )]
    images: Vec<String>,

    /// Initially mounted image
    #[arg(long)]
    mounted: Option<String>,

    /// Report the drive as secondary
    #[arg(long)]
    secondary: bool,

    /// Number of `wait` replies before the filename listing is ready
    #[arg(long, default_value_t = 0)]
    listing_waits: u32,

    /// Serve the catalog through the one-at-a-time overflow path
    #[arg(long)]
    overflow: bool,

    /// Number of `wait` replies before each overflow item
    #[arg(long, default_value_t = 0)]
    item_waits: u32,

    /// Reply to eject with this status word instead of ok
    #[arg(long)]
    fail_eject: Option<String>,

    /// Reply to image loads with this status word instead of ok
    #[arg(long)]
    fail_load: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let state = Arc::new(SimState::new(SimOptions {
        catalog: args.images,
        mounted: args.mounted,
        secondary: args.secondary,
        listing_waits: args.listing_waits,
        overflow: args.overflow,
        item_waits: args.item_waits,
        fail_eject: args.fail_eject,
        fail_load: args.fail_load,
    }));

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/status", get(drive_status))
        .route("/filenames", get(filenames))
        .route("/nextImage", get(next_image))
        .route("/eject", get(eject))
        .route("/image", get(load_image))
        .route("/version", get(version))
        .route("/debug/requests", get(request_log))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("odectl-sim listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
