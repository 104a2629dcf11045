use anyhow::{Context, Result};
use clap::Parser;

use odectl::model::DeviceConfig;
use odectl::remote::DriveClient;
use odectl::store::ConfigStore;

use crate::Commands;

#[derive(Parser)]
#[command(name = "odectl")]
#[command(about = "Controller for a network virtual optical drive", long_about = None)]
pub(crate) struct Cli {
    /// Device base URL (overrides the stored config)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => odectl::tui::run_with_options(odectl::tui::TuiRunOptions { url: cli.url }),
        Some(command) => crate::cli_exec::handle_command(command, cli.url),
    }
}

pub(crate) fn require_device(url_flag: Option<String>) -> Result<DriveClient> {
    let base_url = match url_flag {
        Some(url) => url,
        None => ConfigStore::open_default()?
            .device()?
            .map(|DeviceConfig { base_url }| base_url)
            .context("no device configured (run `odectl connect http://...`)")?,
    };
    DriveClient::new(base_url)
}
