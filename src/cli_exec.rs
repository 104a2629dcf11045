use anyhow::Result;

use crate::Commands;

mod connect;
mod media;
mod status;

pub(crate) fn handle_command(command: Commands, url: Option<String>) -> Result<()> {
    match command {
        Commands::Status { json } => status::show_status(url, json),
        Commands::Watch => status::watch(url),
        Commands::Version => status::show_version(url),
        Commands::Eject => media::eject(url),
        Commands::Load { name } => media::load(url, &name),
        Commands::Images { json } => media::images(url, json),
        Commands::Connect { url: device_url } => connect::connect(device_url.or(url)),
    }
}
