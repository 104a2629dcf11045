use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use odectl::controller::AUTO_REFRESH_PERIOD;
use odectl::model::DriveStatus;
use odectl::remote::DriveApi;

use crate::cli_runtime::require_device;

pub(crate) fn show_status(url: Option<String>, json: bool) -> Result<()> {
    let client = require_device(url)?;
    let status = client.fetch_status()?;
    print_status(&status, json)
}

fn print_status(status: &DriveStatus, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(status).context("serialize status json")?
        );
    } else {
        println!("{} CD-ROM", status.role.label());
        println!(
            "mounted: {}",
            status.mounted_image.as_deref().unwrap_or("(none)")
        );
    }
    Ok(())
}

pub(crate) fn watch(url: Option<String>) -> Result<()> {
    let client = require_device(url)?;
    loop {
        match client.fetch_status() {
            Ok(status) => println!(
                "[{}] {} CD-ROM  {}",
                now_stamp(),
                status.role.label(),
                status.mounted_image.as_deref().unwrap_or("(empty)")
            ),
            // Stale until the next successful poll; keep watching.
            Err(err) => eprintln!("[{}] refresh failed: {:#}", now_stamp(), err),
        }
        std::thread::sleep(AUTO_REFRESH_PERIOD);
    }
}

pub(crate) fn show_version(url: Option<String>) -> Result<()> {
    let client = require_device(url)?;
    let info = client.fetch_version()?;
    println!(
        "client API: {}",
        info.client_api_version.as_deref().unwrap_or("unknown")
    );
    println!(
        "device API: {}",
        info.server_api_version.as_deref().unwrap_or("unknown")
    );
    if let Some(message) = &info.message {
        println!("{}", message);
    }
    Ok(())
}

fn now_stamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "-".to_string())
}
