use anyhow::{Context, Result};

use odectl::catalog::CatalogEnumerator;
use odectl::controller::DriveStatusController;
use odectl::model::ActionReply;

use crate::cli_runtime::require_device;

pub(crate) fn eject(url: Option<String>) -> Result<()> {
    let client = require_device(url)?;
    let mut controller = DriveStatusController::new(&client);
    let reply = controller.eject()?;
    controller.flush_pending_refresh();
    match reply {
        ActionReply::Ok => {
            report_status(&controller);
            Ok(())
        }
        ActionReply::Failed(word) => anyhow::bail!("eject failed (device said {:?})", word),
    }
}

pub(crate) fn load(url: Option<String>, name: &str) -> Result<()> {
    let client = require_device(url)?;
    let mut controller = DriveStatusController::new(&client);
    let reply = controller.mount(name);
    // The view always comes back to status after a mount attempt.
    controller.resume_status_view();
    controller.flush_pending_refresh();
    report_status(&controller);
    match reply? {
        ActionReply::Ok => Ok(()),
        ActionReply::Failed(word) => anyhow::bail!("load failed (device said {:?})", word),
    }
}

pub(crate) fn images(url: Option<String>, json: bool) -> Result<()> {
    let client = require_device(url)?;
    let enumerator = CatalogEnumerator::new(&client);
    let names = enumerator.enumerate()?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&names).context("serialize image list")?
        );
    } else if names.is_empty() {
        println!("(catalog is empty)");
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}

fn report_status(controller: &DriveStatusController<'_>) {
    match controller.status() {
        Some(status) => {
            println!("{} CD-ROM", status.role.label());
            println!(
                "mounted: {}",
                status.mounted_image.as_deref().unwrap_or("(none)")
            );
        }
        None => println!("status unavailable"),
    }
}
