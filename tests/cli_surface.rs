mod common;

use std::process::Command;

use anyhow::{Context, Result};

fn odectl() -> Command {
    Command::new(env!("CARGO_BIN_EXE_odectl"))
}

#[test]
fn status_json_round_trips_through_the_cli() -> Result<()> {
    let sim = common::spawn_sim(&["--mounted", "alpha.iso"])?;

    let output = odectl()
        .args(["--url", &sim.base_url, "status", "--json"])
        .output()
        .context("run odectl status")?;
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).context("parse status json")?;
    assert_eq!(value["role"], "Primary");
    assert_eq!(value["mounted_image"], "alpha.iso");
    Ok(())
}

#[test]
fn images_lists_the_catalog_in_order() -> Result<()> {
    let sim = common::spawn_sim(&["--images", "a.iso,b.iso"])?;

    let output = odectl()
        .args(["--url", &sim.base_url, "images"])
        .output()
        .context("run odectl images")?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).context("stdout utf8")?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["a.iso", "b.iso"]);
    Ok(())
}

#[test]
fn images_walks_the_overflow_path_transparently() -> Result<()> {
    let sim = common::spawn_sim(&["--images", "a.iso,b.iso", "--overflow"])?;

    let output = odectl()
        .args(["--url", &sim.base_url, "images", "--json"])
        .output()
        .context("run odectl images")?;
    assert!(output.status.success());

    let names: Vec<String> =
        serde_json::from_slice(&output.stdout).context("parse images json")?;
    assert_eq!(names, vec!["a.iso", "b.iso"]);
    Ok(())
}

#[test]
fn failed_load_exits_nonzero_but_still_reports_status() -> Result<()> {
    let sim = common::spawn_sim(&["--fail-load", "busy"])?;

    let output = odectl()
        .args(["--url", &sim.base_url, "load", "alpha.iso"])
        .output()
        .context("run odectl load")?;
    assert!(!output.status.success());

    // The status view still follows the attempt.
    let stdout = String::from_utf8(output.stdout).context("stdout utf8")?;
    assert!(stdout.contains("CD-ROM"), "status missing from: {stdout}");

    let stderr = String::from_utf8(output.stderr).context("stderr utf8")?;
    assert!(stderr.contains("busy"), "failure word missing from: {stderr}");
    Ok(())
}

#[test]
fn eject_via_cli_unmounts_the_image() -> Result<()> {
    let sim = common::spawn_sim(&["--mounted", "alpha.iso"])?;

    let output = odectl()
        .args(["--url", &sim.base_url, "eject"])
        .output()
        .context("run odectl eject")?;
    assert!(output.status.success());

    let log = common::request_log(&sim.base_url)?;
    assert_eq!(common::count_requests(&log, "eject"), 1);
    Ok(())
}

#[test]
fn connect_persists_the_device_url_under_home() -> Result<()> {
    let home = tempfile::tempdir().context("create home tempdir")?;

    let output = odectl()
        .env("HOME", home.path())
        .args(["connect", "http://ode.local"])
        .output()
        .context("run odectl connect")?;
    assert!(output.status.success());

    let output = odectl()
        .env("HOME", home.path())
        .args(["connect"])
        .output()
        .context("run odectl connect (show)")?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).context("stdout utf8")?;
    assert!(stdout.contains("http://ode.local"));
    Ok(())
}
