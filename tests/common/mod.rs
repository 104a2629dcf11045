use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

pub struct SimGuard {
    pub base_url: String,
    _workdir: tempfile::TempDir,
    child: Child,
}

impl Drop for SimGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Spawns the device simulator with the given scenario flags and waits for
/// it to come up.
pub fn spawn_sim(scenario: &[&str]) -> Result<SimGuard> {
    let workdir = tempfile::tempdir().context("create sim tempdir")?;
    let addr_file = workdir.path().join("addr.txt");

    let child = Command::new(env!("CARGO_BIN_EXE_odectl-sim"))
        .args(["--addr", "127.0.0.1:0", "--addr-file"])
        .arg(&addr_file)
        .args(scenario)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn odectl-sim")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(SimGuard {
        base_url,
        _workdir: workdir,
        child,
    })
}

fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("simulator did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct RequestRecord {
    pub endpoint: String,
    pub at_ms: u64,
}

/// Request timeline the simulator recorded, in arrival order.
pub fn request_log(base_url: &str) -> Result<Vec<RequestRecord>> {
    let records = reqwest::blocking::get(format!("{}/debug/requests", base_url))
        .context("fetch request log")?
        .json()
        .context("parse request log")?;
    Ok(records)
}

#[allow(dead_code)]
pub fn count_requests(log: &[RequestRecord], endpoint: &str) -> usize {
    log.iter().filter(|r| r.endpoint == endpoint).count()
}
