//! On-disk controller configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::{ControllerConfig, DeviceConfig};

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at the user's config location (`~/.config/odectl/config.json`).
    pub fn open_default() -> Result<Self> {
        let home = std::env::var_os("HOME").context("HOME not set")?;
        let path = PathBuf::from(home)
            .join(".config")
            .join("odectl")
            .join("config.json");
        Ok(Self { path })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty config, not an error.
    pub fn read_config(&self) -> Result<ControllerConfig> {
        if !self.path.exists() {
            return Ok(ControllerConfig::default());
        }
        let bytes = fs::read(&self.path)
            .with_context(|| format!("read config {}", self.path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parse config {}", self.path.display()))
    }

    pub fn write_config(&self, config: &ControllerConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        let bytes = serde_json::to_vec_pretty(config).context("serialize config")?;
        fs::write(&self.path, bytes)
            .with_context(|| format!("write config {}", self.path.display()))
    }

    pub fn device(&self) -> Result<Option<DeviceConfig>> {
        Ok(self.read_config()?.device)
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
