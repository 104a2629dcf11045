use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub version: u32,

    #[serde(default)]
    pub device: Option<DeviceConfig>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            device: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub base_url: String,
}
