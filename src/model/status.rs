use serde::{Deserialize, Serialize};

use super::protocol::ProtocolError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveRole {
    Primary,
    Secondary,
}

impl DriveRole {
    pub fn label(&self) -> &'static str {
        match self {
            DriveRole::Primary => "Primary",
            DriveRole::Secondary => "Secondary",
        }
    }
}

/// Latest known drive state. Read-only to the UI; replaced wholesale after a
/// successful status fetch, never patched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveStatus {
    pub role: DriveRole,
    pub mounted_image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    #[serde(rename = "isPrimary")]
    is_primary: bool,

    #[serde(default)]
    image: Option<RawImageRef>,
}

#[derive(Debug, Deserialize)]
struct RawImageRef {
    filename: String,
}

impl DriveStatus {
    pub fn from_wire(value: serde_json::Value) -> Result<Self, ProtocolError> {
        let raw: RawStatus = serde_json::from_value(value).map_err(|source| {
            ProtocolError::Malformed {
                what: "status",
                source,
            }
        })?;
        Ok(DriveStatus {
            role: if raw.is_primary {
                DriveRole::Primary
            } else {
                DriveRole::Secondary
            },
            mounted_image: raw.image.map(|image| image.filename),
        })
    }
}

/// Firmware version report. Every field is best-effort: older firmware omits
/// some of them and the controller still renders what it got.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VersionInfo {
    #[serde(rename = "clientAPIVersion", default)]
    pub client_api_version: Option<String>,

    #[serde(rename = "serverAPIVersion", default)]
    pub server_api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
