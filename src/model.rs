mod config;
mod protocol;
mod status;

pub use self::config::{ControllerConfig, DeviceConfig};
pub use self::protocol::{ActionReply, ImagePoll, ListingPoll, ProtocolError};
pub use self::status::{DriveRole, DriveStatus, VersionInfo};
