use anyhow::{Context, Result};

use crate::model::{ActionReply, DriveStatus, ImagePoll, ListingPoll, VersionInfo};

mod http_client;

#[cfg(test)]
pub(crate) mod testing;

/// Boundary to the device's HTTP surface. The enumerator, controller, and UI
/// depend on this trait so they can be driven against a scripted device in
/// tests; [`DriveClient`] is the production implementation.
pub trait DriveApi {
    fn fetch_status(&self) -> Result<DriveStatus>;
    fn poll_filenames(&self) -> Result<ListingPoll>;
    fn poll_next_image(&self) -> Result<ImagePoll>;
    fn eject(&self) -> Result<ActionReply>;
    fn load_image(&self, name: &str) -> Result<ActionReply>;
    fn fetch_version(&self) -> Result<VersionInfo>;
}

pub struct DriveClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl DriveClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::blocking::Client::builder()
            .user_agent("odectl")
            .build()
            .context("build reqwest client")?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl DriveApi for DriveClient {
    fn fetch_status(&self) -> Result<DriveStatus> {
        self.get_mapped("status", &[], |value| Ok(DriveStatus::from_wire(value)?))
    }

    fn poll_filenames(&self) -> Result<ListingPoll> {
        self.get_mapped("filenames", &[], |value| Ok(ListingPoll::from_wire(value)?))
    }

    fn poll_next_image(&self) -> Result<ImagePoll> {
        self.get_mapped("nextImage", &[], |value| Ok(ImagePoll::from_wire(value)?))
    }

    fn eject(&self) -> Result<ActionReply> {
        self.get_mapped("eject", &[], |value| Ok(ActionReply::from_wire(value)?))
    }

    fn load_image(&self, name: &str) -> Result<ActionReply> {
        self.get_mapped("image", &[("imageName", name)], |value| {
            Ok(ActionReply::from_wire(value)?)
        })
    }

    fn fetch_version(&self) -> Result<VersionInfo> {
        self.get_mapped("version", &[], |value| {
            serde_json::from_value(value).context("parse version reply")
        })
    }
}
