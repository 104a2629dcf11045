//! Scripted in-memory device for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{Result, anyhow};

use crate::model::{ActionReply, DriveStatus, ImagePoll, ListingPoll, VersionInfo};

use super::DriveApi;

/// Replays queued replies per endpoint and records the order of requests.
/// An empty queue is a scripting mistake and surfaces as an error reply,
/// except for `status` which falls back to `default_status` when set.
#[derive(Default)]
pub(crate) struct ScriptedDrive {
    listing: RefCell<VecDeque<Result<ListingPoll>>>,
    items: RefCell<VecDeque<Result<ImagePoll>>>,
    statuses: RefCell<VecDeque<Result<DriveStatus>>>,
    eject_replies: RefCell<VecDeque<Result<ActionReply>>>,
    load_replies: RefCell<VecDeque<Result<ActionReply>>>,
    default_status: RefCell<Option<DriveStatus>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedDrive {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_listing(&self, poll: ListingPoll) {
        self.listing.borrow_mut().push_back(Ok(poll));
    }

    pub(crate) fn push_listing_error(&self, err: anyhow::Error) {
        self.listing.borrow_mut().push_back(Err(err));
    }

    pub(crate) fn push_item(&self, poll: ImagePoll) {
        self.items.borrow_mut().push_back(Ok(poll));
    }

    pub(crate) fn push_status(&self, status: DriveStatus) {
        self.statuses.borrow_mut().push_back(Ok(status));
    }

    pub(crate) fn set_default_status(&self, status: DriveStatus) {
        *self.default_status.borrow_mut() = Some(status);
    }

    pub(crate) fn push_eject_reply(&self, reply: ActionReply) {
        self.eject_replies.borrow_mut().push_back(Ok(reply));
    }

    pub(crate) fn push_load_reply(&self, reply: ActionReply) {
        self.load_replies.borrow_mut().push_back(Ok(reply));
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn count(&self, endpoint: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == endpoint).count()
    }

    fn record(&self, endpoint: &str) {
        self.calls.borrow_mut().push(endpoint.to_string());
    }
}

impl DriveApi for ScriptedDrive {
    fn fetch_status(&self) -> Result<DriveStatus> {
        self.record("status");
        match self.statuses.borrow_mut().pop_front() {
            Some(reply) => reply,
            None => self
                .default_status
                .borrow()
                .clone()
                .ok_or_else(|| anyhow!("no scripted status reply")),
        }
    }

    fn poll_filenames(&self) -> Result<ListingPoll> {
        self.record("filenames");
        self.listing
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted filenames reply")))
    }

    fn poll_next_image(&self) -> Result<ImagePoll> {
        self.record("nextImage");
        self.items
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted nextImage reply")))
    }

    fn eject(&self) -> Result<ActionReply> {
        self.record("eject");
        self.eject_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted eject reply")))
    }

    fn load_image(&self, _name: &str) -> Result<ActionReply> {
        self.record("image");
        self.load_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted image reply")))
    }

    fn fetch_version(&self) -> Result<VersionInfo> {
        self.record("version");
        Ok(VersionInfo::default())
    }
}
