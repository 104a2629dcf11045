//! Catalog enumeration off the UI thread.
//!
//! The event loop must keep painting while the device assembles its listing,
//! so a browse runs on its own thread with its own client and streams what it
//! finds over a channel.

use std::sync::mpsc;
use std::thread;

use anyhow::Result;

use crate::catalog::{CancelToken, CatalogEnumerator, EnumerateError};
use crate::remote::DriveClient;

pub(super) enum BrowseEvent {
    Item { generation: u64, name: String },
    Finished { generation: u64, names: Vec<String> },
    Failed { generation: u64, error: String },
}

pub(super) struct BrowseWorker {
    pub(super) cancel: CancelToken,
    pub(super) events: mpsc::Receiver<BrowseEvent>,
}

/// Spawns one enumeration. Events carry the browse generation so the app can
/// drop anything a cancelled browse sends late.
pub(super) fn spawn_browse(base_url: &str, generation: u64) -> Result<BrowseWorker> {
    let client = DriveClient::new(base_url)?;
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let enumerator = CatalogEnumerator::new(&client).with_cancel_token(worker_cancel);
        let item_tx = tx.clone();
        let result = enumerator.enumerate_with(|name| {
            let _ = item_tx.send(BrowseEvent::Item {
                generation,
                name: name.to_string(),
            });
        });
        match result {
            Ok(names) => {
                let _ = tx.send(BrowseEvent::Finished { generation, names });
            }
            // A cancelled browse has no audience.
            Err(EnumerateError::Cancelled) => {}
            Err(err) => {
                let _ = tx.send(BrowseEvent::Failed {
                    generation,
                    error: err.to_string(),
                });
            }
        }
    });

    Ok(BrowseWorker { cancel, events: rx })
}
