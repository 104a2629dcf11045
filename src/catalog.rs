//! Two-phase catalog discovery.
//!
//! The device answers the bulk `filenames` listing with `wait` until its own
//! cache is assembled, with `overflow` when the catalog is too large for one
//! reply, or with the complete listing. The overflow fallback iterates the
//! catalog one image per `nextImage` poll. Both phases share one polling
//! policy (fixed interval, no retry cap) and one termination discipline: a
//! single terminal reply ends the loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::model::{ImagePoll, ListingPoll, ProtocolError};
use crate::remote::DriveApi;

/// Fixed pause between `wait` polls on either listing endpoint.
pub const POLL_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Shared flag that aborts an enumeration between polls. A poll already in
/// flight completes; its result is discarded by the caller.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Error)]
pub enum EnumerateError {
    #[error("enumeration cancelled")]
    Cancelled,

    #[error("catalog protocol error: {0}")]
    Protocol(ProtocolError),

    #[error("device request failed: {0:#}")]
    Transport(anyhow::Error),
}

/// Runs the discovery protocol to a terminal outcome. The accumulated name
/// list lives inside one `enumerate` call and is returned by value; nothing
/// is kept across calls.
pub struct CatalogEnumerator<'a> {
    api: &'a dyn DriveApi,
    retry_interval: Duration,
    cancel: CancelToken,
}

impl<'a> CatalogEnumerator<'a> {
    pub fn new(api: &'a dyn DriveApi) -> Self {
        Self {
            api,
            retry_interval: POLL_RETRY_INTERVAL,
            cancel: CancelToken::new(),
        }
    }

    /// Interval override for tests; the default is the device contract value.
    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Full catalog in device order.
    pub fn enumerate(&self) -> Result<Vec<String>, EnumerateError> {
        self.enumerate_with(|_| {})
    }

    /// Like [`enumerate`](Self::enumerate), invoking `on_item` as names are
    /// discovered so a UI can populate its list before the terminal outcome.
    /// The returned list is the authoritative result either way.
    pub fn enumerate_with(
        &self,
        mut on_item: impl FnMut(&str),
    ) -> Result<Vec<String>, EnumerateError> {
        let bulk = loop {
            self.ensure_live()?;
            match self.api.poll_filenames().map_err(classify)? {
                ListingPoll::Pending => self.wait_for_retry(),
                ListingPoll::Overflow => break None,
                ListingPoll::Ready(names) => break Some(names),
            }
        };
        match bulk {
            Some(names) => {
                for name in &names {
                    on_item(name);
                }
                Ok(names)
            }
            None => self.enumerate_one_by_one(&mut on_item),
        }
    }

    /// Overflow path: one image per poll until the device reports `done`.
    /// Polls are strictly sequential, so arrival order is device order.
    fn enumerate_one_by_one(
        &self,
        on_item: &mut dyn FnMut(&str),
    ) -> Result<Vec<String>, EnumerateError> {
        let mut names = Vec::new();
        loop {
            self.ensure_live()?;
            match self.api.poll_next_image().map_err(classify)? {
                ImagePoll::Pending => self.wait_for_retry(),
                ImagePoll::Item(name) => {
                    on_item(&name);
                    names.push(name);
                }
                ImagePoll::Complete => return Ok(names),
            }
        }
    }

    fn ensure_live(&self) -> Result<(), EnumerateError> {
        if self.cancel.is_cancelled() {
            Err(EnumerateError::Cancelled)
        } else {
            Ok(())
        }
    }

    fn wait_for_retry(&self) {
        if !self.retry_interval.is_zero() {
            thread::sleep(self.retry_interval);
        }
    }
}

fn classify(err: anyhow::Error) -> EnumerateError {
    match err.downcast::<ProtocolError>() {
        Ok(protocol) => EnumerateError::Protocol(protocol),
        Err(other) => EnumerateError::Transport(other),
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
