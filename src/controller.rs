//! Displayed drive state and the operations that change it.
//!
//! This is state storage with triggered side effects, not a state machine:
//! the controller holds the latest fetched [`DriveStatus`], is the only
//! component that issues eject/mount requests, and owns the two refresh
//! schedules (the settle-delayed refresh after an action and the periodic
//! auto-refresh). Both schedules are plain deadline bookkeeping driven by
//! the host loop's [`tick`](DriveStatusController::tick), so there is never
//! a second timer to leak: enabling auto-refresh twice is a no-op and
//! disabling clears the same field that enabling set.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::model::{ActionReply, DriveStatus};
use crate::remote::DriveApi;

/// Pause after a successful action before trusting a status refresh to
/// reflect it.
pub const SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// Period of the background status refresh.
pub const AUTO_REFRESH_PERIOD: Duration = Duration::from_secs(45);

#[derive(Clone, Copy, Debug)]
struct AutoRefresh {
    last: Instant,
}

pub struct DriveStatusController<'a> {
    api: &'a dyn DriveApi,
    status: Option<DriveStatus>,
    auto_refresh: Option<AutoRefresh>,
    pending_refresh: Option<Instant>,
    settle_delay: Duration,
    refresh_period: Duration,
}

impl<'a> DriveStatusController<'a> {
    pub fn new(api: &'a dyn DriveApi) -> Self {
        Self {
            api,
            status: None,
            auto_refresh: None,
            pending_refresh: None,
            settle_delay: SETTLE_DELAY,
            refresh_period: AUTO_REFRESH_PERIOD,
        }
    }

    /// Settle override for tests; the default is the device contract value.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Period override for tests; the default is the device contract value.
    pub fn with_refresh_period(mut self, period: Duration) -> Self {
        self.refresh_period = period;
        self
    }

    /// Latest successfully fetched status, if any.
    pub fn status(&self) -> Option<&DriveStatus> {
        self.status.as_ref()
    }

    /// Fetch and store the current drive status. Always safe to call. A
    /// failed fetch leaves the previously displayed status in place until
    /// the next successful refresh; there is no retry loop here.
    pub fn refresh_status(&mut self) -> Result<&DriveStatus> {
        let status = self.api.fetch_status()?;
        Ok(self.status.insert(status))
    }

    /// Request unmount. An `ok` reply schedules a settle-delayed refresh so
    /// the view catches the new (likely empty) state; a failure reply
    /// changes nothing.
    pub fn eject(&mut self) -> Result<ActionReply> {
        let reply = self.api.eject()?;
        if reply.is_ok() {
            self.schedule_settled_refresh();
        }
        Ok(reply)
    }

    /// Request the named image be mounted. Only the request is issued here;
    /// the caller returns the view to status mode afterwards regardless of
    /// the reply ("attempt, then show status").
    pub fn mount(&mut self, name: &str) -> Result<ActionReply> {
        self.api.load_image(name)
    }

    /// Re-entering the status view after an action attempt implies a
    /// settle-delayed refresh, whatever the action's outcome was.
    pub fn resume_status_view(&mut self) {
        self.schedule_settled_refresh();
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        match (enabled, self.auto_refresh.is_some()) {
            (true, false) => {
                self.auto_refresh = Some(AutoRefresh {
                    last: Instant::now(),
                })
            }
            (false, true) => self.auto_refresh = None,
            // Re-enabling keeps the existing schedule; re-disabling is moot.
            _ => {}
        }
    }

    pub fn auto_refresh_enabled(&self) -> bool {
        self.auto_refresh.is_some()
    }

    /// Cooperative driver, called from the host loop: runs the settle-delayed
    /// refresh once its deadline passes and the periodic auto-refresh once a
    /// full period has elapsed. Returns whether a refresh was attempted.
    pub fn tick(&mut self) -> bool {
        let now = Instant::now();
        let mut due = false;
        if let Some(deadline) = self.pending_refresh {
            if now >= deadline {
                self.pending_refresh = None;
                due = true;
            }
        }
        if !due {
            if let Some(auto) = &self.auto_refresh {
                if now.duration_since(auto.last) >= self.refresh_period {
                    due = true;
                }
            }
        }
        if due {
            // Refresh failures follow the refresh contract: stale until the
            // next successful fetch.
            let _ = self.refresh_status();
            if let Some(auto) = &mut self.auto_refresh {
                auto.last = Instant::now();
            }
        }
        due
    }

    /// Blocking convenience for one-shot CLI use: wait out the settle delay
    /// and run the scheduled refresh now.
    pub fn flush_pending_refresh(&mut self) {
        if let Some(deadline) = self.pending_refresh.take() {
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
            let _ = self.refresh_status();
        }
    }

    fn schedule_settled_refresh(&mut self) {
        self.pending_refresh = Some(Instant::now() + self.settle_delay);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
