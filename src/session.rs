//! One browse-and-commit (or cancel) cycle.
//!
//! `Idle -> Browsing -> { commit | cancel } -> Idle`. The choice list is
//! owned by the session and dies with it; a later session never sees an
//! earlier session's names.

use thiserror::Error;

use crate::catalog::{CatalogEnumerator, EnumerateError};
use crate::controller::DriveStatusController;
use crate::model::ActionReply;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a browse is already in progress")]
    AlreadyBrowsing,

    #[error(transparent)]
    Enumerate(#[from] EnumerateError),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Idle,
    Browsing {
        choices: Vec<String>,
    },
}

#[derive(Clone, Debug, Default)]
pub struct SelectionSession {
    phase: Phase,
}

impl SelectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_browsing(&self) -> bool {
        matches!(self.phase, Phase::Browsing { .. })
    }

    pub fn choices(&self) -> &[String] {
        match &self.phase {
            Phase::Browsing { choices } => choices,
            Phase::Idle => &[],
        }
    }

    /// Enter browsing: enumerate the catalog and hold the choice list.
    /// A second browse while one is outstanding is rejected.
    pub fn begin(&mut self, enumerator: &CatalogEnumerator<'_>) -> Result<&[String], SessionError> {
        if self.is_browsing() {
            return Err(SessionError::AlreadyBrowsing);
        }
        let choices = enumerator.enumerate()?;
        self.phase = Phase::Browsing { choices };
        Ok(self.choices())
    }

    /// Enter browsing with a list enumerated elsewhere (the TUI runs the
    /// enumerator on a worker thread). Same gating as [`begin`](Self::begin).
    pub fn begin_with_choices(&mut self, choices: Vec<String>) -> Result<(), SessionError> {
        if self.is_browsing() {
            return Err(SessionError::AlreadyBrowsing);
        }
        self.phase = Phase::Browsing { choices };
        Ok(())
    }

    /// Back to Idle with no drive-state change; the choice list is discarded.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Mount the chosen name, then return to Idle and the status view no
    /// matter how the mount went ("attempt, then show status").
    pub fn commit(
        &mut self,
        controller: &mut DriveStatusController<'_>,
        name: &str,
    ) -> anyhow::Result<ActionReply> {
        if !self.is_browsing() {
            anyhow::bail!("no browse in progress");
        }
        let reply = controller.mount(name);
        self.phase = Phase::Idle;
        controller.resume_status_view();
        reply
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
