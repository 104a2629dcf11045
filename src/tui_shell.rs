use anyhow::Result;

mod app;
mod event_loop;
mod render;
mod worker;

// Make core TUI types available to submodules via `super::...`.
use app::{App, MESSAGE_LOG_LIMIT, UiMode};

pub(crate) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}
