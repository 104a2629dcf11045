use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::controller::DriveStatusController;
use crate::model::ActionReply;
use crate::remote::{DriveApi, DriveClient};
use crate::session::SelectionSession;
use crate::store::ConfigStore;
use crate::tui::TuiRunOptions;

use super::worker::{BrowseEvent, BrowseWorker};

pub(super) const MESSAGE_LOG_LIMIT: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum UiMode {
    Status,
    Browse,
}

pub(super) struct App<'a> {
    pub(super) controller: DriveStatusController<'a>,
    pub(super) session: SelectionSession,
    pub(super) mode: UiMode,
    pub(super) choices: Vec<String>,
    pub(super) selected: usize,
    pub(super) messages: Vec<String>,
    pub(super) updated_at: Option<String>,
    pub(super) version_line: Option<String>,
    pub(super) device_url: String,
    pub(super) quit: bool,
    browse: Option<BrowseWorker>,
    browse_generation: u64,
}

pub(super) fn run(opts: TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let base_url = resolve_url(opts.url)?;
    let client = DriveClient::new(base_url)?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::new(&client);
    app.startup(&client);
    let res = super::event_loop::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();
    res
}

fn resolve_url(url: Option<String>) -> Result<String> {
    match url {
        Some(url) => Ok(url),
        None => ConfigStore::open_default()?
            .device()?
            .map(|device| device.base_url)
            .context("no device configured (run `odectl connect http://...`)"),
    }
}

impl<'a> App<'a> {
    pub(super) fn new(client: &'a DriveClient) -> Self {
        Self {
            device_url: client.base_url().to_string(),
            controller: DriveStatusController::new(client),
            session: SelectionSession::new(),
            mode: UiMode::Status,
            choices: Vec::new(),
            selected: 0,
            messages: Vec::new(),
            updated_at: None,
            version_line: None,
            quit: false,
            browse: None,
            browse_generation: 0,
        }
    }

    pub(super) fn startup(&mut self, client: &DriveClient) {
        // Version is decoration; old firmware may not serve it at all.
        self.version_line = client.fetch_version().ok().map(|info| {
            format!(
                "client API {}  device API {}",
                info.client_api_version.as_deref().unwrap_or("?"),
                info.server_api_version.as_deref().unwrap_or("?"),
            )
        });
        self.refresh_now();
    }

    pub(super) fn refresh_now(&mut self) {
        match self.controller.refresh_status() {
            Ok(_) => self.stamp_updated(),
            Err(err) => self.push_error(format!("refresh failed: {:#}", err)),
        }
    }

    /// Runs the controller's settle/auto-refresh schedules once per loop
    /// iteration.
    pub(super) fn poll_timers(&mut self) {
        if self.controller.tick() {
            self.stamp_updated();
        }
    }

    pub(super) fn browse_pending(&self) -> bool {
        self.browse.is_some()
    }

    pub(super) fn push_message(&mut self, line: String) {
        self.messages.push(line);
        if self.messages.len() > MESSAGE_LOG_LIMIT {
            let excess = self.messages.len() - MESSAGE_LOG_LIMIT;
            self.messages.drain(..excess);
        }
    }

    pub(super) fn push_error(&mut self, line: String) {
        self.push_message(format!("error: {}", line));
    }

    pub(super) fn toggle_auto_refresh(&mut self) {
        let enable = !self.controller.auto_refresh_enabled();
        self.controller.set_auto_refresh(enable);
        self.push_message(
            if enable {
                "auto-refresh on"
            } else {
                "auto-refresh off"
            }
            .to_string(),
        );
    }

    pub(super) fn eject(&mut self) {
        match self.controller.eject() {
            Ok(ActionReply::Ok) => self.push_message("eject requested".to_string()),
            Ok(ActionReply::Failed(word)) => {
                self.push_error(format!("eject failed (device said {:?})", word))
            }
            Err(err) => self.push_error(format!("eject failed: {:#}", err)),
        }
    }

    pub(super) fn begin_browse(&mut self) {
        if self.browse.is_some() || self.session.is_browsing() {
            self.push_error("browse already in progress".to_string());
            return;
        }
        self.choices.clear();
        self.selected = 0;
        self.browse_generation += 1;
        match super::worker::spawn_browse(&self.device_url, self.browse_generation) {
            Ok(worker) => {
                self.mode = UiMode::Browse;
                self.browse = Some(worker);
            }
            Err(err) => self.push_error(format!("browse failed: {:#}", err)),
        }
    }

    pub(super) fn cancel_browse(&mut self) {
        if let Some(worker) = self.browse.take() {
            worker.cancel.cancel();
        }
        // Anything a cancelled worker still sends is stale from here on.
        self.browse_generation += 1;
        self.session.cancel();
        self.choices.clear();
        self.selected = 0;
        self.mode = UiMode::Status;
    }

    pub(super) fn commit_selection(&mut self) {
        if !self.session.is_browsing() {
            self.push_message("catalog still loading".to_string());
            return;
        }
        let Some(name) = self.choices.get(self.selected).cloned() else {
            self.push_error("nothing to select".to_string());
            return;
        };
        let reply = self.session.commit(&mut self.controller, &name);
        self.choices.clear();
        self.selected = 0;
        self.mode = UiMode::Status;
        match reply {
            Ok(ActionReply::Ok) => self.push_message(format!("load requested: {}", name)),
            Ok(ActionReply::Failed(word)) => {
                self.push_error(format!("load failed (device said {:?})", word))
            }
            Err(err) => self.push_error(format!("load failed: {:#}", err)),
        }
    }

    pub(super) fn move_selection_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(super) fn move_selection_down(&mut self) {
        if self.selected + 1 < self.choices.len() {
            self.selected += 1;
        }
    }

    pub(super) fn drain_browse_events(&mut self) {
        let mut events = Vec::new();
        if let Some(worker) = &self.browse {
            while let Ok(event) = worker.events.try_recv() {
                events.push(event);
            }
        }
        for event in events {
            self.apply_browse_event(event);
        }
    }

    fn apply_browse_event(&mut self, event: BrowseEvent) {
        match event {
            BrowseEvent::Item { generation, name } if generation == self.browse_generation => {
                self.choices.push(name);
            }
            BrowseEvent::Finished { generation, names } if generation == self.browse_generation => {
                self.browse = None;
                self.choices = names;
                if self.selected >= self.choices.len() {
                    self.selected = self.choices.len().saturating_sub(1);
                }
                if let Err(err) = self.session.begin_with_choices(self.choices.clone()) {
                    self.push_error(format!("browse failed: {}", err));
                    self.cancel_browse();
                }
            }
            BrowseEvent::Failed { generation, error } if generation == self.browse_generation => {
                self.browse = None;
                self.push_error(format!("browse failed: {}", error));
                self.session.cancel();
                self.choices.clear();
                self.mode = UiMode::Status;
            }
            // Stale generation: a cancelled browse finishing late.
            _ => {}
        }
    }

    fn stamp_updated(&mut self) {
        self.updated_at = Some(now_ts());
    }
}

pub(super) fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "-".to_string())
}
