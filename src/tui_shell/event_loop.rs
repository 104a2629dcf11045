use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<'_>,
) -> Result<()> {
    loop {
        app.drain_browse_events();
        app.poll_timers();

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App<'_>, key: KeyEvent) {
    match app.mode {
        UiMode::Status => handle_status_key(app, key),
        UiMode::Browse => handle_browse_key(app, key),
    }
}

fn handle_status_key(app: &mut App<'_>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('r') => app.refresh_now(),
        KeyCode::Char('a') => app.toggle_auto_refresh(),
        KeyCode::Char('e') => app.eject(),
        KeyCode::Char('s') | KeyCode::Enter => app.begin_browse(),
        _ => {}
    }
}

fn handle_browse_key(app: &mut App<'_>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Esc => app.cancel_browse(),
        KeyCode::Up => app.move_selection_up(),
        KeyCode::Down => app.move_selection_down(),
        KeyCode::Enter => app.commit_selection(),
        _ => {}
    }
}
