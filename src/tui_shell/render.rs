use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::*;

pub(super) fn draw(frame: &mut Frame, app: &App<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(MESSAGE_LOG_LIMIT as u16 + 2),
        ])
        .split(frame.area());

    match app.mode {
        UiMode::Status => draw_status(frame, app, chunks[0]),
        UiMode::Browse => draw_browse(frame, app, chunks[0]),
    }
    draw_messages(frame, app, chunks[1]);
}

fn draw_status(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let title = Line::from(vec![
        Span::styled("drive status", Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            app.updated_at.as_deref().unwrap_or("never refreshed"),
            Style::default().fg(Color::Gray),
        ),
    ]);
    let outer = Block::default().borders(Borders::ALL).title(title);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let mut lines = vec![Line::from(vec![
        Span::styled("device ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.device_url.clone()),
    ])];
    match app.controller.status() {
        Some(status) => {
            lines.push(Line::from(format!("{} CD-ROM", status.role.label())));
            lines.push(match &status.mounted_image {
                Some(name) => Line::from(vec![
                    Span::styled("mounted ", Style::default().fg(Color::DarkGray)),
                    Span::styled(name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ]),
                None => Line::from(Span::styled(
                    "no image mounted",
                    Style::default().fg(Color::DarkGray),
                )),
            });
        }
        None => lines.push(Line::from("status unavailable")),
    }
    lines.push(Line::from(format!(
        "auto-refresh: {}",
        if app.controller.auto_refresh_enabled() {
            "on"
        } else {
            "off"
        }
    )));
    if let Some(version) = &app.version_line {
        lines.push(Line::from(Span::styled(
            version.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "s select image   e eject   r refresh   a auto-refresh   q quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_browse(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let loading = app.browse_pending();
    let title = Line::from(vec![
        Span::styled("select image", Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            if loading {
                "loading catalog..."
            } else {
                "Enter to load, Esc to cancel"
            },
            Style::default().fg(Color::Gray),
        ),
    ]);
    let outer = Block::default().borders(Borders::ALL).title(title);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if app.choices.is_empty() {
        let placeholder = if loading {
            "waiting for the device..."
        } else {
            "(catalog is empty)"
        };
        frame.render_widget(Paragraph::new(placeholder), inner);
        return;
    }

    // Keep the selection in view; no scrollbar, just a window.
    let visible = (inner.height as usize).max(1);
    let first = app.selected.saturating_sub(visible - 1);
    let lines: Vec<Line> = app
        .choices
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(i, name)| {
            if i == app.selected {
                Line::from(Span::styled(
                    format!("> {}", name),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", name))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_messages(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let outer = Block::default().borders(Borders::ALL).title("log");
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    let lines: Vec<Line> = app
        .messages
        .iter()
        .map(|message| Line::from(message.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
