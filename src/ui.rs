//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::UiSettings;
use crate::library::SourceMode;
use crate::session::ItemRow;

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("enter", "launch"),
    ("f", "games folder"),
    ("F", "shortcuts folder"),
    ("/", "filter"),
    ("r", "rescan"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn row_text(row: &ItemRow, ui: &UiSettings) -> String {
    match (&row.item.subfolder, ui.show_subfolder) {
        (Some(sub), true) => format!("{}  [{}]", row.label(), sub),
        _ => row.label(),
    }
}

/// Upper-case the characters of `text` at `positions` so filter hits stand out.
fn highlight(text: &str, positions: &[usize]) -> String {
    let mut rendered = String::with_capacity(text.len());
    let mut pos_iter = positions.iter().copied().peekable();

    for (ci, ch) in text.chars().enumerate() {
        if pos_iter.peek() == Some(&ci) {
            rendered.extend(ch.to_uppercase());
            pos_iter.next();
        } else {
            rendered.push(ch);
        }
    }
    rendered
}

fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    match app.active_mode {
        Some(SourceMode::GamesFolder) => parts.push(" SOURCE: Games".to_string()),
        Some(SourceMode::ShortcutsFolder) => parts.push(" SOURCE: Shortcuts".to_string()),
        None => parts.push(" SOURCE: none (press f or F)".to_string()),
    }

    if let Some(name) = &app.launching {
        parts.push(format!("RUNNING: {}", name));
    }

    let q = app.filter_query.trim();
    if app.filter_mode || !q.is_empty() {
        let mut filter_part = String::from("FILTER:");
        if !q.is_empty() {
            filter_part.push(' ');
            filter_part.push_str(q);
        }
        parts.push(filter_part);
    }

    parts.push(format!("Items: {}", app.rows.len()));

    if let Some(dir) = &app.active_dir {
        parts.push(format!("Dir: {}", dir));
    }

    if let Some(msg) = app.notice.as_ref().or(app.status.as_ref()) {
        parts.push(msg.clone());
    }

    parts.join(" • ")
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, display: &[usize], ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" launchtime ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Main list: only build items for the visible window, centred on the selection.
    {
        let filtering = !app.filter_query.trim().is_empty();
        let total = display.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = sel_pos.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = display[start..end]
            .iter()
            .map(|&i| {
                let text = row_text(&app.rows[i], ui_settings);
                match app.filter_positions(i) {
                    Some(positions) if filtering => ListItem::new(highlight(&text, &positions)),
                    _ => ListItem::new(text),
                }
            })
            .collect();

        let title = match app.active_mode {
            Some(SourceMode::ShortcutsFolder) => " shortcuts ",
            _ => " games ",
        };
        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    if let Some(prompt) = &app.prompt {
        let popup_area = centered_rect_sized(72, 3, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let title = match prompt.mode {
            SourceMode::GamesFolder => " games folder (enter to pick, esc to cancel) ",
            SourceMode::ShortcutsFolder => " shortcuts folder (enter to pick, esc to cancel) ",
        };
        let input = Paragraph::new(format!("{}_", prompt.input)).block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(title),
        );
        frame.render_widget(input, popup_area);
    }

    if let Some(name) = &app.launching {
        let popup_area = centered_rect_sized(60, 3, chunks[2]);
        frame.render_widget(Clear, popup_area);
        let running = Paragraph::new(format!("{} is running, timing it...", name))
            .alignment(Alignment::Center)
            .slow_blink()
            .block(Block::default().borders(Borders::ALL).title(" playing "));
        frame.render_widget(running, popup_area);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::LibraryItem;

    #[test]
    fn highlight_uppercases_matched_chars() {
        assert_eq!(highlight("hades.exe", &[0, 2]), "HaDes.exe");
        assert_eq!(highlight("hades.exe", &[]), "hades.exe");
    }

    #[test]
    fn row_text_shows_subfolder_only_when_enabled() {
        let row = ItemRow {
            item: LibraryItem::executable("GameA", "GameA.exe"),
            accumulated_millis: 62_000,
        };
        let mut ui = UiSettings::default();
        assert_eq!(row_text(&row, &ui), "GameA.exe (Playtime: 1 min)");

        ui.show_subfolder = true;
        assert_eq!(row_text(&row, &ui), "GameA.exe (Playtime: 1 min)  [GameA]");
    }

    #[test]
    fn status_prefers_view_notice_over_session_status() {
        let mut app = App::new(Vec::new());
        app.status = Some("from session".into());
        assert!(status_text(&app).contains("from session"));

        app.notice = Some("from view".into());
        let text = status_text(&app);
        assert!(text.contains("from view"));
        assert!(!text.contains("from session"));
    }
}
