//! Browser UI rendering: entry list, status bar and key map bar.

use super::ThemeColors;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the browser UI.
pub(super) fn draw_browser(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);

    // Main layout with status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    if app.navigator.is_open() {
        draw_entries(f, app, chunks[0], &colors);
    } else {
        draw_welcome(f, chunks[0], &colors);
    }

    draw_status(f, app, chunks[1], &colors);
    draw_keymap(f, app, chunks[2], &colors);
}

fn draw_entries(f: &mut Frame<'_>, app: &mut App, area: Rect, colors: &ThemeColors) {
    // Keep the selection inside the bordered viewport.
    let viewport = area.height.saturating_sub(2) as usize;
    app.navigator.adjust_scroll(viewport);

    let selected = app.navigator.selected();
    let scroll = app.navigator.scroll();

    let items: Vec<ListItem<'_>> = app
        .navigator
        .entries()
        .iter()
        .enumerate()
        .skip(scroll)
        .take(viewport.max(1))
        .map(|(idx, entry)| {
            let style = if idx == selected {
                Style::default()
                    .fg(colors.cursor_fg)
                    .bg(colors.cursor_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text)
            };

            ListItem::new(Line::from(entry.display_name())).style(style)
        })
        .collect();

    let title = app
        .navigator
        .handle()
        .map(|h| format!(" {} | Path: {} ", h.file_name(), app.navigator.path()))
        .unwrap_or_else(|| " Halocline ".to_string());

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg)),
    );

    f.render_widget(list, area);
}

fn draw_status(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let text = if app.prompt.is_active() {
        format!("{}{}", app.prompt.label(), app.prompt.buffer())
    } else {
        app.status.clone()
    };

    let paragraph =
        Paragraph::new(text).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    f.render_widget(paragraph, area);
}

fn draw_keymap(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let keymap_text = if app.prompt.is_active() {
        "Enter:confirm | Esc:cancel | Type a path"
    } else if app.info.is_some() {
        "Press any key to close"
    } else {
        "o:Open | jk/↑↓:Navigate | hl/←→:Parent/Enter | g:Top | G:Bottom | e:Export subtree | c:Export CSV | i:Info | q:Quit"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}

fn draw_welcome(f: &mut Frame<'_>, area: Rect, colors: &ThemeColors) {
    let lines = vec![
        Line::from(Span::styled(
            "Welcome to Halocline!",
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Open a container file to get started"),
        Line::from(""),
        Line::from("Usage: halocline <file.nc|file.h5>"),
        Line::from(""),
        Line::from("Keyboard shortcuts:"),
        Line::from("  o           - Open a file"),
        Line::from("  j/k or ↓/↑  - Navigate"),
        Line::from("  h/l or ←/→  - Parent / enter group"),
        Line::from("  e           - Export group to a new container file"),
        Line::from("  c           - Export dataset to CSV"),
        Line::from("  i           - Dataset info"),
        Line::from("  q           - Quit"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Halocline ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .style(Style::default().bg(colors.bg)),
        )
        .style(Style::default().fg(colors.text));

    f.render_widget(paragraph, area);
}
