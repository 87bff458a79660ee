// UI module for rendering the TUI.
// Lays out the tab bar, search row, catalog lists, pagination bar, and
// status bar.

mod list;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::state::{Catalog, CatalogEntry};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Length(3), // Search / summary row
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Pagination bar
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    match app.active_tab {
        Tab::Characters => draw_search_row(frame, &app.characters, app.search_active, chunks[1]),
        Tab::Episodes => draw_search_row(frame, &app.episodes, app.search_active, chunks[1]),
        Tab::Locations => draw_search_row(frame, &app.locations, app.search_active, chunks[1]),
        Tab::Favorites => draw_favorites_summary(frame, app, chunks[1]),
    }

    match app.active_tab {
        Tab::Characters => {
            list::render_characters(frame, &mut app.characters, &app.favorites, chunks[2]);
        }
        Tab::Episodes => {
            list::render_episodes(frame, &mut app.episodes, &app.favorites, chunks[2]);
        }
        Tab::Locations => {
            list::render_locations(frame, &mut app.locations, &app.favorites, chunks[2]);
        }
        Tab::Favorites => {
            list::render_favorites(frame, &app.favorites, &mut app.favorites_state, chunks[2]);
        }
    }

    match app.active_tab {
        Tab::Characters => draw_pagination(frame, &app.characters, chunks[3]),
        Tab::Episodes => draw_pagination(frame, &app.episodes, chunks[3]),
        Tab::Locations => draw_pagination(frame, &app.locations, chunks[3]),
        Tab::Favorites => {}
    }

    draw_status_bar(frame, app, chunks[4]);
}

/// Draw the search input row with the current match count.
fn draw_search_row<T: CatalogEntry>(
    frame: &mut Frame,
    catalog: &Catalog<T>,
    active: bool,
    area: Rect,
) {
    let mut spans = vec![Span::styled("🔍 ", Style::default().fg(Color::Yellow))];
    if catalog.query().is_empty() && !active {
        spans.push(Span::styled(
            "press / to search",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::raw(catalog.query().to_string()));
    }
    if active {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    if !catalog.query().is_empty() {
        spans.push(Span::styled(
            format!("  {} found", catalog.filtered_len()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let border_color = if active { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Search ");
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Summary row shown on the Favorites tab.
fn draw_favorites_summary(frame: &mut Frame, app: &App, area: Rect) {
    let total = app.favorites.total();
    let text = if total == 1 {
        "⭐ 1 item saved".to_string()
    } else {
        format!("⭐ {} items saved", total)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Favorites ");
    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Draw the pagination bar: prev/next plus a five-wide page window.
fn draw_pagination<T: CatalogEntry>(frame: &mut Frame, catalog: &Catalog<T>, area: Rect) {
    let page_count = catalog.page_count();
    if page_count <= 1 {
        return;
    }

    let current = catalog.current_page();
    let mut spans = Vec::new();

    let prev_style = if current == 1 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    spans.push(Span::styled(" ← Prev ", prev_style));

    for page in catalog.page_window() {
        if page == current {
            spans.push(Span::styled(
                format!(" [{}] ", page),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} ", page),
                Style::default().fg(Color::White),
            ));
        }
    }

    let next_style = if current == page_count {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    spans.push(Span::styled(" Next → ", next_style));

    spans.push(Span::styled(
        format!(
            "  Page {} of {} ({} items)",
            current,
            page_count,
            catalog.filtered_len()
        ),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar with keybinding hints.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = if app.search_active {
        vec![
            Span::raw(" type "),
            Span::styled("Filter", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Done", Style::default().fg(Color::DarkGray)),
            Span::raw("  Esc "),
            Span::styled("Clear", Style::default().fg(Color::DarkGray)),
        ]
    } else if app.active_tab == Tab::Favorites {
        vec![
            Span::raw(" ↑↓ "),
            Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
            Span::raw("  f "),
            Span::styled("Remove", Style::default().fg(Color::DarkGray)),
            Span::raw("  Tab "),
            Span::styled("Switch", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]
    } else {
        vec![
            Span::raw(" ↑↓ "),
            Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
            Span::raw("  ←→ "),
            Span::styled("Page", Style::default().fg(Color::DarkGray)),
            Span::raw("  / "),
            Span::styled("Search", Style::default().fg(Color::DarkGray)),
            Span::raw("  f "),
            Span::styled("Favorite", Style::default().fg(Color::DarkGray)),
            Span::raw("  r "),
            Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
            Span::raw("  Tab "),
            Span::styled("Switch", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}
