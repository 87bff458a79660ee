// Catalog list rendering.
// Provides styled list views with loading, error, and empty states, plus the
// Favorites tab list.

use chrono::NaiveDate;
use ratatui::{prelude::*, widgets::*};

use crate::api::{Character, Episode, Product, Resource};
use crate::favorites::FavoritesStore;
use crate::state::{Catalog, LoadingState};

/// Render a loading indicator.
fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}\n\npress r to retry", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

fn list_widget(items: Vec<ListItem<'static>>, title: &'static str) -> List<'static> {
    List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ")
}

fn heart(is_favorite: bool) -> Span<'static> {
    if is_favorite {
        Span::styled("❤️ ", Style::default().fg(Color::Red))
    } else {
        Span::raw("   ")
    }
}

/// Render the characters list.
pub fn render_characters(
    frame: &mut Frame,
    catalog: &mut Catalog<Character>,
    favorites: &FavoritesStore,
    area: Rect,
) {
    match &catalog.data {
        LoadingState::Idle | LoadingState::Loading => {
            render_loading(frame, area, "Loading characters")
        }
        LoadingState::Error(e) => render_error(frame, area, e),
        LoadingState::Loaded(data) if data.is_empty() => {
            render_empty(frame, area, "No characters found")
        }
        LoadingState::Loaded(_) => {
            if catalog.filtered_len() == 0 {
                render_empty(
                    frame,
                    area,
                    "😢 No characters match your search\nTry a different name or occupation",
                );
                return;
            }

            let items: Vec<ListItem> = catalog
                .page_items()
                .into_iter()
                .map(|character| {
                    let is_fav =
                        favorites.is_favorite(Resource::Characters, &character.id.to_string());
                    let status_icon = match character.status.as_deref() {
                        Some("Alive") => "💚",
                        Some(_) => "💀",
                        None => "  ",
                    };

                    let mut spans = vec![
                        heart(is_fav),
                        Span::styled(character.name.clone(), Style::default().fg(Color::Cyan)),
                    ];
                    if let Some(occupation) = &character.occupation {
                        spans.push(Span::styled(
                            format!("  💼 {}", occupation),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    if let Some(age) = character.age {
                        spans.push(Span::styled(
                            format!("  🎂 {}", age),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    spans.push(Span::raw(format!("  {}", status_icon)));

                    ListItem::new(Line::from(spans))
                })
                .collect();

            let widget = list_widget(items, " Characters ");
            frame.render_stateful_widget(widget, area, &mut catalog.list_state);
        }
    }
}

/// Render the episodes list.
pub fn render_episodes(
    frame: &mut Frame,
    catalog: &mut Catalog<Episode>,
    favorites: &FavoritesStore,
    area: Rect,
) {
    match &catalog.data {
        LoadingState::Idle | LoadingState::Loading => render_loading(frame, area, "Loading episodes"),
        LoadingState::Error(e) => render_error(frame, area, e),
        LoadingState::Loaded(data) if data.is_empty() => {
            render_empty(frame, area, "No episodes found")
        }
        LoadingState::Loaded(_) => {
            if catalog.filtered_len() == 0 {
                render_empty(
                    frame,
                    area,
                    "😢 No episodes match your search\nTry a title or a code like S4E12",
                );
                return;
            }

            let items: Vec<ListItem> = catalog
                .page_items()
                .into_iter()
                .map(|episode| {
                    let is_fav = favorites.is_favorite(Resource::Episodes, &episode.id.to_string());

                    let mut spans = vec![
                        heart(is_fav),
                        Span::styled(
                            format!("{:<7}", episode.code()),
                            Style::default().fg(Color::Magenta),
                        ),
                        Span::styled(episode.name.clone(), Style::default().fg(Color::Cyan)),
                    ];
                    if let Some(rating) = episode.rating {
                        spans.push(Span::styled(
                            format!("  ⭐ {:.1}", rating),
                            Style::default().fg(Color::Yellow),
                        ));
                    }
                    if let Some(date) = episode
                        .original_air_date
                        .as_deref()
                        .and_then(format_air_date)
                    {
                        spans.push(Span::styled(
                            format!("  📅 {}", date),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }

                    ListItem::new(Line::from(spans))
                })
                .collect();

            let widget = list_widget(items, " Episodes ");
            frame.render_stateful_widget(widget, area, &mut catalog.list_state);
        }
    }
}

/// Render the products/locations list.
pub fn render_locations(
    frame: &mut Frame,
    catalog: &mut Catalog<Product>,
    favorites: &FavoritesStore,
    area: Rect,
) {
    match &catalog.data {
        LoadingState::Idle | LoadingState::Loading => render_loading(frame, area, "Loading products"),
        LoadingState::Error(e) => render_error(frame, area, e),
        LoadingState::Loaded(data) if data.is_empty() => {
            render_empty(frame, area, "No products found")
        }
        LoadingState::Loaded(_) => {
            if catalog.filtered_len() == 0 {
                render_empty(
                    frame,
                    area,
                    "😢 No products match your search\nTry a different title or description",
                );
                return;
            }

            let items: Vec<ListItem> = catalog
                .page_items()
                .into_iter()
                .map(|product| {
                    let is_fav =
                        favorites.is_favorite(Resource::Locations, &product.id.to_string());

                    let mut spans = vec![
                        heart(is_fav),
                        Span::styled(product.title.clone(), Style::default().fg(Color::Cyan)),
                    ];
                    if let Some(description) = &product.description {
                        spans.push(Span::styled(
                            format!("  {}", truncate(description, 60)),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }

                    ListItem::new(Line::from(spans))
                })
                .collect();

            let widget = list_widget(items, " Products ");
            frame.render_stateful_widget(widget, area, &mut catalog.list_state);
        }
    }
}

/// Render the Favorites tab: all favorited items across the three resources.
pub fn render_favorites(
    frame: &mut Frame,
    favorites: &FavoritesStore,
    list_state: &mut ListState,
    area: Rect,
) {
    if favorites.is_empty() {
        render_empty(
            frame,
            area,
            "💛 No favorites yet\nBrowse characters, episodes, and products and press f to save them",
        );
        return;
    }

    let items: Vec<ListItem> = favorites
        .entries()
        .into_iter()
        .map(|entry| {
            let icon = match entry.resource {
                Resource::Characters => "👥",
                Resource::Episodes => "📺",
                Resource::Locations => "🏷️",
            };

            let mut spans = vec![
                Span::raw(format!("{} ", icon)),
                Span::styled(entry.label, Style::default().fg(Color::Cyan)),
            ];
            if let Some(detail) = entry.detail {
                spans.push(Span::styled(
                    format!("  {}", truncate(&detail, 60)),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let widget = list_widget(items, " Favorites ");
    frame.render_stateful_widget(widget, area, list_state);
}

/// Format an upstream air date (YYYY-MM-DD) for display; pass through
/// anything that does not parse.
fn format_air_date(raw: &str) -> Option<String> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date.format("%b %e, %Y").to_string()),
        Err(_) => Some(raw.to_string()),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate("Duff Beer", 60), "Duff Beer");
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "a".repeat(80);
        let out = truncate(&long, 60);
        assert_eq!(out.len(), 63);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_format_air_date() {
        assert_eq!(
            format_air_date("1993-05-13"),
            Some("May 13, 1993".to_string())
        );
        // Unparseable dates pass through untouched.
        assert_eq!(format_air_date("sometime"), Some("sometime".to_string()));
    }
}
