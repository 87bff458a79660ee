// App state and main event loop.
// Manages tabs, keyboard input, and the one-in-flight-per-catalog fetch
// lifecycle; fetch results arrive over an mpsc channel and are applied
// between draws.

use std::collections::HashMap;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::ListState;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::api::{ApiClient, Character, Episode, Product, Resource};
use crate::cache::paths;
use crate::error::Result;
use crate::favorites::FavoritesStore;
use crate::fetch::{self, FetchOutcome, FetchPayload, Fetcher};
use crate::state::Catalog;
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Characters,
    Episodes,
    Locations,
    Favorites,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Characters => "Characters",
            Tab::Episodes => "Episodes",
            Tab::Locations => "Products",
            Tab::Favorites => "Favorites",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Characters => Tab::Episodes,
            Tab::Episodes => Tab::Locations,
            Tab::Locations => Tab::Favorites,
            Tab::Favorites => Tab::Characters,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Characters => Tab::Favorites,
            Tab::Episodes => Tab::Characters,
            Tab::Locations => Tab::Episodes,
            Tab::Favorites => Tab::Locations,
        }
    }

    /// The catalog backing this tab, if any.
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Tab::Characters => Some(Resource::Characters),
            Tab::Episodes => Some(Resource::Episodes),
            Tab::Locations => Some(Resource::Locations),
            Tab::Favorites => None,
        }
    }
}

/// A user command, produced by key handling and processed synchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    SelectNext,
    SelectPrev,
    NextPage,
    PrevPage,
    OpenSearch,
    CloseSearch { clear: bool },
    SearchInput(char),
    SearchBackspace,
    ToggleFavorite { resource: Resource, id: String },
    RemoveFavorite { resource: Resource, id: String },
    Refresh,
}

/// Main application state.
pub struct App {
    pub active_tab: Tab,
    pub characters: Catalog<Character>,
    pub episodes: Catalog<Episode>,
    pub locations: Catalog<Product>,
    pub favorites: FavoritesStore,
    /// Selection on the Favorites tab.
    pub favorites_state: ListState,
    /// Whether the search input captures keystrokes.
    pub search_active: bool,
    pub should_quit: bool,
    fetcher: Fetcher,
    tx: UnboundedSender<FetchOutcome>,
    rx: UnboundedReceiver<FetchOutcome>,
    /// Live fetch task per catalog; replaced (and the old one aborted) when
    /// a new fetch starts.
    pending: HashMap<Resource, JoinHandle<()>>,
}

impl App {
    pub fn new() -> Result<Self> {
        let favorites = match paths::favorites_path() {
            Some(path) => FavoritesStore::load(path),
            None => FavoritesStore::in_memory(),
        };
        let fetcher = Fetcher::new(ApiClient::new()?);
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            active_tab: Tab::default(),
            characters: Catalog::new(),
            episodes: Catalog::new(),
            locations: Catalog::new(),
            favorites,
            favorites_state: ListState::default(),
            search_active: false,
            should_quit: false,
            fetcher,
            tx,
            rx,
            pending: HashMap::new(),
        })
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            self.drain_fetch_outcomes();
            self.ensure_loaded();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Start the fetch for the active tab's catalog the first time it shows.
    fn ensure_loaded(&mut self) {
        if let Some(resource) = self.active_tab.resource() {
            let idle = match resource {
                Resource::Characters => self.characters.data.is_idle(),
                Resource::Episodes => self.episodes.data.is_idle(),
                Resource::Locations => self.locations.data.is_idle(),
            };
            if idle {
                self.start_fetch(resource, true);
            }
        }
    }

    /// Spawn a fetch for one catalog, superseding any in-flight request.
    fn start_fetch(&mut self, resource: Resource, use_cache: bool) {
        let generation = match resource {
            Resource::Characters => self.characters.begin_request(),
            Resource::Episodes => self.episodes.begin_request(),
            Resource::Locations => self.locations.begin_request(),
        };

        // A superseded request must never update displayed state: abort its
        // task, and drop its outcome on arrival if it already completed.
        if let Some(previous) = self.pending.remove(&resource) {
            previous.abort();
        }

        let fetcher = self.fetcher.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = fetch::fetch_resource(fetcher, resource, generation, use_cache).await;
            let _ = tx.send(outcome);
        });
        self.pending.insert(resource, handle);
    }

    /// Apply completed fetches. Outcomes from superseded requests are
    /// silently dropped; cancellation is not an error.
    fn drain_fetch_outcomes(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            let FetchOutcome {
                resource,
                generation,
                payload,
            } = outcome;

            match payload {
                FetchPayload::Characters(result) => {
                    if !self.characters.is_current(generation) {
                        continue;
                    }
                    match result {
                        Ok(items) => self.characters.set_loaded(items),
                        Err(e) => self.characters.set_error(e.to_string()),
                    }
                }
                FetchPayload::Episodes(result) => {
                    if !self.episodes.is_current(generation) {
                        continue;
                    }
                    match result {
                        Ok(items) => self.episodes.set_loaded(items),
                        Err(e) => self.episodes.set_error(e.to_string()),
                    }
                }
                FetchPayload::Locations(result) => {
                    if !self.locations.is_current(generation) {
                        continue;
                    }
                    match result {
                        Ok(items) => self.locations.set_loaded(items),
                        Err(e) => self.locations.set_error(e.to_string()),
                    }
                }
            }

            self.pending.remove(&resource);
        }
    }

    /// Handle keyboard events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = self.action_for_key(key.code) {
                        self.apply(action);
                    }
                }
            }
        }
        Ok(())
    }

    /// Map a key press to a command, depending on mode and tab.
    fn action_for_key(&self, code: KeyCode) -> Option<Action> {
        if self.search_active {
            return match code {
                KeyCode::Esc => Some(Action::CloseSearch { clear: true }),
                KeyCode::Enter => Some(Action::CloseSearch { clear: false }),
                KeyCode::Backspace => Some(Action::SearchBackspace),
                KeyCode::Char(c) => Some(Action::SearchInput(c)),
                _ => None,
            };
        }

        match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevPage),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::NextPage),
            KeyCode::Char('/') if self.active_tab != Tab::Favorites => Some(Action::OpenSearch),
            KeyCode::Char('r') if self.active_tab != Tab::Favorites => Some(Action::Refresh),
            KeyCode::Char('f') | KeyCode::Char(' ') | KeyCode::Delete => self.favorite_action(),
            _ => None,
        }
    }

    /// Build the favorite command for the current selection.
    fn favorite_action(&self) -> Option<Action> {
        match self.active_tab {
            Tab::Characters => self.characters.selected_item().map(|c| Action::ToggleFavorite {
                resource: Resource::Characters,
                id: c.id.to_string(),
            }),
            Tab::Episodes => self.episodes.selected_item().map(|e| Action::ToggleFavorite {
                resource: Resource::Episodes,
                id: e.id.to_string(),
            }),
            Tab::Locations => self.locations.selected_item().map(|p| Action::ToggleFavorite {
                resource: Resource::Locations,
                id: p.id.to_string(),
            }),
            Tab::Favorites => {
                let entries = self.favorites.entries();
                let selected = self.favorites_state.selected()?;
                let entry = entries.get(selected)?;
                Some(Action::RemoveFavorite {
                    resource: entry.resource,
                    id: entry.id.clone(),
                })
            }
        }
    }

    /// Process a command synchronously.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextTab => self.switch_tab(self.active_tab.next()),
            Action::PrevTab => self.switch_tab(self.active_tab.prev()),
            Action::SelectNext => self.select_next(),
            Action::SelectPrev => self.select_prev(),
            Action::NextPage => {
                match self.active_tab {
                    Tab::Characters => self.characters.next_page(),
                    Tab::Episodes => self.episodes.next_page(),
                    Tab::Locations => self.locations.next_page(),
                    Tab::Favorites => {}
                };
            }
            Action::PrevPage => {
                match self.active_tab {
                    Tab::Characters => self.characters.prev_page(),
                    Tab::Episodes => self.episodes.prev_page(),
                    Tab::Locations => self.locations.prev_page(),
                    Tab::Favorites => {}
                };
            }
            Action::OpenSearch => self.search_active = true,
            Action::CloseSearch { clear } => {
                self.search_active = false;
                if clear {
                    match self.active_tab {
                        Tab::Characters => self.characters.clear_query(),
                        Tab::Episodes => self.episodes.clear_query(),
                        Tab::Locations => self.locations.clear_query(),
                        Tab::Favorites => {}
                    }
                }
            }
            Action::SearchInput(c) => match self.active_tab {
                Tab::Characters => self.characters.push_query_char(c),
                Tab::Episodes => self.episodes.push_query_char(c),
                Tab::Locations => self.locations.push_query_char(c),
                Tab::Favorites => {}
            },
            Action::SearchBackspace => match self.active_tab {
                Tab::Characters => self.characters.pop_query_char(),
                Tab::Episodes => self.episodes.pop_query_char(),
                Tab::Locations => self.locations.pop_query_char(),
                Tab::Favorites => {}
            },
            Action::ToggleFavorite { resource, id } => self.toggle_favorite(resource, &id),
            Action::RemoveFavorite { resource, id } => {
                self.favorites.remove(resource, &id);
                self.clamp_favorites_selection();
            }
            Action::Refresh => {
                if let Some(resource) = self.active_tab.resource() {
                    // Manual refetch evicts the cache entry, then refetches.
                    self.fetcher.invalidate(resource.url());
                    self.start_fetch(resource, true);
                }
            }
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.search_active = false;
        self.active_tab = tab;
        if tab == Tab::Favorites {
            self.clamp_favorites_selection();
        }
    }

    fn select_next(&mut self) {
        match self.active_tab {
            Tab::Characters => self.characters.select_next(),
            Tab::Episodes => self.episodes.select_next(),
            Tab::Locations => self.locations.select_next(),
            Tab::Favorites => {
                let len = self.favorites.total();
                if len == 0 {
                    return;
                }
                let i = match self.favorites_state.selected() {
                    Some(i) if i + 1 >= len => i,
                    Some(i) => i + 1,
                    None => 0,
                };
                self.favorites_state.select(Some(i));
            }
        }
    }

    fn select_prev(&mut self) {
        match self.active_tab {
            Tab::Characters => self.characters.select_prev(),
            Tab::Episodes => self.episodes.select_prev(),
            Tab::Locations => self.locations.select_prev(),
            Tab::Favorites => {
                if self.favorites.total() == 0 {
                    return;
                }
                let i = match self.favorites_state.selected() {
                    Some(i) => i.saturating_sub(1),
                    None => 0,
                };
                self.favorites_state.select(Some(i));
            }
        }
    }

    /// Toggle favorite membership: remove if present, otherwise duplicate
    /// the full record into the store with its stringified id.
    fn toggle_favorite(&mut self, resource: Resource, id: &str) {
        if self.favorites.is_favorite(resource, id) {
            self.favorites.remove(resource, id);
            return;
        }
        match resource {
            Resource::Characters => {
                let item = self
                    .characters
                    .data
                    .data()
                    .and_then(|items| items.iter().find(|c| c.id.to_string() == id))
                    .cloned();
                if let Some(item) = item {
                    self.favorites.add_character(item);
                }
            }
            Resource::Episodes => {
                let item = self
                    .episodes
                    .data
                    .data()
                    .and_then(|items| items.iter().find(|e| e.id.to_string() == id))
                    .cloned();
                if let Some(item) = item {
                    self.favorites.add_episode(item);
                }
            }
            Resource::Locations => {
                let item = self
                    .locations
                    .data
                    .data()
                    .and_then(|items| items.iter().find(|p| p.id.to_string() == id))
                    .cloned();
                if let Some(item) = item {
                    self.favorites.add_location(item);
                }
            }
        }
    }

    /// Keep the Favorites selection valid after a removal or tab switch.
    fn clamp_favorites_selection(&mut self) {
        let len = self.favorites.total();
        if len == 0 {
            self.favorites_state.select(None);
        } else {
            let i = self.favorites_state.selected().unwrap_or(0).min(len - 1);
            self.favorites_state.select(Some(i));
        }
    }
}
