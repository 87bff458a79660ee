// Catalog list state: one generic component for all three resource views.
// Applies the free-text filter, pages the filtered result with a per-resource
// page size, and tracks keyboard selection within the visible page.

use ratatui::widgets::ListState;

use crate::api::{Character, Episode, Product, Resource};

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadingState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// An entity that can be listed, searched, and favorited.
///
/// The searchable fields and page size are configuration per resource type;
/// everything else in `Catalog` is shared.
pub trait CatalogEntry: Clone {
    const RESOURCE: Resource;

    fn id(&self) -> u64;

    /// Case-insensitive substring match; `query` arrives already lowercased.
    fn matches(&self, query: &str) -> bool;

    fn page_size() -> usize {
        Self::RESOURCE.page_size()
    }
}

impl CatalogEntry for Character {
    const RESOURCE: Resource = Resource::Characters;

    fn id(&self) -> u64 {
        self.id
    }

    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self
                .occupation
                .as_ref()
                .is_some_and(|o| o.to_lowercase().contains(query))
    }
}

impl CatalogEntry for Episode {
    const RESOURCE: Resource = Resource::Episodes;

    fn id(&self) -> u64 {
        self.id
    }

    fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query) || self.code().to_lowercase().contains(query)
    }
}

impl CatalogEntry for Product {
    const RESOURCE: Resource = Resource::Locations;

    fn id(&self) -> u64 {
        self.id
    }

    fn matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(query))
    }
}

/// State for one catalog view: fetched data, filter query, page, selection.
#[derive(Debug, Clone)]
pub struct Catalog<T: CatalogEntry> {
    pub data: LoadingState<Vec<T>>,
    query: String,
    page: usize,
    generation: u64,
    pub list_state: ListState,
}

impl<T: CatalogEntry> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            data: LoadingState::Idle,
            query: String::new(),
            page: 1,
            generation: 0,
            list_state: ListState::default(),
        }
    }
}

impl<T: CatalogEntry> Catalog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request: bump the generation and enter the loading state.
    /// The returned generation tags the request so a superseded response can
    /// be recognized and dropped.
    pub fn begin_request(&mut self) -> u64 {
        self.generation += 1;
        self.data = LoadingState::Loading;
        self.generation
    }

    /// Whether an outcome with this generation belongs to the live request.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn set_loaded(&mut self, items: Vec<T>) {
        self.data = LoadingState::Loaded(items);
        self.page = 1;
        self.reset_selection();
    }

    pub fn set_error(&mut self, error: String) {
        self.data = LoadingState::Error(error);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the filter query. Any change resets to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.page = 1;
            self.reset_selection();
        }
    }

    pub fn push_query_char(&mut self, c: char) {
        let mut query = self.query.clone();
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_query_char(&mut self) {
        let mut query = self.query.clone();
        query.pop();
        self.set_query(query);
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    /// The collection after filtering; an empty query passes everything.
    pub fn filtered(&self) -> Vec<&T> {
        let items = match self.data.data() {
            Some(items) => items,
            None => return Vec::new(),
        };
        if self.query.is_empty() {
            items.iter().collect()
        } else {
            let query = self.query.to_lowercase();
            items.iter().filter(|item| item.matches(&query)).collect()
        }
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    /// Number of pages of filtered results.
    pub fn page_count(&self) -> usize {
        self.filtered_len().div_ceil(T::page_size())
    }

    /// Current page, clamped into `[1, page_count]`.
    pub fn current_page(&self) -> usize {
        self.page.min(self.page_count()).max(1)
    }

    /// The filtered items visible on the current page.
    pub fn page_items(&self) -> Vec<&T> {
        let filtered = self.filtered();
        let page_size = T::page_size();
        let start = (self.current_page() - 1) * page_size;
        filtered.into_iter().skip(start).take(page_size).collect()
    }

    /// Jump to a page; out-of-range requests clamp instead of erroring.
    pub fn set_page(&mut self, page: usize) {
        let clamped = page.min(self.page_count()).max(1);
        if clamped != self.page {
            self.page = clamped;
            self.reset_selection();
        }
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page() + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.current_page().saturating_sub(1));
    }

    /// Page numbers to display, at most five wide.
    pub fn page_window(&self) -> Vec<usize> {
        page_window(self.current_page(), self.page_count())
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn selected_item(&self) -> Option<&T> {
        let index = self.list_state.selected()?;
        self.page_items().get(index).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.page_items().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 >= len => i,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_prev(&mut self) {
        if self.page_items().is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn reset_selection(&mut self) {
        if self.page_items().is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }
}

/// Sliding window of page numbers, at most five wide.
///
/// Anchored to the first five pages near the start, the last five near the
/// end, and centered on the current page in between.
pub fn page_window(current: usize, page_count: usize) -> Vec<usize> {
    if page_count <= 5 {
        return (1..=page_count).collect();
    }
    let start = if current <= 3 {
        1
    } else if current + 2 >= page_count {
        page_count - 4
    } else {
        current - 2
    };
    (start..start + 5).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn character(id: u64, name: &str, occupation: Option<&str>) -> Character {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "occupation": occupation,
        }))
        .unwrap()
    }

    fn loaded_catalog(count: usize) -> Catalog<Character> {
        let items = (1..=count as u64)
            .map(|i| character(i, &format!("Character {}", i), None))
            .collect();
        let mut catalog = Catalog::new();
        catalog.set_loaded(items);
        catalog
    }

    #[test]
    fn test_filter_matches_name_case_insensitive() {
        let mut items = vec![character(1, "Homer Simpson", Some("Safety Inspector"))];
        for i in 2..=10 {
            items.push(character(i, &format!("Townsperson {}", i), None));
        }
        let mut catalog = Catalog::new();
        catalog.set_loaded(items);

        catalog.set_query("HOMER");
        let filtered = catalog.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Homer Simpson");

        catalog.set_query("homer");
        assert_eq!(catalog.filtered_len(), 1);
    }

    #[test]
    fn test_filter_matches_occupation() {
        let mut catalog = Catalog::new();
        catalog.set_loaded(vec![
            character(1, "Homer Simpson", Some("Safety Inspector")),
            character(2, "Moe Szyslak", Some("Bartender")),
        ]);

        catalog.set_query("bartender");
        assert_eq!(catalog.filtered_len(), 1);
        assert_eq!(catalog.filtered()[0].name, "Moe Szyslak");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut catalog = loaded_catalog(30);
        catalog.set_query("character 1");

        let once: Vec<u64> = catalog.filtered().iter().map(|c| c.id).collect();
        // Filtering the already-filtered set by the same query changes nothing.
        let twice: Vec<u64> = catalog
            .filtered()
            .into_iter()
            .filter(|c| c.matches("character 1"))
            .map(|c| c.id)
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_query_passes_everything() {
        let catalog = loaded_catalog(45);
        assert_eq!(catalog.filtered_len(), 45);
    }

    #[test]
    fn test_page_count_and_last_page_remainder() {
        // 45 items at page size 20: three pages, five items on the last.
        let mut catalog = loaded_catalog(45);
        assert_eq!(catalog.page_count(), 3);

        catalog.set_page(3);
        assert_eq!(catalog.page_items().len(), 5);

        catalog.set_page(1);
        assert_eq!(catalog.page_items().len(), 20);
    }

    #[test]
    fn test_out_of_range_page_clamps() {
        let mut catalog = loaded_catalog(45);

        catalog.set_page(99);
        assert_eq!(catalog.current_page(), 3);

        catalog.set_page(0);
        assert_eq!(catalog.current_page(), 1);
    }

    #[test]
    fn test_query_change_resets_page() {
        let mut catalog = loaded_catalog(45);
        catalog.set_page(3);
        assert_eq!(catalog.current_page(), 3);

        catalog.set_query("character");
        assert_eq!(catalog.current_page(), 1);
    }

    #[test]
    fn test_page_window_small() {
        assert_eq!(page_window(1, 3), vec![1, 2, 3]);
        assert_eq!(page_window(1, 0), Vec::<usize>::new());
        assert_eq!(page_window(2, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_window_anchors_to_start() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(3, 10), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_window_anchors_to_end() {
        assert_eq!(page_window(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_page_window_centers_in_middle() {
        assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(7, 10), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_stale_generation_is_not_current() {
        let mut catalog: Catalog<Character> = Catalog::new();

        let first = catalog.begin_request();
        let second = catalog.begin_request();

        // The superseded request's outcome must be dropped.
        assert!(!catalog.is_current(first));
        assert!(catalog.is_current(second));
        assert!(catalog.data.is_loading());
    }

    #[test]
    fn test_episode_matches_code() {
        let episode: Episode = serde_json::from_value(json!({
            "id": 1,
            "name": "Homer's Odyssey",
            "season": 1,
            "episode": 3
        }))
        .unwrap();

        assert!(episode.matches("s1e3"));
        assert!(episode.matches("odyssey"));
        assert!(!episode.matches("s2e1"));
    }

    #[test]
    fn test_selection_stays_within_page() {
        let mut catalog = loaded_catalog(45);
        catalog.set_page(3);
        assert_eq!(catalog.selected(), Some(0));

        for _ in 0..10 {
            catalog.select_next();
        }
        // Page 3 has five items; selection pins to the last one.
        assert_eq!(catalog.selected(), Some(4));

        catalog.select_prev();
        assert_eq!(catalog.selected(), Some(3));
    }
}
