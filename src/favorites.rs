// Persisted favorites store.
// Holds the per-resource favorite lists, loaded at startup and written back
// atomically on every mutation. Items are stored as full snapshots augmented
// with a stringified id; they are not kept in sync with later API changes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{Character, Episode, Product, Resource};
use crate::error::Result;

/// The persisted favorites mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoritesData {
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
    #[serde(default)]
    pub locations: Vec<Product>,
}

/// On-disk wrapper with a modification stamp.
#[derive(Debug, Serialize, Deserialize)]
struct FavoritesFile {
    data: FavoritesData,
    updated_at: DateTime<Utc>,
}

/// One row in the Favorites tab: enough to render and to issue a removal.
#[derive(Debug, Clone)]
pub struct FavoriteEntry {
    pub resource: Resource,
    pub id: String,
    pub label: String,
    pub detail: Option<String>,
}

/// Favorites store backed by a single JSON file.
///
/// Single-writer, single-reader: only the UI loop mutates it, so every
/// mutation can write through immediately.
pub struct FavoritesStore {
    path: Option<PathBuf>,
    data: FavoritesData,
}

impl FavoritesStore {
    /// Load favorites from the given file. A missing or unreadable file
    /// yields an empty store rather than an error.
    pub fn load(path: PathBuf) -> Self {
        let data = read_favorites(&path).unwrap_or_default();
        Self {
            path: Some(path),
            data,
        }
    }

    /// Store without persistence, for tests and for when no data directory
    /// can be resolved.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: FavoritesData::default(),
        }
    }

    /// Membership test by stringified id.
    pub fn is_favorite(&self, resource: Resource, id: &str) -> bool {
        match resource {
            Resource::Characters => self
                .data
                .characters
                .iter()
                .any(|c| c.fav_id.as_deref() == Some(id)),
            Resource::Episodes => self
                .data
                .episodes
                .iter()
                .any(|e| e.fav_id.as_deref() == Some(id)),
            Resource::Locations => self
                .data
                .locations
                .iter()
                .any(|p| p.fav_id.as_deref() == Some(id)),
        }
    }

    /// Favorite a character. No-op if the id is already present.
    pub fn add_character(&mut self, mut item: Character) {
        let id = item.id.to_string();
        if self.is_favorite(Resource::Characters, &id) {
            return;
        }
        item.fav_id = Some(id);
        self.data.characters.push(item);
        self.persist();
    }

    /// Favorite an episode. No-op if the id is already present.
    pub fn add_episode(&mut self, mut item: Episode) {
        let id = item.id.to_string();
        if self.is_favorite(Resource::Episodes, &id) {
            return;
        }
        item.fav_id = Some(id);
        self.data.episodes.push(item);
        self.persist();
    }

    /// Favorite a product/location. No-op if the id is already present.
    pub fn add_location(&mut self, mut item: Product) {
        let id = item.id.to_string();
        if self.is_favorite(Resource::Locations, &id) {
            return;
        }
        item.fav_id = Some(id);
        self.data.locations.push(item);
        self.persist();
    }

    /// Remove a favorite by stringified id. No-op if absent.
    pub fn remove(&mut self, resource: Resource, id: &str) {
        let before = self.count(resource);
        match resource {
            Resource::Characters => self
                .data
                .characters
                .retain(|c| c.fav_id.as_deref() != Some(id)),
            Resource::Episodes => self
                .data
                .episodes
                .retain(|e| e.fav_id.as_deref() != Some(id)),
            Resource::Locations => self
                .data
                .locations
                .retain(|p| p.fav_id.as_deref() != Some(id)),
        }
        if self.count(resource) != before {
            self.persist();
        }
    }

    pub fn count(&self, resource: Resource) -> usize {
        match resource {
            Resource::Characters => self.data.characters.len(),
            Resource::Episodes => self.data.episodes.len(),
            Resource::Locations => self.data.locations.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.data.characters.len() + self.data.episodes.len() + self.data.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Flattened view of all favorites, in resource order, for the
    /// Favorites tab list.
    pub fn entries(&self) -> Vec<FavoriteEntry> {
        let mut entries = Vec::with_capacity(self.total());
        for c in &self.data.characters {
            entries.push(FavoriteEntry {
                resource: Resource::Characters,
                id: c.fav_id.clone().unwrap_or_else(|| c.id.to_string()),
                label: c.name.clone(),
                detail: c.occupation.clone(),
            });
        }
        for e in &self.data.episodes {
            entries.push(FavoriteEntry {
                resource: Resource::Episodes,
                id: e.fav_id.clone().unwrap_or_else(|| e.id.to_string()),
                label: e.name.clone(),
                detail: Some(e.code()),
            });
        }
        for p in &self.data.locations {
            entries.push(FavoriteEntry {
                resource: Resource::Locations,
                id: p.fav_id.clone().unwrap_or_else(|| p.id.to_string()),
                label: p.title.clone(),
                detail: p.description.clone(),
            });
        }
        entries
    }

    // Write-through on mutation. Persistence failures are swallowed: a full
    // disk must not break favoriting for the rest of the session.
    fn persist(&self) {
        if let Some(path) = &self.path {
            let _ = write_favorites(path, &self.data);
        }
    }
}

fn read_favorites(path: &Path) -> Option<FavoritesData> {
    let contents = fs::read_to_string(path).ok()?;
    let file: FavoritesFile = serde_json::from_str(&contents).ok()?;
    Some(file.data)
}

/// Write the favorites file atomically via a temp file.
fn write_favorites(path: &Path, data: &FavoritesData) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = FavoritesFile {
        data: data.clone(),
        updated_at: Utc::now(),
    };
    let json = serde_json::to_string_pretty(&file)?;

    let temp_path = path.with_extension("tmp");
    let mut out = fs::File::create(&temp_path)?;
    out.write_all(json.as_bytes())?;
    out.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn character(id: u64, name: &str) -> Character {
        serde_json::from_value(json!({ "id": id, "name": name })).unwrap()
    }

    #[test]
    fn test_add_and_remove_character() {
        let mut store = FavoritesStore::in_memory();

        store.add_character(character(42, "Homer Simpson"));
        assert!(store.is_favorite(Resource::Characters, "42"));
        assert_eq!(store.total(), 1);

        store.remove(Resource::Characters, "42");
        assert!(!store.is_favorite(Resource::Characters, "42"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut store = FavoritesStore::in_memory();

        store.add_character(character(1, "Bart"));
        store.add_character(character(1, "Bart"));

        assert_eq!(store.count(Resource::Characters), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = FavoritesStore::in_memory();
        store.add_character(character(1, "Lisa"));

        store.remove(Resource::Characters, "99");
        store.remove(Resource::Episodes, "1");

        assert_eq!(store.total(), 1);
    }

    #[test]
    fn test_resources_are_independent() {
        let mut store = FavoritesStore::in_memory();
        store.add_character(character(5, "Moe"));

        // Same numeric id under a different resource is not a favorite.
        assert!(!store.is_favorite(Resource::Episodes, "5"));
        assert!(!store.is_favorite(Resource::Locations, "5"));
    }

    #[test]
    fn test_persistence_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("favorites.json");

        {
            let mut store = FavoritesStore::load(path.clone());
            store.add_character(character(42, "Homer Simpson"));
            store.add_episode(
                serde_json::from_value(json!({
                    "id": 7,
                    "name": "Last Exit to Springfield",
                    "season": 4,
                    "episode": 17
                }))
                .unwrap(),
            );
        }

        let store = FavoritesStore::load(path);
        assert!(store.is_favorite(Resource::Characters, "42"));
        assert!(store.is_favorite(Resource::Episodes, "7"));
        assert_eq!(store.total(), 2);

        let entries = store.entries();
        assert_eq!(entries[0].label, "Homer Simpson");
        assert_eq!(entries[1].detail.as_deref(), Some("S4E17"));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FavoritesStore::load(temp_dir.path().join("nonexistent.json"));
        assert!(store.is_empty());
    }
}
