// Fetch-and-cache layer.
// Resolves catalog requests from the shared TTL cache or the network, and
// carries the generation tag that lets the app drop superseded responses.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{ApiClient, Character, Episode, Product, Resource, types};
use crate::cache::MemoryCache;
use crate::error::Result;

/// Cache-first fetcher shared by all catalogs.
///
/// Cloning is cheap: the HTTP client and the cache map are shared, so every
/// call site sees the same cached responses.
#[derive(Clone)]
pub struct Fetcher {
    client: ApiClient,
    cache: Arc<Mutex<MemoryCache>>,
}

impl Fetcher {
    pub fn new(client: ApiClient) -> Self {
        Self::with_cache(client, MemoryCache::new())
    }

    pub fn with_cache(client: ApiClient, cache: MemoryCache) -> Self {
        Self {
            client,
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Fetch a JSON document, consulting the cache first.
    ///
    /// A fresh cache entry is returned without touching the network. On a
    /// successful network fetch the parsed body is stored under the URL.
    pub async fn fetch_json(&self, url: &str, use_cache: bool) -> Result<Value> {
        if use_cache {
            let cached = self.lock_cache().get(url);
            if let Some(value) = cached {
                return Ok(value);
            }
        }

        let value = self.client.get_json(url).await?;

        if use_cache {
            self.lock_cache().insert(url, value.clone());
        }

        Ok(value)
    }

    /// Fetch and normalize a catalog list.
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        url: &str,
        use_cache: bool,
    ) -> Result<Vec<T>> {
        let value = self.fetch_json(url, use_cache).await?;
        types::parse_list(value)
    }

    /// Evict the cached response for a URL so the next fetch hits the network.
    pub fn invalidate(&self, url: &str) {
        self.lock_cache().invalidate(url);
    }

    // The cache is only mutated from short critical sections; a poisoned
    // lock still holds a usable map.
    fn lock_cache(&self) -> std::sync::MutexGuard<'_, MemoryCache> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Typed payload of a completed catalog fetch.
pub enum FetchPayload {
    Characters(Result<Vec<Character>>),
    Episodes(Result<Vec<Episode>>),
    Locations(Result<Vec<Product>>),
}

/// A fetch result delivered back to the UI loop.
///
/// `generation` identifies the request that produced it; the app drops
/// outcomes whose generation no longer matches the catalog's current one,
/// so a superseded request never updates displayed state.
pub struct FetchOutcome {
    pub resource: Resource,
    pub generation: u64,
    pub payload: FetchPayload,
}

/// Run the fetch for one catalog and package the outcome.
pub async fn fetch_resource(
    fetcher: Fetcher,
    resource: Resource,
    generation: u64,
    use_cache: bool,
) -> FetchOutcome {
    let url = resource.url();
    let payload = match resource {
        Resource::Characters => FetchPayload::Characters(fetcher.fetch_list(url, use_cache).await),
        Resource::Episodes => FetchPayload::Episodes(fetcher.fetch_list(url, use_cache).await),
        Resource::Locations => FetchPayload::Locations(fetcher.fetch_list(url, use_cache).await),
    };
    FetchOutcome {
        resource,
        generation,
        payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // .invalid is reserved and never resolves, so any fetch that reaches the
    // network fails fast without external dependencies.
    const UNREACHABLE: &str = "http://unreachable.invalid/characters";

    fn seeded_fetcher() -> Fetcher {
        let mut cache = MemoryCache::new();
        cache.insert(UNREACHABLE, json!([{ "id": 1, "name": "Homer Simpson" }]));
        Fetcher::with_cache(ApiClient::new().unwrap(), cache)
    }

    #[tokio::test]
    async fn test_cache_hit_resolves_without_network() {
        let fetcher = seeded_fetcher();

        let items: Vec<Character> = fetcher.fetch_list(UNREACHABLE, true).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Homer Simpson");
    }

    #[tokio::test]
    async fn test_cache_bypass_goes_to_network() {
        let fetcher = seeded_fetcher();

        let result = fetcher.fetch_list::<Character>(UNREACHABLE, false).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalidate_forces_network() {
        let fetcher = seeded_fetcher();
        fetcher.invalidate(UNREACHABLE);

        let result = fetcher.fetch_list::<Character>(UNREACHABLE, true).await;
        assert!(result.is_err());
    }
}
