use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

const MAX_ENTRIES: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    path: String,
    user_id: Uuid,
    query: String,
}

impl PageKey {
    pub fn new(path: &str, user_id: Uuid, query: Option<&str>) -> Self {
        Self {
            path: path.to_string(),
            user_id,
            query: query.unwrap_or_default().to_string(),
        }
    }
}

/// Snapshot of how often a page path has been invalidated. A render that
/// started under an older generation must not be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    epoch: u64,
    path: u64,
}

#[derive(Default)]
struct Pages {
    entries: HashMap<PageKey, String>,
    generations: HashMap<String, u64>,
    // bumped by invalidate_all
    epoch: u64,
}

impl Pages {
    fn generation(&self, path: &str) -> Generation {
        Generation {
            epoch: self.epoch,
            path: self.generations.get(path).copied().unwrap_or_default(),
        }
    }
}

/// Rendered HTML per (page, user, query string). Mutating actions call
/// `invalidate` with their page path so the next request re-renders.
#[derive(Clone, Default)]
pub struct PageCache {
    pages: Arc<RwLock<Pages>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &PageKey) -> Option<String> {
        self.pages.read().await.entries.get(key).cloned()
    }

    /// Taken before rendering and handed back to [`PageCache::put`].
    pub async fn generation(&self, path: &str) -> Generation {
        self.pages.read().await.generation(path)
    }

    /// Stores `html` unless `key.path` was invalidated after `seen` was taken.
    /// Returns whether the entry was kept.
    pub async fn put(&self, key: PageKey, html: String, seen: Generation) -> bool {
        let mut pages = self.pages.write().await;
        if pages.generation(&key.path) != seen {
            tracing::debug!(path = %key.path, "discarding render that raced an invalidation");
            return false;
        }
        if pages.entries.len() >= MAX_ENTRIES && !pages.entries.contains_key(&key) {
            pages.entries.clear();
        }
        pages.entries.insert(key, html);
        true
    }

    pub async fn invalidate(&self, path: &str) {
        let mut pages = self.pages.write().await;
        *pages.generations.entry(path.to_string()).or_default() += 1;
        let before = pages.entries.len();
        pages.entries.retain(|key, _| key.path != path);
        tracing::debug!(path, dropped = before - pages.entries.len(), "page cache invalidated");
    }

    pub async fn invalidate_all(&self) {
        let mut pages = self.pages.write().await;
        pages.epoch += 1;
        pages.entries.clear();
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pages.read().await.entries.is_empty()
    }
}
