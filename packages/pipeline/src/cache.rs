//! Explicit, externally owned dataset cache.
//!
//! Maps a locator URL to its loaded dataset. The cache has explicit
//! lifecycle control (`invalidate`, `clear`) instead of ambient
//! process-lifetime memoization, and guarantees at-most-one
//! fetch/parse per unique locator under concurrent access via a
//! per-key `OnceCell`. Failures are never cached; the next caller
//! retries.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

use crate::{LoadedDataset, PipelineError, load_dataset};

type Entry = Arc<OnceCell<Arc<LoadedDataset>>>;

/// Cache of loaded datasets keyed by locator URL.
#[derive(Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl DatasetCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the dataset for `url`, loading it on first access.
    ///
    /// Concurrent callers for the same URL share one load; callers
    /// for different URLs do not block each other.
    ///
    /// # Errors
    ///
    /// Propagates the pipeline failure. The failed entry stays
    /// unpopulated, so a later call runs the pipeline again.
    pub async fn get_or_load(&self, url: &str) -> Result<Arc<LoadedDataset>, PipelineError> {
        self.get_or_load_with(url, || load_dataset(url)).await
    }

    /// [`Self::get_or_load`] with a caller-supplied loader. The lock
    /// over the map is held only to hand out the per-key cell, never
    /// across the load itself.
    ///
    /// # Errors
    ///
    /// Propagates the loader's failure without caching it.
    pub async fn get_or_load_with<F, Fut>(
        &self,
        url: &str,
        loader: F,
    ) -> Result<Arc<LoadedDataset>, PipelineError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<LoadedDataset, PipelineError>>,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(url.to_string()).or_default())
        };

        let dataset = cell
            .get_or_try_init(|| async { loader().await.map(Arc::new) })
            .await?;

        Ok(Arc::clone(dataset))
    }

    /// Drops the cached dataset for `url`, if any. The next
    /// `get_or_load` runs the pipeline again.
    pub async fn invalidate(&self, url: &str) {
        self.entries.lock().await.remove(url);
    }

    /// Drops every cached dataset.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Returns `true` if a dataset for `url` is fully loaded.
    pub async fn contains(&self, url: &str) -> bool {
        self.entries
            .lock()
            .await
            .get(url)
            .is_some_and(|cell| cell.initialized())
    }
}
