use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::utils::clock::Clock;

use super::{entities::Dataset, loader::DatasetLoader};

pub const DEFAULT_CACHE_KEY: &str = "user_data";
pub const DEFAULT_CACHE_TTL: Duration = Duration::seconds(3600);

struct CacheEntry {
    value: Arc<Dataset>,
    loaded_at: DateTime<Utc>,
}

/// Single slot, time based cache in front of a [DatasetLoader].
///
/// The whole check-or-refresh sequence runs under one lock. Callers arriving during a reload wait
/// for it and then get the freshly loaded dataset, so a source is never parsed twice
/// concurrently. A failed load leaves the slot as it was and is retried by the next call.
pub struct DatasetCache {
    key: &'static str,
    ttl: Duration,
    loader: Box<dyn DatasetLoader>,
    clock: Box<dyn Clock>,
    slot: Mutex<Option<CacheEntry>>,
}

impl DatasetCache {
    pub fn new(
        key: &'static str,
        ttl: Duration,
        loader: Box<dyn DatasetLoader>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            key,
            ttl,
            loader,
            clock,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached dataset while it is younger than the ttl, otherwise reloads it.
    pub async fn get_dataset(&self) -> Result<Arc<Dataset>> {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if self.clock.time() < entry.loaded_at + self.ttl {
                debug!("Serving {} loaded at {}", self.key, entry.loaded_at);
                return Ok(entry.value.clone());
            }
        }

        let value = self.refresh().await?;
        // The ttl counts from the moment loading finished.
        *slot = Some(CacheEntry {
            value: value.clone(),
            loaded_at: self.clock.time(),
        });
        Ok(value)
    }

    #[instrument(skip(self), fields(key = self.key))]
    async fn refresh(&self) -> Result<Arc<Dataset>> {
        let dataset = self.loader.load().await?;
        info!("Refreshed {} with {} users", self.key, dataset.user_count());
        Ok(Arc::new(dataset))
    }
}
