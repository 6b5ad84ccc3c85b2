use serde_json::{Map, Value};
use std::path::Path;

use crate::error::Result;
use crate::models::mod_record::TradeStatsDocument;
use crate::services::fallback::read_local_json;
use crate::services::http_cache::{CachedFetcher, FetchOptions};
use crate::services::retry::{with_retry, RetryPolicy};

pub const TRADE_STATIC_URL: &str = "https://www.pathofexile.com/api/trade/data/static";
pub const TRADE_STATS_URL: &str = "https://www.pathofexile.com/api/trade/data/stats";

const SNAPSHOT_FETCH: FetchOptions = FetchOptions::new(45, 1000);
const SEED_FETCH: FetchOptions = FetchOptions::new(90, 1000);

#[derive(Clone)]
pub struct TradeApiService {
    fetcher: CachedFetcher,
    static_url: String,
    stats_url: String,
    retry: RetryPolicy,
}

impl TradeApiService {
    pub fn new(fetcher: CachedFetcher) -> Self {
        Self::with_urls(fetcher, TRADE_STATIC_URL, TRADE_STATS_URL)
    }

    pub fn with_urls(
        fetcher: CachedFetcher,
        static_url: impl Into<String>,
        stats_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            static_url: static_url.into(),
            stats_url: stats_url.into(),
            retry: RetryPolicy::single_attempt(),
        }
    }

    pub async fn fetch_static(&self, fallback: &Path) -> Result<Value> {
        self.fetch_snapshot(&self.static_url, "trade_static", fallback)
            .await
    }

    pub async fn fetch_stats(&self, fallback: &Path) -> Result<Value> {
        self.fetch_snapshot(&self.stats_url, "trade_stats", fallback)
            .await
    }

    /// Opaque snapshot with the bundled copy, then `{}`, as fallbacks.
    async fn fetch_snapshot(&self, url: &str, cache_key: &str, fallback: &Path) -> Result<Value> {
        let fetched = with_retry(&self.retry, cache_key, || {
            self.fetcher.fetch_json::<Value>(url, cache_key, SNAPSHOT_FETCH)
        })
        .await;

        match fetched {
            Ok(document) => Ok(document),
            Err(e) if e.is_upstream() => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                Ok(read_local_json(fallback)
                    .await?
                    .unwrap_or_else(|| Value::Object(Map::new())))
            }
            Err(e) => Err(e),
        }
    }

    /// Stat definitions for the mod seeder. Upstream failure reads as an
    /// empty document so the seeder moves on to its next source.
    pub async fn fetch_stats_for_seed(&self) -> Result<TradeStatsDocument> {
        match self
            .fetcher
            .fetch_json(&self.stats_url, "trade_stats_seed", SEED_FETCH)
            .await
        {
            Ok(document) => Ok(document),
            Err(e) if e.is_upstream() => {
                tracing::warn!("Failed to fetch trade stats for seeding: {}", e);
                Ok(TradeStatsDocument::default())
            }
            Err(e) => Err(e),
        }
    }
}
