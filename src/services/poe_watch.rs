use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::models::price::{PriceRecord, PriceSource};
use crate::services::http_cache::{url_with_query, CachedFetcher, FetchOptions};
use crate::services::price_utils::first_nonzero;
use crate::services::retry::{with_retry, RetryPolicy};

pub const POE_WATCH_ENDPOINT: &str = "https://api.poe.watch/get";

const FETCH_OPTIONS: FetchOptions = FetchOptions::new(45, 1000);

#[derive(Debug, Deserialize)]
struct WatchEntry {
    name: Option<String>,
    mean: Option<f64>,
    median: Option<f64>,
}

#[derive(Clone)]
pub struct PoeWatchService {
    fetcher: CachedFetcher,
    endpoint: String,
    retry: RetryPolicy,
}

impl PoeWatchService {
    pub fn new(fetcher: CachedFetcher, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
            retry: RetryPolicy::single_attempt(),
        }
    }

    /// Currency entries for a league. Anything but a JSON array is treated
    /// as an empty listing.
    pub async fn fetch_currency(&self, league: &str) -> Result<Vec<Value>> {
        let url = url_with_query(
            &self.endpoint,
            &[("category", "currency"), ("league", league)],
        )?;
        let cache_key = format!("poewatch_{league}");

        tracing::info!("Fetching poe.watch currency for {}", league);

        let data: Value = with_retry(&self.retry, &cache_key, || {
            self.fetcher.fetch_json(&url, &cache_key, FETCH_OPTIONS)
        })
        .await?;

        match data {
            Value::Array(entries) => Ok(entries),
            other => {
                tracing::warn!(
                    "poe.watch returned a non-array document for {}: {}",
                    league,
                    truncate(&other.to_string(), 120)
                );
                Ok(Vec::new())
            }
        }
    }
}

/// poe.watch carries no divine denomination; the median stands in for it,
/// falling back to the chaos mean.
pub fn normalize_entry(league: &str, entry: &Value) -> Option<PriceRecord> {
    let parsed = WatchEntry::deserialize(entry).ok()?;
    let name = parsed.name.filter(|n| !n.is_empty())?;
    let chaos = first_nonzero(&[parsed.mean]);
    let divine = first_nonzero(&[parsed.median, Some(chaos)]);

    Some(PriceRecord {
        item: name,
        league: league.to_string(),
        source: PriceSource::Watch,
        chaos_value: chaos,
        divine_value: divine,
        payload: entry.clone(),
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_entry() {
        let entry = json!({"name": "Exalted Orb", "mean": 12.5, "median": 11.0});
        let record = normalize_entry("Standard", &entry).unwrap();
        assert_eq!(record.item, "Exalted Orb");
        assert_eq!(record.chaos_value, 12.5);
        assert_eq!(record.divine_value, 11.0);
        assert_eq!(record.source, PriceSource::Watch);
    }

    #[test]
    fn test_median_falls_back_to_mean() {
        let entry = json!({"name": "Orb of Alteration", "mean": 0.2});
        let record = normalize_entry("Standard", &entry).unwrap();
        assert_eq!(record.divine_value, 0.2);
    }

    #[test]
    fn test_nameless_entry_skipped() {
        assert!(normalize_entry("Standard", &json!({"mean": 1.0})).is_none());
        assert!(normalize_entry("Standard", &json!("not an object")).is_none());
    }
}
