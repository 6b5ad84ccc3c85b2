use crate::error::Result;
use crate::models::mod_record::ModRecord;
use crate::scrapers::parser::parse_mod_table;
use crate::services::http_cache::CachedFetcher;

use super::ScraperConfig;

pub const POEDB_PAGES: &[(&str, &str)] = &[
    ("Prefix", "https://poedb.tw/us/mod.php?type=Prefix"),
    ("Suffix", "https://poedb.tw/us/mod.php?type=Suffix"),
];

pub struct PoedbScraper {
    fetcher: CachedFetcher,
    config: ScraperConfig,
}

impl PoedbScraper {
    pub fn new(fetcher: CachedFetcher, config: ScraperConfig) -> Self {
        Self { fetcher, config }
    }

    /// Scrape every configured page. A page that cannot be fetched is
    /// skipped; anything else is an error.
    pub async fn scrape_mods(&self) -> Result<Vec<ModRecord>> {
        let mut results = Vec::new();

        for (label, url) in &self.config.pages {
            let cache_key = format!("poedb_{}", label.to_lowercase());

            let response = match self.fetcher.fetch(url, &cache_key, self.config.fetch).await {
                Ok(response) => response,
                Err(e) if e.is_upstream() => {
                    tracing::warn!("Failed to fetch PoEDB {} page: {}. Skipping.", label, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let html = String::from_utf8_lossy(&response.body);
            let rows = parse_mod_table(&html);
            tracing::info!("Parsed {} {} mods from PoEDB", rows.len(), label);

            results.extend(rows.into_iter().map(|row| row.into_record(label)));
        }

        Ok(results)
    }
}
