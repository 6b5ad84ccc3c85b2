pub mod parser;
pub mod poedb;

use crate::services::http_cache::FetchOptions;

#[derive(Clone)]
pub struct ScraperConfig {
    /// (label, url) pairs; the label becomes the mod type
    pub pages: Vec<(String, String)>,
    pub fetch: FetchOptions,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            pages: poedb::POEDB_PAGES
                .iter()
                .map(|(label, url)| (label.to_string(), url.to_string()))
                .collect(),
            fetch: FetchOptions::new(60, 1500),
        }
    }
}
