use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::mod_record::{ModRecord, RepoeMod};
use crate::services::fallback::read_local_json;
use crate::services::http_cache::{CachedFetcher, FetchOptions};

pub const REPOE_MODS_URL: &str =
    "https://raw.githubusercontent.com/brather1ng/RePoE/master/data/mods.min.json";

const FETCH_OPTIONS: FetchOptions = FetchOptions::new(90, 1000);

/// Community-maintained bulk mod dump, keyed by mod id.
pub type RepoeDump = BTreeMap<String, RepoeMod>;

#[derive(Clone)]
pub struct RepoeService {
    fetcher: CachedFetcher,
    url: String,
    local_fallback: PathBuf,
}

impl RepoeService {
    pub fn new(fetcher: CachedFetcher, url: impl Into<String>, local_fallback: PathBuf) -> Self {
        Self {
            fetcher,
            url: url.into(),
            local_fallback,
        }
    }

    /// Download the dump, or read the bundled copy when the download fails.
    /// Fails with the upstream error when neither is available.
    pub async fn fetch_mods(&self) -> Result<Vec<ModRecord>> {
        let dump: RepoeDump = match self
            .fetcher
            .fetch_json(&self.url, "repoe_mods", FETCH_OPTIONS)
            .await
        {
            Ok(dump) => dump,
            Err(e) if e.is_upstream() => {
                tracing::warn!("Failed to fetch RePoE mods: {}", e);
                match read_local_json(&self.local_fallback).await? {
                    Some(dump) => dump,
                    None => return Err(e),
                }
            }
            Err(e) => return Err(e),
        };

        Ok(dump_into_records(dump))
    }
}

pub fn dump_into_records(dump: RepoeDump) -> Vec<ModRecord> {
    dump.into_iter()
        .map(|(id, raw)| raw.into_record(id))
        .collect()
}
