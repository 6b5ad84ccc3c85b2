use chrono::Utc;
use sea_orm::{ConnectionTrait, EntityTrait, Set};
use serde_json::Value;
use std::path::PathBuf;

use crate::entities::{passive_tree, prelude::*};
use crate::error::Result;
use crate::services::fallback::read_local_text;
use crate::services::http_cache::{CachedFetcher, FetchOptions};

pub const PASSIVE_TREE_URL: &str =
    "https://www.poewiki.net/w/images/2/2c/Passive_skill_tree.json";
pub const LOCAL_TREE_FILE: &str = "passive_skill_tree.json";

/// The tree table only ever holds this row.
pub const PASSIVE_TREE_ROW_ID: i32 = 1;

const FETCH_OPTIONS: FetchOptions = FetchOptions::new(90, 1000);

pub struct PassiveTreeSource {
    pub fetcher: CachedFetcher,
    pub url: String,
    pub local_fallback: PathBuf,
}

impl PassiveTreeSource {
    pub fn new(fetcher: CachedFetcher, local_fallback: PathBuf) -> Self {
        Self {
            fetcher,
            url: PASSIVE_TREE_URL.to_string(),
            local_fallback,
        }
    }

    /// Raw tree document, from upstream or the bundled copy.
    pub async fn fetch_text(&self) -> Result<String> {
        match self
            .fetcher
            .fetch(&self.url, "passive_tree", FETCH_OPTIONS)
            .await
        {
            Ok(response) => Ok(String::from_utf8_lossy(&response.body).into_owned()),
            Err(e) if e.is_upstream() => {
                tracing::warn!("Failed to fetch passive tree: {}", e);
                match read_local_text(&self.local_fallback).await? {
                    Some(text) => Ok(text),
                    None => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }
}

/// `version`, else `treeVersion`, else "latest". A document that does not
/// parse also reads as "latest".
pub fn tree_version(text: &str) -> String {
    let Ok(document) = serde_json::from_str::<Value>(text) else {
        return "latest".to_string();
    };

    ["version", "treeVersion"]
        .iter()
        .find_map(|key| match document.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "latest".to_string())
}

pub async fn seed_passive_tree<C: ConnectionTrait>(
    db: &C,
    source: &PassiveTreeSource,
) -> Result<String> {
    let text = source.fetch_text().await?;
    let version = tree_version(&text);
    store_tree(db, &version, text).await?;

    tracing::info!("Stored passive tree version {}", version);
    Ok(version)
}

pub async fn store_tree<C: ConnectionTrait>(db: &C, version: &str, json: String) -> Result<()> {
    PassiveTree::delete_many().exec(db).await?;

    PassiveTree::insert(passive_tree::ActiveModel {
        id: Set(PASSIVE_TREE_ROW_ID),
        version: Set(version.to_string()),
        json: Set(json),
        fetched_at: Set(Utc::now()),
    })
    .exec_without_returning(db)
    .await?;

    Ok(())
}
