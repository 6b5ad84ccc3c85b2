//! Bundled documents used when an upstream cannot be reached.

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::Result;

/// Parse a bundled JSON file. `Ok(None)` when the file does not exist;
/// a file that exists but does not parse is an error.
pub async fn read_local_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !tokio::fs::try_exists(path).await? {
        return Ok(None);
    }
    let raw = tokio::fs::read(path).await?;
    tracing::info!("Using local fallback {}", path.display());
    Ok(Some(serde_json::from_slice(&raw)?))
}

pub async fn read_local_text(path: &Path) -> Result<Option<String>> {
    if !tokio::fs::try_exists(path).await? {
        return Ok(None);
    }
    tracing::info!("Using local fallback {}", path.display());
    Ok(Some(tokio::fs::read_to_string(path).await?))
}
