//! Conditional-GET cache backed by paired files on disk.
//!
//! Every logical cache name owns `<name>.meta.json` (validators and
//! provenance) and `<name>.body` (raw bytes). A fresh 2xx rewrites both; a
//! 304 answers from the stored body and touches neither. Entries are never
//! evicted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};

/// What the cache needs back from a GET.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Seam over the HTTP client so jobs can run against scripted upstreams.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        timeout: Duration,
    ) -> Result<TransportResponse>;
}

#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        timeout: Duration,
    ) -> Result<TransportResponse> {
        let mut request = self.client.get(url).timeout(timeout);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().await?;
        let header_text = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };

        let status = response.status();
        let etag = header_text(header::ETAG);
        let last_modified = header_text(header::LAST_MODIFIED);
        let content_type = header_text(header::CONTENT_TYPE);
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse {
            status,
            etag,
            last_modified,
            content_type,
            body,
        })
    }
}

/// Sidecar metadata stored next to each cached body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheMeta {
    pub etag: Option<String>,
    pub last_modified: Option<String>,
    pub content_type: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub body: Vec<u8>,
    pub meta: CacheMeta,
    /// Answered from disk after a 304
    pub not_modified: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub timeout: Duration,
    /// Pause after a fresh download, to stay under upstream rate limits
    pub polite_delay: Duration,
}

impl FetchOptions {
    pub const fn new(timeout_secs: u64, polite_delay_ms: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            polite_delay: Duration::from_millis(polite_delay_ms),
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::new(60, 1000)
    }
}

#[derive(Clone)]
pub struct CachedFetcher {
    transport: Arc<dyn HttpTransport>,
    cache_dir: PathBuf,
    polite: bool,
}

impl CachedFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            cache_dir: cache_dir.into(),
            polite: true,
        }
    }

    /// Skip the post-download pause regardless of `FetchOptions`.
    pub fn without_delay(mut self) -> Self {
        self.polite = false;
        self
    }

    pub fn cache_paths(&self, name: &str) -> (PathBuf, PathBuf) {
        let safe = sanitize_cache_name(name);
        (
            self.cache_dir.join(format!("{safe}.meta.json")),
            self.cache_dir.join(format!("{safe}.body")),
        )
    }

    pub async fn fetch(
        &self,
        url: &str,
        cache_key: &str,
        options: FetchOptions,
    ) -> Result<CachedResponse> {
        let (meta_path, body_path) = self.cache_paths(cache_key);
        let cached = read_meta(&meta_path).await;

        let mut headers = Vec::new();
        if let Some(etag) = &cached.etag {
            headers.push(("If-None-Match", etag.clone()));
        }
        if let Some(last_modified) = &cached.last_modified {
            headers.push(("If-Modified-Since", last_modified.clone()));
        }

        let mut response = self.transport.get(url, &headers, options.timeout).await?;

        if response.status == StatusCode::NOT_MODIFIED {
            if tokio::fs::try_exists(&body_path).await? {
                tracing::debug!("Cache hit (304) for {}", cache_key);
                let body = tokio::fs::read(&body_path).await?;
                return Ok(CachedResponse {
                    body,
                    meta: cached,
                    not_modified: true,
                });
            }

            // Validators survived but the body did not; ask again unconditionally
            tracing::warn!("304 for {} without a cached body, refetching", cache_key);
            response = self.transport.get(url, &[], options.timeout).await?;
        }

        if !response.status.is_success() {
            return Err(Error::Status {
                status: response.status,
                url: url.to_string(),
            });
        }

        let meta = CacheMeta {
            etag: response.etag,
            last_modified: response.last_modified,
            content_type: response.content_type,
            fetched_at: Some(Utc::now()),
            url: Some(url.to_string()),
        };

        tokio::fs::create_dir_all(&self.cache_dir).await?;
        tokio::fs::write(&meta_path, serde_json::to_vec_pretty(&meta)?).await?;
        tokio::fs::write(&body_path, &response.body).await?;

        tracing::debug!(
            "Fetched {} ({} bytes) into cache entry {}",
            url,
            response.body.len(),
            cache_key
        );

        if self.polite && !options.polite_delay.is_zero() {
            tokio::time::sleep(options.polite_delay).await;
        }

        Ok(CachedResponse {
            body: response.body,
            meta,
            not_modified: false,
        })
    }

    /// [`fetch`](Self::fetch) and decode the body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        cache_key: &str,
        options: FetchOptions,
    ) -> Result<T> {
        let response = self.fetch(url, cache_key, options).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }
}

/// Unreadable or corrupt metadata counts as no metadata.
async fn read_meta(path: &Path) -> CacheMeta {
    match tokio::fs::read(path).await {
        Ok(raw) => serde_json::from_slice(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring corrupt cache metadata {}: {}", path.display(), e);
            CacheMeta::default()
        }),
        Err(_) => CacheMeta::default(),
    }
}

/// `base?k=v&...` with the parameters form-encoded.
pub fn url_with_query(base: &str, params: &[(&str, &str)]) -> Result<String> {
    reqwest::Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| Error::Config(format!("Invalid upstream URL {base}: {e}")))
}

pub fn sanitize_cache_name(name: &str) -> String {
    name.replace(['/', ':', '\\'], "_")
}
