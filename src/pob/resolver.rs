use lazy_static::lazy_static;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::pob::codec::decode_import_code;
use crate::services::http_cache::HttpTransport;

pub const POBB_BASE: &str = "https://pobb.in";

const FETCH_TIMEOUT: Duration = Duration::from_secs(40);

lazy_static! {
    static ref POBB_URL: Regex = Regex::new(r"(?i)^https?://(?:[a-z0-9-]+\.)*pobb\.in(?::\d+)?(?:/|$)")
        .expect("valid pobb.in regex");
    static ref PASTEBIN_URL: Regex =
        Regex::new(r"(?i)^https?://(?:www\.)?pastebin\.com/(?:raw/)?([A-Za-z0-9]+)/?$")
            .expect("valid pastebin regex");
}

/// What the caller handed the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildInput {
    Markup(String),
    Url(String),
    ImportCode(String),
}

impl BuildInput {
    pub fn classify(raw: &str) -> Self {
        let cleaned = raw.trim();

        if cleaned.starts_with('<') {
            BuildInput::Markup(cleaned.to_string())
        } else if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
            BuildInput::Url(cleaned.to_string())
        } else {
            BuildInput::ImportCode(cleaned.split_whitespace().collect())
        }
    }
}

/// Build markup plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBuild {
    pub markup: String,
    pub sources: Vec<String>,
    pub primary_source: String,
}

impl ResolvedBuild {
    fn from_source(markup: String, source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            markup,
            sources: vec![source.clone()],
            primary_source: source,
        }
    }
}

#[derive(Clone)]
pub struct BuildResolver {
    transport: Arc<dyn HttpTransport>,
    pobb_base: String,
}

impl BuildResolver {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            pobb_base: POBB_BASE.to_string(),
        }
    }

    pub fn with_pobb_base(mut self, base: impl Into<String>) -> Self {
        self.pobb_base = base.into();
        self
    }

    pub async fn resolve(&self, raw: &str) -> Result<ResolvedBuild> {
        match BuildInput::classify(raw) {
            BuildInput::Markup(markup) => Ok(ResolvedBuild::from_source(markup, "xml")),
            BuildInput::ImportCode(code) => {
                let markup = decode_import_code(&code)?;
                Ok(ResolvedBuild::from_source(markup, "import_code"))
            }
            BuildInput::Url(url) => {
                if POBB_URL.is_match(&url) {
                    self.resolve_pobb(&pobb_id(&url)).await
                } else {
                    self.resolve_url(&url).await
                }
            }
        }
    }

    /// Probe the raw-markup export first, then the import-code export.
    async fn resolve_pobb(&self, id: &str) -> Result<ResolvedBuild> {
        for suffix in [".xml", ".txt"] {
            let url = format!("{}/{}{}", self.pobb_base.trim_end_matches('/'), id, suffix);

            let response = match self.transport.get(&url, &[], FETCH_TIMEOUT).await {
                Ok(response) => response,
                Err(e) if e.is_upstream() => {
                    tracing::debug!("pobb.in probe {} failed: {}", url, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if response.status != StatusCode::OK || response.body.is_empty() {
                tracing::debug!("pobb.in probe {} returned {}", url, response.status);
                continue;
            }

            let text = String::from_utf8_lossy(&response.body);
            let markup = if suffix == ".txt" {
                decode_import_code(text.trim())?
            } else {
                text.into_owned()
            };

            return Ok(ResolvedBuild::from_source(markup, url));
        }

        Err(Error::Resolve(format!("Unable to resolve pobb.in build {id}")))
    }

    async fn resolve_url(&self, url: &str) -> Result<ResolvedBuild> {
        let fetch_url = pastebin_raw_url(url).unwrap_or_else(|| url.to_string());
        let response = self.transport.get(&fetch_url, &[], FETCH_TIMEOUT).await?;

        if !response.status.is_success() {
            return Err(Error::Status {
                status: response.status,
                url: fetch_url,
            });
        }

        let body = String::from_utf8_lossy(&response.body);
        let body = body.trim();
        let markup = if body.starts_with('<') {
            body.to_string()
        } else {
            decode_import_code(&body.split_whitespace().collect::<String>())?
        };

        Ok(ResolvedBuild::from_source(markup, url))
    }
}

/// Last path segment of a pobb.in link, without query or fragment.
fn pobb_id(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

fn pastebin_raw_url(url: &str) -> Option<String> {
    PASTEBIN_URL
        .captures(url)
        .map(|caps| format!("https://pastebin.com/raw/{}", &caps[1]))
}
