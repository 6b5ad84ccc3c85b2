use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::models::price::{PriceRecord, PriceSource};
use crate::services::http_cache::{url_with_query, CachedFetcher, FetchOptions};
use crate::services::price_utils::{divine_value, first_nonzero};
use crate::services::retry::{with_retry, RetryPolicy};

pub const POE_NINJA_BASE: &str = "https://poe.ninja/api/data";

pub const ITEM_TYPES: &[&str] = &[
    "UniqueArmour",
    "UniqueWeapon",
    "UniqueAccessory",
    "DivinationCard",
    "SkillGem",
    "Map",
    "ClusterJewel",
    "DeliriumOrb",
];

pub const CURRENCY_TYPES: &[&str] = &["Currency", "Fragment"];

const FETCH_OPTIONS: FetchOptions = FetchOptions::new(45, 1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewKind {
    Item,
    Currency,
}

impl OverviewKind {
    fn endpoint(&self) -> &'static str {
        match self {
            OverviewKind::Item => "itemoverview",
            OverviewKind::Currency => "currencyoverview",
        }
    }

    fn cache_prefix(&self) -> &'static str {
        match self {
            OverviewKind::Item => "item",
            OverviewKind::Currency => "currency",
        }
    }
}

/// One overview request: which endpoint and which category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub kind: OverviewKind,
    pub name: &'static str,
}

/// Item categories first, then currency categories.
pub fn categories() -> Vec<Category> {
    ITEM_TYPES
        .iter()
        .map(|&name| Category {
            kind: OverviewKind::Item,
            name,
        })
        .chain(CURRENCY_TYPES.iter().map(|&name| Category {
            kind: OverviewKind::Currency,
            name,
        }))
        .collect()
}

#[derive(Debug, Deserialize)]
struct OverviewResponse {
    #[serde(default)]
    lines: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemLine {
    name: Option<String>,
    base_type: Option<String>,
    chaos_value: Option<f64>,
    divine_value: Option<f64>,
    divine_chaos_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrencyLine {
    currency_type_name: Option<String>,
    chaos_equivalent: Option<f64>,
    chaos_value: Option<f64>,
    divine_value: Option<f64>,
    divine_chaos_value: Option<f64>,
}

#[derive(Clone)]
pub struct PoeNinjaService {
    fetcher: CachedFetcher,
    base_url: String,
    retry: RetryPolicy,
}

impl PoeNinjaService {
    pub fn new(fetcher: CachedFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            retry: RetryPolicy::single_attempt(),
        }
    }

    /// Raw overview lines for one category in one league.
    pub async fn fetch_overview(&self, league: &str, category: &Category) -> Result<Vec<Value>> {
        let url = url_with_query(
            &format!("{}/{}", self.base_url, category.kind.endpoint()),
            &[("league", league), ("type", category.name)],
        )?;
        let cache_key = format!(
            "poeninja_{}_{}_{}",
            category.kind.cache_prefix(),
            league,
            category.name
        );

        tracing::info!("Fetching poe.ninja {} overview for {}", category.name, league);

        let response: OverviewResponse = with_retry(&self.retry, &cache_key, || {
            self.fetcher.fetch_json(&url, &cache_key, FETCH_OPTIONS)
        })
        .await?;

        Ok(response.lines)
    }
}

/// Normalize one overview line. Lines without a usable name, or whose
/// shape does not match the endpoint, yield `None`.
pub fn normalize_line(
    kind: OverviewKind,
    league: &str,
    line: &Value,
    default_ratio: f64,
) -> Option<PriceRecord> {
    let (name, chaos, explicit_divine, ratio) = match kind {
        OverviewKind::Item => {
            let parsed = ItemLine::deserialize(line).ok()?;
            let name = parsed.name.filter(|n| !n.is_empty()).or(parsed.base_type);
            (
                name,
                first_nonzero(&[parsed.chaos_value]),
                parsed.divine_value,
                parsed.divine_chaos_value,
            )
        }
        OverviewKind::Currency => {
            let parsed = CurrencyLine::deserialize(line).ok()?;
            (
                parsed.currency_type_name,
                first_nonzero(&[parsed.chaos_equivalent, parsed.chaos_value]),
                parsed.divine_value,
                parsed.divine_chaos_value,
            )
        }
    };

    let name = name.filter(|n| !n.is_empty())?;

    Some(PriceRecord {
        item: name,
        league: league.to_string(),
        source: PriceSource::Ninja,
        chaos_value: chaos,
        divine_value: divine_value(chaos, explicit_divine, ratio.unwrap_or(default_ratio)),
        payload: line.clone(),
    })
}
