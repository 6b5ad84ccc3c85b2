//! Normalized price listings, ready to append to the prices table

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    Ninja,
    Watch,
}

impl PriceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSource::Ninja => "ninja",
            PriceSource::Watch => "watch",
        }
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One listing from one aggregator for one league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub item: String,
    pub league: String,
    pub source: PriceSource,
    pub chaos_value: f64,
    pub divine_value: f64,
    /// Upstream line as received
    pub payload: Value,
}
