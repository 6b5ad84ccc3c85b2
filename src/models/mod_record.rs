//! Mod definitions in the common shape every seed source is normalized into,
//! plus the per-source record shapes they come from.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized mod row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModRecord {
    pub id: String,
    pub base: String,
    pub mod_type: String,
    pub domain: String,
    pub generation_type: String,
    pub full_text: String,
    pub group_id: Option<String>,
    /// Label for the derived mod_groups row, when the source has one
    pub group_label: Option<String>,
    /// Serialized as-is into spawn_weights_json
    pub spawn_weights: Value,
    pub tags: Vec<String>,
}

impl ModRecord {
    pub fn spawn_weights_json(&self) -> String {
        match &self.spawn_weights {
            Value::Null => "[]".to_string(),
            other => other.to_string(),
        }
    }

    pub fn tags_json(&self) -> String {
        serde_json::to_string(&self.tags).unwrap_or_else(|_| "[]".to_string())
    }

    /// Key for the derived bases table: base, else domain.
    pub fn base_key(&self) -> &str {
        if self.base.is_empty() {
            &self.domain
        } else {
            &self.base
        }
    }
}

/// Which step of the seed chain produced the mods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModSource {
    Poedb,
    Repoe,
    TradeApi,
    LocalFallback,
}

impl ModSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModSource::Poedb => "poedb",
            ModSource::Repoe => "repoe",
            ModSource::TradeApi => "trade_api",
            ModSource::LocalFallback => "local_fallback",
        }
    }
}

/// One `<tr>` of a PoEDB prefix/suffix table.
#[derive(Debug, Clone, PartialEq)]
pub struct PoedbRow {
    pub id: String,
    pub text: String,
    pub domain: String,
    pub tags: Vec<String>,
}

impl PoedbRow {
    /// `label` is the page the row came from ("Prefix" / "Suffix").
    pub fn into_record(self, label: &str) -> ModRecord {
        let label = label.to_lowercase();
        ModRecord {
            id: self.id,
            base: self.domain.clone(),
            mod_type: label.clone(),
            domain: self.domain,
            generation_type: label,
            full_text: self.text,
            group_id: None,
            group_label: None,
            spawn_weights: Value::Array(Vec::new()),
            tags: self.tags,
        }
    }
}

/// Value of the RePoE `mods.min.json` map (keyed by mod id).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepoeMod {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub domain: Option<String>,
    pub generation_type: Option<String>,
    #[serde(rename = "type")]
    pub mod_type: Option<String>,
    pub group: Option<Value>,
    pub spawn_weights: Option<Value>,
    pub tags: Option<Value>,
}

impl RepoeMod {
    pub fn into_record(self, id: String) -> ModRecord {
        let domain = self.domain.unwrap_or_default();
        let generation_type = self.generation_type.unwrap_or_default();
        let full_text = non_empty(self.name)
            .or_else(|| non_empty(self.desc))
            .unwrap_or_else(|| id.clone());
        let mod_type = non_empty(self.mod_type).unwrap_or_else(|| generation_type.clone());

        ModRecord {
            base: domain.clone(),
            mod_type,
            domain,
            generation_type,
            full_text,
            group_id: self.group.as_ref().and_then(scalar_text),
            group_label: None,
            spawn_weights: self.spawn_weights.unwrap_or_else(|| Value::Array(Vec::new())),
            tags: self.tags.as_ref().map(string_list).unwrap_or_default(),
            id,
        }
    }
}

/// Trade API `data/stats` document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradeStatsDocument {
    #[serde(default)]
    pub result: Vec<TradeStatCategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TradeStatCategory {
    pub id: String,
    pub label: String,
    pub entries: Vec<TradeStatEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TradeStatEntry {
    pub id: Option<String>,
    pub text: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    pub group: Option<Value>,
    pub generation_weights: Option<Value>,
    pub flags: Option<Value>,
}

impl TradeStatsDocument {
    /// Flatten categories into mod records; entries without an id are dropped.
    pub fn into_records(self) -> Vec<ModRecord> {
        let mut records = Vec::new();

        for category in self.result {
            for entry in category.entries {
                let Some(id) = non_empty(entry.id) else {
                    continue;
                };
                let full_text = non_empty(entry.text)
                    .or_else(|| non_empty(entry.name))
                    .unwrap_or_else(|| id.clone());
                let entry_type = non_empty(entry.entry_type);

                records.push(ModRecord {
                    id,
                    base: category.id.clone(),
                    mod_type: entry_type.clone().unwrap_or_else(|| category.label.clone()),
                    domain: category.id.clone(),
                    generation_type: entry_type.unwrap_or_default(),
                    full_text,
                    group_id: entry.group.as_ref().and_then(scalar_text),
                    group_label: None,
                    spawn_weights: entry
                        .generation_weights
                        .unwrap_or_else(|| Value::Array(Vec::new())),
                    tags: entry.flags.as_ref().map(string_list).unwrap_or_default(),
                });
            }
        }

        records
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Strings stay strings, numbers are stringified, anything else is absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// String members of a JSON array; non-arrays give an empty list.
fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
