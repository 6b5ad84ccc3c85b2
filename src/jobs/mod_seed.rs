//! Mod seeding: walk the source chain until one yields mods, then replace
//! the mods table and its derived lookups wholesale.

use sea_orm::{ConnectionTrait, EntityTrait, Set};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::entities::{bases, mod_groups, mods, prelude::*, tags};
use crate::error::{Error, Result};
use crate::models::mod_record::{ModRecord, ModSource};
use crate::scrapers::poedb::PoedbScraper;
use crate::services::fallback::read_local_json;
use crate::services::repoe::{dump_into_records, RepoeDump, RepoeService};
use crate::services::trade_api::TradeApiService;

pub const LOCAL_MODS_FILE: &str = "mods.min.json";

// Nine bound columns per mods row keeps a chunk under SQLite's 999 limit
const INSERT_CHUNK: usize = 100;

pub struct ModSeedSources {
    pub poedb: PoedbScraper,
    pub repoe: RepoeService,
    pub trade: TradeApiService,
    pub local_fallback: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModSeedReport {
    pub source: ModSource,
    pub mods: usize,
    pub groups: usize,
    pub tags: usize,
    pub bases: usize,
}

#[derive(Debug, Default)]
pub struct DerivedLookups {
    pub groups: BTreeMap<String, mod_groups::Model>,
    /// Tag id to number of mods carrying it
    pub tags: BTreeMap<String, usize>,
    pub bases: BTreeMap<String, bases::Model>,
}

pub async fn seed_mods<C: ConnectionTrait>(db: &C, sources: &ModSeedSources) -> Result<ModSeedReport> {
    let (source, records) = collect_mods(sources).await?;
    let records = dedupe_last_wins(records);
    let lookups = derive_lookups(&records);

    store_mods(db, &records, &lookups).await?;

    let report = ModSeedReport {
        source,
        mods: records.len(),
        groups: lookups.groups.len(),
        tags: lookups.tags.len(),
        bases: lookups.bases.len(),
    };

    tracing::info!(
        "Seeded {} mods from {} ({} groups, {} tags, {} bases)",
        report.mods,
        report.source.as_str(),
        report.groups,
        report.tags,
        report.bases
    );

    Ok(report)
}

/// First source with at least one mod wins; later sources are not consulted.
pub async fn collect_mods(sources: &ModSeedSources) -> Result<(ModSource, Vec<ModRecord>)> {
    let poedb = sources.poedb.scrape_mods().await?;
    if !poedb.is_empty() {
        return Ok((ModSource::Poedb, poedb));
    }
    tracing::info!("PoEDB produced no mods, trying RePoE");

    let repoe = match sources.repoe.fetch_mods().await {
        Ok(records) => records,
        Err(e) if e.is_upstream() => {
            tracing::warn!("RePoE unavailable: {}", e);
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    if !repoe.is_empty() {
        return Ok((ModSource::Repoe, repoe));
    }
    tracing::info!("RePoE produced no mods, trying the trade API");

    let trade = sources.trade.fetch_stats_for_seed().await?.into_records();
    if !trade.is_empty() {
        return Ok((ModSource::TradeApi, trade));
    }
    tracing::info!("Trade API produced no mods, trying the local fallback");

    let local = read_local_json::<RepoeDump>(&sources.local_fallback)
        .await?
        .map(dump_into_records)
        .unwrap_or_default();
    if !local.is_empty() {
        return Ok((ModSource::LocalFallback, local));
    }

    Err(Error::Exhausted(
        "Unable to fetch mod data from PoEDB, RePoE, the trade API, or the local fallback"
            .to_string(),
    ))
}

/// Later records replace earlier ones with the same id, keeping the
/// position of the first occurrence.
pub fn dedupe_last_wins(records: Vec<ModRecord>) -> Vec<ModRecord> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<ModRecord> = Vec::with_capacity(records.len());

    for record in records {
        match positions.get(&record.id) {
            Some(&index) => unique[index] = record,
            None => {
                positions.insert(record.id.clone(), unique.len());
                unique.push(record);
            }
        }
    }

    unique
}

pub fn derive_lookups(records: &[ModRecord]) -> DerivedLookups {
    let mut lookups = DerivedLookups::default();

    for record in records {
        if let Some(group_id) = record.group_id.as_ref().filter(|g| !g.is_empty()) {
            lookups
                .groups
                .entry(group_id.clone())
                .or_insert_with(|| mod_groups::Model {
                    id: group_id.clone(),
                    label: record
                        .group_label
                        .clone()
                        .unwrap_or_else(|| record.full_text.clone()),
                    group_type: if record.mod_type.is_empty() {
                        record.generation_type.clone()
                    } else {
                        record.mod_type.clone()
                    },
                });
        }

        for tag in &record.tags {
            *lookups.tags.entry(tag.clone()).or_insert(0) += 1;
        }

        let base_key = record.base_key();
        if !base_key.is_empty() {
            lookups
                .bases
                .entry(base_key.to_string())
                .or_insert_with(|| bases::Model {
                    id: base_key.to_string(),
                    name: base_key.to_string(),
                    tags_json: record.tags_json(),
                });
        }
    }

    lookups
}

/// Clear the four tables, then write mods and lookups.
pub async fn store_mods<C: ConnectionTrait>(
    db: &C,
    records: &[ModRecord],
    lookups: &DerivedLookups,
) -> Result<()> {
    Mods::delete_many().exec(db).await?;
    ModGroups::delete_many().exec(db).await?;
    Tags::delete_many().exec(db).await?;
    Bases::delete_many().exec(db).await?;

    for chunk in records.chunks(INSERT_CHUNK) {
        let rows = chunk.iter().map(|record| mods::ActiveModel {
            id: Set(record.id.clone()),
            base: Set(record.base.clone()),
            mod_type: Set(record.mod_type.clone()),
            domain: Set(record.domain.clone()),
            generation_type: Set(record.generation_type.clone()),
            full_text: Set(record.full_text.clone()),
            group_id: Set(record.group_id.clone()),
            spawn_weights_json: Set(record.spawn_weights_json()),
            tags_json: Set(record.tags_json()),
        });
        Mods::insert_many(rows).exec_without_returning(db).await?;
    }

    let groups: Vec<_> = lookups.groups.values().cloned().collect();
    for chunk in groups.chunks(INSERT_CHUNK) {
        let rows = chunk.iter().map(|group| mod_groups::ActiveModel {
            id: Set(group.id.clone()),
            label: Set(group.label.clone()),
            group_type: Set(group.group_type.clone()),
        });
        ModGroups::insert_many(rows).exec_without_returning(db).await?;
    }

    let tag_rows: Vec<_> = lookups.tags.iter().collect();
    for chunk in tag_rows.chunks(INSERT_CHUNK) {
        let rows = chunk.iter().map(|(id, count)| tags::ActiveModel {
            id: Set((*id).clone()),
            description: Set(format!("Occurrences: {count}")),
        });
        Tags::insert_many(rows).exec_without_returning(db).await?;
    }

    let base_rows: Vec<_> = lookups.bases.values().cloned().collect();
    for chunk in base_rows.chunks(INSERT_CHUNK) {
        let rows = chunk.iter().map(|base| bases::ActiveModel {
            id: Set(base.id.clone()),
            name: Set(base.name.clone()),
            tags_json: Set(base.tags_json.clone()),
        });
        Bases::insert_many(rows).exec_without_returning(db).await?;
    }

    Ok(())
}
