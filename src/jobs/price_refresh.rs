//! Price refresh: poe.ninja then poe.watch for one league, appended to the
//! prices table.

use chrono::Utc;
use sea_orm::{ConnectionTrait, EntityTrait, Set};

use crate::entities::{prelude::*, prices};
use crate::error::Result;
use crate::models::price::PriceRecord;
use crate::services::poe_ninja::{self, PoeNinjaService};
use crate::services::poe_watch::{self, PoeWatchService};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceRefreshReport {
    pub league: String,
    pub ninja_rows: usize,
    pub watch_rows: usize,
}

pub async fn refresh_league<C: ConnectionTrait>(
    db: &C,
    ninja: &PoeNinjaService,
    watch: &PoeWatchService,
    league: &str,
    divine_chaos_ratio: f64,
) -> Result<PriceRefreshReport> {
    let ninja_rows = sync_poe_ninja(db, ninja, league, divine_chaos_ratio).await?;
    let watch_rows = sync_poe_watch(db, watch, league).await?;

    tracing::info!(
        "Prices for {}: {} poe.ninja rows, {} poe.watch rows",
        league,
        ninja_rows,
        watch_rows
    );

    Ok(PriceRefreshReport {
        league: league.to_string(),
        ninja_rows,
        watch_rows,
    })
}

/// Walk every poe.ninja category. The first category that fails to fetch
/// ends the walk for this source; rows already written stay.
pub async fn sync_poe_ninja<C: ConnectionTrait>(
    db: &C,
    ninja: &PoeNinjaService,
    league: &str,
    divine_chaos_ratio: f64,
) -> Result<usize> {
    let mut stored = 0;

    for category in poe_ninja::categories() {
        let lines = match ninja.fetch_overview(league, &category).await {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(
                    "poe.ninja {} failed for {}: {}. Skipping remaining categories.",
                    category.name,
                    league,
                    e
                );
                break;
            }
        };

        let mut skipped = 0;
        for line in &lines {
            match poe_ninja::normalize_line(category.kind, league, line, divine_chaos_ratio) {
                Some(record) => {
                    insert_price(db, &record).await?;
                    stored += 1;
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} unnamed {} lines", skipped, category.name);
        }
    }

    Ok(stored)
}

pub async fn sync_poe_watch<C: ConnectionTrait>(
    db: &C,
    watch: &PoeWatchService,
    league: &str,
) -> Result<usize> {
    let entries = match watch.fetch_currency(league).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("poe.watch failed for {}: {}", league, e);
            Vec::new()
        }
    };

    let mut stored = 0;
    for entry in &entries {
        if let Some(record) = poe_watch::normalize_entry(league, entry) {
            insert_price(db, &record).await?;
            stored += 1;
        }
    }

    Ok(stored)
}

pub async fn insert_price<C: ConnectionTrait>(db: &C, record: &PriceRecord) -> Result<()> {
    let row = prices::ActiveModel {
        item: Set(record.item.clone()),
        league: Set(record.league.clone()),
        source: Set(record.source.as_str().to_string()),
        chaos_value: Set(record.chaos_value),
        divine_value: Set(record.divine_value),
        payload: Set(record.payload.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    Prices::insert(row).exec_without_returning(db).await?;
    Ok(())
}
