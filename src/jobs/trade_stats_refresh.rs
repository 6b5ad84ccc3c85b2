use chrono::Utc;
use sea_orm::{ConnectionTrait, EntityTrait, Set};
use serde_json::Value;
use std::path::Path;

use crate::entities::{prelude::*, trade_static, trade_stats};
use crate::error::Result;
use crate::services::trade_api::TradeApiService;

pub const LOCAL_STATIC_FILE: &str = "trade_static.json";
pub const LOCAL_STATS_FILE: &str = "trade_stats.json";

/// Append one trade_static and one trade_stats row, whatever the upstream
/// returned (possibly `{}`).
pub async fn refresh_trade_data<C: ConnectionTrait>(
    db: &C,
    api: &TradeApiService,
    static_dir: &Path,
) -> Result<()> {
    let static_payload = api.fetch_static(&static_dir.join(LOCAL_STATIC_FILE)).await?;
    let stats_payload = api.fetch_stats(&static_dir.join(LOCAL_STATS_FILE)).await?;

    TradeStatic::insert(trade_static::ActiveModel {
        payload: Set(static_payload.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    })
    .exec_without_returning(db)
    .await?;

    TradeStats::insert(trade_stats::ActiveModel {
        payload: Set(stats_payload.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    })
    .exec_without_returning(db)
    .await?;

    tracing::info!(
        "Stored trade static ({} keys) and stats ({} keys)",
        top_level_len(&static_payload),
        top_level_len(&stats_payload)
    );

    Ok(())
}

fn top_level_len(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.len(),
        Value::Array(items) => items.len(),
        _ => 0,
    }
}
