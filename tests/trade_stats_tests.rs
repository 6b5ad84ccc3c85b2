mod common;

use sea_orm::EntityTrait;
use serde_json::{json, Value};

use craftcoach_data::entities::prelude::*;
use craftcoach_data::jobs::trade_stats_refresh;
use craftcoach_data::services::trade_api::TradeApiService;
use common::{fetcher, setup_test_db, ScriptedTransport};

const TRADE_STATIC: &str = "http://trade.test/data/static";
const TRADE_STATS: &str = "http://trade.test/data/stats";

#[tokio::test]
async fn test_snapshots_stored_with_fallbacks() {
    let db = setup_test_db().await.unwrap();
    let cache = tempfile::tempdir().unwrap();
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        static_dir.path().join("trade_static.json"),
        json!({"result": [{"id": "Currency", "entries": []}]}).to_string(),
    )
    .unwrap();

    let transport = ScriptedTransport::new();
    transport.status(TRADE_STATIC, 502);
    transport.fail(TRADE_STATS);
    let api = TradeApiService::with_urls(fetcher(&transport, cache.path()), TRADE_STATIC, TRADE_STATS);

    trade_stats_refresh::refresh_trade_data(&db, &api, static_dir.path())
        .await
        .unwrap();

    let statics = TradeStatic::find().all(&db).await.unwrap();
    assert_eq!(statics.len(), 1);
    let payload: Value = serde_json::from_str(&statics[0].payload).unwrap();
    assert_eq!(payload["result"][0]["id"], json!("Currency"));

    let stats = TradeStats::find().all(&db).await.unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].payload, "{}");
}

#[tokio::test]
async fn test_every_run_appends_rows() {
    let db = setup_test_db().await.unwrap();
    let cache = tempfile::tempdir().unwrap();
    let static_dir = tempfile::tempdir().unwrap();

    let transport = ScriptedTransport::new();
    transport.ok_json(TRADE_STATIC, &json!({"result": []}));
    transport.ok_json(TRADE_STATS, &json!({"result": [{"id": "explicit"}]}));
    let api = TradeApiService::with_urls(fetcher(&transport, cache.path()), TRADE_STATIC, TRADE_STATS);

    for _ in 0..2 {
        trade_stats_refresh::refresh_trade_data(&db, &api, static_dir.path())
            .await
            .unwrap();
    }

    assert_eq!(TradeStatic::find().all(&db).await.unwrap().len(), 2);
    let stats = TradeStats::find().all(&db).await.unwrap();
    assert_eq!(stats.len(), 2);
    assert!(stats.iter().all(|row| row.payload.contains("explicit")));
}

#[tokio::test]
async fn test_malformed_document_is_fatal() {
    let db = setup_test_db().await.unwrap();
    let cache = tempfile::tempdir().unwrap();
    let static_dir = tempfile::tempdir().unwrap();

    let transport = ScriptedTransport::new();
    transport.ok(TRADE_STATIC, "<html>rate limited</html>");
    let api = TradeApiService::with_urls(fetcher(&transport, cache.path()), TRADE_STATIC, TRADE_STATS);

    let result = trade_stats_refresh::refresh_trade_data(&db, &api, static_dir.path()).await;
    assert!(result.is_err());
    assert!(TradeStatic::find().all(&db).await.unwrap().is_empty());
}
