mod common;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde_json::json;

use craftcoach_data::entities::{prelude::*, prices};
use craftcoach_data::jobs::price_refresh;
use craftcoach_data::services::poe_ninja::{PoeNinjaService, ITEM_TYPES};
use craftcoach_data::services::poe_watch::PoeWatchService;
use common::{fetcher, setup_test_db, ScriptedTransport};

const NINJA: &str = "http://ninja.test/api/data";
const WATCH: &str = "http://watch.test/get";

fn item_url(league: &str, kind: &str) -> String {
    format!(
        "{NINJA}/itemoverview?league={}&type={kind}",
        league.replace(' ', "+")
    )
}

fn currency_url(league: &str, kind: &str) -> String {
    format!(
        "{NINJA}/currencyoverview?league={}&type={kind}",
        league.replace(' ', "+")
    )
}

fn watch_url(league: &str) -> String {
    format!("{WATCH}?category=currency&league={}", league.replace(' ', "+"))
}

#[tokio::test]
async fn test_failed_category_stops_ninja_but_not_watch() {
    let db = setup_test_db().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let transport = ScriptedTransport::new();

    transport.ok_json(
        &item_url("Standard", "UniqueArmour"),
        &json!({"lines": [
            {"name": "Kaom's Heart", "chaosValue": 300.0},
            {"baseType": "Glorious Plate", "chaosValue": 15.0, "divineValue": 0.2},
            {"chaosValue": 1.0}
        ]}),
    );
    transport.status(&item_url("Standard", "UniqueWeapon"), 500);
    transport.ok_json(
        &currency_url("Standard", "Currency"),
        &json!({"lines": [{"currencyTypeName": "Divine Orb", "chaosEquivalent": 150.0}]}),
    );
    transport.ok_json(
        &watch_url("Standard"),
        &json!([{"name": "Exalted Orb", "mean": 12.0, "median": 11.5}]),
    );

    let fetcher = fetcher(&transport, dir.path());
    let ninja = PoeNinjaService::new(fetcher.clone(), NINJA);
    let watch = PoeWatchService::new(fetcher, WATCH);

    let txn = db.begin().await.unwrap();
    let report = price_refresh::refresh_league(&txn, &ninja, &watch, "Standard", 150.0)
        .await
        .unwrap();
    txn.commit().await.unwrap();

    assert_eq!(report.ninja_rows, 2);
    assert_eq!(report.watch_rows, 1);

    let urls = transport.requested_urls();
    assert!(!urls.contains(&currency_url("Standard", "Currency")));
    assert!(!urls.contains(&item_url("Standard", "UniqueAccessory")));
    assert_eq!(urls.last().unwrap(), &watch_url("Standard"));

    let rows = Prices::find()
        .order_by_asc(prices::Column::Id)
        .all(&db)
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].item, "Kaom's Heart");
    assert_eq!(rows[0].source, "ninja");
    assert_eq!(rows[0].divine_value, 2.0);
    assert_eq!(rows[1].item, "Glorious Plate");
    assert_eq!(rows[1].divine_value, 0.2);

    assert_eq!(rows[2].item, "Exalted Orb");
    assert_eq!(rows[2].source, "watch");
    assert_eq!(rows[2].chaos_value, 12.0);
    assert_eq!(rows[2].divine_value, 11.5);

    let payload: serde_json::Value = serde_json::from_str(&rows[0].payload).unwrap();
    assert_eq!(payload["name"], json!("Kaom's Heart"));
}

#[tokio::test]
async fn test_divine_value_uses_line_ratio_then_default() {
    let db = setup_test_db().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let transport = ScriptedTransport::new();
    let league = "Hardcore Settlers";

    for kind in ITEM_TYPES.iter().filter(|k| **k != "DivinationCard") {
        transport.ok_json(&item_url(league, kind), &json!({"lines": []}));
    }
    transport.ok_json(
        &item_url(league, "DivinationCard"),
        &json!({"lines": [
            {"name": "The Doctor", "chaosValue": 1000.0, "divineChaosValue": 200.0},
            {"name": "The Wretched", "chaosValue": 0.5, "divineChaosValue": 0.0}
        ]}),
    );
    transport.ok_json(
        &currency_url(league, "Currency"),
        &json!({"lines": [{"currencyTypeName": "Chaos Orb", "chaosValue": 1.0}]}),
    );
    transport.ok_json(&currency_url(league, "Fragment"), &json!({"lines": []}));
    transport.ok_json(&watch_url(league), &json!({"error": "unknown league"}));

    let fetcher = fetcher(&transport, dir.path());
    let ninja = PoeNinjaService::new(fetcher.clone(), NINJA);
    let watch = PoeWatchService::new(fetcher, WATCH);

    let report = price_refresh::refresh_league(&db, &ninja, &watch, league, 150.0)
        .await
        .unwrap();
    assert_eq!(report.ninja_rows, 3);
    assert_eq!(report.watch_rows, 0);

    let doctor = Prices::find()
        .filter(prices::Column::Item.eq("The Doctor"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(doctor.divine_value, 5.0);
    assert_eq!(doctor.league, league);

    // a zero ratio floors to 1
    let wretched = Prices::find()
        .filter(prices::Column::Item.eq("The Wretched"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(wretched.divine_value, 0.5);

    let chaos = Prices::find()
        .filter(prices::Column::Item.eq("Chaos Orb"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!((chaos.divine_value - 1.0 / 150.0).abs() < 1e-12);
}
