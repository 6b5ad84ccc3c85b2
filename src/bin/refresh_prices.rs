// src/bin/refresh_prices.rs

use sea_orm::TransactionTrait;
use std::process::ExitCode;
use std::sync::Arc;

use craftcoach_data::config::AppConfig;
use craftcoach_data::error::Result;
use craftcoach_data::jobs::price_refresh;
use craftcoach_data::services::http_cache::{CachedFetcher, HttpTransport, ReqwestTransport};
use craftcoach_data::services::poe_ninja::{PoeNinjaService, POE_NINJA_BASE};
use craftcoach_data::services::poe_watch::{PoeWatchService, POE_WATCH_ENDPOINT};
use craftcoach_data::{db, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init("info,sqlx=warn");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Price refresh failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let db = db::connect(&config.database_url).await?;

    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(&config.user_agent)?);
    let fetcher = CachedFetcher::new(transport, &config.cache_dir);
    let ninja = PoeNinjaService::new(fetcher.clone(), POE_NINJA_BASE);
    let watch = PoeWatchService::new(fetcher, POE_WATCH_ENDPOINT);

    let txn = db.begin().await?;
    let mut total = 0;
    for league in &config.leagues {
        let report =
            price_refresh::refresh_league(&txn, &ninja, &watch, league, config.divine_chaos_ratio)
                .await?;
        total += report.ninja_rows + report.watch_rows;
    }
    txn.commit().await?;
    db.close().await?;

    println!(
        "Stored {} price rows for {}",
        total,
        config.leagues.join(", ")
    );
    Ok(())
}
