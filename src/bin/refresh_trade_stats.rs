// src/bin/refresh_trade_stats.rs

use sea_orm::TransactionTrait;
use std::process::ExitCode;
use std::sync::Arc;

use craftcoach_data::config::AppConfig;
use craftcoach_data::error::Result;
use craftcoach_data::jobs::trade_stats_refresh;
use craftcoach_data::services::http_cache::{CachedFetcher, HttpTransport, ReqwestTransport};
use craftcoach_data::services::trade_api::TradeApiService;
use craftcoach_data::{db, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init("info,sqlx=warn");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Trade stat refresh failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let db = db::connect(&config.database_url).await?;

    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(&config.user_agent)?);
    let api = TradeApiService::new(CachedFetcher::new(transport, &config.cache_dir));

    let txn = db.begin().await?;
    trade_stats_refresh::refresh_trade_data(&txn, &api, &config.static_dir).await?;
    txn.commit().await?;
    db.close().await?;

    println!("Trade stats refreshed");
    Ok(())
}
