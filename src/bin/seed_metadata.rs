// src/bin/seed_metadata.rs

use sea_orm::TransactionTrait;
use std::process::ExitCode;
use std::sync::Arc;

use craftcoach_data::config::AppConfig;
use craftcoach_data::error::Result;
use craftcoach_data::jobs::mod_seed::{self, ModSeedSources, LOCAL_MODS_FILE};
use craftcoach_data::jobs::passive_tree_seed::{self, PassiveTreeSource, LOCAL_TREE_FILE};
use craftcoach_data::scrapers::poedb::PoedbScraper;
use craftcoach_data::scrapers::ScraperConfig;
use craftcoach_data::services::http_cache::{CachedFetcher, HttpTransport, ReqwestTransport};
use craftcoach_data::services::repoe::{RepoeService, REPOE_MODS_URL};
use craftcoach_data::services::trade_api::TradeApiService;
use craftcoach_data::{db, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init("info,sqlx=warn");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Metadata seed failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let db = db::connect(&config.database_url).await?;

    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(&config.user_agent)?);
    let fetcher = CachedFetcher::new(transport, &config.cache_dir);
    let local_mods = config.static_file(LOCAL_MODS_FILE);

    let sources = ModSeedSources {
        poedb: PoedbScraper::new(fetcher.clone(), ScraperConfig::default()),
        repoe: RepoeService::new(fetcher.clone(), REPOE_MODS_URL, local_mods.clone()),
        trade: TradeApiService::new(fetcher.clone()),
        local_fallback: local_mods,
    };
    let tree = PassiveTreeSource::new(fetcher, config.static_file(LOCAL_TREE_FILE));

    let txn = db.begin().await?;
    let report = mod_seed::seed_mods(&txn, &sources).await?;
    let version = passive_tree_seed::seed_passive_tree(&txn, &tree).await?;
    txn.commit().await?;
    db.close().await?;

    println!(
        "Seeded {} mods from {} and passive tree {}",
        report.mods,
        report.source.as_str(),
        version
    );
    Ok(())
}
