// src/bin/test_refresh.rs
use dotenv::dotenv;
use log::info;
use std::sync::Arc;
use std::time::Duration;
use treasuryviz_backend::config::Config;
use treasuryviz_backend::services::clock::SystemClock;
use treasuryviz_backend::services::market::MarketService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let service = MarketService::new(
        config.data_source,
        Arc::new(SystemClock),
        chrono::Duration::seconds(config.cache_ttl_secs as i64),
        Duration::from_secs(config.api_timeout_secs),
    );

    info!("Running a full refresh cycle...");
    service.refresh_all().await?;

    let bonds = service.bond_quotes().await?;
    println!("Cached {} bond quotes", bonds.len());

    let curve = service.yield_curve().await?;
    println!("Cached {} curve points", curve.len());

    let comparison = service.compare_bonds("10Y", "2Y").await?;
    println!(
        "10Y vs 2Y: yield {:+.2}, duration {:+.1}",
        comparison.differences.yield_pct, comparison.differences.duration
    );

    Ok(())
}
