use dotenv::dotenv;
use env_logger;
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, sleep};
use warp::Filter;

use treasuryviz_backend::config::Config;
use treasuryviz_backend::routes;
use treasuryviz_backend::services::clock::SystemClock;
use treasuryviz_backend::services::market::MarketService;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the TreasuryViz data service...");

    let config = Config::from_env();
    info!("Using configuration: {:?}", config);

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();

    let service = Arc::new(MarketService::new(
        config.data_source.clone(),
        Arc::new(SystemClock),
        chrono::Duration::seconds(config.cache_ttl_secs as i64),
        Duration::from_secs(config.api_timeout_secs),
    ));

    // Initial data fetch; the scheduler retries on the next cycle
    if let Err(e) = service.refresh_all().await {
        error!("Initial data refresh failed: {}", e);
    }

    // Periodic refresh: first run after the initial delay, then on the
    // fixed period
    let scheduled = service.clone();
    let delay = Duration::from_secs(config.refresh_delay_secs);
    let period = Duration::from_secs(config.refresh_period_secs);
    tokio::spawn(async move {
        sleep(delay).await;
        let mut ticker = interval(period);
        loop {
            ticker.tick().await;
            if let Err(e) = scheduled.refresh_all().await {
                error!("Scheduled data refresh failed: {}", e);
            }
        }
    });

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST"]);

    let api = routes::routes(service).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
}
