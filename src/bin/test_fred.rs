// src/bin/test_fred.rs
use chrono::Utc;
use dotenv::dotenv;
use log::info;
use treasuryviz_backend::services::fred;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    info!("Fetching the economic snapshot from FRED...");
    let snapshot = fred::fetch_economic_snapshot(Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    println!("Inflation (CPI YoY): {:.2}%", snapshot.inflation);
    println!("Federal funds rate:  {:.2}%", snapshot.fed_funds_rate);
    println!("Unemployment:        {:.2}%", snapshot.unemployment);
    println!("GDP growth:          {:.2}%", snapshot.gdp_growth);
    println!("As of:               {}", snapshot.last_updated);

    Ok(())
}
