// src/bin/test_treasury.rs
use dotenv::dotenv;
use log::info;
use treasuryviz_backend::services::treasury;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    info!("Fetching the live treasury yield curve...");
    let curve = treasury::fetch_yield_curve()
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    for point in &curve {
        println!("{:>4}: {:.2}%", point.maturity, point.yield_pct);
    }

    info!("Deriving bond quotes...");
    let quotes = treasury::fetch_bond_quotes()
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    for quote in &quotes {
        println!(
            "{:>4}  yield {:.2}  price {:.2}  change {:+.2}  ({:?})",
            quote.symbol, quote.yield_pct, quote.price, quote.change, quote.instrument
        );
    }

    Ok(())
}
