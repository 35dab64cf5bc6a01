// src/services/treasury.rs
use chrono::{Datelike, Utc};
use csv::Reader;
use log::info;
use reqwest;

use crate::models::{BondQuote, InstrumentClass, YieldCurvePoint};
use crate::BoxError;

pub type Result<T> = std::result::Result<T, BoxError>;

// CSV header → maturity bucket, shortest first. Order here drives the
// order of the published curve.
const CURVE_COLUMNS: [(&str, &str); 11] = [
    ("1 Mo", "1M"),
    ("3 Mo", "3M"),
    ("6 Mo", "6M"),
    ("1 Yr", "1Y"),
    ("2 Yr", "2Y"),
    ("3 Yr", "3Y"),
    ("5 Yr", "5Y"),
    ("7 Yr", "7Y"),
    ("10 Yr", "10Y"),
    ("20 Yr", "20Y"),
    ("30 Yr", "30Y"),
];

// Tenors quoted as tradable instruments: header, bucket, term in years.
const QUOTE_TENORS: [(&str, &str, f64); 7] = [
    ("3 Mo", "3M", 0.25),
    ("6 Mo", "6M", 0.5),
    ("1 Yr", "1Y", 1.0),
    ("2 Yr", "2Y", 2.0),
    ("5 Yr", "5Y", 5.0),
    ("10 Yr", "10Y", 10.0),
    ("30 Yr", "30Y", 30.0),
];

fn yield_curve_url() -> String {
    let year = Utc::now().year();
    format!(
        "https://home.treasury.gov/resource-center/data-chart-center/interest-rates/\
daily-treasury-rates.csv/{year}/all?_format=csv\
&field_tdr_date_value={year}\
&type=daily_treasury_yield_curve",
        year = year
    )
}

/// Fetch the most recent daily yield-curve snapshot.
pub async fn fetch_yield_curve() -> Result<Vec<YieldCurvePoint>> {
    let url = yield_curve_url();
    info!("Fetching daily treasury yield curve CSV from URL: {}", url);

    let csv_text = reqwest::get(&url).await?.text().await?;
    parse_yield_curve(&csv_text)
}

/// Derive tradable quotes from the two most recent curve rows.
pub async fn fetch_bond_quotes() -> Result<Vec<BondQuote>> {
    let url = yield_curve_url();
    info!("Fetching daily treasury yield curve CSV for quotes from URL: {}", url);

    let csv_text = reqwest::get(&url).await?.text().await?;
    parse_bond_quotes(&csv_text)
}

pub fn parse_yield_curve(csv_text: &str) -> Result<Vec<YieldCurvePoint>> {
    let mut rdr = Reader::from_reader(csv_text.as_bytes());
    let headers = rdr.headers()?.clone();

    // First data row is the most recent date
    let record = rdr
        .records()
        .next()
        .ok_or("No data rows in yield curve CSV")??;

    let mut points = Vec::new();
    for (column, bucket) in CURVE_COLUMNS {
        let idx = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| format!("No '{}' column in yield curve CSV", column))?;
        let cell = record
            .get(idx)
            .ok_or_else(|| format!("Missing '{}' field", column))?
            .trim();
        if cell.is_empty() {
            continue;
        }
        points.push(YieldCurvePoint {
            maturity: bucket.to_string(),
            yield_pct: cell.parse::<f64>()?,
        });
    }

    if points.is_empty() {
        return Err("No yields in latest yield curve row".into());
    }
    Ok(points)
}

pub fn parse_bond_quotes(csv_text: &str) -> Result<Vec<BondQuote>> {
    let mut rdr = Reader::from_reader(csv_text.as_bytes());
    let headers = rdr.headers()?.clone();

    let mut records = rdr.records();
    let latest = records.next().ok_or("No data rows in yield curve CSV")??;
    let previous = records.next().transpose()?;

    let mut quotes = Vec::new();
    for (column, bucket, tenor_years) in QUOTE_TENORS {
        let idx = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| format!("No '{}' column in yield curve CSV", column))?;
        let cell = latest
            .get(idx)
            .ok_or_else(|| format!("Missing '{}' field", column))?
            .trim();
        if cell.is_empty() {
            continue;
        }
        let yield_pct = cell.parse::<f64>()?;

        // Day change is the move against the prior session's close
        let change = match previous
            .as_ref()
            .and_then(|row| row.get(idx))
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            Some(prior) => yield_pct - prior.parse::<f64>()?,
            None => 0.0,
        };

        quotes.push(BondQuote {
            symbol: bucket.to_string(),
            name: tenor_name(bucket),
            yield_pct,
            price: discounted_price(yield_pct, tenor_years),
            change,
            maturity: bucket.to_string(),
            instrument: instrument_for_tenor(tenor_years),
        });
    }

    if quotes.is_empty() {
        return Err("No yields in latest yield curve row".into());
    }
    Ok(quotes)
}

// Par discounted at the quoted yield, a coarse price proxy for a
// zero-coupon view of the tenor.
fn discounted_price(yield_pct: f64, tenor_years: f64) -> f64 {
    100.0 / (1.0 + yield_pct / 100.0).powf(tenor_years)
}

fn instrument_for_tenor(tenor_years: f64) -> InstrumentClass {
    if tenor_years < 1.0 {
        InstrumentClass::Bill
    } else if tenor_years <= 10.0 {
        InstrumentClass::Note
    } else {
        InstrumentClass::Bond
    }
}

fn tenor_name(bucket: &str) -> String {
    match bucket {
        "3M" => "3 Month Treasury",
        "6M" => "6 Month Treasury",
        "1Y" => "1 Year Treasury",
        "2Y" => "2 Year Treasury",
        "5Y" => "5 Year Treasury",
        "10Y" => "10 Year Treasury",
        "30Y" => "30 Year Treasury",
        other => other,
    }
    .to_string()
}
