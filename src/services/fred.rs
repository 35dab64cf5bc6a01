// src/services/fred.rs
use chrono::{DateTime, Utc};
use csv::Reader;
use log::info;
use reqwest;

use crate::models::EconomicSnapshot;
use crate::BoxError;

pub type Result<T> = std::result::Result<T, BoxError>;

const CPI_SERIES: &str = "CPIAUCSL";
const FED_FUNDS_SERIES: &str = "FEDFUNDS";
const UNEMPLOYMENT_SERIES: &str = "UNRATE";
const GDP_GROWTH_SERIES: &str = "A191RL1Q225SBEA";

fn series_url(series: &str) -> String {
    format!("https://fred.stlouisfed.org/graph/fredgraph.csv?id={}", series)
}

/// Fetch one FRED series and return its numeric observations, oldest first.
pub async fn fetch_series(series: &str) -> Result<Vec<f64>> {
    let url = series_url(series);
    info!("Fetching FRED series CSV from URL: {}", url);

    let csv_text = reqwest::get(&url).await?.text().await?;
    parse_series(&csv_text)
}

/// Parse a two-column fredgraph CSV, skipping missing ('.') observations.
pub fn parse_series(csv_text: &str) -> Result<Vec<f64>> {
    let mut rdr = Reader::from_reader(csv_text.as_bytes());
    let mut values = Vec::new();
    for record in rdr.records() {
        let row = record?;
        let cell = row
            .get(1)
            .ok_or("Missing value column in FRED CSV")?
            .trim();
        if cell.is_empty() || cell == "." {
            continue;
        }
        values.push(cell.parse::<f64>()?);
    }

    if values.is_empty() {
        return Err("No observations in FRED CSV".into());
    }
    Ok(values)
}

/// Year-over-year percent change of the final observation of a monthly
/// index series.
pub fn year_over_year(values: &[f64]) -> Result<f64> {
    if values.len() < 13 {
        return Err("Not enough observations for a year-over-year change".into());
    }
    let latest = values[values.len() - 1];
    let year_ago = values[values.len() - 13];
    if year_ago == 0.0 {
        return Err("Year-ago observation is zero".into());
    }
    Ok((latest / year_ago - 1.0) * 100.0)
}

/// Assemble the economic snapshot from its four FRED series. CPI is an
/// index and converted to a year-over-year rate; the rest are quoted as
/// percentages already.
pub async fn fetch_economic_snapshot(now: DateTime<Utc>) -> Result<EconomicSnapshot> {
    let (cpi, fed_funds, unemployment, gdp_growth) = tokio::join!(
        fetch_series(CPI_SERIES),
        fetch_series(FED_FUNDS_SERIES),
        fetch_series(UNEMPLOYMENT_SERIES),
        fetch_series(GDP_GROWTH_SERIES),
    );

    let cpi = cpi?;
    let fed_funds = fed_funds?;
    let unemployment = unemployment?;
    let gdp_growth = gdp_growth?;

    Ok(EconomicSnapshot {
        inflation: year_over_year(&cpi)?,
        fed_funds_rate: *fed_funds.last().ok_or("No federal funds observations")?,
        unemployment: *unemployment.last().ok_or("No unemployment observations")?,
        gdp_growth: *gdp_growth.last().ok_or("No GDP growth observations")?,
        last_updated: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_observations_and_skips_missing_values() {
        let csv_text = "\
observation_date,UNRATE
2024-01-01,3.7
2024-02-01,.
2024-03-01,3.8
";
        let values = parse_series(csv_text).unwrap();
        assert_eq!(values, vec![3.7, 3.8]);
    }

    #[test]
    fn empty_series_is_an_error() {
        let csv_text = "observation_date,UNRATE\n2024-01-01,.\n";
        assert!(parse_series(csv_text).is_err());
    }

    #[test]
    fn year_over_year_uses_the_observation_twelve_months_back() {
        let mut values = vec![100.0; 12];
        values.push(104.0);
        let rate = year_over_year(&values).unwrap();
        assert!((rate - 4.0).abs() < 1e-9);
    }

    #[test]
    fn year_over_year_requires_thirteen_observations() {
        assert!(year_over_year(&[100.0; 12]).is_err());
    }
}
