// src/services/demo.rs
use chrono::{DateTime, Utc};

use crate::models::{BondQuote, EconomicSnapshot, InstrumentClass, YieldCurvePoint};

// Demonstration dataset served when no live source is configured.

fn quote(
    symbol: &str,
    name: &str,
    yield_pct: f64,
    price: f64,
    change: f64,
    instrument: InstrumentClass,
) -> BondQuote {
    BondQuote {
        symbol: symbol.to_string(),
        name: name.to_string(),
        yield_pct,
        price,
        change,
        maturity: symbol.to_string(),
        instrument,
    }
}

pub fn bond_quotes() -> Vec<BondQuote> {
    vec![
        quote("3M", "3 Month Treasury", 5.25, 99.85, 0.02, InstrumentClass::Bill),
        quote("6M", "6 Month Treasury", 5.15, 99.72, -0.01, InstrumentClass::Bill),
        quote("1Y", "1 Year Treasury", 4.95, 98.95, 0.05, InstrumentClass::Note),
        quote("2Y", "2 Year Treasury", 4.65, 97.85, -0.03, InstrumentClass::Note),
        quote("5Y", "5 Year Treasury", 4.25, 95.45, 0.08, InstrumentClass::Note),
        quote("10Y", "10 Year Treasury", 4.15, 92.85, 0.12, InstrumentClass::Note),
        quote("30Y", "30 Year Treasury", 4.35, 88.95, -0.05, InstrumentClass::Bond),
    ]
}

pub fn yield_curve() -> Vec<YieldCurvePoint> {
    [
        ("1M", 5.35),
        ("3M", 5.25),
        ("6M", 5.15),
        ("1Y", 4.95),
        ("2Y", 4.65),
        ("3Y", 4.45),
        ("5Y", 4.25),
        ("7Y", 4.18),
        ("10Y", 4.15),
        ("20Y", 4.28),
        ("30Y", 4.35),
    ]
    .into_iter()
    .map(|(maturity, yield_pct)| YieldCurvePoint {
        maturity: maturity.to_string(),
        yield_pct,
    })
    .collect()
}

pub fn economic_snapshot(now: DateTime<Utc>) -> EconomicSnapshot {
    EconomicSnapshot {
        inflation: 3.2,
        fed_funds_rate: 5.25,
        unemployment: 3.8,
        gdp_growth: 2.1,
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn bond_symbols_are_unique() {
        let quotes = bond_quotes();
        let symbols: HashSet<&str> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(symbols.len(), quotes.len());
    }

    #[test]
    fn yield_curve_is_ordered_shortest_first() {
        let curve = yield_curve();
        assert_eq!(curve.len(), 11);
        assert_eq!(curve.first().unwrap().maturity, "1M");
        assert_eq!(curve.last().unwrap().maturity, "30Y");
    }
}
