// src/services/analytics.rs
use crate::models::{BondComparison, BondQuote, ComparisonDiffs, ComparisonLeg, RiskLevel};
use crate::services::error::ServiceError;

/// Estimated duration in years per maturity bucket. This is the single
/// process-wide table; every caller needing duration goes through it.
pub const MATURITY_DURATIONS: [(&str, f64); 10] = [
    ("3M", 0.25),
    ("6M", 0.5),
    ("1Y", 1.0),
    ("2Y", 1.9),
    ("3Y", 2.8),
    ("5Y", 4.5),
    ("7Y", 6.2),
    ("10Y", 8.2),
    ("20Y", 15.5),
    ("30Y", 22.7),
];

/// Duration lookup; buckets outside the table fall back to 1.0 rather than
/// erroring.
pub fn duration_years(maturity: &str) -> f64 {
    MATURITY_DURATIONS
        .iter()
        .find(|(bucket, _)| *bucket == maturity)
        .map(|(_, years)| *years)
        .unwrap_or(1.0)
}

/// Risk banding over duration. Each band's upper bound is exclusive, so a
/// duration of exactly 1.0 is Low, not Very Low.
pub fn risk_level(duration: f64) -> RiskLevel {
    if duration < 1.0 {
        RiskLevel::VeryLow
    } else if duration < 3.0 {
        RiskLevel::Low
    } else if duration < 7.0 {
        RiskLevel::Medium
    } else if duration < 15.0 {
        RiskLevel::High
    } else {
        RiskLevel::VeryHigh
    }
}

pub fn compare(
    bonds: &[BondQuote],
    bond1: &str,
    bond2: &str,
) -> Result<BondComparison, ServiceError> {
    let first = bonds.iter().find(|b| b.symbol == bond1);
    let second = bonds.iter().find(|b| b.symbol == bond2);

    match (first, second) {
        (Some(first), Some(second)) => Ok(BondComparison {
            bond1: comparison_leg(first),
            bond2: comparison_leg(second),
            differences: ComparisonDiffs {
                yield_pct: first.yield_pct - second.yield_pct,
                duration: duration_years(&first.maturity) - duration_years(&second.maturity),
            },
        }),
        _ => {
            let mut missing = Vec::new();
            if first.is_none() {
                missing.push(bond1);
            }
            if second.is_none() {
                missing.push(bond2);
            }
            Err(ServiceError::BondNotFound(missing.join(", ")))
        }
    }
}

fn comparison_leg(bond: &BondQuote) -> ComparisonLeg {
    let duration = duration_years(&bond.maturity);
    ComparisonLeg {
        symbol: bond.symbol.clone(),
        name: bond.name.clone(),
        yield_pct: bond.yield_pct,
        duration,
        risk: risk_level(duration),
    }
}
