// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Instrument class by original term: bills under a year, notes out to ten,
/// bonds beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstrumentClass {
    Bill,
    Note,
    Bond,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondQuote {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "yield")]
    pub yield_pct: f64,
    pub price: f64,
    pub change: f64,
    pub maturity: String,
    #[serde(rename = "type")]
    pub instrument: InstrumentClass,
}

/// One point of the term structure. Snapshots are ordered shortest
/// maturity first and that order is preserved end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldCurvePoint {
    pub maturity: String,
    #[serde(rename = "yield")]
    pub yield_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicSnapshot {
    pub inflation: f64,
    pub fed_funds_rate: f64,
    pub unemployment: f64,
    pub gdp_growth: f64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonLeg {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "yield")]
    pub yield_pct: f64,
    pub duration: f64,
    pub risk: RiskLevel,
}

/// Differences are always bond1 minus bond2, never normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDiffs {
    #[serde(rename = "yield")]
    pub yield_pct: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondComparison {
    pub bond1: ComparisonLeg,
    pub bond2: ComparisonLeg,
    pub differences: ComparisonDiffs,
}
