// src/services/source.rs
use chrono::{DateTime, Utc};

use crate::models::{BondQuote, EconomicSnapshot, YieldCurvePoint};
use crate::services::{demo, fred, treasury};
use crate::BoxError;

type Result<T> = std::result::Result<T, BoxError>;

/// Where series payloads come from. Selected once at startup from the
/// environment.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Built-in demonstration dataset.
    Demo,
    /// Daily treasury CSV plus FRED series.
    Treasury,
    #[cfg(test)]
    Scripted(ScriptedSource),
}

impl DataSource {
    pub async fn bond_quotes(&self) -> Result<Vec<BondQuote>> {
        match self {
            DataSource::Demo => Ok(demo::bond_quotes()),
            DataSource::Treasury => treasury::fetch_bond_quotes().await,
            #[cfg(test)]
            DataSource::Scripted(scripted) => scripted.bond_quotes().await,
        }
    }

    pub async fn yield_curve(&self) -> Result<Vec<YieldCurvePoint>> {
        match self {
            DataSource::Demo => Ok(demo::yield_curve()),
            DataSource::Treasury => treasury::fetch_yield_curve().await,
            #[cfg(test)]
            DataSource::Scripted(scripted) => scripted.yield_curve().await,
        }
    }

    pub async fn economic_snapshot(&self, now: DateTime<Utc>) -> Result<EconomicSnapshot> {
        match self {
            DataSource::Demo => Ok(demo::economic_snapshot(now)),
            DataSource::Treasury => fred::fetch_economic_snapshot(now).await,
            #[cfg(test)]
            DataSource::Scripted(scripted) => scripted.economic_snapshot().await,
        }
    }
}

/// Test source with a preset outcome per series; `None` scripts a fetch
/// failure, `hang` a fetch that never completes. Counts fetch calls so
/// cache hits can be asserted.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    pub bonds: Option<Vec<BondQuote>>,
    pub curve: Option<Vec<YieldCurvePoint>>,
    pub economy: Option<EconomicSnapshot>,
    pub hang: bool,
    pub calls: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

#[cfg(test)]
impl ScriptedSource {
    async fn bond_quotes(&self) -> Result<Vec<BondQuote>> {
        self.record_call().await;
        self.bonds.clone().ok_or_else(|| "scripted bond fetch failure".into())
    }

    async fn yield_curve(&self) -> Result<Vec<YieldCurvePoint>> {
        self.record_call().await;
        self.curve.clone().ok_or_else(|| "scripted curve fetch failure".into())
    }

    async fn economic_snapshot(&self) -> Result<EconomicSnapshot> {
        self.record_call().await;
        self.economy.clone().ok_or_else(|| "scripted economy fetch failure".into())
    }

    async fn record_call(&self) {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
    }
}
