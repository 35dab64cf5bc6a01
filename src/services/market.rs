// src/services/market.rs
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::timeout;

use crate::models::{BondComparison, BondQuote, EconomicSnapshot, YieldCurvePoint};
use crate::services::analytics;
use crate::services::cache::{CacheKey, CachePayload, CacheStore};
use crate::services::clock::Clock;
use crate::services::error::ServiceError;
use crate::services::source::DataSource;
use crate::BoxError;

/// Action name broadcast to update subscribers after a successful refresh.
pub const DATA_UPDATED: &str = "dataUpdated";

const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Owns the series cache and coordinates fetching, refreshing, and
/// analytics over it. Cheap to share behind an `Arc`; all mutation goes
/// through whole-entry cache writes.
pub struct MarketService {
    cache: CacheStore,
    clock: Arc<dyn Clock>,
    source: DataSource,
    api_timeout: Duration,
    updates: broadcast::Sender<String>,
}

impl MarketService {
    pub fn new(
        source: DataSource,
        clock: Arc<dyn Clock>,
        cache_ttl: chrono::Duration,
        api_timeout: Duration,
    ) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        MarketService {
            cache: CacheStore::new(cache_ttl),
            clock,
            source,
            api_timeout,
            updates,
        }
    }

    /// Current bond quote snapshot, refilling the cache on miss or expiry.
    pub async fn bond_quotes(&self) -> Result<Vec<BondQuote>, ServiceError> {
        let payload = self.series(CacheKey::BondQuotes).await?;
        payload
            .into_bonds()
            .ok_or_else(|| ServiceError::Fetch("bond quote cache held an unexpected payload".into()))
    }

    /// Current yield curve, shortest maturity first.
    pub async fn yield_curve(&self) -> Result<Vec<YieldCurvePoint>, ServiceError> {
        let payload = self.series(CacheKey::YieldCurve).await?;
        payload
            .into_curve()
            .ok_or_else(|| ServiceError::Fetch("yield curve cache held an unexpected payload".into()))
    }

    pub async fn economic_snapshot(&self) -> Result<EconomicSnapshot, ServiceError> {
        let payload = self.series(CacheKey::EconomicSnapshot).await?;
        payload
            .into_economy()
            .ok_or_else(|| ServiceError::Fetch("economic cache held an unexpected payload".into()))
    }

    /// Refresh every series together. Successful fetches are written into
    /// the cache even when a sibling fails; the aggregate result is a
    /// failure if any single fetch failed. Concurrent refreshes are not
    /// coalesced: the last write to a key wins.
    pub async fn refresh_all(&self) -> Result<(), ServiceError> {
        info!("Refreshing all market data series...");

        let (bonds, curve, economy) = tokio::join!(
            self.fetch_series(CacheKey::BondQuotes),
            self.fetch_series(CacheKey::YieldCurve),
            self.fetch_series(CacheKey::EconomicSnapshot),
        );

        let mut failures = Vec::new();
        for (key, outcome) in [
            (CacheKey::BondQuotes, bonds),
            (CacheKey::YieldCurve, curve),
            (CacheKey::EconomicSnapshot, economy),
        ] {
            match outcome {
                Ok(payload) => self.cache.set(key, payload, self.clock.now()),
                Err(e) => {
                    error!("Failed to refresh {:?}: {}", key, e);
                    failures.push(format!("{:?}: {}", key, e));
                }
            }
        }

        if failures.is_empty() {
            let subscribers = self.publish(DATA_UPDATED);
            debug!("Published {} to {} subscriber(s)", DATA_UPDATED, subscribers);
            info!("Data refresh completed");
            Ok(())
        } else {
            Err(ServiceError::Fetch(failures.join("; ")))
        }
    }

    /// Compare two bonds out of the current snapshot by yield, duration,
    /// and risk band.
    pub async fn compare_bonds(
        &self,
        bond1: &str,
        bond2: &str,
    ) -> Result<BondComparison, ServiceError> {
        let bonds = self.bond_quotes().await?;
        analytics::compare(&bonds, bond1, bond2)
    }

    /// Drop every cached entry. The next read of each series refetches.
    pub fn clear_cache(&self) {
        info!("Clearing the market data cache");
        self.cache.clear();
    }

    /// Subscribe to update notifications. Delivery is best-effort; lagging
    /// receivers skip events rather than stalling a refresh.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.updates.subscribe()
    }

    fn publish(&self, action: &str) -> usize {
        // send fails only when no receiver exists, which is a normal state
        self.updates.send(action.to_string()).unwrap_or(0)
    }

    async fn series(&self, key: CacheKey) -> Result<CachePayload, ServiceError> {
        let read = self.cache.get(key, self.clock.now());
        if read.fresh {
            if let Some(payload) = read.payload {
                debug!("Serving {:?} from cache", key);
                return Ok(payload);
            }
        }

        debug!("Cache for {:?} is missing or stale, refilling", key);
        let payload = self.fetch_series(key).await.map_err(|e| {
            error!("Failed to fetch {:?}: {}", key, e);
            ServiceError::Fetch(e.to_string())
        })?;
        self.cache.set(key, payload.clone(), self.clock.now());
        Ok(payload)
    }

    async fn fetch_series(&self, key: CacheKey) -> Result<CachePayload, BoxError> {
        let fetch = async {
            match key {
                CacheKey::BondQuotes => self.source.bond_quotes().await.map(CachePayload::Bonds),
                CacheKey::YieldCurve => self.source.yield_curve().await.map(CachePayload::Curve),
                CacheKey::EconomicSnapshot => self
                    .source
                    .economic_snapshot(self.clock.now())
                    .await
                    .map(CachePayload::Economy),
            }
        };

        match timeout(self.api_timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(format!("{:?} fetch timed out after {:?}", key, self.api_timeout).into()),
        }
    }
}
