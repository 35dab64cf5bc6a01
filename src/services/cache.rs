// src/services/cache.rs
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::{BondQuote, EconomicSnapshot, YieldCurvePoint};

/// The fixed set of cached series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    BondQuotes,
    YieldCurve,
    EconomicSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CachePayload {
    Bonds(Vec<BondQuote>),
    Curve(Vec<YieldCurvePoint>),
    Economy(EconomicSnapshot),
}

impl CachePayload {
    pub fn into_bonds(self) -> Option<Vec<BondQuote>> {
        match self {
            CachePayload::Bonds(bonds) => Some(bonds),
            _ => None,
        }
    }

    pub fn into_curve(self) -> Option<Vec<YieldCurvePoint>> {
        match self {
            CachePayload::Curve(points) => Some(points),
            _ => None,
        }
    }

    pub fn into_economy(self) -> Option<EconomicSnapshot> {
        match self {
            CachePayload::Economy(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: CachePayload,
    written_at: DateTime<Utc>,
}

/// Result of a cache lookup. `found` reports presence, `fresh` whether the
/// entry is still inside the expiry window.
#[derive(Debug)]
pub struct CacheRead {
    pub payload: Option<CachePayload>,
    pub found: bool,
    pub fresh: bool,
}

/// Keyed, time-expiring in-memory store of fetched series payloads.
///
/// Writes replace the whole entry for a key; entries are never mutated in
/// place, so concurrent readers only ever see a complete snapshot.
pub struct CacheStore {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl CacheStore {
    pub fn new(ttl: Duration) -> Self {
        CacheStore {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: CacheKey, now: DateTime<Utc>) -> CacheRead {
        let entries = self.entries.read().unwrap();
        match entries.get(&key) {
            Some(entry) => CacheRead {
                payload: Some(entry.payload.clone()),
                found: true,
                fresh: now - entry.written_at < self.ttl,
            },
            None => CacheRead {
                payload: None,
                found: false,
                fresh: false,
            },
        }
    }

    pub fn set(&self, key: CacheKey, payload: CachePayload, now: DateTime<Utc>) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            key,
            CacheEntry {
                payload,
                written_at: now,
            },
        );
    }

    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }
}
