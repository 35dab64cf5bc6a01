// src/services/error.rs
use std::fmt;

/// Errors the market service surfaces to its callers. Nothing here is ever
/// fatal to the process; handlers convert these into structured responses.
#[derive(Debug, Clone)]
pub enum ServiceError {
    /// A series fetch failed or timed out.
    Fetch(String),
    /// A comparison referenced a symbol absent from the current snapshot.
    BondNotFound(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServiceError::Fetch(message) => write!(f, "failed to fetch market data: {}", message),
            ServiceError::BondNotFound(symbols) => write!(f, "bond not found: {}", symbols),
        }
    }
}

impl std::error::Error for ServiceError {}
