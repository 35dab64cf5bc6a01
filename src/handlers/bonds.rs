// src/handlers/bonds.rs
use log::{error, info};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::market::MarketService;

pub async fn get_bond_data(svc: Arc<MarketService>) -> Result<Json, Rejection> {
    info!("Handling request to get bond quotes");

    let bonds = svc.bond_quotes().await.map_err(|e| {
        error!("Failed to get bond quotes: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&bonds))
}
