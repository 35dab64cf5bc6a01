// src/handlers/economy.rs
use log::{error, info};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::market::MarketService;

pub async fn get_economic_data(svc: Arc<MarketService>) -> Result<Json, Rejection> {
    info!("Handling request to get economic data");

    let snapshot = svc.economic_snapshot().await.map_err(|e| {
        error!("Failed to get economic data: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&snapshot))
}
