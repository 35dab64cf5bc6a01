// src/handlers/refresh.rs
use log::{error, info};
use serde_json::json;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::market::MarketService;

pub async fn refresh_data(svc: Arc<MarketService>) -> Result<Json, Rejection> {
    info!("Handling request to refresh all market data");

    svc.refresh_all().await.map_err(|e| {
        error!("On-demand refresh failed: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&json!({ "success": true })))
}

pub async fn clear_cache(svc: Arc<MarketService>) -> Result<Json, Rejection> {
    info!("Handling request to clear the cache");

    svc.clear_cache();
    Ok(warp::reply::json(&json!({ "success": true })))
}
