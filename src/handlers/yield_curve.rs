// src/handlers/yield_curve.rs
use log::{error, info};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::market::MarketService;

pub async fn get_yield_curve(svc: Arc<MarketService>) -> Result<Json, Rejection> {
    info!("Handling request to get the yield curve");

    let curve = svc.yield_curve().await.map_err(|e| {
        error!("Failed to get the yield curve: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&curve))
}
