// src/handlers/compare.rs
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::market::MarketService;

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub bond1: String,
    pub bond2: String,
}

pub async fn compare_bonds(
    request: CompareRequest,
    svc: Arc<MarketService>,
) -> Result<Json, Rejection> {
    info!(
        "Handling request to compare bonds {} and {}",
        request.bond1, request.bond2
    );

    let comparison = svc
        .compare_bonds(&request.bond1, &request.bond2)
        .await
        .map_err(|e| {
            error!("Failed to compare bonds: {}", e);
            warp::reject::custom(ApiError::from(e))
        })?;

    Ok(warp::reply::json(&comparison))
}
