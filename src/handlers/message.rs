// src/handlers/message.rs
use log::{info, warn};
use serde_json::{json, Value};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::services::market::MarketService;

/// Message-port endpoint. Front-end surfaces post `{"action": ...}`
/// envelopes here; every accepted envelope gets exactly one reply, errors
/// included, so no caller is ever left waiting on a dropped request.
pub async fn handle_message(envelope: Value, svc: Arc<MarketService>) -> Result<Json, Rejection> {
    let action = envelope
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or_default();
    info!("Handling message action '{}'", action);

    let reply = match action {
        "getBondData" => match svc.bond_quotes().await {
            Ok(bonds) => json!(bonds),
            Err(e) => json!({ "error": e.to_string() }),
        },
        "getYieldCurve" => match svc.yield_curve().await {
            Ok(curve) => json!(curve),
            Err(e) => json!({ "error": e.to_string() }),
        },
        "getEconomicData" => match svc.economic_snapshot().await {
            Ok(snapshot) => json!(snapshot),
            Err(e) => json!({ "error": e.to_string() }),
        },
        "refreshData" => match svc.refresh_all().await {
            Ok(()) => json!({ "success": true }),
            Err(e) => json!({ "error": e.to_string() }),
        },
        "compareBonds" => compare_from_envelope(&envelope, &svc).await,
        "clearCache" => {
            svc.clear_cache();
            json!({ "success": true })
        }
        other => {
            warn!("Unknown message action '{}'", other);
            json!({ "error": "Unknown action" })
        }
    };

    Ok(warp::reply::json(&reply))
}

async fn compare_from_envelope(envelope: &Value, svc: &MarketService) -> Value {
    let bonds = envelope.get("bonds");
    let bond1 = bonds.and_then(|b| b.get("bond1")).and_then(Value::as_str);
    let bond2 = bonds.and_then(|b| b.get("bond2")).and_then(Value::as_str);

    match (bond1, bond2) {
        (Some(bond1), Some(bond2)) => match svc.compare_bonds(bond1, bond2).await {
            Ok(comparison) => json!(comparison),
            Err(e) => json!({ "error": e.to_string() }),
        },
        _ => json!({ "error": "compareBonds requires bonds.bond1 and bonds.bond2" }),
    }
}
