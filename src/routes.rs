// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::error::ApiError;
use crate::handlers::{bonds, compare, economy, events, message, refresh, yield_curve};
use crate::services::market::MarketService;

// Recovery handling for our custom errors
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status();
        message = api_error.message.clone();
    } else if err.find::<warp::filters::body::BodyDeserializeError>().is_some() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = "Invalid request body".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = warp::http::StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    svc: Arc<MarketService>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let svc_filter = warp::any().map(move || svc.clone());

    let bonds_route = warp::path!("api" / "v1" / "bonds")
        .and(warp::get())
        .and(svc_filter.clone())
        .and_then(bonds::get_bond_data);

    let yield_curve_route = warp::path!("api" / "v1" / "yield_curve")
        .and(warp::get())
        .and(svc_filter.clone())
        .and_then(yield_curve::get_yield_curve);

    let economy_route = warp::path!("api" / "v1" / "economy")
        .and(warp::get())
        .and(svc_filter.clone())
        .and_then(economy::get_economic_data);

    let refresh_route = warp::path!("api" / "v1" / "refresh")
        .and(warp::post())
        .and(svc_filter.clone())
        .and_then(refresh::refresh_data);

    let clear_cache_route = warp::path!("api" / "v1" / "cache" / "clear")
        .and(warp::post())
        .and(svc_filter.clone())
        .and_then(refresh::clear_cache);

    let compare_route = warp::path!("api" / "v1" / "compare")
        .and(warp::post())
        .and(warp::body::json())
        .and(svc_filter.clone())
        .and_then(compare::compare_bonds);

    let message_route = warp::path!("api" / "v1" / "message")
        .and(warp::post())
        .and(warp::body::json())
        .and(svc_filter.clone())
        .and_then(message::handle_message);

    let events_route = warp::path!("api" / "v1" / "events")
        .and(warp::ws())
        .and(svc_filter)
        .map(|ws: warp::ws::Ws, svc: Arc<MarketService>| {
            ws.on_upgrade(move |socket| events::client_connected(socket, svc))
        });

    info!("All routes configured successfully.");

    bonds_route
        .or(yield_curve_route)
        .or(economy_route)
        .or(refresh_route)
        .or(clear_cache_route)
        .or(compare_route)
        .or(message_route)
        .or(events_route)
        .recover(handle_rejection)
}
