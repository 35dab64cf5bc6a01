// tests/api.rs
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use treasuryviz_backend::models::{BondQuote, EconomicSnapshot, YieldCurvePoint};
use treasuryviz_backend::routes::routes;
use treasuryviz_backend::services::clock::SystemClock;
use treasuryviz_backend::services::market::MarketService;
use treasuryviz_backend::services::source::DataSource;

fn test_service() -> Arc<MarketService> {
    Arc::new(MarketService::new(
        DataSource::Demo,
        Arc::new(SystemClock),
        chrono::Duration::minutes(5),
        Duration::from_secs(5),
    ))
}

#[tokio::test]
async fn bonds_route_returns_the_quote_snapshot() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/bonds")
        .reply(&api)
        .await;

    assert_eq!(res.status(), 200);
    let bonds: Vec<BondQuote> = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(bonds.len(), 7);
    assert_eq!(bonds[0].symbol, "3M");
}

#[tokio::test]
async fn bond_quotes_serialize_with_wire_field_names() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/bonds")
        .reply(&api)
        .await;

    let body: Value = serde_json::from_slice(res.body()).unwrap();
    let first = &body[0];
    assert!(first.get("yield").is_some());
    assert!(first.get("type").is_some());
    assert_eq!(first["type"], "Bill");
}

#[tokio::test]
async fn yield_curve_route_preserves_order() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/yield_curve")
        .reply(&api)
        .await;

    assert_eq!(res.status(), 200);
    let curve: Vec<YieldCurvePoint> = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(curve.len(), 11);
    assert_eq!(curve.first().unwrap().maturity, "1M");
    assert_eq!(curve.last().unwrap().maturity, "30Y");
}

#[tokio::test]
async fn economy_route_returns_the_snapshot() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/economy")
        .reply(&api)
        .await;

    assert_eq!(res.status(), 200);
    let snapshot: EconomicSnapshot = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(snapshot.inflation, 3.2);
    assert_eq!(snapshot.fed_funds_rate, 5.25);
}

#[tokio::test]
async fn refresh_route_reports_success() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/refresh")
        .reply(&api)
        .await;

    assert_eq!(res.status(), 200);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn clear_cache_route_reports_success() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/cache/clear")
        .reply(&api)
        .await;

    assert_eq!(res.status(), 200);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn compare_route_returns_signed_differences() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/compare")
        .json(&json!({ "bond1": "10Y", "bond2": "2Y" }))
        .reply(&api)
        .await;

    assert_eq!(res.status(), 200);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["bond1"]["symbol"], "10Y");
    assert_eq!(body["bond1"]["risk"], "High");
    assert_eq!(body["bond2"]["risk"], "Low");
    assert!((body["differences"]["yield"].as_f64().unwrap() - (-0.50)).abs() < 1e-9);
    assert!((body["differences"]["duration"].as_f64().unwrap() - 6.3).abs() < 1e-9);
}

#[tokio::test]
async fn compare_route_maps_unknown_symbols_to_404() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/compare")
        .json(&json!({ "bond1": "XX", "bond2": "2Y" }))
        .reply(&api)
        .await;

    assert_eq!(res.status(), 404);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn compare_route_rejects_a_malformed_body() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/compare")
        .json(&json!({ "bond1": "10Y" }))
        .reply(&api)
        .await;

    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn message_actions_cover_every_series() {
    let api = routes(test_service());

    for (action, probe) in [
        ("getBondData", "symbol"),
        ("getYieldCurve", "maturity"),
    ] {
        let res = warp::test::request()
            .method("POST")
            .path("/api/v1/message")
            .json(&json!({ "action": action }))
            .reply(&api)
            .await;

        assert_eq!(res.status(), 200, "action {}", action);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert!(body[0].get(probe).is_some(), "action {}", action);
    }

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/message")
        .json(&json!({ "action": "getEconomicData" }))
        .reply(&api)
        .await;
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["fedFundsRate"], 5.25);
}

#[tokio::test]
async fn message_refresh_and_clear_report_success() {
    let api = routes(test_service());

    for action in ["refreshData", "clearCache"] {
        let res = warp::test::request()
            .method("POST")
            .path("/api/v1/message")
            .json(&json!({ "action": action }))
            .reply(&api)
            .await;

        assert_eq!(res.status(), 200, "action {}", action);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["success"], true, "action {}", action);
    }
}

#[tokio::test]
async fn message_compare_uses_the_bonds_envelope() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/message")
        .json(&json!({
            "action": "compareBonds",
            "bonds": { "bond1": "10Y", "bond2": "2Y" }
        }))
        .reply(&api)
        .await;

    assert_eq!(res.status(), 200);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert!((body["differences"]["yield"].as_f64().unwrap() - (-0.50)).abs() < 1e-9);
}

#[tokio::test]
async fn message_compare_with_unknown_symbol_replies_with_an_error() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/message")
        .json(&json!({
            "action": "compareBonds",
            "bonds": { "bond1": "XX", "bond2": "2Y" }
        }))
        .reply(&api)
        .await;

    // Message-port semantics: the envelope always gets a 200 reply
    assert_eq!(res.status(), 200);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn unknown_message_action_is_answered_not_dropped() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/message")
        .json(&json!({ "action": "bogus" }))
        .reply(&api)
        .await;

    assert_eq!(res.status(), 200);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["error"], "Unknown action");
}

#[tokio::test]
async fn unknown_route_is_a_json_404() {
    let api = routes(test_service());

    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/nope")
        .reply(&api)
        .await;

    assert_eq!(res.status(), 404);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn concurrent_callers_each_get_their_own_response() {
    let api = routes(test_service());

    let bonds = warp::test::request()
        .method("GET")
        .path("/api/v1/bonds")
        .reply(&api);
    let curve = warp::test::request()
        .method("GET")
        .path("/api/v1/yield_curve")
        .reply(&api);
    let compare = warp::test::request()
        .method("POST")
        .path("/api/v1/compare")
        .json(&json!({ "bond1": "30Y", "bond2": "3M" }))
        .reply(&api);

    let (bonds, curve, compare) = tokio::join!(bonds, curve, compare);

    assert_eq!(bonds.status(), 200);
    assert_eq!(curve.status(), 200);
    assert_eq!(compare.status(), 200);
    let body: Value = serde_json::from_slice(compare.body()).unwrap();
    assert_eq!(body["bond1"]["symbol"], "30Y");
}

#[tokio::test]
async fn identical_reads_within_the_window_return_identical_payloads() {
    let api = routes(test_service());

    let first = warp::test::request()
        .method("GET")
        .path("/api/v1/bonds")
        .reply(&api)
        .await;
    let second = warp::test::request()
        .method("GET")
        .path("/api/v1/bonds")
        .reply(&api)
        .await;

    assert_eq!(first.body(), second.body());
}

#[tokio::test]
async fn events_socket_receives_the_update_broadcast() {
    let svc = test_service();
    let api = routes(svc.clone());

    let mut client = warp::test::ws()
        .path("/api/v1/events")
        .handshake(api)
        .await
        .expect("websocket handshake");

    // Give the forwarding task a moment to subscribe
    tokio::time::sleep(Duration::from_millis(50)).await;
    svc.refresh_all().await.expect("refresh");

    let msg = client.recv().await.expect("event frame");
    let body: Value = serde_json::from_str(msg.to_str().expect("text frame")).unwrap();
    assert_eq!(body["action"], "dataUpdated");
}
