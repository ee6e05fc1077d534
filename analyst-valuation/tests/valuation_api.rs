//! End-to-end route tests against the in-process router.

use std::sync::Arc;

use analyst_common::config::Config;
use analyst_valuation::{router, ValuationState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn make_app() -> axum::Router {
    router(Arc::new(ValuationState::new(Config::default())))
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn full_snapshot() -> Value {
    json!({
        "current_price": 100.0,
        "pe_ratio": 20.0,
        "earnings_growth": 0.15,
        "free_cash_flow": 120000.0,
        "eps": 5.0,
        "sector": "Technology",
        "debt_to_equity": 0.5,
        "total_debt": 100000.0,
        "total_cash": 80000.0,
        "shares_outstanding": 20000.0
    })
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(make_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "analyst-valuation");
}

#[tokio::test]
async fn test_valuation_happy_path() {
    let (status, body) = post_json(
        make_app(),
        "/api/v1/valuation",
        json!({
            "symbol": "AAPL",
            "methods": ["dcf", "peg", "pe"],
            "snapshot": full_snapshot()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "AAPL");
    assert_eq!(body["valuations"].as_array().unwrap().len(), 3);
    assert!(body["recommendation"].is_string());
    assert!(!body["risk_factors"].as_array().unwrap().is_empty());
    assert!(body["generated_at"].is_string());
}

#[tokio::test]
async fn test_valuation_partial_failure_drops_only_peg() {
    let mut snapshot = full_snapshot();
    snapshot["earnings_growth"] = Value::Null;

    let (status, body) = post_json(
        make_app(),
        "/api/v1/valuation",
        json!({
            "symbol": "AAPL",
            "methods": ["dcf", "peg", "pe"],
            "snapshot": snapshot
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let methods: Vec<&str> = body["valuations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["method"].as_str().unwrap())
        .collect();
    assert_eq!(methods, vec!["dcf", "pe"]);
}

#[tokio::test]
async fn test_valuation_missing_snapshot_is_fatal() {
    let (status, body) = post_json(
        make_app(),
        "/api/v1/valuation",
        json!({
            "symbol": "AAPL",
            "methods": ["dcf"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("no resolved financial data"));
}

#[tokio::test]
async fn test_valuation_empty_method_list_rejected() {
    let (status, _) = post_json(
        make_app(),
        "/api/v1/valuation",
        json!({
            "symbol": "AAPL",
            "methods": [],
            "snapshot": full_snapshot()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_valuation_custom_assumptions() {
    let (status, body) = post_json(
        make_app(),
        "/api/v1/valuation",
        json!({
            "symbol": "AAPL",
            "methods": ["dcf"],
            "assumptions": { "projection_years": 7.0, "growth_rate": 0.08 },
            "snapshot": full_snapshot()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let valuation = &body["valuations"][0];
    assert_eq!(valuation["assumptions"]["projection_years"], 7);
    assert_eq!(valuation["assumptions"]["growth_rate"], 0.08);
    assert_eq!(
        valuation["details"]["projected_cash_flows"]
            .as_array()
            .unwrap()
            .len(),
        7
    );
}

#[tokio::test]
async fn test_methods_catalog() {
    let (status, body) = get_json(make_app(), "/api/v1/valuation/methods").await;

    assert_eq!(status, StatusCode::OK);
    let methods = body["methods"].as_array().unwrap();
    assert_eq!(methods.len(), 4);
    assert_eq!(methods[0]["method"], "dcf");
    assert_eq!(methods[0]["name"], "Discounted Cash Flow");
    assert!(methods
        .iter()
        .any(|m| m["method"] == "comparative" && m["complexity"] == "Medium"));
}
