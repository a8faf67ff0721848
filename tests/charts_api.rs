use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chart_advisor::{app, config::Config, AppState};
use serde_json::{json, Value};
use tokio_test::assert_ok;
use tower::ServiceExt;

fn test_app(max_rows: usize) -> Router {
    let config = Config {
        max_rows,
        ..Config::default()
    };
    app(Arc::new(AppState::new(config)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_check_responds_ok() {
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(100), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn analyze_recommends_revenue_trend() {
    let request = post_json(
        "/charts/analyze",
        json!({
            "data": [
                {"Date": "2024-01-01", "Revenue": 100},
                {"Date": "2024-01-02", "Revenue": 150}
            ],
            "columns": ["Date", "Revenue"]
        }),
    );
    let (status, body) = send(test_app(100), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rowCount"], 2);
    assert_eq!(body["columns"][0]["type"], "temporal");
    assert_eq!(body["columns"][1]["type"], "numerical");
    assert_eq!(body["recommendations"][0]["chartType"], "line");
    assert_eq!(body["recommendations"][0]["title"], "Revenue Trend Over Date");
    assert_eq!(body["recommendations"][0]["priority"], "high");
    assert_eq!(body["performance"]["tier"], "normal");
    assert_eq!(body["performance"]["renderingStrategy"], "standard");
}

#[tokio::test]
async fn analyze_rejects_oversized_datasets() {
    let rows: Vec<Value> = (0..5).map(|i| json!({"Value": i})).collect();
    let request = post_json("/charts/analyze", json!({ "data": rows }));
    let (status, body) = send(test_app(3), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn malformed_body_returns_error_json() {
    let request = post_json("/charts/analyze", json!({ "rows": [] }));
    let (status, body) = send(test_app(100), request).await;

    assert!(status.is_client_error());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn classify_handles_nulls_and_mixed_scalars() {
    let request = post_json(
        "/charts/classify",
        json!({
            "columnName": "Region",
            "values": ["North", "South", null, "North", "", "South", "West"]
        }),
    );
    let (status, body) = send(test_app(100), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Region");
    assert_eq!(body["type"], "categorical");
    assert_eq!(body["uniqueValues"], 3);
    assert_eq!(body["characteristics"], json!(["low-cardinality"]));
}

#[tokio::test]
async fn classify_rejects_oversized_value_lists() {
    let request = post_json(
        "/charts/classify",
        json!({ "columnName": "Score", "values": [1, 2, 3, 4, 5] }),
    );
    let (status, body) = send(test_app(3), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn validate_reports_missing_column() {
    let rows: Vec<Value> = (0..5).map(|i| json!({"Name": format!("n{}", i), "Value": i})).collect();
    let request = post_json(
        "/charts/validate",
        json!({ "data": rows, "config": {"xAxis": "Foo"} }),
    );
    let (status, body) = send(test_app(100), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"][0]["type"], "missing_column");
    assert_eq!(body["dataSize"], 5);
}

#[tokio::test]
async fn validate_empty_dataset() {
    let request = post_json("/charts/validate", json!({ "data": [], "config": {} }));
    let (status, body) = send(test_app(100), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"], json!([{
        "type": "no_data",
        "message": "The dataset contains no rows",
        "suggestion": "Upload a file with at least one data row"
    }]));
}

#[tokio::test]
async fn validate_flags_duplicate_charts() {
    let chart = json!({"chartType": "bar", "xAxis": "Name", "yAxis": "Value"});
    let rows: Vec<Value> = (0..3).map(|i| json!({"Name": format!("n{}", i), "Value": i})).collect();
    let request = post_json(
        "/charts/validate",
        json!({ "data": rows, "config": chart, "existing": [chart] }),
    );
    let (_, body) = send(test_app(100), request).await;

    assert_eq!(body["valid"], true);
    assert_eq!(body["warnings"][0]["type"], "duplicate_chart");
}

#[tokio::test]
async fn tier_endpoint_maps_row_counts() {
    let request = Request::get("/charts/tier?rows=50000").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(100), request).await;

    assert_eq!(status, StatusCode::OK);
    let selection: chart_advisor::services::analysis::types::TierSelection =
        assert_ok!(serde_json::from_value(body));
    assert_eq!(
        selection.tier,
        chart_advisor::services::analysis::types::PerformanceTier::Ultra
    );
}

#[tokio::test]
async fn tier_endpoint_rejects_bad_query() {
    let request = Request::get("/charts/tier?rows=lots").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(100), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
