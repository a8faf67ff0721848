use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::Method,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    error::AppError,
    models::{CellValue, DatasetAnalysis, Row},
    services::analysis::{
        classify_column, duplicate_warning, select_tier,
        types::{ChartConfig, ColumnProfile, TierSelection, ValidationResult},
        validate, DatasetAnalyzer,
    },
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/charts/analyze", post(analyze_dataset))
        .route("/charts/classify", post(classify))
        .route("/charts/validate", post(validate_config))
        .route("/charts/tier", get(tier))
        .layer(cors)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    data: Vec<Row>,
    #[serde(default)]
    columns: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    column_name: String,
    values: Vec<CellValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    data: Vec<Row>,
    #[serde(default)]
    config: ChartConfig,
    /// Charts already on the dashboard, checked for duplicates.
    #[serde(default)]
    existing: Vec<ChartConfig>,
}

#[derive(Debug, Deserialize)]
pub struct TierQuery {
    rows: usize,
}

fn check_size(state: &AppState, rows: usize) -> Result<(), AppError> {
    if rows > state.config.max_rows {
        return Err(AppError::InvalidInput(format!(
            "Dataset has {} rows, the limit is {}",
            rows, state.config.max_rows
        )));
    }
    Ok(())
}

async fn analyze_dataset(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<DatasetAnalysis>, AppError> {
    let Json(request) = payload?;
    check_size(&state, request.data.len())?;
    tracing::info!(
        "Analyze request: {} rows, {} columns requested",
        request.data.len(),
        request.columns.len()
    );

    // Profiling is CPU bound, keep it off the async workers
    let analysis = tokio::task::spawn_blocking(move || {
        DatasetAnalyzer.analyze(&request.data, &request.columns)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Analysis task failed: {}", e)))?;

    Ok(Json(analysis))
}

async fn classify(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ColumnProfile>, AppError> {
    let Json(request) = payload?;
    check_size(&state, request.values.len())?;
    tracing::debug!(
        "Classify request for column {} with {} values",
        request.column_name,
        request.values.len()
    );

    Ok(Json(classify_column(&request.values, &request.column_name)))
}

async fn validate_config(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidationResult>, AppError> {
    let Json(request) = payload?;
    check_size(&state, request.data.len())?;

    let mut result = validate(&request.data, &request.config);
    if let Some(warning) = duplicate_warning(&request.existing, &request.config) {
        result.warnings.push(warning);
    }
    tracing::info!(
        "Validated chart config: valid={}, {} errors, {} warnings",
        result.valid,
        result.errors.len(),
        result.warnings.len()
    );

    Ok(Json(result))
}

async fn tier(
    query: Result<Query<TierQuery>, QueryRejection>,
) -> Result<Json<TierSelection>, AppError> {
    let Query(TierQuery { rows }) = query?;
    Ok(Json(select_tier(rows)))
}
