//! API route handlers

use crate::error::ApiError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use forecaster_facade::Forecaster;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

/// Prediction payload
///
/// `values` is kept as raw JSON so the length check can run before any
/// numeric conversion. A missing or null field counts as an empty series.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub values: Option<Value>,
}

/// `POST /predict` - forecast the next values of the posted series
///
/// Responds with a bare JSON array of rounded forecasts.
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<f64>>, ApiError> {
    debug!(payload = %String::from_utf8_lossy(&body), "received data for prediction");
    let request: PredictRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Payload(format!("invalid JSON payload: {}", e)))?;

    let raw = raw_values(request.values)?;
    info!(count = raw.len(), "prediction requested");

    state.forecaster().ensure_sufficient(raw.len())?;
    let values = to_numbers(&raw)?;

    // Training is CPU-bound; keep it off the async workers
    let forecaster = state.forecaster().clone();
    let forecast = tokio::task::spawn_blocking(move || forecaster.forecast(&values))
        .await
        .map_err(|e| ApiError::Internal(format!("forecast task failed: {}", e)))??;

    Ok(Json(forecast))
}

fn raw_values(values: Option<Value>) -> Result<Vec<Value>, ApiError> {
    match values {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ApiError::Payload(format!(
            "'values' must be an array of numbers, got {}",
            json_kind(&other)
        ))),
    }
}

/// Converts each entry to `f64`
///
/// Numeric strings such as `"1.5"` are parsed, booleans become `1.0`/`0.0`
/// and a single-element array stands for its only entry.
fn to_numbers(raw: &[Value]) -> Result<Vec<f64>, ApiError> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| to_number(index, value))
        .collect()
}

fn to_number(index: usize, value: &Value) -> Result<f64, ApiError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            ApiError::Payload(format!("value at index {} is out of range: {}", index, n))
        }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            ApiError::Payload(format!("could not convert string to float: '{}'", s))
        }),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Array(items) if items.len() == 1 => to_number(index, &items[0]),
        other => Err(ApiError::Payload(format!(
            "value at index {} is not a number: {}",
            index, other
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
