//! Error responses for the HTTP boundary

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use forecaster_facade::ForecastError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failures surfaced by the prediction endpoint
#[derive(Debug, Error)]
pub enum ApiError {
    /// Raised by the forecaster itself
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// Body could not be read as a list of numbers
    #[error("{0}")]
    Payload(String),

    /// The blocking forecast task did not complete
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// 400 for too little data, 500 for everything else
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Forecast(err) if err.is_user_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "prediction failed");
        } else {
            tracing::warn!(error = %self, "prediction rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
