use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use serde::de::Error as _;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::AppState;
use super::interface::{ApiError, Result};
use super::schema::{HealthResponse, PollRequest, PollResult, DEFAULT_METHOD};

// =============================================================================
// GET / - Health check
// =============================================================================

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

// =============================================================================
// POST / - Poll the requested (or default) endpoint
// =============================================================================

pub async fn poll(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<PollResult>)> {
    let body = body.map_err(|e| {
        tracing::warn!("Failed to read request body: {}", e);
        ApiError::BodyRead
    })?;

    let request = resolve_poll_request(&body, &state.config.api_endpoint)?;
    let result = state.poller.poll(&request).await;

    let status = if result.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok((status, Json(result)))
}

// =============================================================================
// Anything else
// =============================================================================

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Turn a raw POST body into the request to poll.
///
/// An empty body polls `default_endpoint` with GET. Top-level keys match
/// case-insensitively and a repeated key keeps its last value; a `null` body
/// is an all-empty request.
pub fn resolve_poll_request(body: &[u8], default_endpoint: &str) -> Result<PollRequest> {
    if body.is_empty() {
        return Ok(PollRequest::get(default_endpoint));
    }

    let input: Value = serde_json::from_slice(body).map_err(invalid_json)?;

    let mut request = match input {
        Value::Null => PollRequest::default(),
        Value::Object(fields) => {
            let fields: Map<String, Value> = fields
                .into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect();
            serde_json::from_value(Value::Object(fields)).map_err(invalid_json)?
        }
        _ => {
            return Err(invalid_json(serde_json::Error::custom(
                "poll input must be a JSON object",
            )))
        }
    };

    if request.method.is_empty() {
        request.method = DEFAULT_METHOD.to_string();
    }

    Ok(request)
}

fn invalid_json(e: serde_json::Error) -> ApiError {
    tracing::debug!("Rejecting poll input: {}", e);
    ApiError::InvalidJson(e)
}
