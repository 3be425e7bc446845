use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const DEFAULT_METHOD: &str = "GET";

// =============================================================================
// POLL REQUEST
// =============================================================================

/// Target of a single poll, taken from the POST body or the configured default
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PollRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,
}

impl PollRequest {
    /// Plain GET against `url`, no extra headers
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: DEFAULT_METHOD.to_string(),
            headers: HashMap::new(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// POLL RESULT
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollResult {
    pub success: bool,
    /// 0 when no upstream response was received
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub poll_time: DateTime<Utc>,
    pub duration: String,
}

impl PollResult {
    pub fn started(poll_time: DateTime<Utc>) -> Self {
        Self {
            success: false,
            status_code: 0,
            response_body: None,
            error: None,
            poll_time,
            duration: String::new(),
        }
    }

    /// True when nothing went wrong at any stage of the poll
    pub fn is_ok(&self) -> bool {
        self.success && self.error.is_none()
    }
}

// =============================================================================
// UPSTREAM SHAPE
// =============================================================================

/// Conventional shape of a status API response.
///
/// Polls never validate against this; it is provided for callers that want
/// to read a `response_body` from an upstream following the convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl ApiResponse {
    pub fn from_body(body: &Map<String, Value>) -> Option<Self> {
        serde_json::from_value(Value::Object(body.clone())).ok()
    }
}

// =============================================================================
// SIMPLE RESPONSES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
