use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, Request, Url};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};

use super::error::PollError;
use crate::modules::poller::schema::{PollRequest, PollResult};

/// Total budget for one outbound call, connect through last body byte
pub const POLL_TIMEOUT: Duration = Duration::from_secs(15);

/// Always sent upstream; callers cannot override it
pub const POLLER_USER_AGENT: &str = "OpenFaaS-API-Poller/1.0";

/// Issues exactly one outbound call per poll and describes the outcome.
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Poller {
    client: Client,
    timeout: Duration,
}

impl Poller {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: POLL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Poll `request` once. Never fails: every problem is reported inside the
    /// returned result, and `duration` is filled on every path.
    pub async fn poll(&self, request: &PollRequest) -> PollResult {
        let start = Instant::now();
        let mut result = PollResult::started(Utc::now());

        let outbound = match self.build_request(request) {
            Ok(outbound) => outbound,
            Err(e) => return fail(result, request, e, start),
        };

        let response = match self.client.execute(outbound).await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return fail(result, request, PollError::Timeout(self.timeout), start)
            }
            Err(e) => return fail(result, request, PollError::Request(e), start),
        };

        let status = response.status();
        result.status_code = status.as_u16();
        result.duration = format_duration(start.elapsed());
        // Set before the body is read so a read failure still reports the status.
        result.success = status.is_success();

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let err = PollError::ReadBody(e);
                tracing::warn!(url = %request.url, status = result.status_code, "{}", err);
                result.error = Some(err.to_string());
                return result;
            }
        };

        result.response_body = parse_body(&body);

        if !result.success {
            let err = PollError::UpstreamStatus(result.status_code);
            tracing::warn!(url = %request.url, duration = %result.duration, "{}", err);
            result.error = Some(err.to_string());
            return result;
        }

        tracing::info!(
            url = %request.url,
            method = %request.method,
            status = result.status_code,
            duration = %result.duration,
            "Poll succeeded"
        );

        result
    }

    fn build_request(&self, request: &PollRequest) -> Result<Request, PollError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| PollError::InvalidMethod(request.method.clone()))?;

        let url = Url::parse(&request.url).map_err(|e| PollError::InvalidUrl {
            url: request.url.clone(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderMap::with_capacity(request.headers.len() + 1);
        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| PollError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| PollError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }
        headers.insert(USER_AGENT, HeaderValue::from_static(POLLER_USER_AGENT));

        self.client
            .request(method, url)
            .headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(PollError::Build)
    }
}

fn fail(mut result: PollResult, request: &PollRequest, err: PollError, start: Instant) -> PollResult {
    result.duration = format_duration(start.elapsed());
    tracing::warn!(url = %request.url, method = %request.method, duration = %result.duration, "{}", err);
    result.error = Some(err.to_string());
    result
}

/// JSON objects are kept as-is; anything else is wrapped as `{"raw": text}`.
/// A `null` or `{}` body yields no `response_body` at all.
pub fn parse_body(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Option<Map<String, Value>>>(body) {
        Ok(object) => object.filter(|fields| !fields.is_empty()),
        Err(_) => {
            let mut raw = Map::new();
            raw.insert(
                "raw".to_string(),
                Value::String(String::from_utf8_lossy(body).into_owned()),
            );
            Some(raw)
        }
    }
}

/// e.g. `152.301ms`, `2.5s`
pub fn format_duration(elapsed: Duration) -> String {
    format!("{:?}", elapsed)
}
