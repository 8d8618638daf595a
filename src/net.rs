//! Shared request execution and error classification.
//!
//! Every screen talks to its backend through one contract: issue a request,
//! reduce whatever comes back (transport failure, error status, JSON body,
//! plain-text body) into a single `NetworkResult`. Screens never see a raw
//! `reqwest` error and never special-case response shapes.
//!
//! The reduction itself (`classify_response`) is a pure function over a
//! captured [`RawResponse`], so the whole contract is testable without a
//! socket; [`ApiClient`] is the thin transport that feeds it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use reqwest::Method;

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Failure classes surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Transport-level failure: the server was never reached.
    Connectivity,
    /// 401: credentials rejected or session not accepted.
    Unauthorized,
    /// 404: the resource does not exist (screens may remap this).
    NotFound,
    /// 400: the server rejected the request shape.
    BadRequest,
    /// Any 5xx.
    ServerError,
    /// Anything that fits no other bucket.
    Unknown,
}

impl ErrorCategory {
    /// Bucket a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Fixed fallback message used when the response body offers nothing.
    fn fallback_message(self, status: u16) -> String {
        match self {
            Self::Connectivity => "Cannot connect to server".to_string(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::NotFound => "Not found".to_string(),
            Self::BadRequest => "Bad request".to_string(),
            Self::ServerError => "Server error".to_string(),
            Self::Unknown => format!("Unexpected error (status {status})"),
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connectivity => write!(f, "connectivity"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::NotFound => write!(f, "not_found"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::ServerError => write!(f, "server_error"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A categorized request failure with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub category: ErrorCategory,
    pub message: String,
}

impl ApiError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// The server was never reached.
    pub fn connectivity() -> Self {
        Self::new(
            ErrorCategory::Connectivity,
            ErrorCategory::Connectivity.fallback_message(0),
        )
    }

    pub fn is(&self, category: ErrorCategory) -> bool {
        self.category == category
    }
}

/// Outcome of one classified request. Exactly one value per call;
/// the classifier never panics past its boundary.
pub type NetworkResult<T> = Result<T, ApiError>;

// ═══════════════════════════════════════════════════════════
// Classification: pure reduction over a captured response
// ═══════════════════════════════════════════════════════════

/// An HTTP response captured before classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("json"))
    }
}

/// Reduce a captured response into a normalized result.
///
/// Non-success statuses become an [`ApiError`] whose message is taken from
/// the JSON body's `message` field when present, the plain-text body when
/// non-empty, or a fixed per-status fallback. Success bodies decode as JSON
/// when the content type says so; anything else is wrapped losslessly as
/// `{"message": <text>}` so callers never branch on the body shape.
pub fn classify_response(resp: &RawResponse) -> NetworkResult<Value> {
    if !resp.is_success() {
        let category = ErrorCategory::from_status(resp.status);
        let message = error_message(resp, category);
        tracing::debug!(status = resp.status, %category, "request failed");
        return Err(ApiError::new(category, message));
    }

    if resp.is_json() {
        return serde_json::from_str(&resp.body).map_err(|e| {
            tracing::warn!(error = %e, "undecodable JSON on success status");
            ApiError::new(ErrorCategory::Unknown, "Invalid JSON response from server")
        });
    }

    Ok(serde_json::json!({ "message": resp.body }))
}

/// Best available message for a non-success response.
fn error_message(resp: &RawResponse, category: ErrorCategory) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(&resp.body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            if !message.is_empty() {
                return message.to_string();
            }
        }
    }
    if !resp.body.trim().is_empty() && serde_json::from_str::<Value>(&resp.body).is_err() {
        return resp.body.trim().to_string();
    }
    category.fallback_message(resp.status)
}

/// Decode a classified success value into a typed record.
pub fn decode<T: DeserializeOwned>(value: Value) -> NetworkResult<T> {
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(error = %e, "response shape mismatch");
        ApiError::new(
            ErrorCategory::Unknown,
            format!("Unexpected response shape: {e}"),
        )
    })
}

// ═══════════════════════════════════════════════════════════
// ApiClient: transport
// ═══════════════════════════════════════════════════════════

/// HTTP client shared by every screen.
///
/// Carries no per-request timeout: retries are user-triggered and an
/// unanswered request leaves the calling screen loading until the user acts.
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");
        Self { http }
    }

    /// Execute one request and classify its outcome.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> NetworkResult<Value> {
        tracing::debug!(%method, url, "issuing request");

        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                ApiError::connectivity()
            } else {
                ApiError::new(ErrorCategory::Connectivity, e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.unwrap_or_default();

        classify_response(&RawResponse {
            status,
            content_type,
            body,
        })
    }

    /// GET a typed record.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> NetworkResult<T> {
        decode(self.request(Method::GET, url, None).await?)
    }

    /// POST a JSON body, decoding a typed response.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &Value,
    ) -> NetworkResult<T> {
        decode(self.request(Method::POST, url, Some(body)).await?)
    }

    /// PUT a JSON body, decoding a typed response.
    pub async fn put_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &Value,
    ) -> NetworkResult<T> {
        decode(self.request(Method::PUT, url, Some(body)).await?)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
