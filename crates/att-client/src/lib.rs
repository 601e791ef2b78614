//! REST client for the attendance backend.
//!
//! The engine itself performs no I/O; this crate is its only window onto
//! the dashboard backend. Four endpoints are consumed:
//! - `GET  /attendance/status` — current clock state
//! - `GET  /attendance/events/day` — today's clock events
//! - `GET  /attendance/events` — full event history
//! - `POST /attendance/clock` — record an IN/OUT punch
//!
//! A failed request leaves no partial state anywhere; callers retry the
//! read or resubmit the mutation.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use att_core::{ClockEvent, ClockKind};

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Attendance API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL was unusable.
    #[error("invalid base URL: {reason}")]
    InvalidBaseUrl { reason: &'static str },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed in transit.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The backend returned an error payload.
    #[error("API error: {message}")]
    Api { message: String },
    /// The backend returned a body this client cannot parse.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Attendance backend client.
///
/// # Thread Safety
///
/// Safe to clone and share across tasks; clones share the underlying HTTP
/// connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

/// `GET /attendance/status` and `POST /attendance/clock` response payload.
#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: ClockKind,
}

/// `POST /attendance/clock` request payload.
#[derive(Debug, Serialize)]
struct ClockRequest {
    #[serde(rename = "type")]
    kind: ClockKind,
}

/// Error payload shape returned by the backend on failures.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

impl Client {
    /// Creates a new client for `base_url`, with an optional bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client fails
    /// to build.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(ApiError::InvalidBaseUrl {
                reason: "base URL cannot be empty",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Current clock state for the authenticated user.
    pub async fn status(&self) -> Result<ClockKind, ApiError> {
        let body = self.get("/attendance/status").await?;
        let payload: StatusResponse = parse_body(&body)?;
        Ok(payload.status)
    }

    /// Clock events for the current calendar day only.
    pub async fn day_events(&self) -> Result<Vec<ClockEvent>, ApiError> {
        let body = self.get("/attendance/events/day").await?;
        parse_body(&body)
    }

    /// Full clock event history for the authenticated user.
    pub async fn events(&self) -> Result<Vec<ClockEvent>, ApiError> {
        let body = self.get("/attendance/events").await?;
        parse_body(&body)
    }

    /// Records an IN/OUT punch. Returns the new clock state on success;
    /// on failure the backend's human-readable message is surfaced as
    /// [`ApiError::Api`] and no partial state exists anywhere.
    pub async fn clock(&self, kind: ClockKind) -> Result<ClockKind, ApiError> {
        let mut request = self
            .http
            .post(format!("{}/attendance/clock", self.base_url))
            .json(&ClockRequest { kind });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_api_error(&body).unwrap_or_else(|| ApiError::Api {
                message: format!("status {status}: {body}"),
            }));
        }

        let payload: StatusResponse = parse_body(&body)?;
        Ok(payload.status)
    }

    async fn get(&self, path: &str) -> Result<String, ApiError> {
        let mut request = self.http.get(format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_api_error(&body).unwrap_or_else(|| ApiError::Api {
                message: format!("status {status}: {body}"),
            }));
        }
        Ok(body)
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

/// Extracts the backend's `{ "message": ... }` error payload, if present.
fn parse_api_error(body: &str) -> Option<ApiError> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|payload| ApiError::Api {
            message: payload.message,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn rejects_empty_base_url() {
        assert!(matches!(
            Client::new("", None),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
        assert!(Client::new("http://localhost:8080", None).is_ok());
    }

    #[test]
    fn debug_redacts_the_token() {
        let client = Client::new("http://localhost", Some("secret".to_string())).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[tokio::test]
    async fn status_parses_the_clock_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/attendance/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "IN"})))
            .mount(&server)
            .await;

        let client = Client::new(server.uri(), None).unwrap();
        assert_eq!(client.status().await.unwrap(), ClockKind::In);
    }

    #[tokio::test]
    async fn events_deserialize_the_wire_format() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/attendance/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "evt-1",
                    "userId": "user-7",
                    "type": "IN",
                    "timestamp": "2025-06-02T09:00:00Z"
                },
                {
                    "id": "evt-2",
                    "userId": "user-7",
                    "type": "OUT",
                    "timestamp": "2025-06-02T12:00:00Z"
                }
            ])))
            .mount(&server)
            .await;

        let client = Client::new(server.uri(), None).unwrap();
        let events = client.events().await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, ClockKind::In);
        assert_eq!(
            events[1].timestamp,
            Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn day_events_hit_the_day_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/attendance/events/day"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = Client::new(server.uri(), None).unwrap();
        assert!(client.day_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clock_posts_the_direction_and_returns_new_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/attendance/clock"))
            .and(body_json(json!({"type": "IN"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "IN"})))
            .mount(&server)
            .await;

        let client = Client::new(server.uri(), None).unwrap();
        assert_eq!(client.clock(ClockKind::In).await.unwrap(), ClockKind::In);
    }

    #[tokio::test]
    async fn clock_failure_surfaces_the_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/attendance/clock"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({"message": "already clocked in"})),
            )
            .mount(&server)
            .await;

        let client = Client::new(server.uri(), None).unwrap();
        let err = client.clock(ClockKind::In).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Api { ref message } if message == "already clocked in"
        ));
    }

    #[tokio::test]
    async fn non_json_error_body_still_reports_the_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/attendance/status"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = Client::new(server.uri(), None).unwrap();
        let err = client.status().await.unwrap_err();
        assert!(matches!(err, ApiError::Api { ref message } if message.contains("500")));
    }

    #[tokio::test]
    async fn bearer_token_is_sent_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/attendance/status"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OUT"})))
            .mount(&server)
            .await;

        let client = Client::new(server.uri(), Some("secret".to_string())).unwrap();
        assert_eq!(client.status().await.unwrap(), ClockKind::Out);
    }

    #[tokio::test]
    async fn malformed_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/attendance/status"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = Client::new(server.uri(), None).unwrap();
        assert!(matches!(
            client.status().await.unwrap_err(),
            ApiError::InvalidResponse(_)
        ));
    }
}
