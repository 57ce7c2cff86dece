//! Shared HTTP plumbing for the backend API adapters.
//!
//! Every adapter in this module talks to the same REST backend through one
//! `BackendClient`: it owns the base URL and the pooled `reqwest::Client`,
//! attaches the session token as a bearer credential and turns non-success
//! statuses into `CollaboratorError`s.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::foundation::SessionToken;
use crate::ports::CollaboratorError;

/// Connection settings for the backend API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendClientConfig {
    /// Base URL, e.g. `http://localhost:8000`. A trailing slash is ignored.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl BackendClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Thin wrapper around `reqwest::Client` bound to one backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: Client,
}

/// `{"detail": ...}` error body. `detail` is a string for handled errors
/// and a list of objects for request validation failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl BackendClient {
    pub fn new(config: BackendClientConfig) -> Result<Self, CollaboratorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CollaboratorError::transport(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts an authenticated request against `path` (which begins with `/`).
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        token: &SessionToken,
    ) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url).bearer_auth(token.expose())
    }

    /// Sends the request and fails on any non-success status.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<Response, CollaboratorError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CollaboratorError::transport(format!("request timed out: {}", e))
            } else {
                CollaboratorError::transport(e.to_string())
            }
        })?;
        Self::check_status(response).await
    }

    /// Sends the request and decodes a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, CollaboratorError> {
        let response = self.send(request).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| CollaboratorError::transport(format!("failed to read response: {}", e)))?;
        serde_json::from_slice(&body)
            .map_err(|e| CollaboratorError::malformed(format!("failed to parse response: {}", e)))
    }

    async fn check_status(response: Response) -> Result<Response, CollaboratorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(CollaboratorError::Unauthorized)
            }
            StatusCode::NOT_FOUND => Err(CollaboratorError::NotFound(if detail.is_empty() {
                "resource not found".to_string()
            } else {
                detail
            })),
            _ => Err(CollaboratorError::rejected(status.as_u16(), detail)),
        }
    }
}

/// Best-effort human readable message from an error body.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(message),
        }) => message,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client =
            BackendClient::new(BackendClientConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn string_detail_is_used_verbatim() {
        assert_eq!(error_detail(r#"{"detail":"Project not found"}"#), "Project not found");
    }

    #[test]
    fn structured_detail_is_serialized() {
        let detail = error_detail(r#"{"detail":[{"loc":["body","topic"]}]}"#);
        assert!(detail.contains("topic"));
    }

    #[test]
    fn non_json_body_is_trimmed_text() {
        assert_eq!(error_detail("  upstream down \n"), "upstream down");
        assert_eq!(error_detail(""), "");
    }
}
