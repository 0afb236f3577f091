//! Shared HTTP client for the SQL-generation service.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use sqlforge_core::error::SqlForgeError;

/// Timeout for ordinary request/response calls.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for generation calls, which run a model server-side.
pub(crate) const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared transport for all service clients: one connection pool, one
/// base URL, one error-mapping path.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Converts a non-success response into the typed error taxonomy.
    ///
    /// 401 is the sole auth-error signal; 409 marks uniqueness conflicts;
    /// everything else carries the server's detail message verbatim when
    /// one is present.
    pub(crate) async fn error_from(response: Response) -> SqlForgeError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body);
        tracing::debug!("API error ({}): {:?}", status, detail);

        // Fallback wording is context-dependent, so an absent detail is
        // carried as an empty message and filled in by the caller via
        // `SqlForgeError::or_detail`.
        match status {
            StatusCode::UNAUTHORIZED => SqlForgeError::auth(detail.unwrap_or_default()),
            StatusCode::CONFLICT => SqlForgeError::conflict(detail.unwrap_or_default()),
            _ => SqlForgeError::api(detail.unwrap_or_default()),
        }
    }
}

/// Maps a reqwest failure (connect, timeout, body decode) onto the
/// transport variant.
pub(crate) fn transport(err: reqwest::Error) -> SqlForgeError {
    SqlForgeError::transport(err.to_string())
}

/// Extracts the `detail` field from a FastAPI-style error body.
///
/// `detail` is usually a string; validation errors carry a structure,
/// which is flattened to its JSON text so the message is still shown.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}
