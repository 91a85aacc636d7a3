//! Request gateway for the mentorship REST API.
//!
//! One [`ApiClient`] carries the base URL and the bearer token for the
//! signed-in user. Every call goes through the injected [`HttpClient`], so
//! tests swap in a mock and production uses reqwest. There is no retry,
//! backoff or request de-duplication here; callers see each failure once.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::traits::{Headers, HttpClient, Response};

/// Default base URL of the API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Characters of an undecodable body kept in the error message.
const DECODE_PREVIEW_CHARS: usize = 200;

/// Body of the many endpoints that only answer with an optional message.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the mentorship API.
#[derive(Clone)]
pub struct ApiClient {
    /// Base URL, without a trailing slash
    pub base_url: String,
    http: Arc<dyn HttpClient>,
    /// Optional authentication token for Bearer auth
    auth_token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.auth_token.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a client for the default base URL.
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Create a client for a custom base URL.
    pub fn with_base_url(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            auth_token: None,
        }
    }

    /// Set the authentication token for Bearer auth.
    pub fn with_auth(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    /// Set or clear the authentication token on an existing client.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Full URL for an API path such as `/admin/users`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self, with_body: bool) -> Headers {
        let mut headers = Headers::new();
        if with_body {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(ref token) = self.auth_token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(method = "GET", %url, "API request");
        let response = self.http.get(&url, &self.headers(false)).await?;
        decode(check(response)?)
    }

    /// GET a JSON array; a `null` or empty body reads as an empty list.
    pub(crate) async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let url = self.url(path);
        tracing::debug!(method = "GET", %url, "API request");
        let response = check(self.http.get(&url, &self.headers(false)).await?)?;
        if is_blank(&response) {
            return Ok(Vec::new());
        }
        let list: Option<Vec<T>> = decode(response)?;
        Ok(list.unwrap_or_default())
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send_post(path, body).await?;
        decode(response)
    }

    /// POST and return the server's `message`, if it sent one.
    pub(crate) async fn post_for_message<B>(&self, path: &str, body: &B) -> Result<Option<String>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send_post(path, body).await?;
        Ok(message_of(&response))
    }

    pub(crate) async fn put_for_message<B>(&self, path: &str, body: &B) -> Result<Option<String>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let body = encode(body)?;
        tracing::debug!(method = "PUT", %url, "API request");
        let response = check(self.http.put(&url, &body, &self.headers(true)).await?)?;
        Ok(message_of(&response))
    }

    pub(crate) async fn delete_for_message(&self, path: &str) -> Result<Option<String>, ApiError> {
        let url = self.url(path);
        tracing::debug!(method = "DELETE", %url, "API request");
        let response = check(self.http.delete(&url, &self.headers(false)).await?)?;
        Ok(message_of(&response))
    }

    async fn send_post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let url = self.url(path);
        let body = encode(body)?;
        tracing::debug!(method = "POST", %url, "API request");
        check(self.http.post(&url, &body, &self.headers(true)).await?)
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Decode {
        message: format!("Failed to encode request body: {}", e),
    })
}

/// Turn a non-2xx response into [`ApiError::Server`].
fn check(response: Response) -> Result<Response, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    let message = error_message(&response.body);
    tracing::warn!(
        status = response.status,
        message = message.as_deref().unwrap_or(""),
        "API request failed"
    );
    Err(ApiError::Server {
        status: response.status,
        message,
    })
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json().map_err(|e| {
        let preview: String = String::from_utf8_lossy(&response.body)
            .chars()
            .take(DECODE_PREVIEW_CHARS)
            .collect();
        ApiError::Decode {
            message: format!("{}. Response: {}", e, preview),
        }
    })
}

fn is_blank(response: &Response) -> bool {
    response.body.iter().all(|b| b.is_ascii_whitespace())
}

fn message_of(response: &Response) -> Option<String> {
    response
        .json::<serde_json::Value>()
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
}

/// The error text of a failed response: `message`, else `error`.
///
/// Non-JSON bodies and non-string fields yield `None`.
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
