//! HTTP client wrapper for the CareSync backend.
//!
//! Configures a `reqwest` client with the fixed base URL, timeout and
//! default headers, injects the stored bearer token, appends a
//! cache-busting query parameter to every request, and centralizes
//! status-code handling (401 forces logout, 422 surfaces validation
//! messages). Exposes verb-shaped helpers returning parsed JSON bodies.

use crate::api::config::{ApiConfig, API_VERSION};
use crate::api::error::ApiError;
use crate::api::token::TokenStore;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, instrument, warn};

/// HTTP client for the CareSync backend API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    /// Creates a client from configuration.
    ///
    /// The token store is file-backed when the config names a token path,
    /// in-memory otherwise.
    pub fn new(config: &ApiConfig) -> Self {
        let tokens = match &config.token_path {
            Some(path) => TokenStore::from_file(path),
            None => TokenStore::in_memory(),
        };
        Self::with_token_store(config, Arc::new(tokens))
    }

    /// Creates a client sharing an existing token store.
    pub fn with_token_store(config: &ApiConfig, tokens: Arc<TokenStore>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("X-API-Version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.base_url.clone(),
            tokens,
        }
    }

    /// Returns the shared token store.
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Clears stored credentials.
    pub fn logout(&self) {
        self.tokens.clear();
    }

    /// Builds the full request URL with the cache-busting parameter.
    fn url(&self, path: &str) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let sep = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}_t={}", self.base_url, path, sep, millis)
    }

    /// GET request returning the parsed body.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<T>(Method::GET, path, None).await
    }

    /// POST request with a JSON body, returning the parsed body.
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Unserializable request body: {e}")))?;
        self.send::<T>(Method::POST, path, Some(body)).await
    }

    /// PUT request with a JSON body, returning the parsed body.
    #[instrument(skip(self, body))]
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Unserializable request body: {e}")))?;
        self.send::<T>(Method::PUT, path, Some(body)).await
    }

    /// PATCH request with a JSON body, returning the parsed body.
    #[instrument(skip(self, body))]
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Unserializable request body: {e}")))?;
        self.send::<T>(Method::PATCH, path, Some(body)).await
    }

    /// DELETE request returning the parsed body.
    #[instrument(skip(self))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<T>(Method::DELETE, path, None).await
    }

    /// Checks whether the backend is reachable and healthy.
    ///
    /// Never returns an error; any failure reads as "unhealthy".
    pub async fn health_check(&self) -> bool {
        match self.get::<Value>("/health").await {
            Ok(_) => true,
            Err(e) => {
                error!("API health check failed: {e}");
                false
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("API request: {method} {url}");

        let mut request = self.client.request(method, &url);
        if let Some(token) = self.tokens.get() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(classify_transport_error)?;
        self.handle_response::<T>(response).await
    }

    /// Centralized status-code handling.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            debug!("API response: {status}");
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse body: {e}")));
        }

        // Error bodies are JSON when the server produced them, but may be
        // anything when a proxy answered instead.
        let body: Value = response.json().await.unwrap_or(Value::Null);

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("API returned 401, clearing stored credentials");
                self.tokens.clear();
                Err(ApiError::SessionExpired)
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                let errors = extract_validation_errors(&body);
                for err in &errors {
                    error!("Validation error from server: {err}");
                }
                Err(ApiError::Validation(errors))
            }
            _ => {
                let message = body
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                error!("API error: {} {}", status.as_u16(), message);
                Err(ApiError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

/// Maps a reqwest transport error into the timeout/network taxonomy.
fn classify_transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_connect() || e.is_request() {
        ApiError::Network
    } else {
        ApiError::Http(e)
    }
}

/// Pulls validation messages out of a 422 body.
///
/// The backend sends either `{"errors": ["..."]}` or `{"error": "..."}`.
fn extract_validation_errors(body: &Value) -> Vec<String> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        let messages: Vec<String> = errors
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        if !messages.is_empty() {
            return messages;
        }
    }
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return vec![error.to_string()];
    }
    vec!["Validation failed.".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_cache_busting() {
        let client = ApiClient::new(&ApiConfig::with_base_url("http://localhost:9/api"));

        let url = client.url("/topics");
        assert!(url.starts_with("http://localhost:9/api/topics?_t="));

        let url = client.url("/topics?limit=5");
        assert!(url.starts_with("http://localhost:9/api/topics?limit=5&_t="));
    }

    #[test]
    fn test_extract_validation_errors_array() {
        let body = serde_json::json!({"errors": ["title required", "content required"]});
        assert_eq!(
            extract_validation_errors(&body),
            vec!["title required", "content required"]
        );
    }

    #[test]
    fn test_extract_validation_errors_single() {
        let body = serde_json::json!({"error": "bad tags"});
        assert_eq!(extract_validation_errors(&body), vec!["bad tags"]);
    }

    #[test]
    fn test_extract_validation_errors_fallback() {
        assert_eq!(
            extract_validation_errors(&Value::Null),
            vec!["Validation failed."]
        );
    }
}
