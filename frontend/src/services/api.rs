use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{Category, CreateRecordPayload, CreateRecordRequest, CreatedRecord, PaginatedResponse};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

use crate::services::config::ApiConfig;
use crate::services::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

/// Normalized error surfaced by every API call
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("{message}")]
    Http { message: String, status: u16 },
    /// The server could not be reached
    #[error("Network error: Unable to connect to the server")]
    Network,
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// HTTP status carried by the error; `Some(0)` for transport-level failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network | ApiError::Timeout { .. } => Some(0),
            ApiError::Unexpected(_) => None,
        }
    }

    /// User-facing message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Per-request options merged over the client defaults
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post<B: Serialize>(body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Unexpected(format!("Failed to serialize request: {}", e)))?;
        Ok(Self {
            method: Method::POST,
            headers: HeaderMap::new(),
            body: Some(body),
        })
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// API client for communicating with the backend server
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout_ms: u64,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    /// Create an API client backed by `reqwest`, enforcing the configured timeout
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(Duration::from_millis(config.timeout_ms))
            .map_err(|e| ApiError::Unexpected(e.to_string()))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create an API client over an arbitrary transport
    pub fn with_transport(config: &ApiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout_ms: config.timeout_ms,
            transport,
        }
    }

    /// Send a request to `base_url + endpoint` and decode the JSON answer.
    ///
    /// Non-JSON success bodies decode to `T::default()`.
    pub async fn request<T>(&self, endpoint: &str, options: RequestOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let request = HttpRequest {
            method: options.method,
            url,
            headers: merge_headers(options.headers),
            body: options.body.map(|body| body.to_string()),
        };

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status.is_success() {
            return Err(ApiError::Http {
                message: extract_error_message(&response),
                status: response.status.as_u16(),
            });
        }

        if response.is_json() {
            serde_json::from_slice(&response.body)
                .map_err(|e| ApiError::Unexpected(format!("Failed to parse response: {}", e)))
        } else {
            Ok(T::default())
        }
    }

    /// Get all categories, unwrapping the paginated envelope
    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        match self
            .request::<PaginatedResponse<Category>>("/categories/", RequestOptions::get())
            .await
        {
            Ok(envelope) => Ok(envelope.results),
            Err(e) => {
                error!("Error fetching categories: {}", e);
                Err(e)
            }
        }
    }

    /// Create a record; the fixed `source` field is always injected
    pub async fn create_record(&self, payload: CreateRecordPayload) -> Result<CreatedRecord, ApiError> {
        let body = CreateRecordRequest::from(payload);
        let options = RequestOptions::post(&body)?;

        match self.request::<CreatedRecord>("/records/", options).await {
            Ok(created) => {
                info!("Record created: {:?}", created.id);
                Ok(created)
            }
            Err(e) => {
                error!("Error creating record: {}", e);
                Err(e)
            }
        }
    }

    fn map_transport_error(&self, error: TransportError) -> ApiError {
        match error {
            TransportError::Connect(detail) => {
                error!("Connection failed: {}", detail);
                ApiError::Network
            }
            TransportError::Timeout => ApiError::Timeout {
                timeout_ms: self.timeout_ms,
            },
            TransportError::Other(detail) => ApiError::Unexpected(detail),
        }
    }
}

/// Default JSON content type, overridden by same-named caller headers
fn merge_headers(overrides: HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in &overrides {
        headers.insert(name.clone(), value.clone());
    }
    headers
}

fn extract_error_message(response: &HttpResponse) -> String {
    let fallback = format!("HTTP error! status: {}", response.status.as_u16());

    match serde_json::from_slice::<serde_json::Value>(&response.body) {
        Ok(body) => ["message", "error"]
            .iter()
            .filter_map(|field| body.get(*field).and_then(|v| v.as_str()))
            .find(|text| !text.is_empty())
            .map(str::to_string)
            .unwrap_or(fallback),
        Err(_) => response
            .status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or(fallback),
    }
}
