//! HTTP transport seam.
//!
//! [`Transport`] is the only place requests leave the process. The
//! [`HttpTransport`] implementation uses `reqwest`; tests substitute a scripted
//! in-memory transport.

use async_trait::async_trait;
use pipeline::TransportError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{CodacyConfig, ConfigError};

/// Header carrying the Codacy account API token.
const API_TOKEN_HEADER: HeaderName = HeaderName::from_static("api-token");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// One outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL without query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Returns the value of query parameter `name`, if present.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A response with a decoded JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request and returns its status and JSON body.
///
/// Implementations report non-2xx statuses as [`TransportError::Status`]
/// with the raw body, and connection failures as
/// [`TransportError::Connection`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

// ---------------------------------------------------------------------------

/// [`Transport`] over `reqwest` with the Codacy authentication headers.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &CodacyConfig) -> Result<Self, ConfigError> {
        let mut token =
            HeaderValue::from_str(&config.api_token).map_err(|_| ConfigError::InvalidToken)?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_TOKEN_HEADER, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(concat!("codacy-security-export/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let ApiRequest {
            method,
            url,
            query,
            body,
        } = request;

        let mut builder = match method {
            Method::Get => self.client.get(url.as_str()),
            Method::Post => self.client.post(url.as_str()),
        }
        .query(&query);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let connection_error = |e: reqwest::Error| TransportError::Connection {
            url: url.clone(),
            message: e.to_string(),
        };

        let response = builder.send().await.map_err(connection_error)?;
        let status = response.status();
        let text = response.text().await.map_err(connection_error)?;
        debug!(status = status.as_u16(), bytes = text.len(), "Response received");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url,
                body: text,
            });
        }

        let body = serde_json::from_str(&text).map_err(|e| TransportError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}
