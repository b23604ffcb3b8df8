//! Connection settings for the Codacy API.

use pipeline::{GitProvider, OrganizationName};
use reqwest::Url;
use thiserror::Error;

/// Base URL of the public Codacy v3 API.
pub const DEFAULT_BASE_URL: &str = "https://app.codacy.com/api/v3";

/// Items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Errors raised while building a client from its configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid API base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("API token contains characters that are not valid in an HTTP header")]
    InvalidToken,

    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    #[error("Could not build HTTP client: {message}")]
    Client { message: String },
}

/// Everything the client needs to talk to one organization.
#[derive(Clone)]
pub struct CodacyConfig {
    pub(crate) base_url: Url,
    pub(crate) api_token: String,
    pub(crate) git_provider: GitProvider,
    pub(crate) organization: OrganizationName,
    pub(crate) page_size: u32,
}

impl CodacyConfig {
    /// Creates a configuration against [`DEFAULT_BASE_URL`] with
    /// [`DEFAULT_PAGE_SIZE`].
    pub fn new(
        api_token: impl Into<String>,
        git_provider: GitProvider,
        organization: OrganizationName,
    ) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            api_token: api_token.into(),
            git_provider,
            organization,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Points the client at a different API root (e.g. a self-hosted
    /// installation or a test server).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: "URL cannot have path segments appended".into(),
            });
        }
        self.base_url = url;
        Ok(self)
    }

    pub fn with_page_size(mut self, page_size: u32) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        self.page_size = page_size;
        Ok(self)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Builds an absolute endpoint URL by appending percent-encoded path
    /// segments to the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }
}

impl std::fmt::Debug for CodacyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodacyConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"[REDACTED]")
            .field("git_provider", &self.git_provider)
            .field("organization", &self.organization)
            .field("page_size", &self.page_size)
            .finish()
    }
}
