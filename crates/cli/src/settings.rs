//! Process configuration, read once from the environment at startup.

use std::path::PathBuf;

use codacy::{CodacyConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use pipeline::{GitProvider, OrganizationName, SecurityExportError};
use thiserror::Error;

pub const API_TOKEN_VAR: &str = "CODACY_API_TOKEN";
pub const GIT_PROVIDER_VAR: &str = "GIT_PROVIDER";
pub const ORGANIZATION_VAR: &str = "CODACY_ORGANIZATION_NAME";
pub const BASE_URL_VAR: &str = "CODACY_API_BASE_URL";
pub const OUTPUT_FILE_VAR: &str = "CODACY_OUTPUT_FILE";
pub const PAGE_SIZE_VAR: &str = "CODACY_PAGE_SIZE";
pub const LOG_FORMAT_VAR: &str = "CODACY_LOG_FORMAT";
pub const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

pub const DEFAULT_OUTPUT_FILE: &str = "codacy_security_issues.csv";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value '{value}' for {variable}: {message}")]
    Invalid {
        variable: &'static str,
        value: String,
        message: String,
    },
}

impl From<SettingsError> for SecurityExportError {
    fn from(err: SettingsError) -> Self {
        SecurityExportError::Configuration {
            message: err.to_string(),
        }
    }
}

/// Maps an adapter construction error onto the top-level configuration error.
pub fn configuration_error(err: ConfigError) -> SecurityExportError {
    SecurityExportError::Configuration {
        message: err.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Everything the binary needs, validated.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_token: String,
    pub git_provider: GitProvider,
    pub organization: OrganizationName,
    pub base_url: String,
    pub output_file: PathBuf,
    pub page_size: u32,
    pub log_format: LogFormat,
    pub otlp_endpoint: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_token = get(API_TOKEN_VAR);
        let git_provider = get(GIT_PROVIDER_VAR).and_then(GitProvider::new);
        let organization = get(ORGANIZATION_VAR).and_then(OrganizationName::new);

        let (Some(api_token), Some(git_provider), Some(organization)) =
            (api_token.clone(), git_provider.clone(), organization.clone())
        else {
            let missing = [
                (API_TOKEN_VAR, api_token.is_none()),
                (GIT_PROVIDER_VAR, git_provider.is_none()),
                (ORGANIZATION_VAR, organization.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, is_missing)| is_missing.then_some(name))
            .collect();
            return Err(SettingsError::Missing(missing));
        };

        let page_size = match get(PAGE_SIZE_VAR) {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(SettingsError::Invalid {
                        variable: PAGE_SIZE_VAR,
                        value: raw,
                        message: "expected a positive integer".into(),
                    })
                }
            },
        };

        let log_format = match get(LOG_FORMAT_VAR).as_deref().map(str::trim) {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(SettingsError::Invalid {
                    variable: LOG_FORMAT_VAR,
                    value: other.to_string(),
                    message: "expected 'text' or 'json'".into(),
                })
            }
        };

        Ok(Self {
            api_token,
            git_provider,
            organization,
            base_url: get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            output_file: get(OUTPUT_FILE_VAR)
                .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string())
                .into(),
            page_size,
            log_format,
            otlp_endpoint: get(OTLP_ENDPOINT_VAR),
        })
    }

    /// The API client configuration derived from these settings.
    pub fn codacy_config(&self) -> Result<CodacyConfig, ConfigError> {
        CodacyConfig::new(
            self.api_token.clone(),
            self.git_provider.clone(),
            self.organization.clone(),
        )
        .with_base_url(&self.base_url)?
        .with_page_size(self.page_size)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_token", &"[REDACTED]")
            .field("git_provider", &self.git_provider)
            .field("organization", &self.organization)
            .field("base_url", &self.base_url)
            .field("output_file", &self.output_file)
            .field("page_size", &self.page_size)
            .field("log_format", &self.log_format)
            .field("otlp_endpoint", &self.otlp_endpoint)
            .finish()
    }
}
