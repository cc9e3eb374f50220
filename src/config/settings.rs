use std::time::Duration;

use serde::Deserialize;

use crate::cache::timings::TokenTimings;
use crate::cache::token::IdentityParams;
use crate::utils::constants::{
    DEFAULT_GENERATION_TIMEOUT_MS, DEFAULT_REFRESH_BUFFER_SECS, DEFAULT_TOKEN_VALIDITY_SECS,
    DEFAULT_URL_VALIDITY_SECS,
};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

impl ServiceConfig {
    /// Identity to prove; region is empty until defaults have been applied.
    pub fn identity_params(&self) -> IdentityParams {
        IdentityParams::new(
            self.cluster.name.to_owned(),
            self.cluster.region.to_owned().unwrap_or_default(),
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClusterConfig {
    pub name: String,
    /// falls back to AWS_REGION / AWS_DEFAULT_REGION
    pub region: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AwsConfig {
    pub profile: Option<String>,
    /// overrides https://sts.<region>.amazonaws.com
    pub sts_endpoint: Option<String>,
}

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    #[serde(default = "default_token_validity_seconds")]
    pub token_validity_seconds: u64,
    #[serde(default = "default_refresh_buffer_seconds")]
    pub refresh_buffer_seconds: u64,
    /// how long STS accepts the presigned URL, independent of token validity
    #[serde(default = "default_url_validity_seconds")]
    pub url_validity_seconds: u64,
    #[serde(default = "default_generation_timeout_ms")]
    pub generation_timeout_ms: u64,
    pub logging: Option<LoggingConfig>,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            token_validity_seconds: DEFAULT_TOKEN_VALIDITY_SECS,
            refresh_buffer_seconds: DEFAULT_REFRESH_BUFFER_SECS,
            url_validity_seconds: DEFAULT_URL_VALIDITY_SECS,
            generation_timeout_ms: DEFAULT_GENERATION_TIMEOUT_MS,
            logging: None,
        }
    }
}

impl SettingsConfig {
    pub fn timings(&self) -> TokenTimings {
        TokenTimings {
            token_validity: Duration::from_secs(self.token_validity_seconds),
            refresh_buffer: Duration::from_secs(self.refresh_buffer_seconds),
            url_validity: Duration::from_secs(self.url_validity_seconds),
            generation_timeout: Duration::from_millis(self.generation_timeout_ms),
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new (level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "compact".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

fn default_token_validity_seconds() -> u64 {
    DEFAULT_TOKEN_VALIDITY_SECS
}

fn default_refresh_buffer_seconds() -> u64 {
    DEFAULT_REFRESH_BUFFER_SECS
}

fn default_url_validity_seconds() -> u64 {
    DEFAULT_URL_VALIDITY_SECS
}

fn default_generation_timeout_ms() -> u64 {
    DEFAULT_GENERATION_TIMEOUT_MS
}
