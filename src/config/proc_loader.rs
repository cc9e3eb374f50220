use std::path::Path;

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use tracing::debug;

use crate::config::proc_initiator::initiate_default_values;
use crate::config::proc_validator::validate_service_config;
use crate::config::settings::ServiceConfig;

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    finalize_config(read_config(path).await?)
}

/// Reads and parses a YAML file without applying defaults or validating,
/// so callers can layer overrides on top first.
pub async fn read_config(path: &Path) -> Result<ServiceConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let expanded = expand_env_vars(&content)?;
    serde_yaml::from_str(&expanded).context("parse config error")
}

pub fn parse_config(content: &str) -> Result<ServiceConfig> {
    let expanded = expand_env_vars(content)?;
    let service_config: ServiceConfig = serde_yaml::from_str(&expanded).context("parse config error")?;
    finalize_config(service_config)
}

/// Applies defaults, then validates.
pub fn finalize_config(service_config: ServiceConfig) -> Result<ServiceConfig> {
    let service_config = initiate_default_values(service_config);

    debug!("validation config ...");
    validate_service_config(&service_config)
        .map_err(|errors| anyhow!("config is not valid: {}", errors.join("; ")))?;

    Ok(service_config)
}

/// Replaces `${VAR}` and `${VAR:default}` with environment values.
pub fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    Ok(re
        .replace_all(input, |caps: &regex::Captures| {
            let var = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var).unwrap_or_else(|_| default.to_string())
        })
        .to_string())
}
