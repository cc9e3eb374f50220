//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks the cluster identity and the relationship between the token
//!   and presigned URL clocks

use tracing::error;

use crate::config::settings::{ServiceConfig, SettingsConfig};
use crate::utils::constants::MAX_URL_VALIDITY_SECS;

/// Returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.cluster.name.trim().is_empty() {
        errors.push("cluster.name must not be empty".to_string());
    } else if cfg.cluster.name.chars().any(|c| c.is_control()) {
        errors.push("cluster.name must not contain control characters".to_string());
    }

    match cfg.cluster.region.as_deref() {
        None => errors.push(
            "cluster.region is not set and neither AWS_REGION nor AWS_DEFAULT_REGION is present".to_string(),
        ),
        Some(region) if region.chars().any(|c| !(c.is_ascii_alphanumeric() || c == '-')) => {
            errors.push(format!("cluster.region '{}' is not a valid region name", region))
        }
        Some(_) => {}
    }

    if let Some(endpoint) = cfg.aws.sts_endpoint.as_deref() {
        if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
            errors.push(format!("aws.sts_endpoint '{}' must be an http(s) URL", endpoint));
        }
    }

    validate_settings(&cfg.settings, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        for e in &errors {
            error!("config: {}", e);
        }
        Err(errors)
    }
}

fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.token_validity_seconds == 0 {
        errors.push("settings.token_validity_seconds must be > 0".to_string());
    }
    if settings.refresh_buffer_seconds >= settings.token_validity_seconds {
        errors.push(format!(
            "settings.refresh_buffer_seconds ({}) must be less than settings.token_validity_seconds ({})",
            settings.refresh_buffer_seconds, settings.token_validity_seconds
        ));
    }
    if settings.url_validity_seconds == 0 || settings.url_validity_seconds > MAX_URL_VALIDITY_SECS {
        errors.push(format!(
            "settings.url_validity_seconds ({}) must be within 1..={}",
            settings.url_validity_seconds, MAX_URL_VALIDITY_SECS
        ));
    }
    if settings.generation_timeout_ms == 0 {
        errors.push("settings.generation_timeout_ms must be > 0".to_string());
    }
    if let Some(logging) = &settings.logging {
        let level = logging.level.to_lowercase();
        if !["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) {
            errors.push(format!("settings.logging.level '{}' is not one of trace|debug|info|warn|error", logging.level));
        }
    }
}
