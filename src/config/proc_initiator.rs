use crate::config::settings::{LogFormat, LoggingConfig, ServiceConfig};

const REGION_ENV_VARS: [&str; 2] = ["AWS_REGION", "AWS_DEFAULT_REGION"];

pub fn initiate_default_values(mut config: ServiceConfig) -> ServiceConfig {
    config.cluster.name = config.cluster.name.trim().to_owned();

    // region: explicit value, then environment
    config.cluster.region = config
        .cluster
        .region
        .take()
        .filter(|region| !region.trim().is_empty())
        .or_else(region_from_env);

    if config.settings.logging.is_none() {
        config.settings.logging = Some(LoggingConfig::new("info".to_owned(), LogFormat::from_env()));
    }

    config
}

fn region_from_env() -> Option<String> {
    REGION_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
