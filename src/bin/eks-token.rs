use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eks_token_agent::config::proc_loader::{finalize_config, read_config};
use eks_token_agent::config::settings::{AwsConfig, ClusterConfig, ServiceConfig, SettingsConfig};
use eks_token_agent::signer::{load_sdk_config, StsTokenSigner};
use eks_token_agent::sinks::exec_credential::ExecCredential;
use eks_token_agent::utils::logging::{self, LogLevel};
use eks_token_agent::TokenProvider;
use tracing::info;

/// Prints an ExecCredential for an EKS cluster, for use as a kubeconfig
/// `exec` credential plugin.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "EKS_TOKEN_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "EKS_CLUSTER_NAME")]
    cluster_name: Option<String>,
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,
    #[arg(long, env = "AWS_PROFILE")]
    profile: Option<String>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // -------------------------------
    // 1. Load config, CLI flags win over the file
    // -------------------------------

    let service_config = load_service_config(&args).await?;
    logging::run(Some(&service_config), args.log_level);

    // -------------------------------
    // 2. Resolve the credential source
    // -------------------------------

    let timings = service_config.settings.timings();
    let params = service_config.identity_params();
    let sdk_config = load_sdk_config(Some(params.region.clone()), service_config.aws.profile.clone()).await;
    let mut signer = StsTokenSigner::from_sdk_config(&sdk_config, &timings)?;
    if let Some(endpoint) = &service_config.aws.sts_endpoint {
        signer = signer.with_endpoint(endpoint.as_str());
    }

    // -------------------------------
    // 3. Mint the token and print the credential
    // -------------------------------

    let provider = TokenProvider::new(params, signer, timings);
    let token = provider.get_token().await.context("failed to get token")?;
    let expires_at = provider
        .cached_expiry()
        .await
        .ok_or_else(|| anyhow!("token was generated but no expiry was cached"))?;

    info!(cluster = %provider.params().cluster_name, %expires_at, "token issued");
    println!("{}", ExecCredential::new(&token, expires_at).to_json()?);

    Ok(())
}

async fn load_service_config(args: &Args) -> Result<ServiceConfig> {
    let mut service_config = match &args.config {
        Some(path) => read_config(path).await?,
        None => ServiceConfig {
            cluster: ClusterConfig {
                name: args
                    .cluster_name
                    .to_owned()
                    .ok_or_else(|| anyhow!("either --config or --cluster-name is required"))?,
                region: None,
            },
            aws: AwsConfig::default(),
            settings: SettingsConfig::default(),
        },
    };

    if let Some(name) = &args.cluster_name {
        service_config.cluster.name = name.to_owned();
    }
    if let Some(region) = &args.region {
        service_config.cluster.region = Some(region.to_owned());
    }
    if let Some(profile) = &args.profile {
        service_config.aws.profile = Some(profile.to_owned());
    }

    finalize_config(service_config)
}
