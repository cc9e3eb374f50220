use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use http::Request;
use tokio::time::{timeout_at, Instant};
use tracing::debug;

use crate::cache::timings::TokenTimings;
use crate::cache::token::{GeneratedToken, IdentityParams, Token};
use crate::errors::GenerateError;
use crate::helpers::time::{add_duration, now};
use crate::provider::generator::TokenGenerator;
use crate::signer::header_injection::HeaderInjectingPresigner;
use crate::signer::presign::{Presign, PresignContext, SigV4Presigner};
use crate::utils::constants::{
    AMZ_EXPIRES_HEADER, CLUSTER_ID_HEADER, STS_GET_CALLER_IDENTITY_QUERY, STS_SERVICE_NAME,
};

/// Regional STS endpoint for `region`.
pub fn sts_endpoint(region: &str) -> String {
    let suffix = if region.starts_with("cn-") {
        "amazonaws.com.cn"
    } else {
        "amazonaws.com"
    };
    format!("https://sts.{}.{}", region, suffix)
}

/// Loads the default AWS credential chain, optionally pinned to a profile
/// and region.
pub async fn load_sdk_config(region: Option<String>, profile: Option<String>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region));
    }
    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }
    loader.load().await
}

/// Mints tokens from presigned STS `GetCallerIdentity` requests.
///
/// Presigning is local; the credential source may hit the network (IMDS,
/// SSO, assume-role), which is why resolution runs under the deadline.
pub struct StsTokenSigner {
    credentials: SharedCredentialsProvider,
    presigner: Arc<dyn Presign>,
    endpoint: Option<String>,
    token_validity: Duration,
    url_validity: Duration,
}

impl StsTokenSigner {
    pub fn new(credentials: impl ProvideCredentials + 'static, timings: &TokenTimings) -> Self {
        Self {
            credentials: SharedCredentialsProvider::new(credentials),
            presigner: Arc::new(SigV4Presigner),
            endpoint: None,
            token_validity: timings.token_validity,
            url_validity: timings.url_validity,
        }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig, timings: &TokenTimings) -> Result<Self, GenerateError> {
        let credentials = sdk_config
            .credentials_provider()
            .ok_or_else(|| GenerateError::Other("no credentials provider found in AWS config".to_owned()))?;
        Ok(Self::new(credentials, timings))
    }

    /// Overrides the regional endpoint, e.g. for FIPS or VPC endpoints.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_presigner(mut self, presigner: impl Presign + 'static) -> Self {
        self.presigner = Arc::new(presigner);
        self
    }

    /// Builds the signed identity URL for `params` at `time`.
    pub fn presign_url(
        &self,
        params: &IdentityParams,
        credentials: Credentials,
        time: SystemTime,
    ) -> Result<String, GenerateError> {
        if params.cluster_name.trim().is_empty() {
            return Err(GenerateError::InvalidRequest("cluster name is empty".to_owned()));
        }
        if params.region.trim().is_empty() {
            return Err(GenerateError::InvalidRequest("region is empty".to_owned()));
        }

        let endpoint = self
            .endpoint
            .clone()
            .unwrap_or_else(|| sts_endpoint(&params.region));
        let uri = format!("{}/?{}", endpoint.trim_end_matches('/'), STS_GET_CALLER_IDENTITY_QUERY);
        let request = Request::get(uri)
            .body(())
            .map_err(|e| GenerateError::InvalidRequest(e.to_string()))?;

        let presigner = HeaderInjectingPresigner::new(self.presigner.as_ref())
            .header(CLUSTER_ID_HEADER, &params.cluster_name)?
            .header(AMZ_EXPIRES_HEADER, &self.url_validity.as_secs().to_string())?;
        let ctx = PresignContext {
            credentials,
            region: params.region.clone(),
            service: STS_SERVICE_NAME,
            time,
        };

        let signed = presigner.presign(request, &ctx)?;
        Ok(signed.uri().to_string())
    }
}

#[async_trait]
impl TokenGenerator for StsTokenSigner {
    async fn generate(
        &self,
        params: &IdentityParams,
        deadline: Instant,
    ) -> Result<GeneratedToken, GenerateError> {
        let budget = deadline.saturating_duration_since(Instant::now());
        let credentials = timeout_at(deadline, self.credentials.provide_credentials())
            .await
            .map_err(|_| GenerateError::Timeout(budget))?
            .map_err(GenerateError::credentials)?;

        let url = self.presign_url(params, credentials, SystemTime::now())?;
        let expires_at = add_duration(now(), self.token_validity);
        debug!(cluster = %params.cluster_name, %expires_at, "presigned identity request");

        Ok(GeneratedToken::new(Token::from_presigned_url(&url), expires_at))
    }
}
