use std::error::Error as StdError;
use std::time::Duration;

use aws_credential_types::provider::error::CredentialsError;
use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Why a single token generation failed.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("credential resolution failed: {chain}")]
    Credentials {
        chain: String,
        #[source]
        source: CredentialsError,
    },
    #[error("signing failed: {0}")]
    Signing(BoxError),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid identity request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Other(String),
}

impl GenerateError {
    pub fn credentials(source: CredentialsError) -> Self {
        Self::Credentials {
            chain: error_chain(&source),
            source,
        }
    }

    pub fn signing(source: impl Into<BoxError>) -> Self {
        Self::Signing(source.into())
    }

    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            GenerateError::Credentials { .. } => "credentials",
            GenerateError::Signing(_) => "signing",
            GenerateError::Timeout(_) => "timeout",
            GenerateError::InvalidRequest(_) => "invalid_request",
            GenerateError::Other(_) => "other",
        }
    }
}

/// Failure of `TokenProvider::get_token`.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to generate token for cluster '{cluster}': {source}")]
    Generation {
        cluster: String,
        #[source]
        source: GenerateError,
    },
}

/// Failure of a request routed through an `HttpSend`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to acquire bearer token for request: {0}")]
    TokenAcquisition(#[source] TokenError),
    #[error("token is not a valid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to build response: {0}")]
    Response(#[from] http::Error),
}

/// `a: b: c` rendering of an error and all its sources.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        current = cause.source();
    }
    out
}
