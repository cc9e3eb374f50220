use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};

use crate::utils::constants::TOKEN_PREFIX;

/// Opaque bearer token: `k8s-aws-v1.` followed by the unpadded URL-safe
/// base64 of a presigned STS URL.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn from_presigned_url(url: &str) -> Self {
        Self(format!("{}{}", TOKEN_PREFIX, URL_SAFE_NO_PAD.encode(url.as_bytes())))
    }

    /// Wraps an already minted value. No validation is done here; use
    /// [`has_token_prefix`] when the source is untrusted.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decodes the presigned URL back out of the token.
    pub fn presigned_url(&self) -> Option<String> {
        let encoded = self.0.strip_prefix(TOKEN_PREFIX)?;
        let raw = URL_SAFE_NO_PAD.decode(encoded).ok()?;
        String::from_utf8(raw).ok()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// the encoded URL carries a live signature
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.strip_prefix(TOKEN_PREFIX) {
            Some(_) => write!(f, "Token({}<redacted>)", TOKEN_PREFIX),
            None => f.write_str("Token(<redacted>)"),
        }
    }
}

pub fn has_token_prefix(value: &str) -> bool {
    value.starts_with(TOKEN_PREFIX)
}

/// Freshly minted token with the instant this process stops reusing it.
#[derive(Debug, Clone)]
pub struct GeneratedToken {
    pub token: Token,
    pub expires_at: DateTime<Utc>,
}

impl GeneratedToken {
    pub fn new(token: Token, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }
}

/// Who the token proves identity for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityParams {
    pub cluster_name: String,
    pub region: String,
}

impl IdentityParams {
    pub fn new(cluster_name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            region: region.into(),
        }
    }
}
