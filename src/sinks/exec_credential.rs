use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::cache::token::Token;
use crate::utils::constants::{EXEC_CREDENTIAL_API_VERSION, EXEC_CREDENTIAL_KIND};

/// `client.authentication.k8s.io/v1beta1` ExecCredential, the document a
/// kubeconfig `exec` plugin prints on stdout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecCredential {
    pub kind: &'static str,
    pub api_version: &'static str,
    pub spec: ExecCredentialSpec,
    pub status: ExecCredentialStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecCredentialSpec {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecCredentialStatus {
    pub expiration_timestamp: String,
    pub token: String,
}

impl ExecCredential {
    pub fn new(token: &Token, expires_at: DateTime<Utc>) -> Self {
        Self {
            kind: EXEC_CREDENTIAL_KIND,
            api_version: EXEC_CREDENTIAL_API_VERSION,
            spec: ExecCredentialSpec::default(),
            status: ExecCredentialStatus {
                expiration_timestamp: expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                token: token.as_str().to_owned(),
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
