//! Shared constants and invariants

/// Literal marker recognised by the cluster authenticator.
pub const TOKEN_PREFIX: &str = "k8s-aws-v1.";

pub const CLUSTER_ID_HEADER: &str = "x-k8s-aws-id";
pub const AMZ_EXPIRES_HEADER: &str = "x-amz-expires";

pub const STS_SERVICE_NAME: &str = "sts";
pub const STS_GET_CALLER_IDENTITY_QUERY: &str = "Action=GetCallerIdentity&Version=2011-06-15";

pub const DEFAULT_TOKEN_VALIDITY_SECS: u64 = 15 * 60;
pub const DEFAULT_REFRESH_BUFFER_SECS: u64 = 60;
pub const DEFAULT_URL_VALIDITY_SECS: u64 = 60;
pub const DEFAULT_GENERATION_TIMEOUT_MS: u64 = 10_000;

/// SigV4 refuses presigned URLs valid for longer than this.
pub const MAX_URL_VALIDITY_SECS: u64 = 15 * 60;

// ExecCredential document
pub const EXEC_CREDENTIAL_KIND: &str = "ExecCredential";
pub const EXEC_CREDENTIAL_API_VERSION: &str = "client.authentication.k8s.io/v1beta1";
