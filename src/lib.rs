//! # EKS Token Library
//!
//! Mints short-lived bearer tokens for the EKS control plane from presigned
//! STS `GetCallerIdentity` requests, caches them per cluster, and attaches
//! them to outgoing Kubernetes API requests.
//!
//! Modules:
//! - `cache` — token, cache entry and timing types
//! - `provider` — the caching token provider and the generator seam
//! - `signer` — SigV4 presigning with pre-signature header injection
//! - `transport` — the bearer-token request decorator
//! - `config` — YAML configuration, defaults and validation
//! - `errors` — generation, token and transport error types
//! - `observability` — prometheus metrics
//! - `sinks` — the ExecCredential document printed for kubectl
//! - `helpers` — time helpers
//! - `utils` — constants and logging setup

pub mod cache;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod observability;
pub mod provider;
pub mod signer;
pub mod sinks;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::cache::{has_token_prefix, GeneratedToken, IdentityParams, Token, TokenState, TokenTimings};
pub use crate::errors::{GenerateError, TokenError, TransportError};
pub use crate::provider::{GenerateFn, TokenGenerator, TokenProvider};
pub use crate::signer::StsTokenSigner;
pub use crate::transport::{BearerAuth, HttpSend, ReqwestTransport};
