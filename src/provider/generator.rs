use std::future::Future;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::cache::token::{GeneratedToken, IdentityParams};
use crate::errors::GenerateError;

/// Mints a new token for `params`.
///
/// Implementations must give up once `deadline` has passed; the provider
/// also enforces it from the outside.
#[async_trait]
pub trait TokenGenerator: Send + Sync {
    async fn generate(
        &self,
        params: &IdentityParams,
        deadline: Instant,
    ) -> Result<GeneratedToken, GenerateError>;
}

/// Adapts an async closure into a [`TokenGenerator`].
///
/// ```ignore
/// let generator = GenerateFn::new(|params, _deadline| async move {
///     Ok(GeneratedToken::new(Token::new("k8s-aws-v1.abc"), expires_at))
/// });
/// ```
pub struct GenerateFn<F>(F);

impl<F> GenerateFn<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> TokenGenerator for GenerateFn<F>
where
    F: Fn(IdentityParams, Instant) -> Fut + Send + Sync,
    Fut: Future<Output = Result<GeneratedToken, GenerateError>> + Send,
{
    async fn generate(
        &self,
        params: &IdentityParams,
        deadline: Instant,
    ) -> Result<GeneratedToken, GenerateError> {
        (self.0)(params.clone(), deadline).await
    }
}
