use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time::timeout_at;
use tracing::{debug, info, warn};

use crate::cache::cache_entry::{CacheEntry, TokenState};
use crate::cache::timings::TokenTimings;
use crate::cache::token::{IdentityParams, Token};
use crate::errors::{GenerateError, TokenError};
use crate::helpers::time::{add_duration, deadline_after, get_instant, now};
use crate::observability::metrics::get_metrics;
use crate::provider::generator::TokenGenerator;

/// Caches one token per instance and regenerates it on demand.
///
/// The lock is held across the whole check-then-generate sequence, so
/// concurrent callers queue behind a single regeneration and then observe
/// its result. Staleness is detected lazily; there is no background timer.
pub struct TokenProvider {
    params: IdentityParams,
    timings: TokenTimings,
    generator: Arc<dyn TokenGenerator>,
    cache: Mutex<Option<CacheEntry>>,
}

impl TokenProvider {
    pub fn new(
        params: IdentityParams,
        generator: impl TokenGenerator + 'static,
        timings: TokenTimings,
    ) -> Self {
        Self::with_generator(params, Arc::new(generator), timings)
    }

    pub fn with_generator(
        params: IdentityParams,
        generator: Arc<dyn TokenGenerator>,
        timings: TokenTimings,
    ) -> Self {
        Self {
            params,
            timings,
            generator,
            cache: Mutex::new(None),
        }
    }

    pub fn params(&self) -> &IdentityParams {
        &self.params
    }

    pub fn timings(&self) -> &TokenTimings {
        &self.timings
    }

    /// Returns a token valid for longer than the refresh buffer, minting a
    /// new one if needed. Gives up after the configured generation timeout.
    pub async fn get_token(&self) -> Result<Token, TokenError> {
        self.get_token_within(self.timings.generation_timeout).await
    }

    /// Like [`get_token`](Self::get_token) with an explicit deadline. The
    /// deadline covers waiting for the lock as well as generation.
    pub async fn get_token_within(&self, timeout: Duration) -> Result<Token, TokenError> {
        let deadline = deadline_after(timeout);
        let cluster = self.params.cluster_name.as_str();
        let metrics = get_metrics().await;

        let mut cache = timeout_at(deadline, self.cache.lock())
            .await
            .map_err(|_| self.generation_error(GenerateError::Timeout(timeout)))?;

        if let Some(entry) = cache.as_ref().filter(|e| e.is_fresh(self.timings.refresh_buffer)) {
            debug!(cluster, expires_at = %entry.expires_at, "serving cached token");
            metrics.cache_hits.with_label_values(&[cluster]).inc();
            return Ok(entry.token.clone());
        }

        info!(cluster, region = %self.params.region, "cached token is stale, generating a new one");
        let start = get_instant();
        let generated = match timeout_at(deadline, self.generator.generate(&self.params, deadline)).await {
            Ok(result) => result,
            Err(_) => Err(GenerateError::Timeout(timeout)),
        };

        match generated {
            Ok(generated) => {
                // the provider owns the reuse window, whatever the generator reports
                let expires_at = add_duration(now(), self.timings.token_validity);
                metrics.generations.with_label_values(&[cluster]).inc();
                metrics.generation_duration.with_label_values(&[cluster]).observe(start.elapsed().as_secs_f64());
                metrics.token_expiry_unix.with_label_values(&[cluster]).set(expires_at.timestamp());
                debug!(cluster, %expires_at, "token generated");

                let token = generated.token.clone();
                *cache = Some(CacheEntry::new(generated.token, expires_at));
                Ok(token)
            }
            Err(err) => {
                metrics.generation_failures.with_label_values(&[cluster, err.reason()]).inc();
                warn!(cluster, error = %err, "token generation failed");
                Err(self.generation_error(err))
            }
        }
    }

    pub async fn state(&self) -> TokenState {
        self.cache
            .lock()
            .await
            .as_ref()
            .map(|entry| entry.state(self.timings.refresh_buffer))
            .unwrap_or(TokenState::Stale)
    }

    pub async fn cached_expiry(&self) -> Option<DateTime<Utc>> {
        self.cache.lock().await.as_ref().map(|entry| entry.expires_at)
    }

    /// Forces the next `get_token` to regenerate, e.g. after the API server
    /// rejected the current token.
    pub async fn invalidate(&self) {
        if let Some(entry) = self.cache.lock().await.as_mut() {
            entry.expires_at = now();
            info!(cluster = %self.params.cluster_name, "cached token invalidated");
        }
    }

    #[cfg(test)]
    pub(crate) async fn set_cached_expiry(&self, expires_at: DateTime<Utc>) {
        if let Some(entry) = self.cache.lock().await.as_mut() {
            entry.expires_at = expires_at;
        }
    }

    fn generation_error(&self, source: GenerateError) -> TokenError {
        TokenError::Generation {
            cluster: self.params.cluster_name.clone(),
            source,
        }
    }
}
