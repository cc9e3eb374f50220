use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderValue, AUTHORIZATION};
use http::{Request, Response};
use tracing::{debug, warn};

use crate::errors::TransportError;
use crate::observability::metrics::get_metrics;
use crate::provider::token_provider::TokenProvider;
use crate::transport::HttpSend;

/// Attaches `Authorization: Bearer <token>` to every request before
/// delegating to the wrapped transport.
///
/// The caller's request is never modified. When no token can be obtained the
/// inner transport is not called at all.
pub struct BearerAuth<S> {
    inner: S,
    provider: Arc<TokenProvider>,
}

impl<S: HttpSend> BearerAuth<S> {
    pub fn new(inner: S, provider: Arc<TokenProvider>) -> Self {
        Self { inner, provider }
    }

    pub fn provider(&self) -> &Arc<TokenProvider> {
        &self.provider
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait]
impl<S: HttpSend> HttpSend for BearerAuth<S> {
    async fn send(&self, request: &Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        let cluster = self.provider.params().cluster_name.as_str();
        let metrics = get_metrics().await;

        let token = match self.provider.get_token().await {
            Ok(token) => token,
            Err(err) => {
                metrics.token_acquisition_failures.with_label_values(&[cluster]).inc();
                warn!(cluster, uri = %request.uri(), "request aborted, no bearer token");
                return Err(TransportError::TokenAcquisition(err));
            }
        };

        let mut authorized = request.clone();
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
        value.set_sensitive(true);
        authorized.headers_mut().insert(AUTHORIZATION, value);

        metrics.authorized_requests.with_label_values(&[cluster]).inc();
        debug!(cluster, method = %request.method(), uri = %request.uri(), "sending authorized request");
        self.inner.send(&authorized).await
    }
}
