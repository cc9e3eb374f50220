// tests/common/mod.rs
pub use axum::Router;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use http::{Request, Response, StatusCode};
use tokio::time::Instant;

use crate::cache::timings::TokenTimings;
use crate::cache::token::{GeneratedToken, IdentityParams, Token};
use crate::errors::{GenerateError, TransportError};
use crate::provider::generator::{GenerateFn, TokenGenerator};
use crate::provider::token_provider::TokenProvider;
use crate::transport::HttpSend;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn test_params() -> IdentityParams {
    IdentityParams::new("test-cluster", "us-west-2")
}

pub fn provider_with(generator: impl TokenGenerator + 'static) -> TokenProvider {
    TokenProvider::new(test_params(), generator, TokenTimings::default())
}

pub fn fifteen_minutes_from_now() -> chrono::DateTime<Utc> {
    Utc::now() + chrono::Duration::minutes(15)
}

/// Mints `k8s-aws-v1.token-<n>` where n is the call number, after `delay`.
pub fn counting_generator(calls: Arc<AtomicUsize>, delay: Duration) -> impl TokenGenerator {
    GenerateFn::new(move |_params: IdentityParams, _deadline: Instant| {
        let calls = calls.clone();
        async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Ok::<_, GenerateError>(GeneratedToken::new(
                Token::new(format!("k8s-aws-v1.token-{}", n)),
                fifteen_minutes_from_now(),
            ))
        }
    })
}

/// Always returns the same token.
pub fn fixed_generator(value: &'static str) -> impl TokenGenerator {
    GenerateFn::new(move |_params: IdentityParams, _deadline: Instant| async move {
        Ok::<_, GenerateError>(GeneratedToken::new(Token::new(value), fifteen_minutes_from_now()))
    })
}

/// Always fails with a signing error carrying `cause`.
pub fn failing_generator(calls: Arc<AtomicUsize>, cause: &'static str) -> impl TokenGenerator {
    GenerateFn::new(move |_params: IdentityParams, _deadline: Instant| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<GeneratedToken, _>(GenerateError::signing(cause))
        }
    })
}

/// Downstream transport that records what it was asked to send.
#[derive(Default)]
pub struct RecordingTransport {
    seen: Mutex<Vec<Request<Bytes>>>,
}

impl RecordingTransport {
    pub fn requests(&self) -> Vec<Request<Bytes>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpSend for RecordingTransport {
    async fn send(&self, request: &Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(Response::builder()
            .status(StatusCode::OK)
            .body(Bytes::from_static(b"ok"))?)
    }
}
