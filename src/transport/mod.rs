//! Request transports and the bearer-token decorator.

pub mod bearer;
pub mod reqwest_transport;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};

use crate::errors::TransportError;

pub use bearer::BearerAuth;
pub use reqwest_transport::ReqwestTransport;

/// The minimal "send request, get response" capability.
///
/// Requests are borrowed; implementations that need to alter one work on a
/// clone.
#[async_trait]
pub trait HttpSend: Send + Sync {
    async fn send(&self, request: &Request<Bytes>) -> Result<Response<Bytes>, TransportError>;
}

#[async_trait]
impl<T: HttpSend + ?Sized> HttpSend for std::sync::Arc<T> {
    async fn send(&self, request: &Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        (**self).send(request).await
    }
}
