use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use reqwest::Client;
use tracing::trace;

use crate::errors::TransportError;
use crate::transport::HttpSend;

/// [`HttpSend`] over a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestTransport {
    async fn send(&self, request: &Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        trace!(method = %request.method(), uri = %request.uri(), "sending request");
        let response = self
            .client
            .request(request.method().clone(), request.uri().to_string())
            .headers(request.headers().clone())
            .body(request.body().clone())
            .send()
            .await?;

        let mut builder = Response::builder()
            .status(response.status())
            .version(response.version());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(response.headers().clone());
        }
        let body = response.bytes().await?;
        Ok(builder.body(body)?)
    }
}
