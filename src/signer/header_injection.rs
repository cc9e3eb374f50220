use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Request};

use crate::errors::GenerateError;
use crate::signer::presign::{Presign, PresignContext};

/// Decorates a [`Presign`] so fixed headers are inserted before the wrapped
/// signer computes the signature.
///
/// Hooks that add headers after signing produce a request STS rejects; here
/// mutation and signing happen in one call, mutation first.
#[derive(Debug, Clone)]
pub struct HeaderInjectingPresigner<P> {
    inner: P,
    headers: HeaderMap,
}

impl<P: Presign> HeaderInjectingPresigner<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            headers: HeaderMap::new(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Result<Self, GenerateError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| GenerateError::InvalidRequest(format!("header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| GenerateError::InvalidRequest(format!("header '{}': {}", name, e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl<P: Presign> Presign for HeaderInjectingPresigner<P> {
    fn presign(&self, mut request: Request<()>, ctx: &PresignContext) -> Result<Request<()>, GenerateError> {
        for (name, value) in &self.headers {
            request.headers_mut().insert(name.clone(), value.clone());
        }
        self.inner.presign(request, ctx)
    }
}
