use std::time::{Duration, SystemTime};

use aws_credential_types::Credentials;
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SignatureLocation, SigningSettings};
use aws_sigv4::sign::v4;
use http::{HeaderMap, Request};
use tracing::trace;

use crate::errors::GenerateError;
use crate::utils::constants::AMZ_EXPIRES_HEADER;

/// Everything the base signing primitive needs besides the request.
#[derive(Debug, Clone)]
pub struct PresignContext {
    pub credentials: Credentials,
    pub region: String,
    pub service: &'static str,
    pub time: SystemTime,
}

/// Turns a request into its presigned form.
///
/// Whatever headers are present on `request` when `presign` is called are
/// covered by the signature.
pub trait Presign: Send + Sync {
    fn presign(&self, request: Request<()>, ctx: &PresignContext) -> Result<Request<()>, GenerateError>;
}

impl<P: Presign + ?Sized> Presign for &P {
    fn presign(&self, request: Request<()>, ctx: &PresignContext) -> Result<Request<()>, GenerateError> {
        (**self).presign(request, ctx)
    }
}

/// SigV4 query-string presigning.
///
/// An `x-amz-expires` request header is hoisted into the presign expiry, so
/// it ends up as the `X-Amz-Expires` query parameter instead of a signed
/// header. Every other header is signed as-is.
#[derive(Debug, Clone, Default)]
pub struct SigV4Presigner;

impl Presign for SigV4Presigner {
    fn presign(&self, mut request: Request<()>, ctx: &PresignContext) -> Result<Request<()>, GenerateError> {
        let expires_in = hoist_expires(request.headers_mut())?;

        let mut settings = SigningSettings::default();
        settings.signature_location = SignatureLocation::QueryParams;
        settings.expires_in = expires_in;

        let identity = ctx.credentials.clone().into();
        let signing_params = v4::SigningParams::builder()
            .identity(&identity)
            .region(&ctx.region)
            .name(ctx.service)
            .time(ctx.time)
            .settings(settings)
            .build()
            .map_err(GenerateError::signing)?
            .into();

        let uri = request.uri().to_string();
        let headers: Vec<(&str, &str)> = request
            .headers()
            .iter()
            .map(|(name, value)| {
                value
                    .to_str()
                    .map(|value| (name.as_str(), value))
                    .map_err(GenerateError::signing)
            })
            .collect::<Result<_, _>>()?;

        let signable_request = SignableRequest::new(
            request.method().as_str(),
            uri,
            headers.into_iter(),
            SignableBody::Bytes(&[]),
        )
        .map_err(GenerateError::signing)?;

        let (instructions, _signature) = sign(signable_request, &signing_params)
            .map_err(GenerateError::signing)?
            .into_parts();
        instructions.apply_to_request_http1x(&mut request);

        trace!(region = %ctx.region, service = ctx.service, "presigned request");
        Ok(request)
    }
}

fn hoist_expires(headers: &mut HeaderMap) -> Result<Option<Duration>, GenerateError> {
    let Some(value) = headers.remove(AMZ_EXPIRES_HEADER) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|secs| Some(Duration::from_secs(secs)))
        .ok_or_else(|| GenerateError::InvalidRequest(format!("{} must be a whole number of seconds", AMZ_EXPIRES_HEADER)))
}
