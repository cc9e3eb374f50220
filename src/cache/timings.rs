use std::time::Duration;

use crate::utils::constants::{
    DEFAULT_GENERATION_TIMEOUT_MS, DEFAULT_REFRESH_BUFFER_SECS, DEFAULT_TOKEN_VALIDITY_SECS,
    DEFAULT_URL_VALIDITY_SECS,
};

/// The two independent clocks plus the generation deadline.
///
/// `token_validity` is how long this process reuses a token, `url_validity`
/// is how long STS accepts the presigned request embedded in it. They are
/// never derived from one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTimings {
    pub token_validity: Duration,
    pub refresh_buffer: Duration,
    pub url_validity: Duration,
    pub generation_timeout: Duration,
}

impl Default for TokenTimings {
    fn default() -> Self {
        Self {
            token_validity: Duration::from_secs(DEFAULT_TOKEN_VALIDITY_SECS),
            refresh_buffer: Duration::from_secs(DEFAULT_REFRESH_BUFFER_SECS),
            url_validity: Duration::from_secs(DEFAULT_URL_VALIDITY_SECS),
            generation_timeout: Duration::from_millis(DEFAULT_GENERATION_TIMEOUT_MS),
        }
    }
}
