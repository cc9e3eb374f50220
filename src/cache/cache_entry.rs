use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::token::Token;
use crate::helpers::time::{now, time_until};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Cached token is valid beyond the refresh buffer.
    Fresh,
    /// Absent, expired, or within the refresh buffer of expiry.
    Stale,
}

/// The single (token, expiry) pair owned by a provider.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub token: Token,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(token: Token, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }

    /// Reusable only while strictly more than `refresh_buffer` remains.
    pub fn is_fresh(&self, refresh_buffer: Duration) -> bool {
        !self.token.as_str().is_empty() && self.expires_at > now() && time_until(self.expires_at) > refresh_buffer
    }

    pub fn state(&self, refresh_buffer: Duration) -> TokenState {
        if self.is_fresh(refresh_buffer) {
            TokenState::Fresh
        } else {
            TokenState::Stale
        }
    }
}
