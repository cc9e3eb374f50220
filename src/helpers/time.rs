use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn get_instant() -> Instant {
    Instant::now()
}

// ~30 years, far enough to mean "no deadline"
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// `now + timeout`, saturating instead of overflowing for huge timeouts
/// such as `Duration::MAX`.
pub fn deadline_after(timeout: Duration) -> Instant {
    let start = Instant::now();
    start
        .checked_add(timeout)
        .unwrap_or_else(|| start + FAR_FUTURE)
}

/// `at + duration`, saturating at the far end of the chrono range.
pub fn add_duration(at: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(duration)
        .ok()
        .and_then(|d| at.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Time left until `expires_at`, zero when already passed.
pub fn time_until(expires_at: DateTime<Utc>) -> Duration {
    (expires_at - now()).to_std().unwrap_or(Duration::ZERO)
}
