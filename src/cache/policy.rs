//! Expiration Policy Module
//!
//! Pure freshness predicate shared by every cache tier.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Returns true while an entry written at `written_at` is younger than `ttl`.
///
/// Boundary condition: an entry whose age equals the TTL is expired. A write
/// timestamp in the future (clock skew) yields a negative age, which is
/// accepted as valid rather than corrected.
pub fn is_valid(written_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    match (now - written_at).to_std() {
        Ok(age) => age < ttl,
        // negative age
        Err(_) => true,
    }
}

// == Expiration Policy ==
/// Time-to-live configured for one cache instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationPolicy {
    ttl: Duration,
}

impl ExpirationPolicy {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_valid(&self, written_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        is_valid(written_at, now, self.ttl)
    }
}
