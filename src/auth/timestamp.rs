//! Timestamps for the `CB-ACCESS-TIMESTAMP` header.
//!
//! Coinbase rejects requests whose timestamp is more than 30 seconds away
//! from API time, so the value is taken right before signing.

use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing request timestamps.
///
/// The returned value is seconds since the UNIX epoch. It is used both in
/// the signed prehash string and in the `CB-ACCESS-TIMESTAMP` header.
pub trait TimestampProvider: Send + Sync {
    /// Current timestamp in seconds.
    fn timestamp(&self) -> u64;
}

/// Timestamps from the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimestamp;

impl SystemTimestamp {
    pub fn new() -> Self {
        Self
    }
}

impl TimestampProvider for SystemTimestamp {
    fn timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
