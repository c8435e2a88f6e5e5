//! Timestamp and id providers for new guests.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of guest ids.
pub trait IdGenerator: Send + Sync {
    /// Generate an id for a guest created at `created_at`.
    fn generate(&self, created_at: DateTime<Utc>) -> String;
}

/// Time-based ids with a random suffix.
///
/// Format: `<millis since epoch, base 36>-<8 random hex chars>`, e.g.
/// `mg9x2k1c-3f9e1c0a`. Collisions require two guests in the same millisecond
/// drawing the same 32 random bits.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeRandomIds;

impl IdGenerator for TimeRandomIds {
    fn generate(&self, created_at: DateTime<Utc>) -> String {
        let millis = u64::try_from(created_at.timestamp_millis()).unwrap_or_default();
        let random = Uuid::new_v4().simple().to_string();
        format!("{}-{}", to_base36(millis), &random[..8])
    }
}

/// Render `n` in lowercase base 36.
fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while n > 0 {
        // n % 36 < 36, always a valid index
        #[allow(clippy::cast_possible_truncation)]
        digits.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
