//! Time-related utilities with clock abstraction for testability.

use chrono::{NaiveDateTime, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_unix_millis(&self) -> i64;

    /// Get current Unix timestamp in fractional seconds, the unit the game
    /// server expects for `move_time`.
    fn now_unix_secs(&self) -> f64 {
        self.now_unix_millis() as f64 / 1000.0
    }
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_unix_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Format a remaining clock value (seconds) as `M:SS`.
///
/// Unknown clocks (e.g. black's clock before anyone joined) render as `N/A`.
pub fn format_clock(seconds: Option<f64>) -> String {
    match seconds {
        Some(secs) if secs.is_finite() => {
            let secs = secs.max(0.0);
            let mins = (secs / 60.0).floor() as u64;
            let rest = (secs % 60.0).floor() as u64;
            format!("{}:{:02}", mins, rest)
        }
        _ => "N/A".to_string(),
    }
}

/// Render a server timestamp (naive ISO 8601, UTC) as `YYYY-MM-DD HH:MM`.
///
/// Values that do not parse are returned unchanged.
pub fn format_server_timestamp(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
