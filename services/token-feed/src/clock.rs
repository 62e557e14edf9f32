//! Process-local clock helpers
//!
//! All timestamps in the feed are Unix milliseconds from this clock.
//! They are treated as monotonic process-local values, not
//! wall-clock-comparable across restarts.

use chrono::Utc;

/// Current time as Unix milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
