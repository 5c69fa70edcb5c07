//! # Time Utilities
//!
//! Utilities for time formatting using chrono.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format time as an RFC3339 string with second precision.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
