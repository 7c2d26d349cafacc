//! DateTime display utilities.
//!
//! This module provides wrapper types for formatting timestamps and flight
//! durations in a consistent, human-readable format.

use std::fmt;

use jiff::{tz::TimeZone, SignedDuration, Timestamp};

/// A wrapper around `Timestamp` that provides system timezone formatting via
/// the `Display` trait.
///
/// # Format
///
/// The display format follows the pattern: `YYYY-MM-DD HH:MM:SS TZ`
/// - Year, month, and day are zero-padded
/// - Time is in 24-hour format with zero-padded components
/// - Timezone abbreviation is included (e.g., UTC, BST, JST)
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Flight time as `7h 30m`.
pub struct FlightDuration(pub SignedDuration);

impl fmt::Display for FlightDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.0.as_secs() / 60;
        let sign = if minutes < 0 { "-" } else { "" };
        let minutes = minutes.abs();
        write!(f, "{sign}{}h {:02}m", minutes / 60, minutes % 60)
    }
}
