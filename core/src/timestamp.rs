//! The fixed timestamp profile used on the wire.
//!
//! Timestamps look like `2019-01-12T18:04:05.123-05:00`: millisecond
//! precision and an explicit numeric UTC offset. Formatting goes through
//! chrono's format strings, which are locale-invariant.
//!
//! Parsing is strict. chrono alone accepts a missing or longer fraction, so
//! the raw text is shape-checked before it is handed to chrono.
//!
//! The local profile looks up the offset for each instant it encodes, so a
//! long-lived client stays correct across daylight-saving transitions.

use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone};

use crate::error::ApiError;

/// chrono pattern for `yyyy-MM-dd'T'HH:mm:ss.SSS±HH:mm`.
pub const TIMESTAMP_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

const TIMESTAMP_LEN: usize = "2019-01-12T18:04:05.123+00:00".len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Fixed(FixedOffset),
    Local,
}

/// Immutable formatting configuration for wire timestamps.
///
/// The zone only affects encoding; decoding keeps whatever offset the text
/// carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampFormat {
    zone: Zone,
}

impl TimestampFormat {
    /// Encode in UTC, rendered as `+00:00`.
    pub fn utc() -> Self {
        Self::with_offset(chrono::Utc.fix())
    }

    /// Encode in the system time zone, using the offset in effect at each
    /// encoded instant.
    pub fn local() -> Self {
        Self { zone: Zone::Local }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            zone: Zone::Fixed(offset),
        }
    }

    /// The configured offset, or `None` for the local profile, whose offset
    /// depends on the instant.
    pub fn offset(&self) -> Option<FixedOffset> {
        match self.zone {
            Zone::Fixed(offset) => Some(offset),
            Zone::Local => None,
        }
    }

    /// Offset used to render `timestamp`.
    pub fn offset_at<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> FixedOffset {
        match self.zone {
            Zone::Fixed(offset) => offset,
            Zone::Local => timestamp.with_timezone(&Local).offset().fix(),
        }
    }

    pub fn format<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> String {
        timestamp
            .with_timezone(&self.offset_at(timestamp))
            .format(TIMESTAMP_PATTERN)
            .to_string()
    }

    pub fn parse(&self, raw: &str) -> Result<DateTime<FixedOffset>, ApiError> {
        if !has_profile_shape(raw) {
            return Err(ApiError::DeserializationError(format!(
                "timestamp `{raw}` is not in yyyy-MM-dd'T'HH:mm:ss.SSS±HH:mm form"
            )));
        }
        DateTime::parse_from_str(raw, TIMESTAMP_PATTERN)
            .map_err(|e| ApiError::DeserializationError(format!("timestamp `{raw}`: {e}")))
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self::utc()
    }
}

/// Exactly three fractional digits followed by a `±HH:mm` offset.
fn has_profile_shape(raw: &str) -> bool {
    let b = raw.as_bytes();
    b.len() == TIMESTAMP_LEN
        && b[10] == b'T'
        && b[19] == b'.'
        && b[20..23].iter().all(u8::is_ascii_digit)
        && matches!(b[23], b'+' | b'-')
        && b[26] == b':'
}
