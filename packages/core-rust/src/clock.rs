//! Wall-clock timestamps for messages, metrics and health reports.
//!
//! Every timestamp the processor emits is UTC. Message and health timestamps
//! use the ISO-8601 form without an offset suffix (`2024-05-01T12:30:45.123456`),
//! which is what downstream queue consumers parse.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A UTC wall-clock timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps an existing UTC datetime.
    #[must_use]
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Builds a timestamp from whole seconds since the Unix epoch.
    ///
    /// Returns `None` when `secs` is out of chrono's representable range.
    #[must_use]
    pub fn from_unix_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Returns the underlying datetime.
    #[must_use]
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// ISO-8601 rendering with microsecond precision and no offset.
    #[must_use]
    pub fn to_iso(self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }

    /// Compact second-resolution rendering, `YYYYMMDD_HHMMSS`.
    ///
    /// Two timestamps within the same second render identically.
    #[must_use]
    pub fn to_compact_seconds(self) -> String {
        self.0.format("%Y%m%d_%H%M%S").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_iso())
    }
}

/// Abstraction over the system clock for dependency injection.
///
/// Handlers read time only through this trait so tests can pin it.
pub trait ClockSource: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

/// Clock source backed by the real system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock source that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl ClockSource for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Timestamp {
        // 2024-05-01T12:30:45Z
        Timestamp::from_unix_secs(1_714_566_645).unwrap()
    }

    #[test]
    fn iso_rendering_has_microseconds_and_no_offset() {
        assert_eq!(sample().to_iso(), "2024-05-01T12:30:45.000000");
    }

    #[test]
    fn compact_rendering_truncates_to_seconds() {
        let ts = sample();
        let later = Timestamp::from_utc(ts.as_datetime() + chrono::Duration::milliseconds(900));
        assert_eq!(ts.to_compact_seconds(), "20240501_123045");
        assert_eq!(ts.to_compact_seconds(), later.to_compact_seconds());
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedClock(sample());
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn system_clock_advances_or_stays() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
