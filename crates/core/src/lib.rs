//! Core constants and unit conversions shared across the geospace workspace.

/// Time and calendar constants.
pub mod constants {
    /// Seconds per day (no leap seconds).
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Microseconds per second.
    pub const MICROSECONDS_PER_SECOND: f64 = 1.0e6;
    /// Julian date of the UNIX epoch, 1970-01-01T00:00:00.
    pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;
    /// Julian date of the J2000 epoch, 2000-01-01T12:00:00.
    pub const JD_J2000: f64 = 2_451_545.0;
    /// Offset between MATLAB serial day numbers and proleptic Gregorian ordinals.
    pub const DATENUM_ORDINAL_OFFSET: i32 = 366;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::MICROSECONDS_PER_SECOND;

    /// Convert seconds to microseconds.
    #[inline]
    pub fn seconds_to_micros(v: f64) -> f64 {
        v * MICROSECONDS_PER_SECOND
    }

    /// Convert microseconds to seconds.
    #[inline]
    pub fn micros_to_seconds(v: f64) -> f64 {
        v / MICROSECONDS_PER_SECOND
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::SECONDS_PER_DAY;

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }
}
