use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};
use geospace_core::units::seconds_to_micros;

/// Signed elapsed time expressed in microseconds.
///
/// Whole-microsecond durations convert exactly, which keeps equidistant
/// comparisons in the matcher exact.
pub fn duration_to_microseconds(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 * 1.0e6 + f64::from(delta.subsec_nanos()) / 1.0e3
}

/// An instant that can be projected onto a microsecond axis anchored at an epoch.
///
/// The projection must be monotonic in the instant's natural order: if `a`
/// precedes `b` then `a.micros_since(e) < b.micros_since(e)` for any epoch `e`.
pub trait Timestamp {
    /// Signed microseconds elapsed from `epoch` to `self`.
    fn micros_since(&self, epoch: &Self) -> f64;
}

impl Timestamp for NaiveDateTime {
    fn micros_since(&self, epoch: &Self) -> f64 {
        duration_to_microseconds(self.signed_duration_since(*epoch))
    }
}

impl<Tz: TimeZone> Timestamp for DateTime<Tz> {
    fn micros_since(&self, epoch: &Self) -> f64 {
        duration_to_microseconds(self.clone().signed_duration_since(epoch.clone()))
    }
}

/// Plain floating-point seconds since an arbitrary epoch (e.g. UNIX time).
impl Timestamp for f64 {
    fn micros_since(&self, epoch: &Self) -> f64 {
        seconds_to_micros(self - epoch)
    }
}
