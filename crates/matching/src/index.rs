//! Flat numeric projection of a timestamp series used for binary search.

use geospace_time::Timestamp;

use crate::error::MatchError;

/// Microsecond offsets of a timestamp series from a shared epoch.
///
/// Same length and order as the source series; the source is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampIndex {
    offsets_us: Vec<f64>,
}

impl TimestampIndex {
    /// Project `series` onto the microsecond axis anchored at `epoch`.
    ///
    /// Both series of one matching operation must be built with the same epoch.
    pub fn build<T: Timestamp>(series: &[T], epoch: &T) -> Self {
        Self {
            offsets_us: series.iter().map(|t| t.micros_since(epoch)).collect(),
        }
    }

    /// Wrap offsets that are already expressed in microseconds.
    pub fn from_offsets(offsets_us: Vec<f64>) -> Self {
        Self { offsets_us }
    }

    pub fn len(&self) -> usize {
        self.offsets_us.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets_us.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.offsets_us
    }

    pub fn offset_us(&self, position: usize) -> Option<f64> {
        self.offsets_us.get(position).copied()
    }

    /// Check the binary-search precondition: finite values in ascending order.
    pub fn validate_sorted(&self) -> Result<(), MatchError> {
        if let Some(position) = self.offsets_us.iter().position(|v| !v.is_finite()) {
            return Err(MatchError::NonFinitePrimary { position });
        }
        match self.offsets_us.windows(2).position(|w| w[1] < w[0]) {
            Some(i) => Err(MatchError::UnsortedPrimary { position: i + 1 }),
            None => Ok(()),
        }
    }

    /// Lower and upper insertion bounds of `value`.
    ///
    /// `lo` is the first position with an offset `>= value` and `hi` the first
    /// with an offset `> value`, so `lo..hi` spans the entries equal to
    /// `value`. Requires a sorted index.
    pub fn equal_range(&self, value: f64) -> (usize, usize) {
        let lo = self.offsets_us.partition_point(|&v| v < value);
        let hi = lo + self.offsets_us[lo..].partition_point(|&v| v <= value);
        (lo, hi)
    }
}
