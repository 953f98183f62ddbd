//! Nearest-neighbour timestamp matching over projected series.

use std::time::Instant;

use geospace_config::MatchConfig;
use geospace_core::units::micros_to_seconds;

use crate::diagnostics::DiagnosticsSink;
use crate::error::{ElementFailure, FailureKind, MatchError};
use crate::index::TimestampIndex;

/// Default tolerance: 0.4 s.
pub const DEFAULT_TOLERANCE_US: f64 = 400_000.0;
/// Iterations between progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 5_000;

/// Tunables for one matching call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// A candidate matches only when strictly closer than this, in microseconds.
    pub tolerance_us: f64,
    /// Let several query elements share one primary index.
    pub allow_duplicates: bool,
    /// Emit a progress line every this many query elements; `0` disables.
    pub progress_interval: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            tolerance_us: DEFAULT_TOLERANCE_US,
            allow_duplicates: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl MatchOptions {
    pub fn with_tolerance_us(tolerance_us: f64) -> Self {
        Self {
            tolerance_us,
            ..Self::default()
        }
    }

    pub fn allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !self.tolerance_us.is_finite() || self.tolerance_us < 0.0 {
            return Err(MatchError::InvalidTolerance(self.tolerance_us));
        }
        Ok(())
    }
}

impl From<&MatchConfig> for MatchOptions {
    fn from(config: &MatchConfig) -> Self {
        Self {
            tolerance_us: config.tolerance_us,
            allow_duplicates: config.allow_duplicates,
            progress_interval: config.progress_interval,
        }
    }
}

/// Tallies reported after a matching pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    /// Query elements processed.
    pub total: usize,
    /// Query elements that received an index.
    pub matched: usize,
    /// Distinct primary indices handed out.
    pub unique_matched: usize,
    /// Query elements evaluated without finding a match.
    pub unmatched: usize,
    /// Query elements with both neighbours inside the tolerance.
    pub ambiguous: usize,
    /// Query elements that could not be evaluated.
    pub failed: usize,
}

/// Result of matching a query series against a primary series.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// One entry per query element: the primary index, or `None` when unmatched or failed.
    pub indices: Vec<Option<usize>>,
    /// Query elements that failed evaluation, in query order.
    pub failures: Vec<ElementFailure>,
    pub summary: MatchSummary,
}

impl MatchOutcome {
    /// `(query_position, primary_index)` for every matched element.
    pub fn matched_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.indices
            .iter()
            .enumerate()
            .filter_map(|(position, index)| index.map(|i| (position, i)))
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    delta_us: f64,
}

/// Match every query offset against a sorted primary index.
///
/// Both indices must share one epoch. The primary index is validated before
/// any matching happens.
pub fn match_indexed(
    primary: &TimestampIndex,
    query: &TimestampIndex,
    options: &MatchOptions,
    sink: &dyn DiagnosticsSink,
) -> Result<MatchOutcome, MatchError> {
    options.validate()?;
    primary.validate_sorted()?;

    let mut matcher = Matcher {
        primary,
        options,
        sink,
        consumed: vec![false; primary.len()],
        ambiguous: 0,
    };

    let total = query.len();
    let mut indices = Vec::with_capacity(total);
    let mut failures = Vec::new();
    let mut unmatched = 0usize;
    let mut window_unmatched = 0usize;
    let started = Instant::now();

    for (position, &value) in query.as_slice().iter().enumerate() {
        if options.progress_interval > 0 && position > 0 && position % options.progress_interval == 0 {
            report_progress(sink, position, total, window_unmatched, started);
            window_unmatched = 0;
        }

        if !value.is_finite() {
            failures.push(ElementFailure {
                position,
                kind: FailureKind::NonFiniteTimestamp,
            });
            indices.push(None);
            continue;
        }

        let matched = matcher.resolve(position, value);
        match matched {
            Some(index) if !options.allow_duplicates => matcher.consumed[index] = true,
            Some(_) => {}
            None => {
                unmatched += 1;
                window_unmatched += 1;
            }
        }
        indices.push(matched);
    }

    let mut seen = vec![false; primary.len()];
    let unique_matched = indices
        .iter()
        .flatten()
        .filter(|&&i| !std::mem::replace(&mut seen[i], true))
        .count();

    let summary = MatchSummary {
        total,
        matched: total - unmatched - failures.len(),
        unique_matched,
        unmatched,
        ambiguous: matcher.ambiguous,
        failed: failures.len(),
    };

    sink.info(&format!(
        "{}/{} values to match were matched uniquely.",
        summary.unique_matched, summary.total
    ));
    sink.info(&format!(
        "{}/{} values are unmatched.",
        summary.unmatched, summary.total
    ));
    if summary.failed > 0 {
        sink.warn(&format!(
            "{}/{} values could not be evaluated.",
            summary.failed, summary.total
        ));
    }

    Ok(MatchOutcome {
        indices,
        failures,
        summary,
    })
}

struct Matcher<'a> {
    primary: &'a TimestampIndex,
    options: &'a MatchOptions,
    sink: &'a dyn DiagnosticsSink,
    consumed: Vec<bool>,
    ambiguous: usize,
}

impl Matcher<'_> {
    fn is_available(&self, index: usize) -> bool {
        self.options.allow_duplicates || !self.consumed[index]
    }

    fn resolve(&mut self, position: usize, value: f64) -> Option<usize> {
        let offsets = self.primary.as_slice();
        let (lo, hi) = self.primary.equal_range(value);

        // Exact hits ignore the tolerance; duplicated primary values are
        // handed out in order.
        if let Some(index) = (lo..hi).find(|&i| self.is_available(i)) {
            return Some(index);
        }

        let tolerance = self.options.tolerance_us;
        let before = lo
            .checked_sub(1)
            .map(|index| Candidate {
                index,
                delta_us: (value - offsets[index]).abs(),
            })
            .filter(|c| c.delta_us < tolerance);
        let after = offsets
            .get(hi)
            .map(|&offset| Candidate {
                index: hi,
                delta_us: (offset - value).abs(),
            })
            .filter(|c| c.delta_us < tolerance);

        match (before, after) {
            (Some(before), Some(after)) => {
                self.ambiguous += 1;
                self.sink.warn(&format!(
                    "Ambiguous match: query element {position} is within tolerance {:.6} s of both primary {} ({:.6} s after it) and primary {} ({:.6} s before it)",
                    micros_to_seconds(tolerance),
                    after.index,
                    micros_to_seconds(after.delta_us),
                    before.index,
                    micros_to_seconds(before.delta_us),
                ));
                // Equidistant pairs go to the earlier timestamp.
                let (best, other) = if before.delta_us <= after.delta_us {
                    (before, after)
                } else {
                    (after, before)
                };
                [best, other]
                    .into_iter()
                    .find(|c| self.is_available(c.index))
                    .map(|c| c.index)
            }
            (Some(only), None) | (None, Some(only)) => {
                self.is_available(only.index).then_some(only.index)
            }
            (None, None) => None,
        }
    }
}

fn report_progress(
    sink: &dyn DiagnosticsSink,
    position: usize,
    total: usize,
    window_unmatched: usize,
    started: Instant,
) {
    let elapsed = started.elapsed().as_secs_f64();
    let rate = if elapsed > 0.0 {
        position as f64 / elapsed
    } else {
        f64::INFINITY
    };
    let minutes_left = (total - position) as f64 / rate / 60.0;
    sink.info(&format!(
        "{position}/{total} matched, {window_unmatched} unmatched: ~{rate:.3} iterations/sec. About {minutes_left:.1} minutes remain."
    ));
}
