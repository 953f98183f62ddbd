//! Nearest-timestamp alignment for merging instrument time series.
//!
//! For every timestamp in a query series, [`match_times`] finds the closest
//! entry of a sorted primary series that lies strictly within a tolerance:
//!
//! * exact hits win regardless of tolerance,
//! * when both neighbours qualify the smaller offset wins, ties going to the
//!   earlier timestamp,
//! * unless duplicates are allowed, each primary index is handed out once;
//!   a consumed neighbour is skipped in favour of the other one.
//!
//! Timestamps are projected onto a shared microsecond axis anchored at the
//! first primary timestamp ([`TimestampIndex`]), after which each lookup is a
//! binary search.

pub mod diagnostics;
mod error;
mod index;
mod matcher;

pub use diagnostics::{DiagnosticsSink, RecordingSink, TracingSink};
pub use error::{ElementFailure, FailureKind, MatchError};
pub use index::TimestampIndex;
pub use matcher::{
    DEFAULT_PROGRESS_INTERVAL, DEFAULT_TOLERANCE_US, MatchOptions, MatchOutcome, MatchSummary,
    match_indexed,
};

use geospace_time::Timestamp;

/// Match `query` against the ascending `primary` series, logging through `tracing`.
pub fn match_times<T: Timestamp>(
    primary: &[T],
    query: &[T],
    options: &MatchOptions,
) -> Result<MatchOutcome, MatchError> {
    match_times_with_sink(primary, query, options, &TracingSink)
}

/// Match `query` against the ascending `primary` series, reporting to `sink`.
pub fn match_times_with_sink<T: Timestamp>(
    primary: &[T],
    query: &[T],
    options: &MatchOptions,
    sink: &dyn DiagnosticsSink,
) -> Result<MatchOutcome, MatchError> {
    options.validate()?;

    // Without a primary series any finite query element can anchor the axis.
    let epoch = primary
        .first()
        .or_else(|| query.iter().find(|t| t.micros_since(t).is_finite()));
    let (primary_index, query_index) = match epoch {
        Some(epoch) => (
            TimestampIndex::build(primary, epoch),
            TimestampIndex::build(query, epoch),
        ),
        None => (
            TimestampIndex::from_offsets(Vec::new()),
            TimestampIndex::from_offsets(vec![f64::NAN; query.len()]),
        ),
    };

    match_indexed(&primary_index, &query_index, options, sink)
}
