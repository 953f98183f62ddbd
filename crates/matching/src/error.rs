use thiserror::Error;

/// Input contract violations that abort a matching call before any work is done.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("tolerance must be a finite, non-negative number of microseconds (got {0})")]
    InvalidTolerance(f64),
    #[error("primary timestamp at position {position} is not finite")]
    NonFinitePrimary { position: usize },
    #[error("primary series is not sorted ascending: position {position} precedes its predecessor")]
    UnsortedPrimary { position: usize },
}

/// Why a single query element could not be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The timestamp projected to NaN or infinity.
    NonFiniteTimestamp,
}

/// A query element that failed evaluation. Distinct from "no match".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementFailure {
    pub position: usize,
    pub kind: FailureKind,
}

impl std::fmt::Display for ElementFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            FailureKind::NonFiniteTimestamp => {
                write!(f, "query element {} has a non-finite timestamp", self.position)
            }
        }
    }
}
