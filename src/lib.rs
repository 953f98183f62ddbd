//! Geospace data analysis toolkit.
//!
//! The façade re-exports the workspace crates: time conversions, timestamp
//! matching, configuration and export. The `match_times` binary and other
//! front-ends share this library.

pub mod series;

pub use geospace_config as config;
pub use geospace_core::{constants, units};
pub use geospace_export as export;
pub use geospace_matching as matching;
pub use geospace_time as time;

pub use geospace_matching::{MatchOptions, MatchOutcome, match_times};

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
