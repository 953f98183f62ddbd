//! Time collaborators for the geospace toolkit.
//!
//! [`Timestamp`] is the projection the alignment code depends on: the signed
//! elapsed time between two instants as a microsecond scalar. The
//! [`calendar`] module carries the Julian date, day-of-year and MATLAB
//! datenum conversions used when preparing instrument time series.

pub mod calendar;
mod timestamp;

pub use calendar::TimeError;
pub use timestamp::{Timestamp, duration_to_microseconds};
