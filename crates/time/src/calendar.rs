//! Calendar and Julian date conversions on UTC `NaiveDateTime`s.
//!
//! Leap seconds are not modelled; every day is 86 400 s long.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use geospace_core::constants::{
    DATENUM_ORDINAL_OFFSET, JD_J2000, JD_UNIX_EPOCH, SECONDS_PER_DAY,
};
use geospace_core::time::{days_to_seconds, seconds_to_days};
use geospace_core::units::seconds_to_micros;
use thiserror::Error;

/// Errors raised by calendar conversions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimeError {
    #[error("year {year} outside the supported range 1900..=2100")]
    YearOutOfRange { year: i32 },
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("{what} must be finite (got {value})")]
    NonFinite { what: &'static str, value: f64 },
    #[error("{what} {value} lies outside the representable calendar range")]
    OutOfRange { what: &'static str, value: f64 },
}

/// Julian date of a UTC calendar instant (Vallado, algorithm 14).
///
/// Valid for 1900 through 2100; the formula has no century leap-year rule.
/// `second` may carry a fractional part.
pub fn julian_date(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
) -> Result<f64, TimeError> {
    if !(1900..=2100).contains(&year) {
        return Err(TimeError::YearOutOfRange { year });
    }
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return Err(TimeError::InvalidDate { year, month, day });
    }
    if !second.is_finite() {
        return Err(TimeError::NonFinite {
            what: "second",
            value: second,
        });
    }

    let y = f64::from(year);
    let m = f64::from(month);
    let t1 = 367.0 * y;
    let t2 = (7.0 * (y + ((m + 9.0) / 12.0).floor()) / 4.0).floor();
    let t3 = (275.0 * m / 9.0).floor();
    let t4 = f64::from(day) + 1_721_013.5;
    let t5 = ((second / 60.0 + f64::from(minute)) / 60.0 + f64::from(hour)) / 24.0;
    Ok(t1 - t2 + t3 + t4 + t5)
}

/// Julian date of a datetime, including its sub-second part.
pub fn datetime_to_julian_date(dt: &NaiveDateTime) -> Result<f64, TimeError> {
    julian_date(
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        f64::from(dt.second()) + f64::from(dt.nanosecond()) * 1.0e-9,
    )
}

/// Datetime for a Julian date, rounded to the nearest microsecond.
pub fn julian_date_to_datetime(jd: f64) -> Result<NaiveDateTime, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::NonFinite {
            what: "julian date",
            value: jd,
        });
    }
    offset_by_days(unix_epoch(), jd - JD_UNIX_EPOCH, "julian date", jd)
}

/// Days elapsed since the J2000 epoch (noon, 2000-01-01).
pub fn datetime_to_j2000(dt: &NaiveDateTime) -> Result<f64, TimeError> {
    Ok(datetime_to_julian_date(dt)? - JD_J2000)
}

/// Fractional day of year; midnight on January 1st is `1.0`.
pub fn datetime_to_day_of_year(dt: &NaiveDateTime) -> f64 {
    f64::from(dt.ordinal()) + seconds_to_days(datetime_to_second_of_day(dt))
}

pub fn day_of_year_to_datetime(doy: f64, year: i32) -> Result<NaiveDateTime, TimeError> {
    if !doy.is_finite() {
        return Err(TimeError::NonFinite {
            what: "day of year",
            value: doy,
        });
    }
    offset_by_days(start_of_year(year)?, doy - 1.0, "day of year", doy)
}

/// Seconds elapsed since midnight, with sub-second precision.
pub fn datetime_to_second_of_day(dt: &NaiveDateTime) -> f64 {
    f64::from(dt.num_seconds_from_midnight()) + f64::from(dt.nanosecond()) * 1.0e-9
}

pub fn second_of_day_to_datetime(sod: f64, date: NaiveDate) -> Result<NaiveDateTime, TimeError> {
    if !sod.is_finite() {
        return Err(TimeError::NonFinite {
            what: "second of day",
            value: sod,
        });
    }
    offset_by_seconds(date.and_time(NaiveTime::MIN), sod, "second of day", sod)
}

/// Seconds elapsed since midnight on January 1st of the datetime's year.
pub fn datetime_to_second_of_year(dt: &NaiveDateTime) -> f64 {
    f64::from(dt.ordinal0()) * SECONDS_PER_DAY + datetime_to_second_of_day(dt)
}

pub fn second_of_year_to_datetime(soy: f64, year: i32) -> Result<NaiveDateTime, TimeError> {
    if !soy.is_finite() {
        return Err(TimeError::NonFinite {
            what: "second of year",
            value: soy,
        });
    }
    offset_by_seconds(start_of_year(year)?, soy, "second of year", soy)
}

/// MATLAB serial day number (`datenum`); day 1 is 0000-01-01.
pub fn datetime_to_datenum(dt: &NaiveDateTime) -> f64 {
    f64::from(dt.num_days_from_ce() + DATENUM_ORDINAL_OFFSET)
        + seconds_to_days(datetime_to_second_of_day(dt))
}

pub fn datenum_to_datetime(datenum: f64) -> Result<NaiveDateTime, TimeError> {
    if !datenum.is_finite() {
        return Err(TimeError::NonFinite {
            what: "datenum",
            value: datenum,
        });
    }
    let whole = datenum.floor();
    let out_of_range = TimeError::OutOfRange {
        what: "datenum",
        value: datenum,
    };
    if whole < f64::from(i32::MIN) || whole > f64::from(i32::MAX) {
        return Err(out_of_range);
    }
    let ordinal = (whole as i32)
        .checked_sub(DATENUM_ORDINAL_OFFSET)
        .ok_or_else(|| out_of_range.clone())?;
    let date = NaiveDate::from_num_days_from_ce_opt(ordinal).ok_or(out_of_range)?;
    offset_by_days(
        date.and_time(NaiveTime::MIN),
        datenum - whole,
        "datenum",
        datenum,
    )
}

/// Julian dates for a batch of datetimes; fails on the first invalid entry.
pub fn julian_dates(datetimes: &[NaiveDateTime]) -> Result<Vec<f64>, TimeError> {
    datetimes.iter().map(datetime_to_julian_date).collect()
}

/// Datetimes for a batch of Julian dates; fails on the first invalid entry.
pub fn datetimes_from_julian_dates(jds: &[f64]) -> Result<Vec<NaiveDateTime>, TimeError> {
    jds.iter().copied().map(julian_date_to_datetime).collect()
}

fn unix_epoch() -> NaiveDateTime {
    // 1970-01-01T00:00:00
    NaiveDateTime::default()
}

fn start_of_year(year: i32) -> Result<NaiveDateTime, TimeError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or(TimeError::InvalidDate {
            year,
            month: 1,
            day: 1,
        })
}

fn offset_by_days(
    base: NaiveDateTime,
    days: f64,
    what: &'static str,
    value: f64,
) -> Result<NaiveDateTime, TimeError> {
    offset_by_seconds(base, days_to_seconds(days), what, value)
}

fn offset_by_seconds(
    base: NaiveDateTime,
    seconds: f64,
    what: &'static str,
    value: f64,
) -> Result<NaiveDateTime, TimeError> {
    let micros = seconds_to_micros(seconds).round();
    // i64::MAX is not exactly representable; stay strictly inside it.
    if micros.abs() >= 9.0e18 {
        return Err(TimeError::OutOfRange { what, value });
    }
    base.checked_add_signed(TimeDelta::microseconds(micros as i64))
        .ok_or(TimeError::OutOfRange { what, value })
}
