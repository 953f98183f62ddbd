use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use geospace::time::calendar::{
    TimeError, datenum_to_datetime, datetime_to_datenum, datetime_to_day_of_year,
    datetime_to_j2000, datetime_to_julian_date, datetime_to_second_of_day,
    datetime_to_second_of_year, datetimes_from_julian_dates, day_of_year_to_datetime,
    julian_date, julian_date_to_datetime, julian_dates, second_of_day_to_datetime,
    second_of_year_to_datetime,
};
use geospace::time::{Timestamp, duration_to_microseconds};

// Vallado, Fundamentals of Astrodynamics and Applications, 3rd ed.
const VALLADO_3_4_JD: f64 = 2_450_383.097_222_22;
const VALLADO_3_13_JD: f64 = 2_449_877.345_876_2;
const VALLADO_3_12_DOY: f64 = 77.509_722_2;
// MATLAB: datenum(1995,6,8,20,18,3.7037)
const MATLAB_DATENUM: f64 = 728_818.845_876_200_241_037;

fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, us: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_micro_opt(h, mi, s, us))
        .expect("valid datetime")
}

fn seconds_apart(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
    duration_to_microseconds(a - b).abs() / 1.0e6
}

#[test]
fn julian_date_matches_vallado() {
    let jd = datetime_to_julian_date(&datetime(1996, 10, 26, 14, 20, 0, 0)).expect("in range");
    assert!((jd - VALLADO_3_4_JD).abs() < 1.0e-6, "jd = {jd}");

    let direct = julian_date(1996, 10, 26, 14, 20, 0.0).expect("in range");
    assert_eq!(jd, direct);
}

#[test]
fn gregorian_date_matches_vallado() {
    let dt = julian_date_to_datetime(VALLADO_3_13_JD).expect("in range");
    let expected = datetime(1995, 6, 8, 20, 18, 3, 703_700);
    assert!(seconds_apart(dt, expected) < 1.0e-3, "dt = {dt}");
}

#[test]
fn j2000_epoch_is_noon_on_new_years_day() {
    let epoch = datetime_to_j2000(&datetime(2000, 1, 1, 12, 0, 0, 0)).expect("in range");
    assert!(epoch.abs() < 1.0e-9);
    let next_day = datetime_to_j2000(&datetime(2000, 1, 2, 12, 0, 0, 0)).expect("in range");
    assert!((next_day - 1.0).abs() < 1.0e-9);
}

#[test]
fn julian_date_rejects_unsupported_inputs() {
    assert_eq!(
        julian_date(1899, 12, 31, 0, 0, 0.0),
        Err(TimeError::YearOutOfRange { year: 1899 })
    );
    assert_eq!(
        julian_date(2021, 2, 30, 0, 0, 0.0),
        Err(TimeError::InvalidDate {
            year: 2021,
            month: 2,
            day: 30
        })
    );
    assert!(matches!(
        julian_date_to_datetime(f64::NAN),
        Err(TimeError::NonFinite { .. })
    ));
    assert!(matches!(
        julian_date_to_datetime(1.0e30),
        Err(TimeError::OutOfRange { .. })
    ));
}

#[test]
fn day_of_year_matches_vallado() {
    let dt = datetime(2001, 3, 18, 12, 14, 0, 0);
    let doy = datetime_to_day_of_year(&dt);
    assert!((doy - VALLADO_3_12_DOY).abs() < 0.01 / 86_400.0, "doy = {doy}");

    let back = day_of_year_to_datetime(VALLADO_3_12_DOY, 2001).expect("in range");
    assert!(seconds_apart(back, dt) < 0.01, "dt = {back}");
}

#[test]
fn second_of_day_round_trips() {
    let dt = datetime(2000, 1, 1, 13, 22, 45, 98_000);
    let sod = datetime_to_second_of_day(&dt);
    assert!((sod - 48_165.098).abs() < 1.0e-9, "sod = {sod}");

    let back = second_of_day_to_datetime(sod, dt.date()).expect("in range");
    assert_eq!(back, dt);
}

#[test]
fn second_of_year_round_trips() {
    let dt = datetime(2001, 3, 18, 12, 14, 0, 0);
    let soy = datetime_to_second_of_year(&dt);
    assert_eq!(soy, 76.0 * 86_400.0 + 44_040.0);
    assert_eq!(second_of_year_to_datetime(soy, 2001).expect("in range"), dt);
}

#[test]
fn datenum_matches_matlab() {
    let dt = datetime(1995, 6, 8, 20, 18, 3, 703_700);
    let datenum = datetime_to_datenum(&dt);
    assert!(
        (datenum - MATLAB_DATENUM).abs() * 86_400.0 < 1.0e-4,
        "datenum = {datenum}"
    );

    let back = datenum_to_datetime(MATLAB_DATENUM).expect("in range");
    assert!(seconds_apart(back, dt) < 1.0e-4, "dt = {back}");
}

#[test]
fn batch_conversions_follow_scalar_ones() {
    let datetimes = [
        datetime(1996, 10, 26, 14, 20, 0, 0),
        datetime(2020, 1, 1, 0, 0, 0, 500_000),
    ];
    let jds = julian_dates(&datetimes).expect("in range");
    assert_eq!(jds.len(), 2);
    for (jd, dt) in jds.iter().zip(&datetimes) {
        assert_eq!(*jd, datetime_to_julian_date(dt).expect("in range"));
    }

    let back = datetimes_from_julian_dates(&jds).expect("in range");
    for (a, b) in back.iter().zip(&datetimes) {
        assert!(seconds_apart(*a, *b) < 1.0e-3);
    }

    assert!(julian_dates(&[datetime(1850, 1, 1, 0, 0, 0, 0)]).is_err());
}

#[test]
fn durations_convert_to_microseconds() {
    assert_eq!(duration_to_microseconds(TimeDelta::milliseconds(1_500)), 1_500_000.0);
    assert_eq!(duration_to_microseconds(TimeDelta::milliseconds(-1_500)), -1_500_000.0);
    assert_eq!(duration_to_microseconds(TimeDelta::nanoseconds(1_500)), 1.5);
}

#[test]
fn timestamps_project_relative_to_epoch() {
    let epoch = datetime(2020, 1, 1, 0, 0, 0, 0);
    let later = datetime(2020, 1, 1, 0, 0, 1, 250_000);
    assert_eq!(later.micros_since(&epoch), 1_250_000.0);
    assert_eq!(epoch.micros_since(&later), -1_250_000.0);
    assert_eq!(2.5_f64.micros_since(&1.0), 1_500_000.0);
}

#[test]
fn julian_date_range_stops_at_2100() {
    let jd = julian_date(2100, 2, 28, 0, 0, 0.0).expect("last supported year");
    let dt = julian_date_to_datetime(jd).expect("in range");
    assert_eq!(dt, datetime(2100, 2, 28, 0, 0, 0, 0));

    assert_eq!(
        julian_date(2101, 1, 1, 0, 0, 0.0),
        Err(TimeError::YearOutOfRange { year: 2101 })
    );
}
