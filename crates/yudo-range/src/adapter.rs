//! Conversions from parsed range expressions to Segments.
//!
//! Each function resolves the expression's anchor into absolute bounds.
//! Bounds that come out reversed are put in order by [`Segment`] itself.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::domain::Zone;
use crate::error::{RangeError, RangeResult};
use crate::expr::RangeExpr;
use crate::segment::Segment;

/// Birth dates of everyone whose age in the anchor year lies in the range.
///
/// The larger age maps to the earlier year: `(18, 25, 2024)` covers
/// `1999.01.01` up to `2006.12.31`. Years are treated as whole calendar
/// years, so the result ignores where in the year a birthday falls.
pub fn age_segment(expr: &RangeExpr<i64, i32>) -> RangeResult<Segment<NaiveDate>> {
    let oldest = expr.lower.max(expr.upper);
    let youngest = expr.lower.min(expr.upper);
    let first = birth_year(expr.plus, oldest)?;
    let last = birth_year(expr.plus, youngest)?;

    let start = NaiveDate::from_ymd_opt(first, 1, 1)
        .ok_or_else(|| RangeError::OutOfRange(format!("year {}", first)))?;
    let stop = NaiveDate::from_ymd_opt(last, 12, 31)
        .ok_or_else(|| RangeError::OutOfRange(format!("year {}", last)))?;
    Ok(Segment::new(start, stop))
}

fn birth_year(anchor: i32, age: i64) -> RangeResult<i32> {
    i64::from(anchor)
        .checked_sub(age)
        .and_then(|year| i32::try_from(year).ok())
        .ok_or_else(|| RangeError::OutOfRange(format!("age {} in {}", age, anchor)))
}

pub fn date_segment(expr: &RangeExpr<NaiveDate, ()>) -> Segment<NaiveDate> {
    Segment::new(expr.lower, expr.upper)
}

/// Days between `base + lower` and `base + upper`.
pub fn date_offset_segment(expr: &RangeExpr<TimeDelta, NaiveDate>) -> RangeResult<Segment<NaiveDate>> {
    let shift = |delta: TimeDelta| {
        expr.plus
            .checked_add_signed(delta)
            .ok_or_else(|| RangeError::OutOfRange(format!("{} shifted by {}", expr.plus, delta)))
    };
    Ok(Segment::new(shift(expr.lower)?, shift(expr.upper)?))
}

pub fn datetime_segment(
    expr: &RangeExpr<NaiveDateTime, ()>,
    unit: TimeDelta,
) -> Segment<NaiveDateTime> {
    Segment::with_unit(expr.lower, expr.upper, unit)
}

/// Instants between `base + lower` and `base + upper`, stepped by `unit`.
pub fn datetime_offset_segment(
    expr: &RangeExpr<TimeDelta, NaiveDateTime>,
    unit: TimeDelta,
) -> RangeResult<Segment<NaiveDateTime>> {
    let shift = |delta: TimeDelta| {
        expr.plus
            .checked_add_signed(delta)
            .ok_or_else(|| RangeError::OutOfRange(format!("{} shifted by {}", expr.plus, delta)))
    };
    Ok(Segment::with_unit(shift(expr.lower)?, shift(expr.upper)?, unit))
}

/// Wall-clock times, in the expression's zone, of two Unix timestamps.
pub fn timestamp_segment(
    expr: &RangeExpr<f64, Zone>,
    unit: TimeDelta,
) -> RangeResult<Segment<NaiveDateTime>> {
    let start = wall_clock(expr.lower, expr.plus)?;
    let stop = wall_clock(expr.upper, expr.plus)?;
    Ok(Segment::with_unit(start, stop, unit))
}

fn wall_clock(timestamp: f64, zone: Zone) -> RangeResult<NaiveDateTime> {
    let out_of_range = || RangeError::OutOfRange(format!("timestamp {}", timestamp));
    // Beyond ±1e14 seconds chrono cannot represent the instant anyway.
    if !timestamp.is_finite() || timestamp.abs() > 1e14 {
        return Err(out_of_range());
    }

    let secs = timestamp.floor();
    let nanos = (((timestamp - secs) * 1e9).round() as u32).min(999_999_999);
    let utc: DateTime<Utc> =
        DateTime::from_timestamp(secs as i64, nanos).ok_or_else(out_of_range)?;
    Ok(match zone {
        Zone::Local => utc.with_timezone(&Local).naive_local(),
        Zone::Fixed(offset) => utc.with_timezone(&offset).naive_local(),
    })
}

pub fn integer_segment(expr: &RangeExpr<i64, ()>) -> Segment<i64> {
    Segment::new(expr.lower, expr.upper)
}
