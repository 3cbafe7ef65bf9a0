//! clap value parsers for range-expression options.
//!
//! Each parser reads one `A[~B][,P]` token in its domain. clap calls them
//! once per token, so relative anchors (this year, today, now) all come from
//! [`anchor`], which reads the clock once per process.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta};
use std::sync::OnceLock;
use yudo_range::domain::{
    Ages, DateOffsets, DateTimeOffsets, DateTimes, Dates, Integers, Timestamps, Zone,
};
use yudo_range::{Domain, RangeExpr, RangeResult};

static ANCHOR: OnceLock<DateTime<Local>> = OnceLock::new();

/// The instant behind every defaulted anchor of this process.
pub fn anchor() -> &'static DateTime<Local> {
    ANCHOR.get_or_init(Local::now)
}

pub type AgeRange = RangeExpr<i64, i32>;
pub type DateRange = RangeExpr<NaiveDate, ()>;
pub type DateOffsetRange = RangeExpr<TimeDelta, NaiveDate>;
pub type DateTimeRange = RangeExpr<NaiveDateTime, ()>;
pub type TimestampRange = RangeExpr<f64, Zone>;
pub type DateTimeOffsetRange = RangeExpr<TimeDelta, NaiveDateTime>;
pub type IntegerRange = RangeExpr<i64, ()>;

pub fn age(token: &str) -> RangeResult<AgeRange> {
    Ages::at(anchor()).parse(token)
}

pub fn date(token: &str) -> RangeResult<DateRange> {
    Dates.parse(token)
}

pub fn date_offset(token: &str) -> RangeResult<DateOffsetRange> {
    DateOffsets::at(anchor()).parse(token)
}

pub fn datetime(token: &str) -> RangeResult<DateTimeRange> {
    DateTimes.parse(token)
}

pub fn timestamp(token: &str) -> RangeResult<TimestampRange> {
    Timestamps.parse(token)
}

pub fn datetime_offset(token: &str) -> RangeResult<DateTimeOffsetRange> {
    DateTimeOffsets::at(anchor()).parse(token)
}

pub fn integer(token: &str) -> RangeResult<IntegerRange> {
    Integers.parse(token)
}
