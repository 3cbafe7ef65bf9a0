//! Bound and qualifier parsers, one type per kind of range expression.
//!
//! | Domain            | Bound         | Plus            | Plus when empty |
//! |-------------------|---------------|-----------------|-----------------|
//! | [`Integers`]      | `i64`         | ignored         |                 |
//! | [`Ages`]          | `i64`         | year (`i32`)    | current year    |
//! | [`Dates`]         | date          | ignored         |                 |
//! | [`DateTimes`]     | datetime      | ignored         |                 |
//! | [`DateOffsets`]   | `TimeDelta`   | base date       | today           |
//! | [`DateTimeOffsets`] | `TimeDelta` | base datetime   | now             |
//! | [`Timestamps`]    | `f64` seconds | [`Zone`]        | [`Zone::Local`] |
//!
//! Domains that default their qualifier to "this year", "today" or "now"
//! are built from an explicit instant. Tokens parsed against the same
//! instant share one anchor, so their Segments line up exactly.

use std::sync::OnceLock;

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeDelta,
};
use regex::Regex;

use crate::error::{RangeError, RangeResult};
use crate::expr::Domain;

/// Layout of date bounds and date anchors.
pub const DATE_FORMAT: &str = "%Y.%m.%d";

/// Layout of datetime bounds and datetime anchors.
pub const DATETIME_FORMAT: &str = "%Y.%m.%d+%H:%M:%S";

/// Day counts of the date-offset units.
const DATE_UNITS: &[(&str, i64)] = &[("y", 365), ("m", 30), ("d", 1), ("s", 90), ("w", 7)];

/// Millisecond counts of the datetime-offset units.
const DATETIME_UNITS: &[(&str, i64)] = &[("h", 3_600_000), ("m", 60_000), ("s", 1_000), ("f", 1)];

static DATE_OFFSET_REGEX: OnceLock<Regex> = OnceLock::new();
static DATETIME_OFFSET_REGEX: OnceLock<Regex> = OnceLock::new();
static TIMEZONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn date_offset_regex() -> &'static Regex {
    DATE_OFFSET_REGEX.get_or_init(|| Regex::new(r"(\d+)([ymdsw])").expect("invalid regex pattern"))
}

fn datetime_offset_regex() -> &'static Regex {
    DATETIME_OFFSET_REGEX
        .get_or_init(|| Regex::new(r"(\d+)([hmsf])").expect("invalid regex pattern"))
}

fn timezone_regex() -> &'static Regex {
    TIMEZONE_REGEX.get_or_init(|| {
        Regex::new(r"^([+-])(\d{2}):?(\d{2})(?::?(\d{2})(?:\.(\d{1,6}))?)?$")
            .expect("invalid regex pattern")
    })
}

/// Sums a signed sequence of `<digits><unit>` pairs into base units.
///
/// Every character after the optional leading `-` must belong to a pair.
fn parse_offset(text: &str, regex: &Regex, units: &[(&str, i64)]) -> RangeResult<i64> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let mut matched = String::with_capacity(body.len());
    let mut total: i64 = 0;
    for caps in regex.captures_iter(body) {
        let qty_text = &caps[1];
        let unit = &caps[2];
        matched.push_str(qty_text);
        matched.push_str(unit);

        let qty: i64 = qty_text
            .parse()
            .map_err(|_| RangeError::OutOfRange(format!("offset quantity {}", qty_text)))?;
        let scale = units
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .unwrap_or(0);
        total = qty
            .checked_mul(scale)
            .and_then(|part| total.checked_add(part))
            .ok_or_else(|| RangeError::OutOfRange(format!("offset {}", text)))?;
    }

    if matched != body {
        return Err(RangeError::Duration {
            input: body.to_string(),
            matched,
        });
    }
    Ok(if negative { -total } else { total })
}

fn parse_date(text: &str) -> RangeResult<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| RangeError::Date(text.to_string()))
}

/// Parses `YYYY.MM.DD+HH:MM:SS`, falling back to midnight of `YYYY.MM.DD`.
fn parse_datetime(text: &str) -> RangeResult<NaiveDateTime> {
    if let Ok(value) = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT) {
        return Ok(value);
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| RangeError::DateTime(text.to_string()))
}

fn parse_integer(text: &str) -> RangeResult<i64> {
    text.trim()
        .parse()
        .map_err(|_| RangeError::Integer(text.to_string()))
}

/// Parses a UTC offset written as `±HHMM[SS[.ffffff]]`.
///
/// Colons between the fields and a bare `Z` are also accepted. Fractional
/// seconds are dropped because offsets resolve to whole seconds.
pub fn parse_utc_offset(text: &str) -> RangeResult<FixedOffset> {
    if text.eq_ignore_ascii_case("z") {
        return Ok(chrono::Utc.fix());
    }

    let invalid = || RangeError::Timezone(text.to_string());
    let caps = timezone_regex().captures(text).ok_or_else(invalid)?;
    let field = |i: usize| -> i32 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let (hours, minutes, seconds) = (field(2), field(3), field(4));
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    let magnitude = hours * 3600 + minutes * 60 + seconds;
    let secs = if &caps[1] == "-" { -magnitude } else { magnitude };
    FixedOffset::east_opt(secs).ok_or_else(invalid)
}

/// Plain integer ranges; the qualifier is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integers;

impl Domain for Integers {
    type Bound = i64;
    type Plus = ();

    fn parse_bound(&self, text: &str) -> RangeResult<i64> {
        parse_integer(text)
    }

    fn parse_plus(&self, _text: &str) -> RangeResult<()> {
        Ok(())
    }
}

/// Age ranges anchored at a reference year.
#[derive(Debug, Clone, Copy)]
pub struct Ages {
    pub current_year: i32,
}

impl Ages {
    /// Anchors empty qualifiers at the year of `now`.
    pub fn at(now: &DateTime<Local>) -> Self {
        Self {
            current_year: now.year(),
        }
    }
}

impl Domain for Ages {
    type Bound = i64;
    type Plus = i32;

    fn parse_bound(&self, text: &str) -> RangeResult<i64> {
        parse_integer(text)
    }

    fn parse_plus(&self, text: &str) -> RangeResult<i32> {
        if text.is_empty() {
            return Ok(self.current_year);
        }
        text.trim()
            .parse()
            .map_err(|_| RangeError::Integer(text.to_string()))
    }
}

/// Explicit date ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dates;

impl Domain for Dates {
    type Bound = NaiveDate;
    type Plus = ();

    fn parse_bound(&self, text: &str) -> RangeResult<NaiveDate> {
        parse_date(text)
    }

    fn parse_plus(&self, _text: &str) -> RangeResult<()> {
        Ok(())
    }
}

/// Explicit datetime ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimes;

impl Domain for DateTimes {
    type Bound = NaiveDateTime;
    type Plus = ();

    fn parse_bound(&self, text: &str) -> RangeResult<NaiveDateTime> {
        parse_datetime(text)
    }

    fn parse_plus(&self, _text: &str) -> RangeResult<()> {
        Ok(())
    }
}

/// Day offsets around a base date.
///
/// Units: `y` = 365 days, `s` (season) = 90, `m` = 30, `w` = 7, `d` = 1.
#[derive(Debug, Clone, Copy)]
pub struct DateOffsets {
    pub today: NaiveDate,
}

impl DateOffsets {
    pub fn at(now: &DateTime<Local>) -> Self {
        Self {
            today: now.date_naive(),
        }
    }
}

impl Domain for DateOffsets {
    type Bound = TimeDelta;
    type Plus = NaiveDate;

    fn parse_bound(&self, text: &str) -> RangeResult<TimeDelta> {
        let days = parse_offset(text, date_offset_regex(), DATE_UNITS)?;
        TimeDelta::try_days(days).ok_or_else(|| RangeError::OutOfRange(format!("offset {}", text)))
    }

    fn parse_plus(&self, text: &str) -> RangeResult<NaiveDate> {
        if text.is_empty() {
            Ok(self.today)
        } else {
            parse_date(text)
        }
    }
}

/// Millisecond offsets around a base instant.
///
/// Units: `h` = hour, `m` = minute, `s` = second, `f` = millisecond.
#[derive(Debug, Clone, Copy)]
pub struct DateTimeOffsets {
    pub now: NaiveDateTime,
}

impl DateTimeOffsets {
    pub fn at(now: &DateTime<Local>) -> Self {
        Self {
            now: now.naive_local(),
        }
    }
}

impl Domain for DateTimeOffsets {
    type Bound = TimeDelta;
    type Plus = NaiveDateTime;

    fn parse_bound(&self, text: &str) -> RangeResult<TimeDelta> {
        let millis = parse_offset(text, datetime_offset_regex(), DATETIME_UNITS)?;
        TimeDelta::try_milliseconds(millis)
            .ok_or_else(|| RangeError::OutOfRange(format!("offset {}", text)))
    }

    fn parse_plus(&self, text: &str) -> RangeResult<NaiveDateTime> {
        if text.is_empty() {
            Ok(self.now)
        } else {
            parse_datetime(text)
        }
    }
}

/// Where a timestamp is turned into wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The machine's time zone, with the offset in force at each instant.
    Local,
    Fixed(FixedOffset),
}

/// Unix timestamps in seconds, read in a [`Zone`].
///
/// An empty qualifier means [`Zone::Local`], so instants on either side of
/// a daylight-saving change keep their own offsets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timestamps;

impl Domain for Timestamps {
    type Bound = f64;
    type Plus = Zone;

    fn parse_bound(&self, text: &str) -> RangeResult<f64> {
        text.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| RangeError::Float(text.to_string()))
    }

    fn parse_plus(&self, text: &str) -> RangeResult<Zone> {
        if text.is_empty() {
            Ok(Zone::Local)
        } else {
            parse_utc_offset(text).map(Zone::Fixed)
        }
    }
}
