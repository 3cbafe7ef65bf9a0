//! strftime-style output formats, validated before any enumeration runs.

use std::fmt::Write;
use std::marker::PhantomData;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{RangeError, RangeResult};

/// A temporal value that can be rendered through a strftime pattern.
pub trait Temporal: Sized {
    /// Known-good value used to trial a pattern.
    fn reference() -> Self;

    fn write_formatted(&self, pattern: &str, out: &mut String) -> std::fmt::Result;
}

impl Temporal for NaiveDate {
    fn reference() -> Self {
        NaiveDate::from_ymd_opt(1949, 10, 1).unwrap_or_default()
    }

    fn write_formatted(&self, pattern: &str, out: &mut String) -> std::fmt::Result {
        write!(out, "{}", self.format(pattern))
    }
}

impl Temporal for NaiveDateTime {
    fn reference() -> Self {
        NaiveDate::reference()
            .and_hms_opt(12, 0, 0)
            .unwrap_or_default()
    }

    fn write_formatted(&self, pattern: &str, out: &mut String) -> std::fmt::Result {
        write!(out, "{}", self.format(pattern))
    }
}

/// A pattern known to render every value of type `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormat<T> {
    pattern: String,
    _value: PhantomData<fn(&T)>,
}

impl<T: Temporal> OutputFormat<T> {
    /// Checks `pattern` by rendering the reference value once.
    ///
    /// Unknown specifiers and fields the value type lacks (a time field on a
    /// plain date, for instance) are both rejected here.
    pub fn new(pattern: impl Into<String>) -> RangeResult<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(RangeError::Format(pattern));
        }

        let mut trial = String::new();
        if T::reference().write_formatted(&pattern, &mut trial).is_err() {
            return Err(RangeError::Format(pattern));
        }

        Ok(Self {
            pattern,
            _value: PhantomData,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn render(&self, value: &T) -> String {
        let mut out = String::new();
        // Cannot fail: the same pattern already rendered the reference value.
        let _ = value.write_formatted(&self.pattern, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_format_renders() {
        let format = OutputFormat::<NaiveDate>::new("%Y%m%d").unwrap();
        let value = NaiveDate::from_ymd_opt(2006, 1, 2).unwrap();
        assert_eq!(format.render(&value), "20060102");
    }

    #[test]
    fn unknown_specifier_is_rejected() {
        assert_eq!(
            OutputFormat::<NaiveDate>::new("%Q").unwrap_err(),
            RangeError::Format("%Q".to_string())
        );
    }

    #[test]
    fn time_fields_need_a_datetime() {
        assert!(OutputFormat::<NaiveDate>::new("%Y %H").is_err());
        assert!(OutputFormat::<NaiveDateTime>::new("%Y %H").is_ok());
    }

    #[test]
    fn datetime_format_renders_millis() {
        let format = OutputFormat::<NaiveDateTime>::new("%H:%M:%S%.3f").unwrap();
        let value = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(8, 0, 1, 250)
            .unwrap();
        assert_eq!(format.render(&value), "08:00:01.250");
    }
}
