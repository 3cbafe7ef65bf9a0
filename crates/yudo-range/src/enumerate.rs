//! Date and datetime enumeration front-ends.
//!
//! A front-end gathers the range expressions of one invocation, turns them
//! into Segments, merges them into a [`SegmentSet`] and renders the
//! flattened values after filtering.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::adapter;
use crate::domain::Zone;
use crate::error::RangeResult;
use crate::expr::RangeExpr;
use crate::filter::FullMatch;
use crate::format::{OutputFormat, Temporal};
use crate::segment::{Segment, Step};
use crate::segment_set::SegmentSet;

/// Every date range expression given to one invocation.
#[derive(Debug, Clone, Default)]
pub struct DateRanges {
    pub intervals: Vec<RangeExpr<NaiveDate, ()>>,
    pub ages: Vec<RangeExpr<i64, i32>>,
    pub offsets: Vec<RangeExpr<TimeDelta, NaiveDate>>,
}

impl DateRanges {
    /// Resolves every expression into a one-day-unit Segment.
    pub fn segments(&self) -> RangeResult<Vec<Segment<NaiveDate>>> {
        let mut segments = Vec::with_capacity(
            self.intervals.len() + self.ages.len() + self.offsets.len(),
        );
        for expr in &self.offsets {
            segments.push(adapter::date_offset_segment(expr)?);
        }
        segments.extend(self.intervals.iter().map(adapter::date_segment));
        for expr in &self.ages {
            segments.push(adapter::age_segment(expr)?);
        }
        Ok(segments)
    }
}

/// Every datetime range expression given to one invocation.
#[derive(Debug, Clone)]
pub struct DateTimeRanges {
    pub intervals: Vec<RangeExpr<NaiveDateTime, ()>>,
    pub timestamps: Vec<RangeExpr<f64, Zone>>,
    pub offsets: Vec<RangeExpr<TimeDelta, NaiveDateTime>>,
    /// Step shared by every resulting Segment.
    pub unit: TimeDelta,
}

impl Default for DateTimeRanges {
    fn default() -> Self {
        Self {
            intervals: Vec::new(),
            timestamps: Vec::new(),
            offsets: Vec::new(),
            unit: TimeDelta::seconds(1),
        }
    }
}

impl DateTimeRanges {
    pub fn segments(&self) -> RangeResult<Vec<Segment<NaiveDateTime>>> {
        let mut segments = Vec::with_capacity(
            self.intervals.len() + self.timestamps.len() + self.offsets.len(),
        );
        for expr in &self.offsets {
            segments.push(adapter::datetime_offset_segment(expr, self.unit)?);
        }
        segments.extend(
            self.intervals
                .iter()
                .map(|expr| adapter::datetime_segment(expr, self.unit)),
        );
        for expr in &self.timestamps {
            segments.push(adapter::timestamp_segment(expr, self.unit)?);
        }
        Ok(segments)
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// Merged Segments plus the filters and format that turn them into lines.
///
/// Filters run in a fixed order: value predicates, then formatting, then
/// the full-match pattern against the formatted text.
pub struct Enumeration<T: Step + Temporal> {
    set: SegmentSet<T>,
    format: OutputFormat<T>,
    predicates: Vec<Predicate<T>>,
    pattern: Option<FullMatch>,
}

impl<T: Step + Temporal> Enumeration<T> {
    pub fn new(format: OutputFormat<T>) -> Self {
        Self {
            set: SegmentSet::default(),
            format,
            predicates: Vec::new(),
            pattern: None,
        }
    }

    pub fn merge(&mut self, segments: Vec<Segment<T>>) {
        self.set.merge(segments);
    }

    /// Adds a predicate on the raw value, such as a zodiac-year check.
    pub fn keep(mut self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Requires formatted lines to fully match `pattern`.
    pub fn matching(mut self, pattern: Option<FullMatch>) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn segments(&self) -> &[Segment<T>] {
        self.set.segments()
    }

    /// Lazily renders the filtered, ordered values.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.set
            .iter()
            .filter(move |value| self.predicates.iter().all(|keep| keep(value)))
            .map(move |value| self.format.render(&value))
            .filter(move |line| self.pattern.as_ref().map_or(true, |p| p.is_match(line)))
    }
}

impl<T: Step + Temporal> std::fmt::Debug for Enumeration<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enumeration")
            .field("set", &self.set)
            .field("format", &self.format.pattern())
            .field("predicates", &self.predicates.len())
            .field("pattern", &self.pattern)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DATE_FORMAT;
    use crate::filter::ZodiacFilter;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_ranges_merge_across_kinds() {
        let ranges = DateRanges {
            intervals: vec![RangeExpr {
                lower: date(2024, 1, 1),
                upper: date(2024, 1, 5),
                plus: (),
            }],
            ages: Vec::new(),
            offsets: vec![RangeExpr {
                lower: TimeDelta::days(0),
                upper: TimeDelta::days(3),
                plus: date(2024, 1, 4),
            }],
        };
        let mut enumeration = Enumeration::new(OutputFormat::new(DATE_FORMAT).unwrap());
        enumeration.merge(ranges.segments().unwrap());

        assert_eq!(
            enumeration.segments(),
            &[Segment::new(date(2024, 1, 1), date(2024, 1, 7))]
        );
        assert_eq!(
            enumeration.lines().collect::<Vec<_>>(),
            vec![
                "2024.01.01",
                "2024.01.02",
                "2024.01.03",
                "2024.01.04",
                "2024.01.05",
                "2024.01.06",
            ]
        );
    }

    #[test]
    fn zodiac_then_regex() {
        let ranges = DateRanges {
            ages: vec![RangeExpr {
                lower: 0,
                upper: 3,
                plus: 2025,
            }],
            ..DateRanges::default()
        };
        let zodiacs = ZodiacFilter::new("龙");
        let mut enumeration = Enumeration::new(OutputFormat::new("%Y-%m-%d").unwrap())
            .keep(move |d| zodiacs.admits(d))
            .matching(Some(FullMatch::new(r"\d{4}-02-29").unwrap()));
        enumeration.merge(ranges.segments().unwrap());

        assert_eq!(enumeration.lines().collect::<Vec<_>>(), vec!["2024-02-29"]);
    }

    #[test]
    fn datetime_ranges_share_unit() {
        let base = date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        let ranges = DateTimeRanges {
            intervals: vec![RangeExpr {
                lower: base,
                upper: base + TimeDelta::seconds(2),
                plus: (),
            }],
            timestamps: Vec::new(),
            offsets: vec![RangeExpr {
                lower: TimeDelta::seconds(1),
                upper: TimeDelta::seconds(4),
                plus: base,
            }],
            unit: TimeDelta::seconds(1),
        };
        let mut enumeration = Enumeration::new(OutputFormat::new("%H:%M:%S").unwrap());
        enumeration.merge(ranges.segments().unwrap());
        assert_eq!(
            enumeration.lines().collect::<Vec<_>>(),
            vec!["00:00:00", "00:00:01", "00:00:02", "00:00:03"]
        );
    }

    #[test]
    fn nothing_in_nothing_out() {
        let enumeration: Enumeration<NaiveDate> =
            Enumeration::new(OutputFormat::new(DATE_FORMAT).unwrap());
        assert_eq!(enumeration.lines().count(), 0);
    }
}
