//! Closed ranges of steppable values.
//!
//! A [`Segment`] is stored as a `(start, stop)` pair plus a step `unit`, but
//! it is *iterated* half-open: the sequence begins at `start` and advances by
//! `unit` while the value stays strictly below `stop`.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::fmt;

/// A totally ordered value that can advance by a fixed unit.
pub trait Step: Copy + Ord + fmt::Debug {
    /// Distance between two consecutive enumerated values.
    type Unit: Copy + Eq + fmt::Debug;

    /// The unit used when a Segment is built without an explicit one.
    fn default_unit() -> Self::Unit;

    /// Returns `self + unit`, or `None` when the result is not representable.
    fn forward(self, unit: Self::Unit) -> Option<Self>;
}

impl Step for i64 {
    type Unit = i64;

    fn default_unit() -> i64 {
        1
    }

    fn forward(self, unit: i64) -> Option<Self> {
        self.checked_add(unit)
    }
}

impl Step for NaiveDate {
    type Unit = TimeDelta;

    fn default_unit() -> TimeDelta {
        TimeDelta::days(1)
    }

    fn forward(self, unit: TimeDelta) -> Option<Self> {
        self.checked_add_signed(unit)
    }
}

impl Step for NaiveDateTime {
    type Unit = TimeDelta;

    fn default_unit() -> TimeDelta {
        TimeDelta::seconds(1)
    }

    fn forward(self, unit: TimeDelta) -> Option<Self> {
        self.checked_add_signed(unit)
    }
}

/// An immutable range `start..stop` enumerated in steps of `unit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<T: Step> {
    start: T,
    stop: T,
    unit: T::Unit,
}

impl<T: Step> Segment<T> {
    /// Creates a Segment with the value type's default unit.
    ///
    /// Bounds given in reverse order are swapped.
    pub fn new(start: T, stop: T) -> Self {
        Self::with_unit(start, stop, T::default_unit())
    }

    /// Creates a Segment stepping by `unit`.
    ///
    /// Bounds given in reverse order are swapped.
    pub fn with_unit(start: T, stop: T, unit: T::Unit) -> Self {
        if stop < start {
            Self {
                start: stop,
                stop: start,
                unit,
            }
        } else {
            Self { start, stop, unit }
        }
    }

    /// The lower bound, always the first enumerated value.
    pub fn start(&self) -> T {
        self.start
    }

    /// The upper bound. Never enumerated.
    pub fn stop(&self) -> T {
        self.stop
    }

    pub fn unit(&self) -> T::Unit {
        self.unit
    }

    /// Merges two Segments that overlap or sit less than one unit apart.
    ///
    /// Returns `None` when the gap between them is at least one unit. The
    /// merged Segment keeps the unit of whichever operand starts first.
    pub fn union(&self, other: &Self) -> Option<Self> {
        let (first, second) = if (self.start, self.stop) <= (other.start, other.stop) {
            (self, other)
        } else {
            (other, self)
        };

        // `None` means `first.stop + unit` overflowed, so nothing lies beyond it.
        if let Some(reach) = first.stop.forward(first.unit) {
            if second.start >= reach {
                return None;
            }
        }

        Some(Self {
            start: first.start,
            stop: first.stop.max(second.stop),
            unit: first.unit,
        })
    }

    /// Iterates `start, start + unit, ...` while the value is below `stop`.
    pub fn iter(&self) -> SegmentIter<T> {
        SegmentIter {
            next: Some(self.start),
            stop: self.stop,
            unit: self.unit,
        }
    }
}

impl<'a, T: Step> IntoIterator for &'a Segment<T> {
    type Item = T;
    type IntoIter = SegmentIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of a [`Segment`].
#[derive(Debug, Clone)]
pub struct SegmentIter<T: Step> {
    next: Option<T>,
    stop: T,
    unit: T::Unit,
}

impl<T: Step> Iterator for SegmentIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next?;
        if current >= self.stop {
            self.next = None;
            return None;
        }
        // A unit that fails to move forward ends the sequence.
        self.next = current.forward(self.unit).filter(|n| *n > current);
        Some(current)
    }
}

impl<T: Step> std::iter::FusedIterator for SegmentIter<T> {}
