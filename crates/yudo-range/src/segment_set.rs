//! Normalized unions of Segments.

use crate::segment::{Segment, SegmentIter, Step};

/// Sorts `segments` by `(start, stop)` and coalesces every run that
/// overlaps or sits less than one unit apart.
///
/// The result is sorted, pairwise disjoint and never unit-adjacent.
pub fn normalize<T: Step>(mut segments: Vec<Segment<T>>) -> Vec<Segment<T>> {
    segments.sort_by(|a, b| (a.start(), a.stop()).cmp(&(b.start(), b.stop())));

    let mut sorted = segments.into_iter();
    let Some(first) = sorted.next() else {
        return Vec::new();
    };

    let (mut merged, last) = sorted.fold((Vec::new(), first), |(mut done, anchor), next| {
        match anchor.union(&next) {
            Some(union) => (done, union),
            None => {
                done.push(anchor);
                (done, next)
            }
        }
    });
    merged.push(last);
    merged
}

/// The union of every Segment merged into it, kept normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSet<T: Step> {
    segments: Vec<Segment<T>>,
}

impl<T: Step> Default for SegmentSet<T> {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
        }
    }
}

impl<T: Step> SegmentSet<T> {
    /// Builds a set from Segments that may overlap or arrive unsorted.
    pub fn new(segments: Vec<Segment<T>>) -> Self {
        Self {
            segments: normalize(segments),
        }
    }

    /// Merges `segments` into the set and renormalizes.
    pub fn merge(&mut self, segments: Vec<Segment<T>>) {
        let mut combined = std::mem::take(&mut self.segments);
        combined.extend(segments);
        self.segments = normalize(combined);
    }

    /// The stored Segments in ascending order.
    pub fn segments(&self) -> &[Segment<T>] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Flattens every Segment into one strictly ascending sequence.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            segments: self.segments.iter(),
            current: None,
        }
    }
}

impl<T: Step> FromIterator<Segment<T>> for SegmentSet<T> {
    fn from_iter<I: IntoIterator<Item = Segment<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: Step> Extend<Segment<T>> for SegmentSet<T> {
    fn extend<I: IntoIterator<Item = Segment<T>>>(&mut self, iter: I) {
        self.merge(iter.into_iter().collect());
    }
}

impl<'a, T: Step> IntoIterator for &'a SegmentSet<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Flattening iterator over a [`SegmentSet`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T: Step> {
    segments: std::slice::Iter<'a, Segment<T>>,
    current: Option<SegmentIter<T>>,
}

impl<'a, T: Step> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(value) = self.current.as_mut().and_then(Iterator::next) {
                return Some(value);
            }
            self.current = Some(self.segments.next()?.iter());
        }
    }
}
