//! Range enumeration for yudo.
//!
//! This crate turns compact range expressions such as `18~25,2024`,
//! `-3d~5d` or `100000~200000` into merged, deduplicated, ordered sequences
//! of dates, datetimes or integers.
//!
//! # Overview
//!
//! - A token is split by the `A[~B][,P]` grammar ([`expr`]) and its parts
//!   are interpreted by a [`Domain`] ([`domain`]).
//! - The parsed [`RangeExpr`] becomes a [`Segment`] once its anchor is
//!   resolved ([`adapter`]).
//! - Segments are merged into a [`SegmentSet`], which keeps them sorted,
//!   disjoint and never unit-adjacent.
//! - Iterating the set yields every value once, in ascending order.
//!
//! # Example
//!
//! ```
//! use yudo_range::domain::Ages;
//! use yudo_range::{adapter, Domain, SegmentSet};
//!
//! let ages = Ages { current_year: 2024 };
//! let expr = ages.parse("18").unwrap();
//! let set = SegmentSet::new(vec![adapter::age_segment(&expr).unwrap()]);
//!
//! let births: Vec<_> = set.iter().collect();
//! assert_eq!(births.first().unwrap().to_string(), "2006-01-01");
//! assert_eq!(births.last().unwrap().to_string(), "2006-12-30");
//! ```
//!
//! Iteration is half-open: a Segment's `stop` bound is never produced.

pub mod adapter;
pub mod domain;
pub mod enumerate;
pub mod error;
pub mod expr;
pub mod filter;
pub mod format;
pub mod segment;
pub mod segment_set;

pub use domain::Zone;
pub use enumerate::{DateRanges, DateTimeRanges, Enumeration};
pub use error::{RangeError, RangeResult};
pub use expr::{Domain, RangeExpr};
pub use filter::{FullMatch, TitleFilter, ZodiacFilter};
pub use format::{OutputFormat, Temporal};
pub use segment::{Segment, SegmentIter, Step};
pub use segment_set::{normalize, SegmentSet};
