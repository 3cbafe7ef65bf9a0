//! The `A[~B][,P]` range-expression grammar.
//!
//! A token is split on its first `,` into the range part and the "plus"
//! qualifier `P`, then the range part is split on its first `~` into the
//! bounds `A` and `B`. A missing or empty `B` repeats `A`, so `"5"`,
//! `"5~"` and `"5~5"` all describe the same single-point range.
//!
//! The bounds and the qualifier are interpreted by a [`Domain`], chosen by
//! the caller when it builds the parser.

use crate::error::RangeResult;

/// A parsed range expression, consumed once it has become a Segment.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpr<B, P> {
    pub lower: B,
    pub upper: B,
    pub plus: P,
}

/// How one kind of range expression interprets its text.
pub trait Domain {
    /// Value type of `A` and `B`.
    type Bound;
    /// Value type of the `P` qualifier.
    type Plus;

    fn parse_bound(&self, text: &str) -> RangeResult<Self::Bound>;

    /// Parses `P`; receives an empty string when the token has none.
    fn parse_plus(&self, text: &str) -> RangeResult<Self::Plus>;

    /// Parses a complete token with this domain.
    fn parse(&self, token: &str) -> RangeResult<RangeExpr<Self::Bound, Self::Plus>> {
        let (lower, upper, plus) = split(token);
        Ok(RangeExpr {
            lower: self.parse_bound(lower)?,
            upper: self.parse_bound(upper)?,
            plus: self.parse_plus(plus)?,
        })
    }
}

/// Splits a token into its raw `(A, B, P)` texts.
pub fn split(token: &str) -> (&str, &str, &str) {
    let (range, plus) = token.split_once(',').unwrap_or((token, ""));
    let (lower, upper) = range.split_once('~').unwrap_or((range, ""));
    let upper = if upper.is_empty() { lower } else { upper };
    (lower, upper, plus)
}
