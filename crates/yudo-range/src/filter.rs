//! Post-filters applied to enumerated values.

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::error::{RangeError, RangeResult};

/// The twelve-year animal cycle, starting at the Rat.
pub const ZODIACS: [char; 12] = [
    '鼠', '牛', '虎', '兔', '龙', '蛇', '马', '羊', '猴', '鸡', '狗', '猪',
];

/// Animal of a Gregorian year (4 CE was a Rat year).
pub fn zodiac_of(year: i32) -> char {
    ZODIACS[(year - 4).rem_euclid(12) as usize]
}

/// Keeps dates whose Gregorian year belongs to one of the allowed animals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZodiacFilter {
    allowed: Vec<char>,
}

impl ZodiacFilter {
    /// Builds a filter from a string of animal characters such as `"虎兔"`.
    pub fn new(animals: &str) -> Self {
        Self {
            allowed: animals.chars().filter(|c| ZODIACS.contains(c)).collect(),
        }
    }

    pub fn admits(&self, date: &NaiveDate) -> bool {
        self.allowed.contains(&zodiac_of(date.year()))
    }
}

/// A regular expression that must match a whole string.
#[derive(Debug, Clone)]
pub struct FullMatch {
    regex: Regex,
}

impl FullMatch {
    pub fn new(pattern: &str) -> RangeResult<Self> {
        Regex::new(&format!("^(?:{})$", pattern))
            .map(|regex| Self { regex })
            .map_err(|e| RangeError::Regex(e.to_string()))
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Keeps entries whose title contains a query substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFilter {
    needle: String,
}

impl TitleFilter {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }

    pub fn admits(&self, title: &str) -> bool {
        title.contains(self.needle.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zodiac_cycle() {
        assert_eq!(zodiac_of(2020), '鼠');
        assert_eq!(zodiac_of(2022), '虎');
        assert_eq!(zodiac_of(2024), '龙');
        assert_eq!(zodiac_of(1949), '牛');
        assert_eq!(zodiac_of(-8), '鼠');
    }

    #[test]
    fn zodiac_filter_checks_year() {
        let filter = ZodiacFilter::new("虎兔");
        assert!(filter.admits(&NaiveDate::from_ymd_opt(2022, 5, 1).unwrap()));
        assert!(filter.admits(&NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()));
        assert!(!filter.admits(&NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
    }

    #[test]
    fn unknown_animals_are_ignored() {
        let filter = ZodiacFilter::new("cat");
        assert!(!filter.admits(&NaiveDate::from_ymd_opt(2022, 5, 1).unwrap()));
    }

    #[test]
    fn full_match_is_anchored() {
        let pattern = FullMatch::new(r"2024\.0[1-3]\.\d+").unwrap();
        assert!(pattern.is_match("2024.02.11"));
        assert!(!pattern.is_match("x2024.02.11"));
        assert!(!pattern.is_match("2024.02.11x"));

        let alternation = FullMatch::new("a|b").unwrap();
        assert!(!alternation.is_match("ab"));
    }

    #[test]
    fn bad_regex_is_reported() {
        assert!(matches!(FullMatch::new("("), Err(RangeError::Regex(_))));
    }

    #[test]
    fn title_filter_uses_substring() {
        let filter = TitleFilter::new("海");
        assert!(filter.admits("上海市"));
        assert!(!filter.admits("北京市"));
    }
}
