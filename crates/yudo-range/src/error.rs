//! Error types for range parsing and enumeration.

use thiserror::Error;

/// Error raised while parsing a range expression or building its Segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// An offset string left characters that no `<digits><unit>` pair matched.
    #[error("offset '{input}' only parses as '{matched}'")]
    Duration {
        /// The offset text without its sign.
        input: String,
        /// The concatenation of every recognized `<digits><unit>` pair.
        matched: String,
    },

    /// A date bound did not match `YYYY.MM.DD`.
    #[error("'{0}' is not a date, expected YYYY.MM.DD")]
    Date(String),

    /// A datetime bound matched neither `YYYY.MM.DD+HH:MM:SS` nor `YYYY.MM.DD`.
    #[error("'{0}' is not a datetime, expected YYYY.MM.DD[+HH:MM:SS]")]
    DateTime(String),

    /// An integer bound or anchor year was not a base-10 integer.
    #[error("'{0}' is not an integer")]
    Integer(String),

    /// A timestamp bound was not a decimal number.
    #[error("'{0}' is not a number")]
    Float(String),

    /// A timezone suffix did not match `±HHMM[SS[.ffffff]]`.
    #[error("'{0}' is not a UTC offset, expected ±HHMM[SS[.ffffff]]")]
    Timezone(String),

    /// Arithmetic on a bound left the representable calendar.
    #[error("{0} is out of range")]
    OutOfRange(String),

    /// The output format string cannot render the value type.
    #[error("invalid output format '{0}'")]
    Format(String),

    /// A filter pattern failed to compile.
    #[error("invalid regular expression: {0}")]
    Regex(String),
}

/// Result alias used throughout the crate.
pub type RangeResult<T> = Result<T, RangeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_message_names_both_texts() {
        let err = RangeError::Duration {
            input: "3x".to_string(),
            matched: String::new(),
        };
        assert_eq!(err.to_string(), "offset '3x' only parses as ''");
    }

    #[test]
    fn date_message_shows_expected_layout() {
        let err = RangeError::Date("2020-01-01".to_string());
        assert!(err.to_string().contains("YYYY.MM.DD"));
    }
}
