//! Reporting period keys.
//!
//! A [`Period`] is the six-digit `YYYYMM` token found at the start of an
//! audited file name. Tokens are kept exactly as observed: a month of `00` or
//! `13` is a valid token even though it is not a calendar month. Callers that
//! care can ask [`Period::is_calendar_month`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors produced when a `YYYYMM` token cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    /// The token is not exactly six characters long.
    #[error("period token must be 6 digits, got {0} characters")]
    InvalidLength(usize),

    /// The token contains something other than ASCII digits.
    #[error("period token '{0}' contains non-digit characters")]
    NonDigit(String),

    /// The year does not fit in four digits.
    #[error("year {0} does not fit in a 4-digit period token")]
    YearOutOfRange(u16),

    /// The month does not fit in two digits.
    #[error("month {0} does not fit in a 2-digit period token")]
    MonthOutOfRange(u8),
}

/// A year+month reporting period such as `202401`.
///
/// Ordering compares year then month, which matches the lexicographic order
/// of the zero-padded token.
///
/// # Examples
///
/// ```
/// use dg_core::Period;
///
/// let jan: Period = "202401".parse().unwrap();
/// let dec = Period::new(2023, 12).unwrap();
///
/// assert!(dec < jan);
/// assert_eq!(jan.to_string(), "202401");
/// assert_eq!(dec.next_calendar_month(), Some(jan));
/// assert_eq!(jan.formatted(), "2024/01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: u16,
    month: u8,
}

impl Period {
    /// Largest year representable in a period token.
    pub const MAX_YEAR: u16 = 9999;

    /// Largest month value representable in a period token.
    pub const MAX_MONTH: u8 = 99;

    /// Creates a period from its numeric parts.
    ///
    /// The month is not required to be a calendar month.
    pub fn new(year: u16, month: u8) -> Result<Self, PeriodError> {
        if year > Self::MAX_YEAR {
            return Err(PeriodError::YearOutOfRange(year));
        }
        if month > Self::MAX_MONTH {
            return Err(PeriodError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// Parses a six-digit `YYYYMM` token.
    pub fn from_token(token: &str) -> Result<Self, PeriodError> {
        if token.len() != 6 {
            return Err(PeriodError::InvalidLength(token.chars().count()));
        }
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PeriodError::NonDigit(token.to_owned()));
        }
        let digits = token.as_bytes();
        let year = digits[..4]
            .iter()
            .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0'));
        let month = digits[4..]
            .iter()
            .fold(0u8, |acc, d| acc * 10 + (d - b'0'));
        Self::new(year, month)
    }

    /// Returns the year component.
    #[inline]
    #[must_use]
    pub const fn year(self) -> u16 {
        self.year
    }

    /// Returns the month component, which may lie outside `1..=12`.
    #[inline]
    #[must_use]
    pub const fn month(self) -> u8 {
        self.month
    }

    /// Returns `true` if the month lies in `1..=12`.
    #[inline]
    #[must_use]
    pub const fn is_calendar_month(self) -> bool {
        self.month >= 1 && self.month <= 12
    }

    /// Returns the calendar month after this one, rolling December into
    /// January of the next year.
    ///
    /// Returns `None` past year 9999. For a non-calendar month the result is
    /// January of the following year when the month is above 12, and January
    /// of the same year for month `00`.
    #[must_use]
    pub const fn next_calendar_month(self) -> Option<Self> {
        if self.month == 0 {
            return Some(Self {
                year: self.year,
                month: 1,
            });
        }
        if self.month < 12 {
            return Some(Self {
                year: self.year,
                month: self.month + 1,
            });
        }
        if self.year >= Self::MAX_YEAR {
            return None;
        }
        Some(Self {
            year: self.year + 1,
            month: 1,
        })
    }

    /// Formats the period as `YYYY/MM` for display.
    #[must_use]
    pub fn formatted(self) -> String {
        format!("{:04}/{:02}", self.year, self.month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Self::from_token(&token).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_token() {
        let period = Period::from_token("202403").unwrap();
        assert_eq!(period.year(), 2024);
        assert_eq!(period.month(), 3);
        assert!(period.is_calendar_month());
    }

    #[test]
    fn test_period_keeps_illegal_month() {
        let period = Period::from_token("202413").unwrap();
        assert_eq!(period.month(), 13);
        assert!(!period.is_calendar_month());
        assert_eq!(period.to_string(), "202413");

        let zero = Period::from_token("202400").unwrap();
        assert!(!zero.is_calendar_month());
    }

    #[test]
    fn test_period_rejects_bad_tokens() {
        assert_eq!(
            Period::from_token("20241"),
            Err(PeriodError::InvalidLength(5))
        );
        assert!(matches!(
            Period::from_token("2024ab"),
            Err(PeriodError::NonDigit(_))
        ));
        // Non-ASCII digits are not period digits.
        assert!(Period::from_token("２０２４01").is_err());
    }

    #[test]
    fn test_period_new_bounds() {
        assert!(Period::new(9999, 12).is_ok());
        assert_eq!(
            Period::new(10_000, 1),
            Err(PeriodError::YearOutOfRange(10_000))
        );
        assert_eq!(Period::new(2024, 100), Err(PeriodError::MonthOutOfRange(100)));
    }

    #[test]
    fn test_ordering_matches_token_order() {
        let tokens = ["202312", "202401", "202400", "202413", "202501"];
        let mut periods: Vec<Period> = tokens.iter().map(|t| t.parse().unwrap()).collect();
        periods.sort();
        let mut sorted_tokens = tokens.to_vec();
        sorted_tokens.sort_unstable();
        let rendered: Vec<String> = periods.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, sorted_tokens);
    }

    #[test]
    fn test_next_calendar_month() {
        let nov = Period::new(2023, 11).unwrap();
        assert_eq!(nov.next_calendar_month(), Period::new(2023, 12).ok());
        let dec = Period::new(2023, 12).unwrap();
        assert_eq!(dec.next_calendar_month(), Period::new(2024, 1).ok());
        let last = Period::new(9999, 12).unwrap();
        assert_eq!(last.next_calendar_month(), None);
        let zero = Period::new(2024, 0).unwrap();
        assert_eq!(zero.next_calendar_month(), Period::new(2024, 1).ok());
    }

    #[test]
    fn test_formatted() {
        assert_eq!(Period::new(2024, 7).unwrap().formatted(), "2024/07");
        assert_eq!(Period::new(5, 1).unwrap().to_string(), "000501");
    }

    #[test]
    fn test_period_serialization() {
        let period = Period::new(2024, 1).unwrap();
        assert_eq!(serde_json::to_string(&period).unwrap(), r#""202401""#);
        let parsed: Period = serde_json::from_str(r#""202401""#).unwrap();
        assert_eq!(parsed, period);
        assert!(serde_json::from_str::<Period>(r#""2024-1""#).is_err());
    }
}
