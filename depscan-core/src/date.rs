//! Statement dates: statement rows carry only "Mon DD", the year lives in the
//! statement header.

use chrono::{Month, NaiveDate};
use std::cmp::Ordering;
use std::fmt;

/// A month-abbreviation + day date as printed on a statement row ("Jun 03").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementDate {
    pub month: Month,
    pub day: u32,
}

impl StatementDate {
    pub fn new(month: Month, day: u32) -> Option<Self> {
        if (1..=31).contains(&day) {
            Some(Self { month, day })
        } else {
            None
        }
    }

    /// Parse "Jun 03" / "JUN 3". The month must be a three-letter abbreviation.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let month_str = parts.next()?;
        let day_str = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        if month_str.len() != 3 || day_str.is_empty() || day_str.len() > 2 {
            return None;
        }
        let month: Month = month_str.parse().ok()?;
        let day: u32 = day_str.parse().ok()?;
        Self::new(month, day)
    }

    /// Three-letter title-case abbreviation ("Jun").
    pub fn month_abbrev(&self) -> &'static str {
        &self.month.name()[..3]
    }

    /// Attach a statement year. `None` for impossible dates like "Feb 30".
    pub fn with_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month.number_from_month(), self.day)
    }

    fn sort_key(&self) -> (u32, u32) {
        (self.month.number_from_month(), self.day)
    }
}

impl fmt::Display for StatementDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}", self.month_abbrev(), self.day)
    }
}

impl PartialOrd for StatementDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StatementDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let d = StatementDate::parse("Jun 03").unwrap();
        assert_eq!(d.month, Month::June);
        assert_eq!(d.day, 3);
        assert_eq!(d.to_string(), "Jun 03");

        // OCR output is often upper-case and unpadded
        let d = StatementDate::parse("JUN 3").unwrap();
        assert_eq!(d.to_string(), "Jun 03");
    }

    #[test]
    fn test_rejects_non_dates() {
        assert!(StatementDate::parse("June 03").is_none());
        assert!(StatementDate::parse("Jun").is_none());
        assert!(StatementDate::parse("Jun 32").is_none());
        assert!(StatementDate::parse("Jun 003").is_none());
        assert!(StatementDate::parse("Foo 12").is_none());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut dates: Vec<_> = ["Jul 01", "Jun 30", "Jun 02"]
            .iter()
            .filter_map(|s| StatementDate::parse(s))
            .collect();
        dates.sort();
        let rendered: Vec<_> = dates.iter().map(|d| d.to_string()).collect();
        assert_eq!(rendered, vec!["Jun 02", "Jun 30", "Jul 01"]);
    }

    #[test]
    fn test_with_year() {
        let d = StatementDate::parse("Feb 29").unwrap();
        assert_eq!(d.with_year(2024), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(d.with_year(2025), None);
    }
}
