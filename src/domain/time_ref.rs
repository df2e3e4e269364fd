//! Time reference parsing for range bounds and the `today` anchor

use crate::error::{MoodlogError, Result};
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// A date expression resolved against an explicit anchor date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeReference {
    /// The anchor itself
    Today,
    /// The day before the anchor
    Yesterday,
    /// Most recent occurrence of a weekday, the anchor included
    Weekday(Weekday),
    /// Previous occurrence of a weekday (strictly before the anchor)
    LastWeekday(Weekday),
    /// A number of days before the anchor
    DaysAgo(u32),
    SpecificDate(NaiveDate),
}

impl TimeReference {
    /// Parse a time reference string
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" | "now" => return Ok(TimeReference::Today),
            "yesterday" => return Ok(TimeReference::Yesterday),
            _ => {}
        }

        if let Some(weekday) = parse_weekday(&normalized) {
            return Ok(TimeReference::Weekday(weekday));
        }

        if let Some(rest) = normalized.strip_prefix("last ") {
            return parse_weekday(rest.trim())
                .map(TimeReference::LastWeekday)
                .ok_or_else(|| MoodlogError::InvalidTimeReference(input.to_string()));
        }

        if let Some(count) = normalized
            .strip_suffix(" days ago")
            .or_else(|| normalized.strip_suffix(" day ago"))
        {
            return count
                .trim()
                .parse::<u32>()
                .map(TimeReference::DaysAgo)
                .map_err(|_| MoodlogError::InvalidTimeReference(input.to_string()));
        }

        NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&normalized, "%d-%m-%Y"))
            .map(TimeReference::SpecificDate)
            .map_err(|_| MoodlogError::InvalidTimeReference(input.to_string()))
    }

    /// Resolve this time reference against `anchor`.
    ///
    /// Returns `None` when the result falls outside the supported date range.
    pub fn resolve(&self, anchor: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeReference::Today => Some(anchor),
            TimeReference::Yesterday => anchor.pred_opt(),
            TimeReference::Weekday(target) => {
                anchor.checked_sub_days(Days::new(days_back(anchor, *target)))
            }
            TimeReference::LastWeekday(target) => {
                let back = days_back(anchor, *target);
                anchor.checked_sub_days(Days::new(if back == 0 { 7 } else { back }))
            }
            TimeReference::DaysAgo(n) => anchor.checked_sub_days(Days::new(u64::from(*n))),
            TimeReference::SpecificDate(date) => Some(*date),
        }
    }
}

/// Parse and resolve in one step
pub fn resolve_date(input: &str, anchor: NaiveDate) -> Result<NaiveDate> {
    TimeReference::parse(input)?
        .resolve(anchor)
        .ok_or_else(|| MoodlogError::InvalidTimeReference(input.to_string()))
}

fn parse_weekday(day_str: &str) -> Option<Weekday> {
    match day_str {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Days from the most recent `target` weekday up to `anchor` (0..=6)
fn days_back(anchor: NaiveDate, target: Weekday) -> u64 {
    let current = anchor.weekday().num_days_from_monday();
    u64::from((current + 7 - target.num_days_from_monday()) % 7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NaiveDate {
        // Friday
        NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
    }

    #[test]
    fn test_parse_simple_refs() {
        assert_eq!(TimeReference::parse("today").unwrap(), TimeReference::Today);
        assert_eq!(TimeReference::parse(" NOW ").unwrap(), TimeReference::Today);
        assert_eq!(
            TimeReference::parse("yesterday").unwrap(),
            TimeReference::Yesterday
        );
    }

    #[test]
    fn test_parse_weekdays() {
        assert_eq!(
            TimeReference::parse("monday").unwrap(),
            TimeReference::Weekday(Weekday::Mon)
        );
        assert_eq!(
            TimeReference::parse("last friday").unwrap(),
            TimeReference::LastWeekday(Weekday::Fri)
        );
    }

    #[test]
    fn test_parse_days_ago() {
        assert_eq!(
            TimeReference::parse("30 days ago").unwrap(),
            TimeReference::DaysAgo(30)
        );
        assert_eq!(
            TimeReference::parse("1 day ago").unwrap(),
            TimeReference::DaysAgo(1)
        );
        assert!(TimeReference::parse("many days ago").is_err());
    }

    #[test]
    fn test_parse_specific_dates() {
        let expected = TimeReference::SpecificDate(base());
        assert_eq!(TimeReference::parse("2025-01-17").unwrap(), expected);
        assert_eq!(TimeReference::parse("17-01-2025").unwrap(), expected);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(TimeReference::parse("invalid").is_err());
        assert!(TimeReference::parse("32-01-2025").is_err());
        assert!(TimeReference::parse("2025-13-01").is_err());
        assert!(matches!(
            TimeReference::parse("last someday"),
            Err(MoodlogError::InvalidTimeReference(s)) if s == "last someday"
        ));
    }

    #[test]
    fn test_resolve_relative() {
        assert_eq!(TimeReference::Today.resolve(base()), Some(base()));
        assert_eq!(
            TimeReference::Yesterday.resolve(base()),
            NaiveDate::from_ymd_opt(2025, 1, 16)
        );
        assert_eq!(
            TimeReference::DaysAgo(17).resolve(base()),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn test_resolve_weekday() {
        assert_eq!(TimeReference::Weekday(Weekday::Fri).resolve(base()), Some(base()));
        assert_eq!(
            TimeReference::Weekday(Weekday::Mon).resolve(base()),
            NaiveDate::from_ymd_opt(2025, 1, 13)
        );
    }

    #[test]
    fn test_resolve_last_weekday() {
        assert_eq!(
            TimeReference::LastWeekday(Weekday::Fri).resolve(base()),
            NaiveDate::from_ymd_opt(2025, 1, 10)
        );
        assert_eq!(
            TimeReference::LastWeekday(Weekday::Sat).resolve(base()),
            NaiveDate::from_ymd_opt(2025, 1, 11)
        );
    }

    #[test]
    fn test_resolve_date_helper() {
        assert_eq!(
            resolve_date("2 days ago", base()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
        assert!(resolve_date("soon", base()).is_err());
    }

    #[test]
    fn test_resolve_out_of_range() {
        assert_eq!(TimeReference::DaysAgo(u32::MAX).resolve(base()), None);
        assert_eq!(TimeReference::Yesterday.resolve(NaiveDate::MIN), None);
        assert_eq!(
            TimeReference::LastWeekday(Weekday::Mon).resolve(NaiveDate::MIN),
            None
        );
        assert!(matches!(
            resolve_date("4000000000 days ago", base()),
            Err(MoodlogError::InvalidTimeReference(s)) if s == "4000000000 days ago"
        ));
    }
}
