use std::{cmp::Ordering, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CalendarError, RANGE_SEPARATOR, parse_date, prelude::*};

/// An inclusive range of calendar dates.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidRange` if end < start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if end < start {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    /// Checks if the range contains a given date
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, counting both endpoints.
    /// Always at least 1.
    pub fn num_days(&self) -> u64 {
        self.end
            .signed_duration_since(self.start)
            .num_days()
            .unsigned_abs()
            + 1
    }

    /// Iterates every date in the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let start = self.start;
        let span = self.end.signed_duration_since(self.start).num_days();
        (0..=span).map(move |offset| start + chrono::Duration::days(offset))
    }
}

impl FromStr for DateRange {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // ISO 8601 extended format: use RANGE_SEPARATOR to separate start/end
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(CalendarError::InvalidDateFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                // SAFETY: We just verified separator_count == 1, so find() must succeed
                let pos = trimmed.find(RANGE_SEPARATOR).ok_or_else(|| {
                    CalendarError::InvalidDateFormat(format!(
                        "Separator '{RANGE_SEPARATOR}' not found despite count == 1"
                    ))
                })?;
                let start = parse_date(trimmed[..pos].trim())?;
                let end = parse_date(trimmed[pos + 1..].trim())?;

                Self::new(start, end)
            }
            _ => Err(CalendarError::InvalidDateFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare start dates first, then end dates
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("invalid test date")
    }

    #[test]
    fn test_new_range_cases() {
        struct TestCase {
            start: (i32, u32, u32),
            end: (i32, u32, u32),
            should_succeed: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                start: (2020, 1, 1),
                end: (2020, 12, 31),
                should_succeed: true,
                description: "valid range (start < end)",
            },
            TestCase {
                start: (2020, 12, 31),
                end: (2020, 1, 1),
                should_succeed: false,
                description: "invalid range (start > end)",
            },
            TestCase {
                start: (2020, 6, 15),
                end: (2020, 6, 15),
                should_succeed: true,
                description: "equal dates (start == end)",
            },
        ];

        for case in &cases {
            let start = date(case.start.0, case.start.1, case.start.2);
            let end = date(case.end.0, case.end.1, case.end.2);
            let range = DateRange::new(start, end);

            if case.should_succeed {
                assert!(range.is_ok(), "Expected success for: {}", case.description);
            } else {
                assert!(range.is_err(), "Expected failure for: {}", case.description);
            }
        }
    }

    #[test]
    fn test_accessors() {
        let start = date(2020, 1, 1);
        let end = date(2020, 12, 31);
        let range =
            DateRange::new(start, end).expect("failed to construct range for accessor test");

        assert_eq!(range.start(), start);
        assert_eq!(range.end(), end);
        assert_eq!(range.dates(), (start, end));
    }

    #[test]
    fn test_contains() {
        let range = DateRange::new(date(2020, 1, 1), date(2020, 12, 31))
            .expect("failed to construct range for contains test");

        assert!(range.contains(date(2020, 1, 1)));
        assert!(range.contains(date(2020, 12, 31)));
        assert!(range.contains(date(2020, 6, 15)));
        assert!(!range.contains(date(2019, 12, 31)));
        assert!(!range.contains(date(2021, 1, 1)));
    }

    #[test]
    fn test_num_days() {
        let range = DateRange::new(date(2020, 1, 1), date(2020, 1, 31))
            .expect("failed to construct range for num_days test");
        assert_eq!(range.num_days(), 31);

        // Leap year February
        let range = DateRange::new(date(2020, 2, 1), date(2020, 2, 29))
            .expect("failed to construct range for num_days test");
        assert_eq!(range.num_days(), 29);

        // Single-day range
        let range = DateRange::new(date(2020, 6, 15), date(2020, 6, 15))
            .expect("failed to construct range for num_days test");
        assert_eq!(range.num_days(), 1);
    }

    #[test]
    fn test_days_iterator() {
        let range = DateRange::new(date(2020, 2, 27), date(2020, 3, 2))
            .expect("failed to construct range for days test");
        let days: Vec<NaiveDate> = range.days().collect();

        assert_eq!(
            days,
            vec![
                date(2020, 2, 27),
                date(2020, 2, 28),
                date(2020, 2, 29),
                date(2020, 3, 1),
                date(2020, 3, 2),
            ]
        );
    }

    #[test]
    fn test_days_iterator_crosses_year_boundary() {
        let range = DateRange::new(date(2023, 12, 30), date(2024, 1, 2))
            .expect("failed to construct range for year-boundary test");
        let days: Vec<NaiveDate> = range.days().collect();

        assert_eq!(days.len(), 4);
        assert_eq!(days[0], date(2023, 12, 30));
        assert_eq!(days[3], date(2024, 1, 2));
    }

    #[test]
    fn test_days_iterator_single_day() {
        let range = DateRange::new(date(2020, 6, 15), date(2020, 6, 15))
            .expect("failed to construct single-day range");
        let days: Vec<NaiveDate> = range.days().collect();
        assert_eq!(days, vec![date(2020, 6, 15)]);
    }

    #[test]
    fn test_display() {
        let range = DateRange::new(date(2020, 1, 1), date(2020, 12, 31))
            .expect("failed to construct range for display test");
        assert_eq!(range.to_string(), "2020-01-01/2020-12-31");
    }

    #[test]
    fn test_from_str() {
        let range = "2020-01-01/2020-12-31"
            .parse::<DateRange>()
            .expect("failed to parse range");
        assert_eq!(range.start(), date(2020, 1, 1));
        assert_eq!(range.end(), date(2020, 12, 31));
    }

    #[test]
    fn test_from_str_with_whitespace() {
        let range = " 2020-01-01 / 2020-12-31 "
            .parse::<DateRange>()
            .expect("failed to parse range with whitespace");
        assert_eq!(range.start(), date(2020, 1, 1));
        assert_eq!(range.end(), date(2020, 12, 31));
    }

    #[test]
    fn test_from_str_invalid_order() {
        let result = "2020-12-31/2020-01-01".parse::<DateRange>();
        assert!(matches!(result, Err(CalendarError::InvalidRange { .. })));
    }

    #[test]
    fn test_from_str_no_separator() {
        let result = "2020-01-01".parse::<DateRange>();
        assert!(result.is_err());
        let err = result.expect_err("expected error for missing range separator");
        assert!(err.to_string().contains("No range separator found"));
    }

    #[test]
    fn test_from_str_too_many_separators() {
        let result = "2020-01-01/2020-06-15/2020-12-31".parse::<DateRange>();
        assert!(result.is_err());
        let err = result.expect_err("expected error for too many range separators");
        assert!(err.to_string().contains("Too many '/' separators"));
        assert!(err.to_string().contains("expected 1, found 2"));
    }

    #[test]
    fn test_from_str_bad_date() {
        let result = "2020-02-30/2020-12-31".parse::<DateRange>();
        assert!(matches!(result, Err(CalendarError::InvalidDateFormat(_))));

        let result = "not-a-date/2020-12-31".parse::<DateRange>();
        assert!(matches!(result, Err(CalendarError::InvalidDateFormat(_))));
    }

    #[test]
    fn test_ordering() {
        let earlier = DateRange::new(date(2019, 1, 1), date(2019, 12, 31))
            .expect("failed to construct first range for ordering test");
        let later = DateRange::new(date(2020, 1, 1), date(2020, 12, 31))
            .expect("failed to construct second range for ordering test");
        assert!(earlier < later);

        // Same start, shorter range first
        let short = DateRange::new(date(2020, 1, 1), date(2020, 6, 30))
            .expect("failed to construct short range for ordering test");
        let long = DateRange::new(date(2020, 1, 1), date(2020, 12, 31))
            .expect("failed to construct long range for ordering test");
        assert!(short < long);
    }

    #[test]
    fn test_serde_string_format() {
        let range = DateRange::new(date(2020, 1, 1), date(2020, 12, 31))
            .expect("failed to construct range for serde string test");

        let json = serde_json::to_string(&range).expect("failed to serialize range to JSON");
        // Should be a JSON string, not an object
        assert_eq!(json, r#""2020-01-01/2020-12-31""#);

        let parsed: DateRange =
            serde_json::from_str(&json).expect("failed to deserialize range from JSON");
        assert_eq!(range, parsed);
    }

    #[test]
    fn test_serde_rejects_invalid_order() {
        let result: Result<DateRange, _> = serde_json::from_str(r#""2020-12-31/2020-01-01""#);
        assert!(result.is_err());
    }
}
