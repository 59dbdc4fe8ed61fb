use chrono::{Duration, FixedOffset, NaiveDate, Utc};

use crate::error::{AppError, AppResult};

pub mod geo;
pub mod logging;
pub mod map_cache;
pub mod settings;
pub mod time;

pub struct DateTimeUtils {}

impl DateTimeUtils {
    // Sheet dates are day-first; ISO is accepted for the API and settings.
    const DATE_FORMATS: [&'static str; 4] = ["%d.%m.%Y", "%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d"];

    pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
        let value = value.trim();

        Self::DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
            .ok_or_else(|| AppError::InvalidDate(value.to_string()))
    }

    pub fn format_date(date: NaiveDate) -> String {
        date.format("%d.%m.%Y").to_string()
    }

    /// Current calendar date at a fixed UTC offset.
    pub fn today(utc_offset_hours: i32) -> NaiveDate {
        match FixedOffset::east_opt(utc_offset_hours * 3600) {
            Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
            None => Utc::now().date_naive(),
        }
    }

    /// Every day from `start` to `end`, both included. Empty when `end < start`.
    pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut day = start;

        while day <= end {
            dates.push(day);
            day += Duration::days(1);
        }

        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_first_and_iso_dates() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        for value in ["13.01.2025", "13-01-2025", "13/01/2025", "2025-01-13", " 13.01.2025 "] {
            assert_eq!(DateTimeUtils::parse_date(value).unwrap(), expected, "{}", value);
        }
        assert!(DateTimeUtils::parse_date("31.02.2025").is_err());
        assert!(DateTimeUtils::parse_date("yesterday").is_err());
    }

    #[test]
    fn formats_day_first() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(DateTimeUtils::format_date(date), "07.03.2025");
    }

    #[test]
    fn date_range_is_inclusive() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();
        let range = DateTimeUtils::date_range(start, end);
        assert_eq!(range.len(), 4);
        assert_eq!(range[0], start);
        assert_eq!(range[3], end);
        assert!(DateTimeUtils::date_range(end, start).is_empty());
    }
}
