use chrono::{DateTime, Datelike, NaiveDate, Weekday};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a date input value was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DateRejection {
    #[error("Weekends are disabled. Please select a weekday.")]
    Weekend,
    #[error("Please select today or a later date.")]
    Past,
    #[error("Please enter a valid date.")]
    Invalid,
}

/// Reduces a date or timestamp string to its calendar date.
pub fn normalize_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc().date());
    }
    input
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Checks a value submitted through a date input. An empty value is not an
/// error; it simply leaves the field unset.
pub fn guard_date_input(value: &str, today: NaiveDate) -> Result<Option<NaiveDate>, DateRejection> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    let date = normalize_date(value).ok_or(DateRejection::Invalid)?;
    if is_weekend(date) {
        return Err(DateRejection::Weekend);
    }
    if date < today {
        return Err(DateRejection::Past);
    }
    Ok(Some(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_weekend_rejected() {
        let today = d("2024-06-03");
        // 2024-06-08 is a Saturday, 2024-06-09 a Sunday
        assert_eq!(guard_date_input("2024-06-08", today), Err(DateRejection::Weekend));
        assert_eq!(guard_date_input("2024-06-09", today), Err(DateRejection::Weekend));
    }

    #[test]
    fn test_weekdays_accepted() {
        let today = d("2024-06-03");
        for day in ["2024-06-10", "2024-06-11", "2024-06-12", "2024-06-13", "2024-06-14"] {
            assert_eq!(guard_date_input(day, today), Ok(Some(d(day))));
        }
    }

    #[test]
    fn test_today_accepted_past_rejected() {
        let today = d("2024-06-05");
        assert_eq!(guard_date_input("2024-06-05", today), Ok(Some(today)));
        assert_eq!(guard_date_input("2024-06-04", today), Err(DateRejection::Past));
    }

    #[test]
    fn test_empty_and_invalid() {
        let today = d("2024-06-03");
        assert_eq!(guard_date_input("  ", today), Ok(None));
        assert_eq!(guard_date_input("next week", today), Err(DateRejection::Invalid));
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2024-06-10"), Some(d("2024-06-10")));
        assert_eq!(normalize_date("2024-06-10T23:30:00"), Some(d("2024-06-10")));
        assert_eq!(normalize_date("2024-06-10T23:30:00-02:00"), Some(d("2024-06-11")));
        assert_eq!(normalize_date("06/10/2024"), None);
        assert_eq!(format_date(d("2024-06-10")), "2024-06-10");
    }
}
