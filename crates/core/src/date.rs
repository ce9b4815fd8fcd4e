//! Due-date codec.
//!
//! Users type dates as `dd/mm/yyyy`. Internally a due date is a calendar
//! date whose canonical form is `YYYY-MM-DD`, which sorts chronologically
//! and is what the storage file holds.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DateError;

/// A validated due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(NaiveDate);

impl DueDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year, month, day. `None` when the triple is not a calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Canonical `YYYY-MM-DD` key.
    pub fn canonical(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// User-facing `dd/mm/yyyy` form.
    pub fn to_display(&self) -> String {
        self.0.format("%d/%m/%Y").to_string()
    }

    /// Signed number of whole days from `today` to this date.
    ///
    /// Negative for past dates, zero for today, positive for future dates.
    pub fn days_from(&self, today: NaiveDate) -> i64 {
        (self.0 - today).num_days()
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Parse a `dd/mm/yyyy` string into a [`DueDate`].
///
/// Day and month may be one or two digits; surrounding whitespace is ignored.
/// The result must be a real calendar date, so `31/02/2025` is rejected.
pub fn normalize(input: &str) -> Result<DueDate, DateError> {
    let fields: Vec<&str> = input.trim().split('/').map(str::trim).collect();
    let [day, month, year] = fields.as_slice() else {
        return Err(DateError::Format(input.to_string()));
    };

    let day: u32 = parse_field(input, "day", day)?;
    let month: u32 = parse_field(input, "month", month)?;
    let year: i32 = parse_field(input, "year", year)?;

    DueDate::from_ymd(year, month, day).ok_or_else(|| DateError::OutOfRange(input.to_string()))
}

fn parse_field<T: FromStr>(input: &str, name: &str, raw: &str) -> Result<T, DateError> {
    let not_a_number = || DateError::NotANumber {
        input: input.to_string(),
        field: name.to_string(),
    };
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(not_a_number());
    }
    raw.parse().map_err(|_| not_a_number())
}

/// Source of "today" for relative-day labels.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local calendar day of the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn normalize_reorders_fields() {
        let date = normalize("10/05/2025").unwrap();
        assert_eq!(date.canonical(), "2025-05-10");
        assert_eq!(date.to_display(), "10/05/2025");
    }

    #[test]
    fn normalize_accepts_short_fields_and_whitespace() {
        let date = normalize(" 1/5/2025 ").unwrap();
        assert_eq!(date.canonical(), "2025-05-01");
        assert_eq!(date.to_display(), "01/05/2025");
    }

    #[test]
    fn normalize_rejects_impossible_dates() {
        assert_eq!(
            normalize("31/02/2025"),
            Err(DateError::OutOfRange("31/02/2025".into()))
        );
        assert!(normalize("00/01/2025").is_err());
        assert!(normalize("12/13/2025").is_err());
    }

    #[test]
    fn normalize_rejects_bad_shapes() {
        assert!(matches!(normalize("2025-05-10"), Err(DateError::Format(_))));
        assert!(matches!(normalize("10/05"), Err(DateError::Format(_))));
        assert!(matches!(
            normalize("aa/05/2025"),
            Err(DateError::NotANumber { field, .. }) if field == "day"
        ));
        assert!(matches!(
            normalize("10/05/-2025"),
            Err(DateError::NotANumber { field, .. }) if field == "year"
        ));
    }

    #[test]
    fn days_from_is_signed() {
        let today = ymd(2025, 6, 15);
        assert_eq!(DueDate::new(ymd(2025, 6, 15)).days_from(today), 0);
        assert_eq!(DueDate::new(ymd(2025, 6, 20)).days_from(today), 5);
        assert_eq!(DueDate::new(ymd(2025, 6, 10)).days_from(today), -5);
        assert_eq!(DueDate::new(ymd(2026, 1, 1)).days_from(ymd(2025, 12, 31)), 1);
    }

    #[test]
    fn serializes_as_canonical_string() {
        let date = normalize("25/12/2024").unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-12-25\"");
        let back: DueDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }

    #[test]
    fn canonical_keys_sort_chronologically() {
        let mut keys = vec![
            normalize("10/01/2025").unwrap(),
            normalize("25/12/2024").unwrap(),
            normalize("01/03/2025").unwrap(),
        ];
        keys.sort();
        let canon: Vec<String> = keys.iter().map(DueDate::canonical).collect();
        assert_eq!(canon, ["2024-12-25", "2025-01-10", "2025-03-01"]);
    }

    #[test]
    fn fixed_clock_returns_its_day() {
        let clock = FixedClock(ymd(2025, 6, 15));
        assert_eq!(clock.today(), ymd(2025, 6, 15));
    }
}
