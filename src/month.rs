//! Calendar month arithmetic shared by the expense pages.

use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime};

/// A calendar month identified by year and month number.
///
/// Month numbers are expected to be in `1..=12` but are not validated at
/// construction. Out-of-range months produce no [bounds](MonthKey::bounds),
/// so queries keyed on them match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthKey {
    /// The four digit calendar year.
    pub year: i32,
    /// The month number, 1 for January through 12 for December.
    pub month: u8,
}

impl MonthKey {
    /// Create a month key from its parts.
    pub fn new(year: i32, month: u8) -> Self {
        Self { year, month }
    }

    /// The month that `date` falls in.
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }

    /// The previous calendar month, rolling over to December of the prior
    /// year when `self` is January.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The first day of the month, or `None` if the month number is not a
    /// real month.
    pub fn first_day(self) -> Option<Date> {
        let month = Month::try_from(self.month).ok()?;

        Date::from_calendar_date(self.year, month, 1).ok()
    }

    /// The half-open UTC timestamp range `[start, end)` covering the month.
    ///
    /// Returns `None` for month numbers outside `1..=12`.
    pub fn bounds(self) -> Option<(OffsetDateTime, OffsetDateTime)> {
        let start = self.first_day()?.midnight().assume_utc();

        let next = if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        };
        let end = next.first_day()?.midnight().assume_utc();

        Some((start, end))
    }

    /// A human readable label such as "August 2026".
    pub fn title(self) -> String {
        match Month::try_from(self.month) {
            Ok(month) => format!("{month} {year}", year = self.year),
            Err(_) => format!("{}-{:02}", self.year, self.month),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::MonthKey;

    #[test]
    fn previous_month_in_same_year() {
        let got = MonthKey::new(2021, 7).previous();

        assert_eq!(got, MonthKey::new(2021, 6));
    }

    #[test]
    fn previous_month_rolls_over_year_boundary() {
        let got = MonthKey::new(2021, 1).previous();

        assert_eq!(got, MonthKey::new(2020, 12));
    }

    #[test]
    fn bounds_cover_whole_month() {
        let (start, end) = MonthKey::new(2024, 2).bounds().unwrap();

        assert_eq!(start, datetime!(2024-02-01 00:00 UTC));
        assert_eq!(end, datetime!(2024-03-01 00:00 UTC));
    }

    #[test]
    fn bounds_roll_over_december() {
        let (start, end) = MonthKey::new(2023, 12).bounds().unwrap();

        assert_eq!(start, datetime!(2023-12-01 00:00 UTC));
        assert_eq!(end, datetime!(2024-01-01 00:00 UTC));
    }

    #[test]
    fn bounds_are_none_for_invalid_months() {
        assert_eq!(MonthKey::new(2024, 0).bounds(), None);
        assert_eq!(MonthKey::new(2024, 13).bounds(), None);
    }

    #[test]
    fn from_date_uses_calendar_month() {
        let got = MonthKey::from_date(date!(2026 - 08 - 06));

        assert_eq!(got, MonthKey::new(2026, 8));
    }

    #[test]
    fn title_names_the_month() {
        assert_eq!(MonthKey::new(2026, 8).title(), "August 2026");
        assert_eq!(MonthKey::new(2026, 13).title(), "2026-13");
    }
}
