//! Monthly totals and the current-vs-previous month comparison.

use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use crate::{Error, month::MonthKey};

use super::core::sum_expenses_in_month;

/// The three-way comparison between the viewed month's spending and the
/// previous month's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Badge {
    /// More was spent than in the previous month.
    Expended,
    /// Less was spent than in the previous month.
    Saved,
    /// Exactly as much was spent as in the previous month.
    Same,
}

impl Badge {
    /// The CSS class used to colour the comparison badge.
    pub(crate) fn css_class(self) -> &'static str {
        match self {
            Badge::Expended => "badge-expended",
            Badge::Saved => "badge-saved",
            Badge::Same => "badge-same",
        }
    }

    /// The text displayed after the difference amount.
    pub(crate) fn tail_text(self) -> &'static str {
        match self {
            Badge::Expended => "more than last month",
            Badge::Saved => "less than last month",
            Badge::Same => "Same as last month",
        }
    }
}

/// Totals for the viewed month alongside the previous calendar month.
#[derive(Debug, PartialEq)]
pub(crate) struct MonthlySummary {
    /// Total spent in the viewed month.
    pub(crate) current_total: f64,
    /// Total spent in the previous calendar month.
    pub(crate) previous_total: f64,
    /// The comparison between the two totals.
    pub(crate) badge: Badge,
    /// The absolute difference between the two totals.
    pub(crate) difference: f64,
    /// The previous calendar month, for linking to its listing.
    pub(crate) previous: MonthKey,
}

/// Compute the totals and comparison badge for `month`.
///
/// Empty months total `0`, so a month with no expenses either side compares
/// as [Badge::Same] with a difference of `0`.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub(crate) fn summarize_month(
    month: MonthKey,
    connection: &Connection,
) -> Result<MonthlySummary, Error> {
    let current_total = sum_expenses_in_month(month, connection)?;
    let previous = month.previous();
    let previous_total = sum_expenses_in_month(previous, connection)?;

    Ok(compare_totals(current_total, previous_total, previous))
}

fn compare_totals(current_total: f64, previous_total: f64, previous: MonthKey) -> MonthlySummary {
    let badge = if current_total > previous_total {
        Badge::Expended
    } else if current_total < previous_total {
        Badge::Saved
    } else {
        Badge::Same
    };

    MonthlySummary {
        current_total,
        previous_total,
        badge,
        difference: (current_total - previous_total).abs(),
        previous,
    }
}

/// Whether the add-expense control should be offered for the viewed month.
///
/// Uses a rolling window rather than an exact calendar boundary check: the
/// first day of the viewed month must fall between `now` and `now` minus as
/// many days as have passed in the current month. On the first day of a
/// month the window is only one day wide.
pub(crate) fn should_show_add_control(month: MonthKey, now: OffsetDateTime) -> bool {
    let Some(first_day) = month.first_day() else {
        return false;
    };

    let candidate = first_day.midnight().assume_offset(now.offset());
    let window_start = now - Duration::days(now.day() as i64);

    window_start <= candidate && candidate <= now
}


#[cfg(test)]
mod add_control_tests {
    use time::macros::datetime;

    use crate::month::MonthKey;

    use super::should_show_add_control;

    #[test]
    fn current_month_shows_the_control() {
        let now = datetime!(2021-07-15 14:00 UTC);

        assert!(should_show_add_control(MonthKey::new(2021, 7), now));
    }

    #[test]
    fn current_month_shows_the_control_on_its_first_day() {
        let now = datetime!(2021-07-01 10:00 UTC);

        assert!(should_show_add_control(MonthKey::new(2021, 7), now));
    }

    #[test]
    fn previous_month_hides_the_control() {
        let now = datetime!(2021-07-15 14:00 UTC);

        assert!(!should_show_add_control(MonthKey::new(2021, 6), now));
    }

    #[test]
    fn future_month_hides_the_control() {
        let now = datetime!(2021-07-15 14:00 UTC);

        assert!(!should_show_add_control(MonthKey::new(2021, 8), now));
    }

    #[test]
    fn invalid_month_hides_the_control() {
        let now = datetime!(2021-07-15 14:00 UTC);

        assert!(!should_show_add_control(MonthKey::new(2021, 13), now));
    }
}
