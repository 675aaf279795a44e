//! Common types used across the platform

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month that planning facts are keyed by.
///
/// Planning facts are month-granular: the day of a request date never selects
/// a different fact, it only matters for the length of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanningMonth {
    pub year: i32,
    pub month: u32,
}

impl PlanningMonth {
    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month, the canonical stored date for a fact
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Number of days in the month (28..=31); `None` for a month outside
    /// chrono's calendar
    pub fn days_in_month(&self) -> Option<u32> {
        days_in_month(self.year, self.month)
    }

    /// The month immediately before this one
    pub fn previous(&self) -> Self {
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
}

impl std::fmt::Display for PlanningMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Number of days in the given calendar month.
///
/// Probes the last day downwards instead of subtracting from the next
/// month, which does not exist for December of chrono's maximum year.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    (28..=31)
        .rev()
        .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
}

/// The same day-of-month one calendar month earlier, clamped to the last
/// valid day of that month (2024-03-31 -> 2024-02-29).
///
/// Returns `date` unchanged only if it has no predecessor in chrono's range.
pub fn previous_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

/// Normalize a date to the first day of its month
pub fn month_start(date: NaiveDate) -> NaiveDate {
    PlanningMonth::of(date).first_day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_previous_month_clamps_to_month_end() {
        assert_eq!(previous_month(date(2024, 3, 31)), date(2024, 2, 29));
        assert_eq!(previous_month(date(2023, 3, 31)), date(2023, 2, 28));
        assert_eq!(previous_month(date(2024, 5, 31)), date(2024, 4, 30));
    }

    #[test]
    fn test_previous_month_keeps_day_when_valid() {
        assert_eq!(previous_month(date(2024, 6, 15)), date(2024, 5, 15));
        assert_eq!(previous_month(date(2024, 3, 1)), date(2024, 2, 1));
    }

    #[test]
    fn test_previous_month_rolls_year() {
        assert_eq!(previous_month(date(2024, 1, 15)), date(2023, 12, 15));
        assert_eq!(previous_month(date(2024, 1, 31)), date(2023, 12, 31));
    }

    #[test]
    fn test_days_in_month() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (i, days) in expected.iter().enumerate() {
            assert_eq!(days_in_month(2023, i as u32 + 1), Some(*days));
        }
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
    }

    #[test]
    fn test_planning_month_previous_matches_previous_month() {
        for (y, m, d) in [(2024, 3, 31), (2024, 1, 1), (2023, 12, 31), (2024, 7, 31)] {
            let d = date(y, m, d);
            assert_eq!(
                PlanningMonth::of(d).previous(),
                PlanningMonth::of(previous_month(d))
            );
        }
    }

    #[test]
    fn test_month_start_and_display() {
        let month = PlanningMonth::of(date(2024, 2, 17));
        assert_eq!(month.first_day(), date(2024, 2, 1));
        assert_eq!(month_start(date(2024, 2, 17)), date(2024, 2, 1));
        assert_eq!(month.to_string(), "2024-02");
        assert_eq!(month.days_in_month(), Some(29));
    }

    #[test]
    fn test_days_in_month_at_calendar_limits() {
        let max = NaiveDate::MAX;
        assert_eq!(days_in_month(max.year(), max.month()), Some(31));
        assert_eq!(PlanningMonth::of(max).days_in_month(), Some(31));
        let min = NaiveDate::MIN;
        assert_eq!(days_in_month(min.year(), min.month()), Some(31));
    }

    #[test]
    fn test_days_in_month_rejects_invalid_month() {
        assert_eq!(days_in_month(2024, 0), None);
        assert_eq!(days_in_month(2024, 13), None);
        assert_eq!(days_in_month(NaiveDate::MAX.year() + 1, 1), None);
    }
}
