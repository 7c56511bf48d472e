//! Payroll period model.
//!
//! This module contains the [`Period`] type identifying one monthly payroll
//! calculation cycle, with the total order used for all "before/after"
//! comparisons and window membership tests.

use serde::{Deserialize, Serialize};

/// A (year, month) pair identifying one payroll calculation cycle.
///
/// Periods are totally ordered by `(year, month)` lexicographic comparison,
/// which the derived `Ord` provides given the field order. Window arithmetic
/// is plain calendar-month subtraction; no calendar library is involved.
///
/// # Example
///
/// ```
/// use payroll_anomaly_engine::models::Period;
///
/// let reference = Period { year: 2024, month: 2 };
/// let start = reference.months_back(6);
/// assert_eq!(start, Period { year: 2023, month: 8 });
/// assert!(start < reference);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    /// The calendar year of the payroll cycle.
    pub year: i32,
    /// The calendar month of the payroll cycle (1-12).
    pub month: u32,
}

impl Period {
    /// Creates a period from raw year and month values.
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Returns true if the month falls within the calendar range 1-12.
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
    }

    /// Returns the period `months` calendar months before this one.
    ///
    /// Subtraction borrows years when the month index underflows, so the
    /// result is a real calendar month rather than a day-count
    /// approximation.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_anomaly_engine::models::Period;
    ///
    /// let p = Period { year: 2024, month: 8 };
    /// assert_eq!(p.months_back(6), Period { year: 2024, month: 2 });
    /// assert_eq!(p.months_back(8), Period { year: 2023, month: 12 });
    /// ```
    pub fn months_back(&self, months: u32) -> Period {
        let total = i64::from(self.year) * 12 + i64::from(self.month) - 1 - i64::from(months);
        Period {
            year: total.div_euclid(12) as i32,
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(Period::new(2023, 12) < Period::new(2024, 1));
        assert!(Period::new(2024, 1) < Period::new(2024, 2));
        assert!(Period::new(2024, 8) == Period::new(2024, 8));
        assert!(Period::new(2025, 1) > Period::new(2024, 12));
    }

    #[test]
    fn test_months_back_within_year() {
        let p = Period::new(2024, 8);
        assert_eq!(p.months_back(6), Period::new(2024, 2));
    }

    #[test]
    fn test_months_back_borrows_year() {
        let p = Period::new(2024, 2);
        assert_eq!(p.months_back(6), Period::new(2023, 8));
    }

    #[test]
    fn test_months_back_lands_on_december() {
        let p = Period::new(2024, 6);
        assert_eq!(p.months_back(6), Period::new(2023, 12));
    }

    #[test]
    fn test_months_back_zero_is_identity() {
        let p = Period::new(2024, 8);
        assert_eq!(p.months_back(0), p);
    }

    #[test]
    fn test_months_back_multiple_years() {
        let p = Period::new(2024, 3);
        assert_eq!(p.months_back(27), Period::new(2021, 12));
    }

    #[test]
    fn test_is_valid() {
        assert!(Period::new(2024, 1).is_valid());
        assert!(Period::new(2024, 12).is_valid());
        assert!(!Period::new(2024, 0).is_valid());
        assert!(!Period::new(2024, 13).is_valid());
    }

    #[test]
    fn test_display_pads_month() {
        assert_eq!(Period::new(2024, 2).to_string(), "2024-02");
        assert_eq!(Period::new(2023, 11).to_string(), "2023-11");
    }

    #[test]
    fn test_serde_round_trip() {
        let period = Period::new(2024, 8);
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, r#"{"year":2024,"month":8}"#);
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
    }

    proptest! {
        #[test]
        fn prop_months_back_stays_valid(year in 1990i32..2100, month in 1u32..=12, back in 0u32..600) {
            let result = Period::new(year, month).months_back(back);
            prop_assert!(result.is_valid());
        }

        #[test]
        fn prop_months_back_is_strictly_earlier(year in 1990i32..2100, month in 1u32..=12, back in 1u32..600) {
            let p = Period::new(year, month);
            prop_assert!(p.months_back(back) < p);
        }

        #[test]
        fn prop_months_back_composes(year in 1990i32..2100, month in 1u32..=12, a in 0u32..120, b in 0u32..120) {
            let p = Period::new(year, month);
            prop_assert_eq!(p.months_back(a).months_back(b), p.months_back(a + b));
        }
    }
}
