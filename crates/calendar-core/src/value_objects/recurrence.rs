//! Recurrence rule attached to an event

use std::fmt;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often an event repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl RecurrencePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parse the stored representation. Unknown values map to `None`.
    pub fn from_db(value: &str) -> Self {
        match value {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::None,
        }
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recurrence rule: pattern, step and optional last date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub pattern: RecurrencePattern,
    pub interval: u32,
    pub until: Option<NaiveDate>,
}

impl Default for Recurrence {
    fn default() -> Self {
        Self::none()
    }
}

impl Recurrence {
    /// A one-off event
    pub const fn none() -> Self {
        Self {
            pattern: RecurrencePattern::None,
            interval: 1,
            until: None,
        }
    }

    pub const fn new(pattern: RecurrencePattern, interval: u32, until: Option<NaiveDate>) -> Self {
        Self {
            pattern,
            interval,
            until,
        }
    }

    #[inline]
    pub fn is_recurring(&self) -> bool {
        self.pattern != RecurrencePattern::None
    }

    /// Date of the `n`-th series instance counted from `first` (instance 0).
    ///
    /// Monthly steps clamp to the last day of shorter months. Returns `None`
    /// when the date overflows or for one-off events past instance 0.
    pub fn nth_date(&self, first: NaiveDate, n: u32) -> Option<NaiveDate> {
        if n == 0 {
            return Some(first);
        }
        let steps = n.checked_mul(self.interval.max(1))?;
        match self.pattern {
            RecurrencePattern::None => None,
            RecurrencePattern::Daily => first.checked_add_days(Days::new(u64::from(steps))),
            RecurrencePattern::Weekly => {
                first.checked_add_days(Days::new(u64::from(steps).checked_mul(7)?))
            }
            RecurrencePattern::Monthly => first.checked_add_months(Months::new(steps)),
        }
    }

    /// Index of the first instance whose `span_days`-long run ends on or
    /// after `date`. One-off events always start at instance 0.
    pub fn first_instance_reaching(
        &self,
        first: NaiveDate,
        span_days: i64,
        date: NaiveDate,
    ) -> u32 {
        let lead = (date - first).num_days() - span_days.max(0);
        if lead <= 0 || !self.is_recurring() {
            return 0;
        }

        // Lower bound from the longest possible step, then walk forward
        let longest_step = i64::from(self.interval.max(1))
            * match self.pattern {
                RecurrencePattern::Daily => 1,
                RecurrencePattern::Weekly => 7,
                RecurrencePattern::Monthly | RecurrencePattern::None => 31,
            };
        let mut n = u32::try_from(lead / longest_step).unwrap_or(u32::MAX);
        let Some(target) = first.checked_add_days(Days::new(lead.unsigned_abs())) else {
            return n;
        };

        while n < u32::MAX {
            match self.nth_date(first, n) {
                Some(instance) if instance < target => n += 1,
                _ => break,
            }
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_pattern_round_trip_through_db_text() {
        for p in [
            RecurrencePattern::None,
            RecurrencePattern::Daily,
            RecurrencePattern::Weekly,
            RecurrencePattern::Monthly,
        ] {
            assert_eq!(RecurrencePattern::from_db(p.as_str()), p);
        }
        assert_eq!(RecurrencePattern::from_db("yearly"), RecurrencePattern::None);
    }

    #[test]
    fn test_nth_date_steps() {
        let first = d(2024, 1, 31);
        let weekly = Recurrence::new(RecurrencePattern::Weekly, 2, None);
        assert_eq!(weekly.nth_date(first, 1), Some(d(2024, 2, 14)));

        let monthly = Recurrence::new(RecurrencePattern::Monthly, 1, None);
        assert_eq!(monthly.nth_date(first, 1), Some(d(2024, 2, 29)));
        assert_eq!(monthly.nth_date(first, 2), Some(d(2024, 3, 31)));

        let daily = Recurrence::new(RecurrencePattern::Daily, 3, None);
        assert_eq!(daily.nth_date(first, 2), Some(d(2024, 2, 6)));
    }

    #[test]
    fn test_one_off_has_single_instance() {
        let r = Recurrence::none();
        assert!(!r.is_recurring());
        assert_eq!(r.nth_date(d(2024, 6, 1), 0), Some(d(2024, 6, 1)));
        assert_eq!(r.nth_date(d(2024, 6, 1), 1), None);
    }

    #[test]
    fn test_first_instance_reaching_far_date() {
        let first = d(2024, 1, 1);
        let daily = Recurrence::new(RecurrencePattern::Daily, 1, None);
        let n = daily.first_instance_reaching(first, 0, d(2026, 10, 1));
        assert_eq!(daily.nth_date(first, n), Some(d(2026, 10, 1)));

        // a three-day run starting two days earlier still touches the date
        let weekly = Recurrence::new(RecurrencePattern::Weekly, 1, None);
        let n = weekly.first_instance_reaching(first, 2, d(2024, 3, 12));
        assert_eq!(weekly.nth_date(first, n), Some(d(2024, 3, 11)));

        let monthly = Recurrence::new(RecurrencePattern::Monthly, 1, None);
        let start = d(2024, 1, 31);
        let n = monthly.first_instance_reaching(start, 0, d(2030, 2, 10));
        assert_eq!(monthly.nth_date(start, n), Some(d(2030, 2, 28)));
        assert!(monthly.nth_date(start, n - 1).is_some_and(|prev| prev < d(2030, 2, 10)));
    }

    #[test]
    fn test_first_instance_reaching_before_series_is_zero() {
        let first = d(2024, 6, 1);
        let daily = Recurrence::new(RecurrencePattern::Daily, 1, None);
        assert_eq!(daily.first_instance_reaching(first, 0, d(2024, 5, 1)), 0);
        assert_eq!(Recurrence::none().first_instance_reaching(first, 0, d(2030, 1, 1)), 0);
    }
}
