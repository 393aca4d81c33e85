//! Month enumeration and the canonical day-of-year axis used for overlay plots.
//!
//! Grid columns are addressed through [`Month`] rather than by column position.
//! The canonical axis is a leap year, so every (month, day) pair that can occur
//! in the record, Feb 29 included, has exactly one slot.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Year used to build the 366-slot plotting axis.
pub const CANONICAL_YEAR: i32 = 2000;
pub const AXIS_LEN: usize = 366;

/// Month lengths in a leap-year calendar, indexed by `Month::index()`.
const MONTH_LENGTHS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const SHORT_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const LONG_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1..=12 => Some(Self::ALL[number as usize - 1]),
            _ => None,
        }
    }

    pub fn number(&self) -> u32 {
        *self as u32
    }

    /// Zero-based position, which is also the grid column offset after year and day.
    pub fn index(&self) -> usize {
        *self as usize - 1
    }

    /// Longest possible length of this month (February counts 29).
    pub fn max_days(&self) -> u32 {
        MONTH_LENGTHS[self.index()]
    }

    /// Gregorian length of this month in `year`.
    pub fn days_in(&self, year: i32) -> u32 {
        if *self == Month::February && !is_leap_year(year) {
            28
        } else {
            self.max_days()
        }
    }

    pub fn short_name(&self) -> &'static str {
        SHORT_NAMES[self.index()]
    }

    pub fn long_name(&self) -> &'static str {
        LONG_NAMES[self.index()]
    }
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

pub fn is_leap_day(month: u32, day: u32) -> bool {
    month == 2 && day == 29
}

/// Slot of (month, day) on the canonical axis, `None` for dates that never exist.
pub fn axis_slot(month: u32, day: u32) -> Option<usize> {
    NaiveDate::from_ymd_opt(CANONICAL_YEAR, month, day).map(|d| d.ordinal0() as usize)
}

/// Every date of the canonical year, one per axis slot.
pub fn axis_dates() -> Vec<NaiveDate> {
    Month::ALL
        .iter()
        .flat_map(|month| {
            (1..=month.max_days())
                .filter_map(move |day| NaiveDate::from_ymd_opt(CANONICAL_YEAR, month.number(), day))
        })
        .collect()
}

/// Clamp a day selection to the month length, returning `(day_max, day_value)`.
pub fn clamp_day(month: Month, day: u32) -> (u32, u32) {
    let day_max = month.max_days();
    (day_max, day.clamp(1, day_max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_lookup() {
        assert_eq!(Month::from_number(1), Some(Month::January));
        assert_eq!(Month::from_number(12), Some(Month::December));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
        assert_eq!(Month::June.index(), 5);
        assert_eq!(Month::February.long_name(), "February");
        assert_eq!(Month::September.short_name(), "sep");
    }

    #[test]
    fn test_month_lengths() {
        assert_eq!(Month::February.max_days(), 29);
        assert_eq!(Month::February.days_in(2019), 28);
        assert_eq!(Month::February.days_in(2020), 29);
        assert_eq!(Month::February.days_in(1900), 28);
        assert_eq!(Month::April.days_in(2019), 30);
    }

    #[test]
    fn test_axis() {
        let dates = axis_dates();
        assert_eq!(dates.len(), AXIS_LEN);
        assert_eq!(axis_slot(1, 1), Some(0));
        assert_eq!(axis_slot(2, 29), Some(59));
        assert_eq!(axis_slot(3, 1), Some(60));
        assert_eq!(axis_slot(12, 31), Some(365));
        assert_eq!(axis_slot(2, 30), None);
        assert_eq!(axis_slot(4, 31), None);
    }

    #[test]
    fn test_clamp_day() {
        assert_eq!(clamp_day(Month::February, 31), (29, 29));
        assert_eq!(clamp_day(Month::April, 15), (30, 15));
        assert_eq!(clamp_day(Month::January, 31), (31, 31));
    }
}
