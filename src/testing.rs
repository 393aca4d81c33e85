//! Synthetic grids and tables shared by unit tests.

use crate::models::{DailyRecord, GridRow};
use crate::utils::calendar::Month;
use chrono::NaiveDate;

/// A full year of grid rows with `value` on every real date and sentinels elsewhere.
pub(crate) fn complete_year_rows(year: i32, value: i32) -> Vec<GridRow> {
    truncated_year_rows(year, 12, 31, value)
}

/// Grid rows for a final year whose last recorded date is `last_month`/`last_day`.
pub(crate) fn truncated_year_rows(year: i32, last_month: u32, last_day: u32, value: i32) -> Vec<GridRow> {
    (1..=31)
        .map(|day| {
            let mut cells = [None; 12];
            for month in Month::ALL {
                let recorded = match month.number().cmp(&last_month) {
                    std::cmp::Ordering::Less => true,
                    std::cmp::Ordering::Equal => day <= last_day,
                    std::cmp::Ordering::Greater => false,
                };
                if recorded && day <= month.days_in(year) {
                    cells[month.index()] = Some(value);
                }
            }
            GridRow::new(year, day, cells)
        })
        .collect()
}

/// Contiguous daily records over whole years; min and max sit 5 degrees either side of the mean.
pub(crate) fn daily_records(
    first_year: i32,
    last_year: i32,
    mean: impl Fn(NaiveDate) -> f64,
) -> Vec<DailyRecord> {
    let start = NaiveDate::from_ymd_opt(first_year, 1, 1).expect("valid start date");
    let end = NaiveDate::from_ymd_opt(last_year, 12, 31).expect("valid end date");

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| {
            let t = mean(date);
            DailyRecord::new(date, t, Some(t - 5.0), Some(t + 5.0))
        })
        .collect()
}
