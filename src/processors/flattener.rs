use crate::models::{DatedValue, RawGrid};
use crate::utils::calendar::Month;
use crate::utils::constants::{MAX_DAY_INDEX, TENTHS_PER_DEGREE};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Turns an annual grid into a chronological series of daily values.
///
/// Every year but the last emits all real dates whose cell is not a sentinel.
/// The last year stops at the last recorded date, derived from the sentinel
/// padding at the end of the grid.
pub struct Flattener;

impl Flattener {
    pub fn new() -> Self {
        Self
    }

    pub fn flatten(&self, grid: &RawGrid) -> Vec<DatedValue> {
        let Some(final_year) = grid.final_year() else {
            return Vec::new();
        };

        let mut values = Vec::with_capacity(grid.rows().len() * 12);
        let mut dropped = 0usize;

        for year in grid.years() {
            let cutoff = if year == final_year {
                match self.final_date(grid, year) {
                    Some(date) => Some(date),
                    None => {
                        warn!(source = grid.source_name(), year, "Final year has no recorded data");
                        continue;
                    }
                }
            } else {
                None
            };

            dropped += self.flatten_year(grid, year, cutoff, &mut values);
        }

        if dropped > 0 {
            warn!(
                source = grid.source_name(),
                dropped, "Dropped values on nonexistent calendar dates"
            );
        }
        debug!(
            source = grid.source_name(),
            values = values.len(),
            first = ?values.first().map(|v| v.date),
            last = ?values.last().map(|v| v.date),
            "Grid flattened"
        );

        values
    }

    /// Last recorded date of `year`, taken as the final year of the grid.
    ///
    /// The first month whose column is entirely sentinel ends the record; the
    /// month before it is the last month, and its last day is 31 minus the
    /// number of sentinel cells in that column.
    pub fn final_date(&self, grid: &RawGrid, year: i32) -> Option<NaiveDate> {
        let first_empty = Month::ALL
            .iter()
            .position(|&month| grid.column(year, month).iter().all(Option::is_none));

        let last_month = match first_empty {
            Some(0) => return None,
            Some(index) => Month::ALL[index - 1],
            None => Month::December,
        };

        let sentinels = grid
            .column(year, last_month)
            .iter()
            .filter(|cell| cell.is_none())
            .count() as u32;
        let last_day = (MAX_DAY_INDEX - sentinels).min(last_month.days_in(year));

        NaiveDate::from_ymd_opt(year, last_month.number(), last_day)
    }

    /// Append one year's values, returning how many cells sat on impossible dates.
    fn flatten_year(
        &self,
        grid: &RawGrid,
        year: i32,
        cutoff: Option<NaiveDate>,
        out: &mut Vec<DatedValue>,
    ) -> usize {
        let mut dropped = 0;

        for month in Month::ALL {
            for (offset, cell) in grid.column(year, month).iter().enumerate() {
                let Some(raw) = *cell else { continue };
                let day = offset as u32 + 1;

                let Some(date) = NaiveDate::from_ymd_opt(year, month.number(), day) else {
                    dropped += 1;
                    continue;
                };

                if cutoff.is_some_and(|last| date > last) {
                    continue;
                }

                out.push(DatedValue::new(date, f64::from(raw) / TENTHS_PER_DEGREE));
            }
        }

        dropped
    }
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new()
    }
}
