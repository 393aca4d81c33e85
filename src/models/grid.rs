use crate::error::{ProcessingError, Result};
use crate::utils::calendar::Month;
use crate::utils::constants::MAX_DAY_INDEX;
use std::collections::HashSet;

/// One line of an annual grid: a day-of-month index and its twelve monthly cells.
///
/// Cells are in tenths of a degree; `None` marks a sentinel (nonexistent or
/// not yet recorded day).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub year: i32,
    pub day: u32,
    pub cells: [Option<i32>; 12],
}

impl GridRow {
    pub fn new(year: i32, day: u32, cells: [Option<i32>; 12]) -> Self {
        Self { year, day, cells }
    }

    pub fn cell(&self, month: Month) -> Option<i32> {
        self.cells[month.index()]
    }
}

/// A parsed annual grid, rows sorted by (year, day).
#[derive(Debug, Clone)]
pub struct RawGrid {
    source_name: String,
    rows: Vec<GridRow>,
}

impl RawGrid {
    pub fn new(source_name: impl Into<String>, mut rows: Vec<GridRow>) -> Result<Self> {
        let source_name = source_name.into();
        let mut seen = HashSet::with_capacity(rows.len());

        for row in &rows {
            if row.day == 0 || row.day > MAX_DAY_INDEX {
                return Err(ProcessingError::data_source(
                    &source_name,
                    format!("year {} has day index {} outside 1..=31", row.year, row.day),
                ));
            }
            if !seen.insert((row.year, row.day)) {
                return Err(ProcessingError::data_source(
                    &source_name,
                    format!("duplicate row for year {} day {}", row.year, row.day),
                ));
            }
        }

        rows.sort_by_key(|r| (r.year, r.day));
        Ok(Self { source_name, rows })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|r| r.year).collect();
        years.dedup();
        years
    }

    pub fn final_year(&self) -> Option<i32> {
        self.rows.last().map(|r| r.year)
    }

    pub fn year_rows(&self, year: i32) -> &[GridRow] {
        let start = self.rows.partition_point(|r| r.year < year);
        let end = self.rows.partition_point(|r| r.year <= year);
        &self.rows[start..end]
    }

    /// The 31 cells of one month column; day indices absent from the grid read as sentinel.
    pub fn column(&self, year: i32, month: Month) -> [Option<i32>; MAX_DAY_INDEX as usize] {
        let mut column = [None; MAX_DAY_INDEX as usize];
        for row in self.year_rows(year) {
            column[row.day as usize - 1] = row.cell(month);
        }
        column
    }
}
