use chrono::NaiveDate;
use serde::Serialize;

use crate::utils::constants::NO_DATA_MARKER;

/// A row of the "recent years on this date" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentYearRow {
    pub year: i32,
    pub low: Option<f64>,
    pub high: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordEntry {
    pub year: i32,
    pub temperature: f64,
}

/// Record lows (coldest first) and record highs (hottest first) for one date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayRecords {
    pub lows: Vec<RecordEntry>,
    pub highs: Vec<RecordEntry>,
}

/// Display row of the year comparison table. Numbers are already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearComparisonRow {
    pub label: String,
    pub average: String,
    pub low: String,
    pub high: String,
}

impl YearComparisonRow {
    pub fn new(label: impl Into<String>, average: Option<f64>, low: Option<f64>, high: Option<f64>) -> Self {
        Self {
            label: label.into(),
            average: format_fixed(average, 2),
            low: format_fixed(low, 1),
            high: format_fixed(high, 1),
        }
    }
}

/// Fixed-point rendering used at the presentation boundary.
pub fn format_fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => NO_DATA_MARKER.to_string(),
    }
}

/// Smoothed mean temperature of one year on the canonical 366-slot axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTrace {
    pub year: i32,
    pub window: usize,
    pub values: Vec<Option<f64>>,
}

/// The five all-time daily series drawn behind a year trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimatologyEnvelope {
    pub dates: Vec<NaiveDate>,
    pub low: Vec<Option<f64>>,
    pub p05: Vec<Option<f64>>,
    pub average: Vec<Option<f64>>,
    pub p95: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
}

/// All-time average and selected year traces over a span of months.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearComparisonSeries {
    pub dates: Vec<NaiveDate>,
    pub average: Vec<Option<f64>>,
    pub traces: Vec<YearTrace>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_formatting() {
        assert_eq!(format_fixed(Some(0.1 + 0.2), 1), "0.3");
        assert_eq!(format_fixed(Some(10.0), 2), "10.00");
        assert_eq!(format_fixed(None, 1), "-");
        assert_eq!(format_fixed(Some(f64::NAN), 2), "-");
    }

    #[test]
    fn test_comparison_row() {
        let row = YearComparisonRow::new("2020", Some(10.456), Some(-3.04), None);
        assert_eq!(row.average, "10.46");
        assert_eq!(row.low, "-3.0");
        assert_eq!(row.high, "-");
    }
}
