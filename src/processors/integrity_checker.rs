use crate::error::{ProcessingError, Result};
use crate::models::DailyRecord;
use crate::utils::constants::{MAX_PLAUSIBLE_TEMP, MIN_PLAUSIBLE_TEMP, TEMPERATURE_JUMP_THRESHOLD};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct IntegrityReport {
    pub total_records: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub records_with_min_max: usize,
    pub missing_dates: usize,
    pub gaps: Vec<DateGap>,
    pub temperature_violations: Vec<TemperatureViolation>,
}

impl IntegrityReport {
    pub fn is_contiguous(&self) -> bool {
        self.gaps.is_empty()
    }
}

/// Dates missing between two consecutive records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGap {
    pub after: NaiveDate,
    pub before: NaiveDate,
    pub missing_days: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemperatureViolation {
    pub date: NaiveDate,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationType {
    MinGreaterThanMean,
    MeanGreaterThanMax,
    OutOfRange,
    SuspiciousJump,
}

/// Checks the merged daily table for ordering, contiguity and plausibility.
///
/// Only ordering problems are fatal; gaps and implausible values are reported.
pub struct IntegrityChecker {
    temperature_jump_threshold: f64,
    relationship_tolerance: f64,
}

impl IntegrityChecker {
    pub fn new() -> Self {
        Self {
            temperature_jump_threshold: TEMPERATURE_JUMP_THRESHOLD,
            relationship_tolerance: 1.0,
        }
    }

    pub fn with_jump_threshold(mut self, threshold: f64) -> Self {
        self.temperature_jump_threshold = threshold;
        self
    }

    pub fn check_integrity(&self, records: &[DailyRecord]) -> Result<IntegrityReport> {
        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            return Err(ProcessingError::DataIntegrity(
                "daily table is empty".to_string(),
            ));
        };

        let mut report = IntegrityReport {
            total_records: records.len(),
            first_date: first.date,
            last_date: last.date,
            records_with_min_max: records.iter().filter(|r| r.has_min_max()).count(),
            missing_dates: 0,
            gaps: Vec::new(),
            temperature_violations: Vec::new(),
        };

        self.check_sequence(records, &mut report)?;

        for record in records {
            self.check_record(record, &mut report);
        }

        if !report.gaps.is_empty() {
            warn!(
                gaps = report.gaps.len(),
                missing_dates = report.missing_dates,
                "Daily table is not contiguous"
            );
        }
        if !report.temperature_violations.is_empty() {
            warn!(
                violations = report.temperature_violations.len(),
                "Temperature plausibility issues found"
            );
        }

        Ok(report)
    }

    /// Dates must strictly ascend; record any gaps and large day-to-day jumps
    fn check_sequence(&self, records: &[DailyRecord], report: &mut IntegrityReport) -> Result<()> {
        for window in records.windows(2) {
            let (prev, curr) = (&window[0], &window[1]);

            if curr.date <= prev.date {
                return Err(ProcessingError::DataIntegrity(format!(
                    "daily table out of order or duplicated at {} (after {})",
                    curr.date, prev.date
                )));
            }

            let step = curr.date.signed_duration_since(prev.date).num_days();
            if step > 1 {
                report.missing_dates += (step - 1) as usize;
                report.gaps.push(DateGap {
                    after: prev.date,
                    before: curr.date,
                    missing_days: step - 1,
                });
                continue;
            }

            let jump = (curr.mean - prev.mean).abs();
            if jump > self.temperature_jump_threshold {
                report.temperature_violations.push(TemperatureViolation {
                    date: curr.date,
                    violation_type: ViolationType::SuspiciousJump,
                    details: format!(
                        "mean temperature jumped {:.1}°C from {} to {}",
                        jump, prev.date, curr.date
                    ),
                });
            }
        }

        Ok(())
    }

    fn check_record(&self, record: &DailyRecord, report: &mut IntegrityReport) {
        if record.validate().is_err() {
            report.temperature_violations.push(TemperatureViolation {
                date: record.date,
                violation_type: ViolationType::OutOfRange,
                details: format!(
                    "temperature outside plausible range [{}, {}] (mean={:.1}, min={:?}, max={:?})",
                    MIN_PLAUSIBLE_TEMP, MAX_PLAUSIBLE_TEMP, record.mean, record.min, record.max
                ),
            });
        }

        if let Some(min) = record.min {
            if min > record.mean + self.relationship_tolerance {
                report.temperature_violations.push(TemperatureViolation {
                    date: record.date,
                    violation_type: ViolationType::MinGreaterThanMean,
                    details: format!("min {:.1} > mean {:.1}", min, record.mean),
                });
            }
        }

        if let Some(max) = record.max {
            if record.mean > max + self.relationship_tolerance {
                report.temperature_violations.push(TemperatureViolation {
                    date: record.date,
                    violation_type: ViolationType::MeanGreaterThanMax,
                    details: format!("mean {:.1} > max {:.1}", record.mean, max),
                });
            }
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Integrity Check Report ===\n");
        summary.push_str(&format!("Total Records: {}\n", report.total_records));
        summary.push_str(&format!(
            "Date Span: {} to {}\n",
            report.first_date, report.last_date
        ));
        summary.push_str(&format!(
            "Records with min/max: {} ({:.1}%)\n",
            report.records_with_min_max,
            100.0 * report.records_with_min_max as f64 / report.total_records as f64
        ));
        summary.push_str(&format!(
            "Missing Dates: {} in {} gap(s)\n",
            report.missing_dates,
            report.gaps.len()
        ));
        summary.push_str(&format!(
            "\nTemperature Violations: {}\n",
            report.temperature_violations.len()
        ));

        if !report.temperature_violations.is_empty() {
            summary.push_str("\nTop 10 Violations:\n");
            for (i, violation) in report.temperature_violations.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. {}: {}\n",
                    i + 1,
                    violation.date,
                    violation.details
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: NaiveDate, mean: f64, min: Option<f64>, max: Option<f64>) -> DailyRecord {
        DailyRecord::new(date, mean, min, max)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_contiguous_table_passes() {
        let records: Vec<_> = day(2020, 2, 27)
            .iter_days()
            .take(4)
            .map(|date| record(date, 5.0, Some(1.0), Some(9.0)))
            .collect();
        let report = IntegrityChecker::new().check_integrity(&records).unwrap();

        assert!(report.is_contiguous());
        assert_eq!(report.total_records, 4);
        assert_eq!(report.records_with_min_max, 4);
        assert_eq!(report.last_date, day(2020, 3, 1));
        assert!(report.temperature_violations.is_empty());
    }

    #[test]
    fn test_gap_reported() {
        let records = vec![
            record(day(2020, 1, 1), 5.0, None, None),
            record(day(2020, 1, 4), 5.0, None, None),
        ];
        let report = IntegrityChecker::new().check_integrity(&records).unwrap();
        assert_eq!(report.missing_dates, 2);
        assert_eq!(
            report.gaps,
            vec![DateGap {
                after: day(2020, 1, 1),
                before: day(2020, 1, 4),
                missing_days: 2
            }]
        );
    }

    #[test]
    fn test_duplicates_are_fatal() {
        let records = vec![
            record(day(2020, 1, 1), 5.0, None, None),
            record(day(2020, 1, 1), 6.0, None, None),
        ];
        let err = IntegrityChecker::new().check_integrity(&records).unwrap_err();
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_empty_table_is_fatal() {
        assert!(IntegrityChecker::new()
            .check_integrity(&[])
            .unwrap_err()
            .is_data_integrity());
    }

    #[test]
    fn test_implausible_values_reported() {
        let records = vec![
            record(day(1795, 1, 1), -31.0, None, None),
            record(day(1795, 1, 2), 2.0, Some(8.0), Some(3.0)),
        ];
        let report = IntegrityChecker::new().check_integrity(&records).unwrap();
        let kinds: Vec<_> = report
            .temperature_violations
            .iter()
            .map(|v| v.violation_type)
            .collect();

        assert!(kinds.contains(&ViolationType::OutOfRange));
        assert!(kinds.contains(&ViolationType::SuspiciousJump));
        assert!(kinds.contains(&ViolationType::MinGreaterThanMean));
        assert!(!kinds.contains(&ViolationType::MeanGreaterThanMax));

        let summary = IntegrityChecker::new().generate_summary(&report);
        assert!(summary.contains("Temperature Violations: 3"));
    }
}
