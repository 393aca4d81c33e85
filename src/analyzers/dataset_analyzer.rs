use crate::error::{ProcessingError, Result};
use crate::models::DailyRecord;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DatasetStatistics {
    pub total_records: usize,
    pub date_range: (NaiveDate, NaiveDate),
    pub year_range: (i32, i32),
    pub min_max_records: usize,
    pub min_max_since: Option<NaiveDate>,
    pub temperature_stats: TemperatureStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemperatureStats {
    pub mean_of_means: f64,
    pub coldest_mean: (f64, NaiveDate),
    pub warmest_mean: (f64, NaiveDate),
    pub lowest_min: Option<(f64, NaiveDate)>,
    pub highest_max: Option<(f64, NaiveDate)>,
}

/// Whole-record statistics for the summary view.
pub struct DatasetAnalyzer;

impl DatasetAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, records: &[DailyRecord]) -> Result<DatasetStatistics> {
        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            return Err(ProcessingError::DataIntegrity(
                "No records to analyze".to_string(),
            ));
        };

        let mut coldest_mean = (first.mean, first.date);
        let mut warmest_mean = (first.mean, first.date);
        let mut lowest_min: Option<(f64, NaiveDate)> = None;
        let mut highest_max: Option<(f64, NaiveDate)> = None;
        let mut mean_sum = 0.0;
        let mut min_max_records = 0;
        let mut min_max_since = None;

        for record in records {
            mean_sum += record.mean;

            if record.mean < coldest_mean.0 {
                coldest_mean = (record.mean, record.date);
            }
            if record.mean > warmest_mean.0 {
                warmest_mean = (record.mean, record.date);
            }

            if let Some(min) = record.min {
                if lowest_min.map_or(true, |(t, _)| min < t) {
                    lowest_min = Some((min, record.date));
                }
            }
            if let Some(max) = record.max {
                if highest_max.map_or(true, |(t, _)| max > t) {
                    highest_max = Some((max, record.date));
                }
            }

            if record.has_min_max() {
                min_max_records += 1;
                min_max_since.get_or_insert(record.date);
            }
        }

        Ok(DatasetStatistics {
            total_records: records.len(),
            date_range: (first.date, last.date),
            year_range: (first.year, last.year),
            min_max_records,
            min_max_since,
            temperature_stats: TemperatureStats {
                mean_of_means: mean_sum / records.len() as f64,
                coldest_mean,
                warmest_mean,
                lowest_min,
                highest_max,
            },
        })
    }
}

impl Default for DatasetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_extreme(extreme: Option<(f64, NaiveDate)>) -> String {
    match extreme {
        Some((t, date)) => format!("{:.1}°C on {}", t, date),
        None => "No valid measurements".to_string(),
    }
}

impl DatasetStatistics {
    pub fn summary(&self) -> String {
        let min_max = match self.min_max_since {
            Some(since) => format!("{} days (since {})", self.min_max_records, since),
            None => "none".to_string(),
        };

        format!(
            "Weather Parameters: Temperature (mean/min/max)\n\
            Date Range: {} to {} ({} years)\n\
            Records: {} total\n\
            Min/Max Coverage: {}\n\
            Mean of Daily Means: {:.2}°C",
            self.date_range.0,
            self.date_range.1,
            self.year_range.1 - self.year_range.0 + 1,
            self.total_records,
            min_max,
            self.temperature_stats.mean_of_means,
        )
    }

    pub fn detailed_summary(&self) -> String {
        let stats = &self.temperature_stats;
        format!(
            "{}\n\n\
            Extreme Temperatures:\n\
            - Coldest day (mean): {}\n\
            - Warmest day (mean): {}\n\
            - Lowest minimum: {}\n\
            - Highest maximum: {}",
            self.summary(),
            describe_extreme(Some(stats.coldest_mean)),
            describe_extreme(Some(stats.warmest_mean)),
            describe_extreme(stats.lowest_min),
            describe_extreme(stats.highest_max),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(y: i32, m: u32, d: u32, mean: f64, min: Option<f64>, max: Option<f64>) -> DailyRecord {
        DailyRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), mean, min, max)
    }

    #[test]
    fn test_statistics() {
        let records = vec![
            record(1877, 12, 31, -2.0, None, None),
            record(1878, 1, 1, 1.0, Some(-4.5), Some(3.0)),
            record(1878, 1, 2, 4.0, Some(0.5), Some(8.5)),
        ];
        let stats = DatasetAnalyzer::new().analyze(&records).unwrap();

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.year_range, (1877, 1878));
        assert_eq!(stats.min_max_records, 2);
        assert_eq!(stats.min_max_since, NaiveDate::from_ymd_opt(1878, 1, 1));
        assert_eq!(stats.temperature_stats.mean_of_means, 1.0);
        assert_eq!(stats.temperature_stats.coldest_mean.0, -2.0);
        assert_eq!(stats.temperature_stats.lowest_min.unwrap().0, -4.5);
        assert_eq!(stats.temperature_stats.highest_max.unwrap().0, 8.5);

        let text = stats.detailed_summary();
        assert!(text.contains("1877-12-31 to 1878-01-02 (2 years)"));
        assert!(text.contains("Highest maximum: 8.5°C on 1878-01-02"));
    }

    #[test]
    fn test_empty_records() {
        assert!(DatasetAnalyzer::new().analyze(&[]).is_err());
    }
}
