use crate::error::{ProcessingError, Result};
use crate::models::{DailyRecord, DatedValue, TemperatureKind, TemperatureSet};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Outer-joins the mean, min and max series into the daily table.
pub struct DataMerger;

impl DataMerger {
    pub fn new() -> Self {
        Self
    }

    /// Merge the three flattened series into date-ordered daily records.
    ///
    /// The mean series is mandatory; dates it does not cover are dropped.
    pub fn merge(
        &self,
        mean: &[DatedValue],
        min: &[DatedValue],
        max: &[DatedValue],
    ) -> Result<Vec<DailyRecord>> {
        if mean.is_empty() {
            return Err(ProcessingError::DataIntegrity(
                "mean temperature series is empty".to_string(),
            ));
        }

        let grouped = self.group_by_date(&[
            (TemperatureKind::Mean, mean),
            (TemperatureKind::Min, min),
            (TemperatureKind::Max, max),
        ]);

        let mut records = Vec::with_capacity(mean.len());
        let mut orphaned = 0usize;
        for (date, set) in &grouped {
            match DailyRecord::from_set(*date, set) {
                Some(record) => records.push(record),
                None => orphaned += 1,
            }
        }

        if orphaned > 0 {
            warn!(orphaned, "Dropped min/max values on dates without a mean temperature");
        }
        debug!(
            records = records.len(),
            with_min_max = records.iter().filter(|r| r.has_min_max()).count(),
            "Series merged"
        );

        Ok(records)
    }

    /// Group values of every series by date
    fn group_by_date(
        &self,
        series: &[(TemperatureKind, &[DatedValue])],
    ) -> BTreeMap<NaiveDate, TemperatureSet> {
        let mut grouped: BTreeMap<NaiveDate, TemperatureSet> = BTreeMap::new();

        for (kind, values) in series {
            for value in values.iter() {
                grouped.entry(value.date).or_default().set(*kind, value.value);
            }
        }

        grouped
    }
}

impl Default for DataMerger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(start: NaiveDate, values: &[f64]) -> Vec<DatedValue> {
        start
            .iter_days()
            .zip(values)
            .map(|(date, &value)| DatedValue::new(date, value))
            .collect()
    }

    #[test]
    fn test_merge_complete_data() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 15).unwrap();
        let records = DataMerger::new()
            .merge(&series(date, &[20.0]), &series(date, &[15.0]), &series(date, &[25.0]))
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mean, 20.0);
        assert_eq!(records[0].min, Some(15.0));
        assert_eq!(records[0].max, Some(25.0));
    }

    #[test]
    fn test_min_max_starting_later_leaves_gaps() {
        let start = NaiveDate::from_ymd_opt(1877, 12, 30).unwrap();
        let later = NaiveDate::from_ymd_opt(1878, 1, 1).unwrap();
        let records = DataMerger::new()
            .merge(
                &series(start, &[1.0, 2.0, 3.0, 4.0]),
                &series(later, &[-1.0, 0.0]),
                &series(later, &[5.0, 6.0]),
            )
            .unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].min, None);
        assert_eq!(records[1].max, None);
        assert_eq!(records[2].date, later);
        assert_eq!(records[2].min, Some(-1.0));
        assert_eq!(records[3].max, Some(6.0));
        assert!(records.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_dates_without_mean_are_dropped() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let records = DataMerger::new()
            .merge(&series(start, &[1.0]), &series(start, &[0.0, 0.5]), &[])
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_empty_mean_series_is_integrity_error() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let err = DataMerger::new()
            .merge(&[], &series(start, &[0.0]), &series(start, &[1.0]))
            .unwrap_err();
        assert!(err.is_data_integrity());
    }
}
