use crate::analyzers::rolling::centered_average;
use crate::analyzers::QueryEngine;
use crate::models::{ClimatologyEnvelope, YearComparisonRow, YearComparisonSeries, YearTrace};
use crate::utils::calendar::{axis_dates, axis_slot, Month, AXIS_LEN};
use crate::utils::constants::ALL_TIME_LABEL;

impl<'a> QueryEngine<'a> {
    /// All-time row followed by one row per requested year (at most `max_years`).
    pub fn year_comparison_table(&self, years: &[i32], max_years: usize) -> Vec<YearComparisonRow> {
        let mut rows = Vec::with_capacity(years.len().min(max_years) + 1);

        let all_time_average = if self.climatology.is_empty() {
            None
        } else {
            let total: f64 = self.climatology.iter().map(|c| c.average).sum();
            Some(total / self.climatology.len() as f64)
        };
        rows.push(YearComparisonRow::new(
            ALL_TIME_LABEL,
            all_time_average,
            self.daily.iter().filter_map(|r| r.min).reduce(f64::min),
            self.daily.iter().filter_map(|r| r.max).reduce(f64::max),
        ));

        for &year in years.iter().take(max_years) {
            let records = self.records_in_year(year);
            let average = if records.is_empty() {
                None
            } else {
                Some(records.iter().map(|r| r.mean).sum::<f64>() / records.len() as f64)
            };

            rows.push(YearComparisonRow::new(
                year.to_string(),
                average,
                records.iter().filter_map(|r| r.min).reduce(f64::min),
                records.iter().filter_map(|r| r.max).reduce(f64::max),
            ));
        }

        rows
    }

    /// The year's mean temperatures smoothed over `window` days and placed on
    /// the canonical axis. Slots the year has no value for stay `None`.
    pub fn year_trace(&self, year: i32, window: usize) -> YearTrace {
        let records = self.records_in_year(year);
        let means: Vec<f64> = records.iter().map(|r| r.mean).collect();
        let smoothed = centered_average(&means, window);

        let mut values = vec![None; AXIS_LEN];
        for (record, value) in records.iter().zip(smoothed) {
            if let Some(slot) = axis_slot(record.month, record.day) {
                values[slot] = value;
            }
        }

        YearTrace {
            year,
            window,
            values,
        }
    }

    /// Low, 5th percentile, average, 95th percentile and high for every axis slot.
    pub fn climatology_envelope(&self) -> ClimatologyEnvelope {
        let mut envelope = ClimatologyEnvelope {
            dates: axis_dates(),
            low: vec![None; AXIS_LEN],
            p05: vec![None; AXIS_LEN],
            average: vec![None; AXIS_LEN],
            p95: vec![None; AXIS_LEN],
            high: vec![None; AXIS_LEN],
        };

        for normal in self.climatology {
            let Some(slot) = axis_slot(normal.month, normal.day) else {
                continue;
            };
            envelope.low[slot] = normal.low;
            envelope.p05[slot] = Some(normal.p05);
            envelope.average[slot] = Some(normal.average);
            envelope.p95[slot] = Some(normal.p95);
            envelope.high[slot] = normal.high;
        }

        envelope
    }

    /// All-time average plus smoothed traces for up to `max_years` years,
    /// limited to the axis slots from the start of `start` to the end of `end`.
    pub fn year_comparison_series(
        &self,
        years: &[i32],
        window: usize,
        start: Month,
        end: Month,
        max_years: usize,
    ) -> YearComparisonSeries {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let first = axis_slot(start.number(), 1).unwrap_or(0);
        let last = axis_slot(end.number(), end.max_days()).unwrap_or(AXIS_LEN - 1);
        let span = first..last + 1;

        let envelope = self.climatology_envelope();
        let traces = years
            .iter()
            .take(max_years)
            .map(|&year| {
                let mut trace = self.year_trace(year, window);
                trace.values = trace.values[span.clone()].to_vec();
                trace
            })
            .collect();

        YearComparisonSeries {
            dates: envelope.dates[span.clone()].to_vec(),
            average: envelope.average[span].to_vec(),
            traces,
        }
    }
}
