use crate::models::{ClimatologyRecord, DailyRecord, DayRecords, RecentYearRow, RecordEntry};
use crate::utils::calendar::is_leap_day;
use crate::utils::constants::LEAP_DAY_LOOKBACK_YEARS;

/// Read-only questions asked of the daily and climatology tables.
///
/// Lookups by calendar day scan the daily table; lookups by year use the
/// date ordering of the table.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    pub(crate) daily: &'a [DailyRecord],
    pub(crate) climatology: &'a [ClimatologyRecord],
}

impl<'a> QueryEngine<'a> {
    /// `daily` must be sorted by date, as produced by the merger.
    pub fn new(daily: &'a [DailyRecord], climatology: &'a [ClimatologyRecord]) -> Self {
        Self { daily, climatology }
    }

    pub(crate) fn records_on(&self, month: u32, day: u32) -> impl Iterator<Item = &'a DailyRecord> + 'a {
        let daily = self.daily;
        daily.iter().filter(move |r| r.is_on(month, day))
    }

    pub(crate) fn records_in_year(&self, year: i32) -> &'a [DailyRecord] {
        let start = self.daily.partition_point(|r| r.year < year);
        let end = self.daily.partition_point(|r| r.year <= year);
        &self.daily[start..end]
    }

    pub fn climatology_on(&self, month: u32, day: u32) -> Option<&'a ClimatologyRecord> {
        self.climatology.iter().find(|c| c.is_on(month, day))
    }

    /// Mean temperatures recorded on one calendar day, oldest first.
    pub fn day_values(&self, month: u32, day: u32) -> Vec<f64> {
        self.records_on(month, day).map(|r| r.mean).collect()
    }

    /// Lows and highs on (month, day) for the most recent years, newest first.
    ///
    /// The window ends at the latest year with a value for that day and spans
    /// `count` years. Feb 29 instead looks back a fixed 16 years so that
    /// several leap years are included.
    pub fn recent_years(&self, month: u32, day: u32, count: usize) -> Vec<RecentYearRow> {
        let Some(last_year) = self.records_on(month, day).map(|r| r.year).max() else {
            return Vec::new();
        };

        let first_year = if is_leap_day(month, day) {
            last_year - LEAP_DAY_LOOKBACK_YEARS
        } else {
            let span = i32::try_from(count).unwrap_or(i32::MAX);
            last_year.saturating_sub(span).saturating_add(1)
        };

        let mut rows: Vec<RecentYearRow> = self
            .records_on(month, day)
            .filter(|r| (first_year..=last_year).contains(&r.year))
            .map(|r| RecentYearRow {
                year: r.year,
                low: r.min,
                high: r.max,
            })
            .collect();
        rows.reverse();
        rows
    }

    /// The `top_n` coldest minima and hottest maxima ever recorded on (month, day).
    ///
    /// Years without that measurement are skipped; equal temperatures keep
    /// chronological order.
    pub fn day_records(&self, month: u32, day: u32, top_n: usize) -> DayRecords {
        let mut lows: Vec<RecordEntry> = self
            .records_on(month, day)
            .filter_map(|r| r.min.map(|t| RecordEntry { year: r.year, temperature: t }))
            .collect();
        let mut highs: Vec<RecordEntry> = self
            .records_on(month, day)
            .filter_map(|r| r.max.map(|t| RecordEntry { year: r.year, temperature: t }))
            .collect();

        lows.sort_by(|a, b| a.temperature.total_cmp(&b.temperature));
        highs.sort_by(|a, b| b.temperature.total_cmp(&a.temperature));
        lows.truncate(top_n);
        highs.truncate(top_n);

        DayRecords { lows, highs }
    }

    /// Percentage of years whose mean on (month, day) reached `threshold`,
    /// rounded to one decimal. `None` when the day has no observations.
    pub fn exceedance_probability(&self, month: u32, day: u32, threshold: f64) -> Option<f64> {
        let (total, at_least) = self
            .records_on(month, day)
            .fold((0usize, 0usize), |(total, hits), r| {
                (total + 1, hits + usize::from(r.mean >= threshold))
            });

        if total == 0 {
            return None;
        }

        let percentage = at_least as f64 * 100.0 / total as f64;
        Some((percentage * 10.0).round() / 10.0)
    }

    /// Years present in the daily table, most recent first.
    pub fn available_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.daily.iter().map(|r| r.year).collect();
        years.dedup();
        years.reverse();
        years
    }
}
