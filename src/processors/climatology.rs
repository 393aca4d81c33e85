use crate::models::{ClimatologyRecord, DailyRecord};
use std::collections::BTreeMap;
use tracing::debug;

/// Builds daily normals by grouping the daily table on (month, day).
pub struct ClimatologyAggregator;

impl ClimatologyAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, records: &[DailyRecord]) -> Vec<ClimatologyRecord> {
        let mut groups: BTreeMap<(u32, u32), Vec<&DailyRecord>> = BTreeMap::new();
        for record in records {
            groups.entry((record.month, record.day)).or_default().push(record);
        }

        let climatology: Vec<ClimatologyRecord> = groups
            .into_iter()
            .filter_map(|((month, day), group)| Self::summarize(month, day, &group))
            .collect();

        debug!(days = climatology.len(), "Climatology aggregated");
        climatology
    }

    fn summarize(month: u32, day: u32, group: &[&DailyRecord]) -> Option<ClimatologyRecord> {
        if group.is_empty() {
            return None;
        }

        let mut means: Vec<f64> = group.iter().map(|r| r.mean).collect();
        means.sort_by(f64::total_cmp);

        let low = group.iter().filter_map(|r| r.min).reduce(f64::min);
        let high = group.iter().filter_map(|r| r.max).reduce(f64::max);
        let average = means.iter().sum::<f64>() / means.len() as f64;

        Some(ClimatologyRecord {
            month,
            day,
            low,
            high,
            average,
            p05: percentile(&means, 5.0),
            p95: percentile(&means, 95.0),
            observations: means.len(),
        })
    }
}

impl Default for ClimatologyAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear-interpolation percentile of ascending `sorted` values.
///
/// rank = p/100 * (n - 1); the result interpolates between the values at the
/// floor and ceiling of that rank. Returns NaN for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let fraction = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        }
    }
}
