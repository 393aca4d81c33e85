use serde::{Deserialize, Serialize};

/// Daily normal for one (month, day) across every year of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimatologyRecord {
    pub month: u32,
    pub day: u32,
    /// Lowest minimum ever recorded; absent if no minimum was ever recorded.
    pub low: Option<f64>,
    /// Highest maximum ever recorded.
    pub high: Option<f64>,
    pub average: f64,
    pub p05: f64,
    pub p95: f64,
    pub observations: usize,
}

impl ClimatologyRecord {
    pub fn is_on(&self, month: u32, day: u32) -> bool {
        self.month == month && self.day == day
    }
}
