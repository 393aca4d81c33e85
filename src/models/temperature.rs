use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::constants::{MAX_PLAUSIBLE_TEMP, MIN_PLAUSIBLE_TEMP};

/// Which of the three daily series a grid or value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureKind {
    Mean,
    Min,
    Max,
}

impl TemperatureKind {
    pub const ALL: [TemperatureKind; 3] = [
        TemperatureKind::Mean,
        TemperatureKind::Min,
        TemperatureKind::Max,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureKind::Mean => "mean",
            TemperatureKind::Min => "min",
            TemperatureKind::Max => "max",
        }
    }
}

impl fmt::Display for TemperatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One flattened observation in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

impl DatedValue {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    pub fn is_plausible(&self) -> bool {
        (MIN_PLAUSIBLE_TEMP..=MAX_PLAUSIBLE_TEMP).contains(&self.value)
    }
}

/// The three readings for one date while series are being joined.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureSet {
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, kind: TemperatureKind, value: f64) {
        match kind {
            TemperatureKind::Mean => self.mean = Some(value),
            TemperatureKind::Min => self.min = Some(value),
            TemperatureKind::Max => self.max = Some(value),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.mean.is_some() && self.min.is_some() && self.max.is_some()
    }
}
