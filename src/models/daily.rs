use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::TemperatureSet;

/// One calendar date of the merged record.
///
/// `min` and `max` are absent for dates before those series began.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub day: u32,

    #[validate(range(min = -30.0, max = 45.0))]
    pub mean: f64,

    #[validate(range(min = -30.0, max = 45.0))]
    pub min: Option<f64>,

    #[validate(range(min = -30.0, max = 45.0))]
    pub max: Option<f64>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, mean: f64, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            date,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            mean,
            min,
            max,
        }
    }

    /// Build from a joined set; `None` when the mandatory mean is missing.
    pub fn from_set(date: NaiveDate, set: &TemperatureSet) -> Option<Self> {
        set.mean.map(|mean| Self::new(date, mean, set.min, set.max))
    }

    pub fn is_on(&self, month: u32, day: u32) -> bool {
        self.month == month && self.day == day
    }

    pub fn has_min_max(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }

    pub fn temperature_range(&self) -> Option<f64> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some(max - min),
            _ => None,
        }
    }
}
