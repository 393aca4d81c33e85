pub mod calendar;
pub mod constants;
pub mod progress;

pub use calendar::{axis_dates, axis_slot, clamp_day, is_leap_year, Month};
pub use constants::*;
pub use progress::ProgressReporter;
