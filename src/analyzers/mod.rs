pub mod dataset_analyzer;
pub mod query_engine;
pub mod rolling;
mod year_queries;

pub use dataset_analyzer::{DatasetAnalyzer, DatasetStatistics, TemperatureStats};
pub use query_engine::QueryEngine;
pub use rolling::{centered_average, recenter, rolling_average};
