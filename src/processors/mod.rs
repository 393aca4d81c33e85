pub mod climatology;
pub mod data_merger;
pub mod flattener;
pub mod integrity_checker;

pub use climatology::{percentile, ClimatologyAggregator};
pub use data_merger::DataMerger;
pub use flattener::Flattener;
pub use integrity_checker::{
    DateGap, IntegrityChecker, IntegrityReport, TemperatureViolation, ViolationType,
};
