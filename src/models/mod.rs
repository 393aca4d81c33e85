pub mod climatology;
pub mod daily;
pub mod grid;
pub mod tables;
pub mod temperature;

pub use climatology::ClimatologyRecord;
pub use daily::DailyRecord;
pub use grid::{GridRow, RawGrid};
pub use tables::{
    ClimatologyEnvelope, DayRecords, RecentYearRow, RecordEntry, YearComparisonRow,
    YearComparisonSeries, YearTrace,
};
pub use temperature::{DatedValue, TemperatureKind, TemperatureSet};
