use crate::analyzers::{DatasetAnalyzer, DatasetStatistics, QueryEngine};
use crate::config::SourceConfig;
use crate::error::Result;
use crate::models::{ClimatologyRecord, DailyRecord, DatedValue, RawGrid, TemperatureKind};
use crate::processors::{
    ClimatologyAggregator, DataMerger, Flattener, IntegrityChecker, IntegrityReport,
};
use crate::readers::GridReader;
use crate::utils::progress::ProgressReporter;
use tracing::info;

/// The daily table and its climatology, built once and read by every query.
#[derive(Debug, Clone)]
pub struct ClimateDataset {
    daily: Vec<DailyRecord>,
    climatology: Vec<ClimatologyRecord>,
    integrity: IntegrityReport,
}

impl ClimateDataset {
    /// Read the three grids named by `config` and build the tables.
    pub fn load(config: &SourceConfig) -> Result<Self> {
        Self::load_with_progress(config, None)
    }

    pub fn load_with_progress(
        config: &SourceConfig,
        progress: Option<&ProgressReporter>,
    ) -> Result<Self> {
        let reader = GridReader::with_mmap(config.use_mmap);
        let read = |kind: TemperatureKind| -> Result<RawGrid> {
            if let Some(p) = progress {
                p.set_message(&format!("Reading {} temperature grid...", kind));
            }
            reader.read_grid(&config.source(kind))
        };

        let mean = read(TemperatureKind::Mean)?;
        let min = read(TemperatureKind::Min)?;
        let max = read(TemperatureKind::Max)?;

        if let Some(p) = progress {
            p.set_message("Building daily tables...");
        }

        Self::from_grids(mean, min, max)
    }

    /// Build from already parsed grids. The grids are consumed.
    pub fn from_grids(mean: RawGrid, min: RawGrid, max: RawGrid) -> Result<Self> {
        let flattener = Flattener::new();
        let mean = flattener.flatten(&mean);
        let min = flattener.flatten(&min);
        let max = flattener.flatten(&max);

        Self::from_series(&mean, &min, &max)
    }

    /// Build from flattened series.
    pub fn from_series(mean: &[DatedValue], min: &[DatedValue], max: &[DatedValue]) -> Result<Self> {
        let daily = DataMerger::new().merge(mean, min, max)?;
        let integrity = IntegrityChecker::new().check_integrity(&daily)?;
        let climatology = ClimatologyAggregator::new().aggregate(&daily);

        info!(
            records = daily.len(),
            first = %integrity.first_date,
            last = %integrity.last_date,
            climatology_days = climatology.len(),
            "Climate dataset ready"
        );

        Ok(Self {
            daily,
            climatology,
            integrity,
        })
    }

    pub fn daily(&self) -> &[DailyRecord] {
        &self.daily
    }

    pub fn climatology(&self) -> &[ClimatologyRecord] {
        &self.climatology
    }

    pub fn integrity_report(&self) -> &IntegrityReport {
        &self.integrity
    }

    pub fn query(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.daily, &self.climatology)
    }

    pub fn statistics(&self) -> Result<DatasetStatistics> {
        DatasetAnalyzer::new().analyze(&self.daily)
    }
}
