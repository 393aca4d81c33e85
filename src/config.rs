use crate::error::{ProcessingError, Result};
use crate::models::TemperatureKind;
use crate::readers::DataSource;
use crate::utils::constants::{
    DEFAULT_MAX_URL, DEFAULT_MEAN_URL, DEFAULT_MIN_URL, ENV_PREFIX, MAX_FILE, MEAN_FILE, MIN_FILE,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Where the three grids are loaded from.
///
/// Built from defaults (the HadCET URLs), an optional config file and
/// `HADCET_*` environment variables, in that order of precedence.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct SourceConfig {
    #[validate(length(min = 1))]
    pub mean_source: String,

    #[validate(length(min = 1))]
    pub min_source: String,

    #[validate(length(min = 1))]
    pub max_source: String,

    /// When set, the three sources are the standard file names in this directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub use_mmap: bool,
}

impl SourceConfig {
    /// The published HadCET series.
    pub fn remote() -> Self {
        Self {
            mean_source: DEFAULT_MEAN_URL.to_string(),
            min_source: DEFAULT_MIN_URL.to_string(),
            max_source: DEFAULT_MAX_URL.to_string(),
            data_dir: None,
            use_mmap: false,
        }
    }

    /// Local copies named `hadcet_{mean,min,max}.txt` inside `dir`.
    pub fn local(dir: &Path) -> Self {
        Self::remote().with_data_dir(dir)
    }

    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.mean_source = dir.join(MEAN_FILE).display().to_string();
        self.min_source = dir.join(MIN_FILE).display().to_string();
        self.max_source = dir.join(MAX_FILE).display().to_string();
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Load from defaults, an optional TOML/YAML/JSON file, then the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("mean_source", DEFAULT_MEAN_URL)?
            .set_default("min_source", DEFAULT_MIN_URL)?
            .set_default("max_source", DEFAULT_MAX_URL)?
            .set_default("use_mmap", false)?;

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ProcessingError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path));
        }

        let settings: SourceConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        let settings = match settings.data_dir.clone() {
            Some(dir) => settings.with_data_dir(&dir),
            None => settings,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn source_identifier(&self, kind: TemperatureKind) -> &str {
        match kind {
            TemperatureKind::Mean => &self.mean_source,
            TemperatureKind::Min => &self.min_source,
            TemperatureKind::Max => &self.max_source,
        }
    }

    pub fn source(&self, kind: TemperatureKind) -> DataSource {
        DataSource::parse(self.source_identifier(kind))
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::remote()
    }
}
