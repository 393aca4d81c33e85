/// Raw grid layout
pub const SENTINEL: i32 = -999;
pub const GRID_COLUMNS: usize = 14;
pub const MAX_DAY_INDEX: u32 = 31;
pub const TENTHS_PER_DEGREE: f64 = 10.0;

/// Default remote sources (HadCET daily series)
pub const DEFAULT_MEAN_URL: &str = "https://www.metoffice.gov.uk/hadobs/hadcet/cetdl1772on.dat";
pub const DEFAULT_MIN_URL: &str =
    "https://www.metoffice.gov.uk/hadobs/hadcet/cetmindly1878on_urbadj4.dat";
pub const DEFAULT_MAX_URL: &str =
    "https://www.metoffice.gov.uk/hadobs/hadcet/cetmaxdly1878on_urbadj4.dat";

/// File names inside a local data directory
pub const MEAN_FILE: &str = "hadcet_mean.txt";
pub const MIN_FILE: &str = "hadcet_min.txt";
pub const MAX_FILE: &str = "hadcet_max.txt";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "HADCET";

/// Plausibility range, reported but not enforced
pub const MIN_PLAUSIBLE_TEMP: f64 = -30.0;
pub const MAX_PLAUSIBLE_TEMP: f64 = 45.0;
pub const TEMPERATURE_JUMP_THRESHOLD: f64 = 15.0;

/// Query defaults
pub const DEFAULT_RECENT_YEARS: usize = 5;
pub const LEAP_DAY_LOOKBACK_YEARS: i32 = 16;
pub const DEFAULT_TOP_N: usize = 5;
pub const MAX_COMPARISON_YEARS: usize = 5;
pub const DEFAULT_COMPARISON_WINDOW: usize = 29;
pub const MAX_WINDOW_SIZE: usize = 35;
pub const ALL_TIME_LABEL: &str = "All-time";
pub const NO_DATA_MARKER: &str = "-";

/// I/O
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
