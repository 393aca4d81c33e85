use crate::utils::constants::{DEFAULT_COMPARISON_WINDOW, DEFAULT_RECENT_YEARS, DEFAULT_TOP_N};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hadcet-processor")]
#[command(about = "Daily climatology of the Central England Temperature record")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Config file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "remote",
        help = "Directory holding hadcet_mean.txt, hadcet_min.txt and hadcet_max.txt"
    )]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Download the grids from the Met Office")]
    pub remote: bool,

    #[arg(long, global = true, help = "Memory-map local grid files")]
    pub mmap: bool,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show record span, coverage, extremes and the integrity report
    Summary,

    /// Everything known about one calendar day
    Day {
        #[arg(short, long, help = "Month number (1-12)")]
        month: u32,

        #[arg(long, help = "Day of month; clamped to the month length")]
        day: u32,

        #[arg(short, long, default_value = "5.0", allow_hyphen_values = true)]
        temp: f64,

        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,

        #[arg(long, default_value_t = DEFAULT_RECENT_YEARS)]
        recent: usize,
    },

    /// Compare whole years against the all-time record
    Compare {
        #[arg(short, long, value_delimiter = ',', help = "Years to compare (at most 5)")]
        years: Vec<i32>,

        #[arg(short, long, default_value_t = DEFAULT_COMPARISON_WINDOW)]
        window: usize,

        #[arg(long, default_value = "1")]
        start_month: u32,

        #[arg(long, default_value = "12")]
        end_month: u32,
    },

    /// Smoothed mean temperature of one year on the day-of-year axis
    Trace {
        #[arg(short, long)]
        year: i32,

        #[arg(short, long, default_value = "1")]
        window: usize,
    },

    /// Low, 5th percentile, average, 95th percentile and high for every day
    Envelope,

    /// Write a table as CSV
    Export {
        #[arg(short, long, value_enum)]
        table: ExportTable,

        #[arg(short, long, help = "Output file [default: stdout]")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportTable {
    Daily,
    Climatology,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::parse_from([
            "hadcet-processor",
            "--data-dir",
            "/data",
            "compare",
            "--years",
            "2022,2010",
            "--window",
            "7",
        ]);

        assert_eq!(cli.data_dir, Some(PathBuf::from("/data")));
        match cli.command {
            Commands::Compare {
                years,
                window,
                start_month,
                end_month,
            } => {
                assert_eq!(years, vec![2022, 2010]);
                assert_eq!(window, 7);
                assert_eq!((start_month, end_month), (1, 12));
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_data_dir_conflicts_with_remote() {
        let result = Cli::try_parse_from(["hadcet-processor", "--remote", "-d", "/data", "summary"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_threshold() {
        let cli = Cli::try_parse_from([
            "hadcet-processor", "day", "--month", "1", "--day", "10", "--temp", "-2.5",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Day { temp, .. } if temp == -2.5));
    }
}
