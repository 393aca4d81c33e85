use crate::cli::args::{Cli, Commands, ExportTable};
use crate::config::SourceConfig;
use crate::dataset::ClimateDataset;
use crate::error::{ProcessingError, Result};
use crate::models::tables::format_fixed;
use crate::models::{ClimatologyRecord, DayRecords, RecentYearRow, YearComparisonRow, YearComparisonSeries};
use crate::processors::IntegrityChecker;
use crate::utils::calendar::{clamp_day, Month};
use crate::utils::constants::{MAX_COMPARISON_YEARS, MAX_WINDOW_SIZE};
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose, cli.log_file.as_deref())?;

    let config = source_config(&cli)?;
    let progress = ProgressReporter::new_spinner("Loading HadCET grids...", cli.quiet || cli.json);
    let dataset = match ClimateDataset::load_with_progress(&config, Some(&progress)) {
        Ok(dataset) => dataset,
        Err(e) => {
            progress.finish_and_clear();
            return Err(e);
        }
    };
    progress.finish_with_message(&format!(
        "Loaded {} daily records ({} to {})",
        dataset.daily().len(),
        dataset.integrity_report().first_date,
        dataset.integrity_report().last_date
    ));

    let query = dataset.query();

    match cli.command {
        Commands::Summary => {
            let stats = dataset.statistics()?;
            if cli.json {
                return print_json(&SummaryOutput {
                    statistics: &stats,
                    integrity: dataset.integrity_report(),
                });
            }

            println!("{}", stats.detailed_summary());
            let checker = IntegrityChecker::new();
            println!("\n{}", checker.generate_summary(dataset.integrity_report()));
        }

        Commands::Day {
            month,
            day,
            temp,
            top_n,
            recent,
        } => {
            let month = parse_month(month)?;
            if day == 0 {
                return Err(ProcessingError::InvalidArgument(
                    "day must be at least 1".to_string(),
                ));
            }
            let (day_max, day) = clamp_day(month, day);
            let m = month.number();

            let output = DayOutput {
                month: m,
                day,
                day_max,
                normal: query.climatology_on(m, day),
                values: query.day_values(m, day),
                recent_years: query.recent_years(m, day, recent),
                records: query.day_records(m, day, top_n),
                threshold: temp,
                exceedance_probability: query.exceedance_probability(m, day, temp),
            };

            if cli.json {
                return print_json(&output);
            }
            print_day(month, &output);
        }

        Commands::Compare {
            years,
            window,
            start_month,
            end_month,
        } => {
            check_window(window)?;
            let start = parse_month(start_month)?;
            let end = parse_month(end_month)?;
            if years.len() > MAX_COMPARISON_YEARS {
                warn!(
                    requested = years.len(),
                    "Only the first {} years are compared", MAX_COMPARISON_YEARS
                );
            }

            let table = query.year_comparison_table(&years, MAX_COMPARISON_YEARS);
            let series =
                query.year_comparison_series(&years, window, start, end, MAX_COMPARISON_YEARS);

            if cli.json {
                return print_json(&CompareOutput {
                    table: &table,
                    series: &series,
                });
            }
            print_comparison_table(&table);
            println!();
            print_comparison_series(&series);
        }

        Commands::Trace { year, window } => {
            check_window(window)?;
            if !query.available_years().contains(&year) {
                warn!(year, "Year is not in the record");
            }

            let trace = query.year_trace(year, window);
            if cli.json {
                return print_json(&trace);
            }

            let envelope = query.climatology_envelope();
            println!("{} mean temperature, {}-day centred average (°C)", year, window);
            for (date, value) in envelope.dates.iter().zip(&trace.values) {
                println!("{}\t{}", date.format("%d %b"), format_fixed(*value, 2));
            }
        }

        Commands::Envelope => {
            let envelope = query.climatology_envelope();
            if cli.json {
                return print_json(&envelope);
            }

            println!("date\tlow\tp05\taverage\tp95\thigh");
            for (i, date) in envelope.dates.iter().enumerate() {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    date.format("%d %b"),
                    format_fixed(envelope.low[i], 1),
                    format_fixed(envelope.p05[i], 2),
                    format_fixed(envelope.average[i], 2),
                    format_fixed(envelope.p95[i], 2),
                    format_fixed(envelope.high[i], 1),
                );
            }
        }

        Commands::Export { table, output } => export(&dataset, table, output.as_deref())?,
    }

    Ok(())
}

fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let subscriber = builder.with_ansi(false).with_writer(Mutex::new(file)).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        None => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    installed.map_err(|e| ProcessingError::Config(format!("cannot install logger: {}", e)))
}

/// Config file and environment first, then command-line flags.
fn source_config(cli: &Cli) -> Result<SourceConfig> {
    let mut config = SourceConfig::load(cli.config.as_deref())?;

    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    } else if cli.remote {
        config = SourceConfig::remote().with_mmap(config.use_mmap);
    }
    if cli.mmap {
        config = config.with_mmap(true);
    }

    info!(
        mean = %config.mean_source,
        min = %config.min_source,
        max = %config.max_source,
        "Using data sources"
    );
    Ok(config)
}

fn parse_month(number: u32) -> Result<Month> {
    Month::from_number(number).ok_or_else(|| {
        ProcessingError::InvalidArgument(format!("month must be 1-12, got {}", number))
    })
}

fn check_window(window: usize) -> Result<()> {
    if window == 0 || window > MAX_WINDOW_SIZE || window % 2 == 0 {
        return Err(ProcessingError::InvalidArgument(format!(
            "window must be an odd number of days between 1 and {}, got {}",
            MAX_WINDOW_SIZE, window
        )));
    }
    Ok(())
}

fn export(dataset: &ClimateDataset, table: ExportTable, output: Option<&Path>) -> Result<()> {
    let writer = CsvWriter::new();
    match (table, output) {
        (ExportTable::Daily, Some(path)) => {
            writer.write_daily_to_path(dataset.daily(), path)?;
        }
        (ExportTable::Climatology, Some(path)) => {
            writer.write_climatology_to_path(dataset.climatology(), path)?;
        }
        (ExportTable::Daily, None) => {
            writer.write_daily(dataset.daily(), std::io::stdout().lock())?;
        }
        (ExportTable::Climatology, None) => {
            writer.write_climatology(dataset.climatology(), std::io::stdout().lock())?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    statistics: &'a crate::analyzers::DatasetStatistics,
    integrity: &'a crate::processors::IntegrityReport,
}

#[derive(Serialize)]
struct DayOutput<'a> {
    month: u32,
    day: u32,
    day_max: u32,
    normal: Option<&'a ClimatologyRecord>,
    values: Vec<f64>,
    recent_years: Vec<RecentYearRow>,
    records: DayRecords,
    threshold: f64,
    exceedance_probability: Option<f64>,
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    table: &'a [YearComparisonRow],
    series: &'a YearComparisonSeries,
}

fn print_day(month: Month, output: &DayOutput<'_>) {
    println!("{} {}", output.day, month.long_name());

    match output.normal {
        Some(normal) => println!(
            "Average {:.2}°C (5th-95th percentile {:.2} to {:.2}), record low {}, record high {}, {} years",
            normal.average,
            normal.p05,
            normal.p95,
            format_fixed(normal.low, 1),
            format_fixed(normal.high, 1),
            normal.observations
        ),
        None => println!("No observations for this date"),
    }

    println!("\nRecent years:");
    println!("  Year   Low    High");
    for row in &output.recent_years {
        println!(
            "  {}  {:>5}  {:>5}",
            row.year,
            format_fixed(row.low, 1),
            format_fixed(row.high, 1)
        );
    }

    println!("\nRecord lows:");
    for entry in &output.records.lows {
        println!("  {}  {:.1}°C", entry.year, entry.temperature);
    }
    println!("Record highs:");
    for entry in &output.records.highs {
        println!("  {}  {:.1}°C", entry.year, entry.temperature);
    }

    match output.exceedance_probability {
        Some(p) => println!(
            "\nMean temperature reached {:.1}°C in {:.1}% of years",
            output.threshold, p
        ),
        None => println!("\nNo years to compare against {:.1}°C", output.threshold),
    }
}

fn print_comparison_table(rows: &[YearComparisonRow]) {
    println!("{:<10} {:>8} {:>6} {:>6}", "Year", "Average", "Low", "High");
    for row in rows {
        println!(
            "{:<10} {:>8} {:>6} {:>6}",
            row.label, row.average, row.low, row.high
        );
    }
}

fn print_comparison_series(series: &YearComparisonSeries) {
    let mut header = String::from("date\taverage");
    for trace in &series.traces {
        header.push_str(&format!("\t{}", trace.year));
    }
    println!("{}", header);

    for (i, date) in series.dates.iter().enumerate() {
        let mut line = format!("{}\t{}", date.format("%d %b"), format_fixed(series.average[i], 2));
        for trace in &series.traces {
            line.push('\t');
            line.push_str(&format_fixed(trace.values[i], 2));
        }
        println!("{}", line);
    }
}
