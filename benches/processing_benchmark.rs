use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hadcet_processor::analyzers::QueryEngine;
use hadcet_processor::processors::{ClimatologyAggregator, DataMerger, Flattener};
use hadcet_processor::readers::GridReader;
use hadcet_processor::utils::calendar::Month;
use hadcet_processor::ClimateDataset;

// Grid text in the published layout, with a seasonal cycle in tenths of a degree
fn create_grid_text(first_year: i32, last_year: i32, offset: i32) -> String {
    let mut text = String::new();
    for year in first_year..=last_year {
        for day in 1..=31u32 {
            text.push_str(&format!("{:>5}{:>5}", year, day));
            for month in Month::ALL {
                let value = if day <= month.days_in(year) {
                    let seasonal = 60 - 50 * ((month.number() as i32 - 7).abs()) / 6;
                    seasonal * 10 / 6 + offset + (year % 7) + day as i32 % 5
                } else {
                    -999
                };
                text.push_str(&format!("{:>6}", value));
            }
            text.push('\n');
        }
    }
    text
}

fn benchmark_grid_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_parsing");

    for years in [50, 250] {
        let text = create_grid_text(2023 - years + 1, 2023, 0);
        group.bench_with_input(BenchmarkId::new("parse_str", years), &text, |b, text| {
            b.iter(|| GridReader::parse_str("bench", black_box(text)).unwrap())
        });
    }

    group.finish();
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for years in [50, 250] {
        let first = 2023 - years + 1;
        let mean = GridReader::parse_str("mean", &create_grid_text(first, 2023, 0)).unwrap();
        let min = GridReader::parse_str("min", &create_grid_text(first, 2023, -50)).unwrap();
        let max = GridReader::parse_str("max", &create_grid_text(first, 2023, 50)).unwrap();
        let flattener = Flattener::new();

        group.bench_with_input(BenchmarkId::new("flatten", years), &mean, |b, grid| {
            b.iter(|| flattener.flatten(black_box(grid)))
        });

        let mean_series = flattener.flatten(&mean);
        let min_series = flattener.flatten(&min);
        let max_series = flattener.flatten(&max);
        let merger = DataMerger::new();

        group.bench_function(BenchmarkId::new("merge", years), |b| {
            b.iter(|| {
                merger
                    .merge(
                        black_box(&mean_series),
                        black_box(&min_series),
                        black_box(&max_series),
                    )
                    .unwrap()
            })
        });

        let daily = merger.merge(&mean_series, &min_series, &max_series).unwrap();
        let aggregator = ClimatologyAggregator::new();

        group.bench_with_input(BenchmarkId::new("climatology", years), &daily, |b, daily| {
            b.iter(|| aggregator.aggregate(black_box(daily)))
        });

        let climatology = aggregator.aggregate(&daily);
        let query = QueryEngine::new(&daily, &climatology);
        group.bench_function(BenchmarkId::new("year_comparison_series", years), |b| {
            b.iter(|| {
                query.year_comparison_series(
                    black_box(&[2023, 2010, 2000]),
                    29,
                    Month::January,
                    Month::December,
                    5,
                )
            })
        });

        group.bench_function(BenchmarkId::new("end_to_end", years), |b| {
            b.iter(|| {
                ClimateDataset::from_grids(mean.clone(), min.clone(), max.clone()).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_grid_parsing, benchmark_pipeline);
criterion_main!(benches);
