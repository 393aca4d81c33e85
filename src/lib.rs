pub mod analyzers;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

#[cfg(test)]
mod testing;

pub use config::SourceConfig;
pub use dataset::ClimateDataset;
pub use error::{ProcessingError, Result};
