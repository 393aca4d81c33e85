pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ExportTable};
pub use commands::run;
