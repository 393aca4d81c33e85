use anyhow::Context;
use clap::Parser;
use hadcet_processor::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).context("hadcet-processor failed")
}
