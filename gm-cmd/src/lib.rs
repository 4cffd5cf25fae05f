//! Command implementations for the Gapminder CLI.
//!
//! Every report is built as a `String` first and printed by [`run`], so the
//! output can be tested without capturing stdout.

use anyhow::Context;
use clap::Subcommand;
use gm_data::dataset::Dataset;
use log::info;

pub mod export;
pub mod report;

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print the dashboard's quick statistics
    Stats,

    /// Print the color-scale range selected for the GDP per capita column
    ColorRange {
        /// Only use observations from this year
        #[arg(short, long)]
        year: Option<i32>,

        /// Use the plain data extent instead of the 10th/90th percentile clamp
        #[arg(long)]
        min_max: bool,
    },

    /// Print the GDP quartile bounds and the number of rows per quartile
    Quartiles,

    /// List the distinct years in the dataset
    Years,

    /// Write the labelled dataset (with the gdp_quartile column) as CSV
    Export {
        /// Output path for the CSV
        #[arg(short, long)]
        output: String,

        /// Only export observations from this year
        #[arg(short, long)]
        year: Option<i32>,
    },
}

/// Load `path` if given, otherwise the embedded fixture.
pub fn load_dataset(path: Option<&str>) -> anyhow::Result<Dataset> {
    let dataset = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            Dataset::from_csv(&raw).with_context(|| format!("Failed to parse {}", path))?
        }
        None => Dataset::embedded()?,
    };
    dataset.ensure_not_empty()?;
    info!("Loaded {} observations", dataset.len());
    Ok(dataset)
}

pub fn run(command: Command, data: Option<&str>) -> anyhow::Result<()> {
    let dataset = load_dataset(data)?;
    match command {
        Command::Stats => print!("{}", report::stats(&dataset)?),
        Command::ColorRange { year, min_max } => {
            print!("{}", report::color_range(&dataset, year, min_max))
        }
        Command::Quartiles => print!("{}", report::quartiles(&dataset)?),
        Command::Years => print!("{}", report::years(&dataset)),
        Command::Export { output, year } => {
            let rows = export::write_csv(&dataset, &output, year)?;
            println!("Wrote {} rows to {}", rows, output);
        }
    }
    Ok(())
}
