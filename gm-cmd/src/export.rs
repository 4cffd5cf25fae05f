//! `export` subcommand: the same CSV the dashboard's download button produces.

use anyhow::Context;
use gm_data::dataset::Dataset;
use log::info;

/// Write the labelled dataset to `path`, optionally limited to one year.
/// Returns the number of data rows written.
pub fn write_csv(dataset: &Dataset, path: &str, year: Option<i32>) -> anyhow::Result<usize> {
    let (body, rows) = match year {
        Some(year) => (dataset.year_to_csv(year)?, dataset.for_year(year).len()),
        None => (dataset.to_csv()?, dataset.len()),
    };
    std::fs::write(path, body).with_context(|| format!("Failed to write {}", path))?;
    info!("Exported {} rows to {}", rows, path);
    Ok(rows)
}
