//! Text reports for the read-only subcommands.

use gm_data::dataset::Dataset;
use gm_db::Database;
use gm_stats::color_scale::{color_scale_range_with, ColorScalePolicy};
use gm_stats::summary::format_thousands;
use std::fmt::Write;

fn load_db(dataset: &Dataset) -> anyhow::Result<Database> {
    let db = Database::new()?;
    db.load_dataset(dataset)?;
    Ok(db)
}

/// The four header metrics of the dashboard.
pub fn stats(dataset: &Dataset) -> anyhow::Result<String> {
    let db = load_db(dataset)?;
    let Some(stats) = db.query_quick_stats()? else {
        return Ok("No observations.\n".to_string());
    };
    let mut out = String::new();
    writeln!(out, "Total Countries:         {}", format_thousands(stats.total_countries))?;
    writeln!(out, "Years Covered:           {}", stats.years_covered())?;
    writeln!(out, "Average GDP:             {}", stats.avg_gdp_display())?;
    writeln!(out, "Average life expectancy: {}", stats.avg_life_exp_display())?;
    Ok(out)
}

/// The color-scale domain the map would use.
pub fn color_range(dataset: &Dataset, year: Option<i32>, min_max: bool) -> String {
    let values: Vec<f64> = match year {
        Some(year) => dataset
            .for_year(year)
            .iter()
            .map(|row| row.observation.gdp_percap)
            .collect(),
        None => dataset.gdp_column(),
    };
    let policy = if min_max {
        ColorScalePolicy::min_max()
    } else {
        ColorScalePolicy::default()
    };
    let range = color_scale_range_with(values.iter().copied(), &policy);
    let scope = year.map_or_else(|| "all years".to_string(), |y| y.to_string());
    format!(
        "GDP per capita color range ({}, {} values): [{:.2}, {:.2}]\n",
        scope,
        values.len(),
        range.min,
        range.max
    )
}

/// Whole-dataset quartile cut points and bucket sizes.
pub fn quartiles(dataset: &Dataset) -> anyhow::Result<String> {
    let mut out = String::new();
    match dataset.quartile_bounds() {
        Some(b) => writeln!(out, "Bounds: Q1 <= {:.2} < Q2 <= {:.2} < Q3 <= {:.2} < Q4", b.q1, b.q2, b.q3)?,
        None => writeln!(out, "Bounds: none")?,
    }
    let db = load_db(dataset)?;
    for count in db.query_quartile_counts()? {
        writeln!(out, "{}: {}", count.quartile, count.count)?;
    }
    Ok(out)
}

pub fn years(dataset: &Dataset) -> String {
    dataset
        .years()
        .iter()
        .map(|y| format!("{}\n", y))
        .collect()
}
