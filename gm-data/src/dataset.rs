//! The immutable, quartile-labelled observation set.

use crate::{continent::Continent, error::DatasetError, observation::Observation};
use anyhow::Context;
use gm_stats::quartile::{Quartile, QuartileBounds};
use serde::Serialize;
use std::collections::BTreeSet;

/// Gapminder CSV compiled into the crate.
pub static GAPMINDER_CSV: &str = include_str!("../../fixtures/gapminder.csv");

/// Name of the extra column carrying the GDP quartile in exported CSVs.
pub const QUARTILE_COLUMN: &str = "gdp_quartile";

/// An observation together with its GDP-per-capita quartile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledObservation {
    #[serde(flatten)]
    pub observation: Observation,
    pub gdp_quartile: Quartile,
}

/// All observations of a session.
///
/// Quartile labels are computed once, from the GDP-per-capita distribution
/// over every observation (not per year), and never change afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<LabeledObservation>,
    bounds: Option<QuartileBounds>,
}

impl Dataset {
    /// Parse a Gapminder CSV and label every row.
    pub fn from_csv(csv_data: &str) -> anyhow::Result<Self> {
        let observations = Observation::parse_csv(csv_data)?;
        Ok(Dataset::from_observations(observations))
    }

    /// Load the dataset compiled into the crate.
    pub fn embedded() -> anyhow::Result<Self> {
        Dataset::from_csv(GAPMINDER_CSV).context("Failed to parse embedded gapminder.csv")
    }

    /// Label a set of observations.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let bounds = QuartileBounds::from_values(observations.iter().map(|o| o.gdp_percap));
        let rows: Vec<LabeledObservation> = match bounds {
            Some(b) => observations
                .into_iter()
                .map(|observation| LabeledObservation {
                    gdp_quartile: b.label(observation.gdp_percap),
                    observation,
                })
                .collect(),
            None => Vec::new(),
        };
        log::info!(
            "[GM] dataset: {} observations, quartile bounds {:?}",
            rows.len(),
            bounds
        );
        Dataset { rows, bounds }
    }

    /// Fail with [`DatasetError::Empty`] when there is nothing to show.
    pub fn ensure_not_empty(&self) -> Result<(), DatasetError> {
        if self.rows.is_empty() {
            Err(DatasetError::Empty)
        } else {
            Ok(())
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[LabeledObservation] {
        &self.rows
    }

    pub fn quartile_bounds(&self) -> Option<QuartileBounds> {
        self.bounds
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.rows
            .iter()
            .map(|r| r.observation.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct country names, sorted.
    pub fn countries(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|r| r.observation.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Continents present in the data, in [`Continent::ALL`] order.
    pub fn continents(&self) -> Vec<Continent> {
        self.rows
            .iter()
            .map(|r| r.observation.continent)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// First and last year, `None` for an empty dataset.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let years = self.years();
        Some((*years.first()?, *years.last()?))
    }

    /// GDP per capita of every row, in row order.
    pub fn gdp_column(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.observation.gdp_percap).collect()
    }

    /// Rows observed in `year`.
    pub fn for_year(&self, year: i32) -> Vec<&LabeledObservation> {
        self.rows
            .iter()
            .filter(|r| r.observation.year == year)
            .collect()
    }

    /// Export every row as CSV, with the quartile label as a trailing column.
    pub fn to_csv(&self) -> anyhow::Result<String> {
        write_csv(self.rows.iter())
    }

    /// Export the rows of a single year.
    pub fn year_to_csv(&self, year: i32) -> anyhow::Result<String> {
        write_csv(self.rows.iter().filter(|r| r.observation.year == year))
    }
}

fn write_csv<'a, I>(rows: I) -> anyhow::Result<String>
where
    I: Iterator<Item = &'a LabeledObservation>,
{
    let mut wtr = csv::Writer::from_writer(Vec::new());
    let mut header: Vec<&str> = crate::observation::CSV_HEADER.to_vec();
    header.push(QUARTILE_COLUMN);
    wtr.write_record(&header)?;

    let mut count = 0usize;
    for row in rows {
        let mut record = row.observation.to_record().to_vec();
        record.push(row.gdp_quartile.to_string());
        wtr.write_record(&record)?;
        count += 1;
    }
    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    log::info!("[GM] dataset: exported {} rows", count);
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_dataset() {
        let dataset = Dataset::embedded().unwrap();
        assert_eq!(dataset.len(), 44);
        assert_eq!(dataset.countries().len(), 12);
        assert_eq!(dataset.years().len(), 12);
        assert_eq!(dataset.year_range(), Some((1952, 2007)));
        assert_eq!(dataset.continents(), Continent::ALL.to_vec());
        assert!(dataset.ensure_not_empty().is_ok());
    }

    #[test]
    fn test_quartiles_cover_extremes() {
        let dataset = Dataset::embedded().unwrap();
        let poorest = dataset
            .rows()
            .iter()
            .min_by(|a, b| a.observation.gdp_percap.total_cmp(&b.observation.gdp_percap))
            .unwrap();
        let richest = dataset
            .rows()
            .iter()
            .max_by(|a, b| a.observation.gdp_percap.total_cmp(&b.observation.gdp_percap))
            .unwrap();
        assert_eq!(poorest.observation.country, "China");
        assert_eq!(poorest.gdp_quartile, Quartile::Q1);
        assert_eq!(richest.observation.country, "Kuwait");
        assert_eq!(richest.gdp_quartile, Quartile::Q4);
    }

    #[test]
    fn test_quartiles_use_whole_dataset() {
        // Bounds come from all years together, so a single year can be
        // entirely in the top bucket.
        let csv = "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n\
                   A,Asia,1952,40,100,100,AAA,1\n\
                   B,Asia,1952,40,100,200,BBB,2\n\
                   A,Asia,2007,60,100,300,AAA,1\n\
                   B,Asia,2007,60,100,400,BBB,2\n\
                   C,Asia,2007,60,100,500,CCC,3\n";
        let dataset = Dataset::from_csv(csv).unwrap();
        let labels: Vec<Quartile> = dataset.rows().iter().map(|r| r.gdp_quartile).collect();
        assert_eq!(
            labels,
            vec![Quartile::Q1, Quartile::Q1, Quartile::Q2, Quartile::Q3, Quartile::Q4]
        );
        assert!(dataset.for_year(1952).iter().all(|r| r.gdp_quartile == Quartile::Q1));
    }

    #[test]
    fn test_empty_dataset() {
        let dataset =
            Dataset::from_csv("country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n")
                .unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.quartile_bounds().is_none());
        assert_eq!(dataset.year_range(), None);
        assert_eq!(dataset.ensure_not_empty(), Err(DatasetError::Empty));
    }

    #[test]
    fn test_csv_export_round_trip() {
        let dataset = Dataset::embedded().unwrap();
        let exported = dataset.to_csv().unwrap();
        assert!(exported.starts_with(
            "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num,gdp_quartile\n"
        ));

        let reparsed = Dataset::from_csv(&exported).unwrap();
        assert_eq!(reparsed.rows(), dataset.rows());
    }

    #[test]
    fn test_year_export() {
        let dataset = Dataset::embedded().unwrap();
        let exported = dataset.year_to_csv(2007).unwrap();
        let reparsed = Observation::parse_csv(&exported).unwrap();
        assert_eq!(reparsed.len(), dataset.for_year(2007).len());
        assert!(reparsed.iter().all(|o| o.year == 2007));
    }
}
