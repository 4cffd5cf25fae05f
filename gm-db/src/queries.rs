//! Typed query methods backing the dashboard charts.
//!
//! All queries return types from [`crate::models`]. A year that is not in the
//! data yields empty results rather than an error.

use crate::models::{ContinentTotal, CountryPoint, QuartileCount, QuickStats, SunburstNode};
use crate::Database;
use rusqlite::{params, Row};

const POINT_COLUMNS: &str =
    "country, continent, year, life_exp, pop, gdp_percap, iso_alpha, iso_num, gdp_quartile";

fn country_point(row: &Row<'_>) -> rusqlite::Result<CountryPoint> {
    let iso_num: i64 = row.get(7)?;
    Ok(CountryPoint {
        country: row.get(0)?,
        continent: row.get(1)?,
        year: row.get(2)?,
        life_exp: row.get(3)?,
        pop: row.get(4)?,
        gdp_percap: row.get(5)?,
        iso_alpha: row.get(6)?,
        iso_num: format!("{:03}", iso_num),
        gdp_quartile: row.get(8)?,
    })
}

impl Database {
    /// Distinct years, ascending.
    pub fn query_years(&self) -> anyhow::Result<Vec<i64>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT DISTINCT year FROM observations ORDER BY year")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        log::info!("[GM] query: query_years returned {} records", rows.len());
        Ok(rows)
    }

    /// Header metrics over the whole dataset. `None` when nothing is loaded.
    pub fn query_quick_stats(&self) -> anyhow::Result<Option<QuickStats>> {
        let conn = self.conn.borrow();
        let stats = conn.query_row(
            "SELECT COUNT(DISTINCT country), MIN(year), MAX(year), AVG(gdp_percap), AVG(life_exp)
             FROM observations",
            [],
            |row| {
                let total_countries: i64 = row.get(0)?;
                let first_year: Option<i64> = row.get(1)?;
                let last_year: Option<i64> = row.get(2)?;
                let avg_gdp: Option<f64> = row.get(3)?;
                let avg_life: Option<f64> = row.get(4)?;
                Ok(match (first_year, last_year, avg_gdp, avg_life) {
                    (Some(first_year), Some(last_year), Some(avg_gdp_percap), Some(avg_life_exp)) => {
                        Some(QuickStats {
                            total_countries,
                            first_year,
                            last_year,
                            avg_gdp_percap,
                            avg_life_exp,
                        })
                    }
                    _ => None,
                })
            },
        )?;
        log::info!("[GM] query: query_quick_stats -> {:?}", stats);
        Ok(stats)
    }

    /// Every country observed in `year`, ordered by country.
    pub fn query_year(&self, year: i64) -> anyhow::Result<Vec<CountryPoint>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM observations WHERE year = ?1 ORDER BY country",
            POINT_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![year], country_point)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[GM] query: query_year({}) returned {} records",
            year,
            rows.len()
        );
        Ok(rows)
    }

    /// Every observation, ordered by year then country (animation frame order).
    pub fn query_all(&self) -> anyhow::Result<Vec<CountryPoint>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM observations ORDER BY year, country",
            POINT_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], country_point)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("[GM] query: query_all returned {} records", rows.len());
        Ok(rows)
    }

    /// GDP per capita column, for one year or (with `None`) the whole dataset.
    ///
    /// This is the input to the color-scale range selection.
    pub fn query_gdp_values(&self, year: Option<i64>) -> anyhow::Result<Vec<f64>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT gdp_percap FROM observations
             WHERE ?1 IS NULL OR year = ?1
             ORDER BY year, country",
        )?;
        let rows = stmt
            .query_map(params![year], |row| row.get(0))?
            .collect::<Result<Vec<f64>, _>>()?;
        log::info!(
            "[GM] query: query_gdp_values({:?}) returned {} records",
            year,
            rows.len()
        );
        Ok(rows)
    }

    /// Population and population-weighted life expectancy per continent.
    pub fn query_continent_totals(&self, year: i64) -> anyhow::Result<Vec<ContinentTotal>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT continent, COUNT(*), SUM(pop), SUM(life_exp * pop) / SUM(pop)
             FROM observations
             WHERE year = ?1
             GROUP BY continent
             ORDER BY continent",
        )?;
        let rows = stmt
            .query_map(params![year], |row| {
                Ok(ContinentTotal {
                    continent: row.get(0)?,
                    countries: row.get(1)?,
                    pop: row.get(2)?,
                    life_exp: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[GM] query: query_continent_totals({}) returned {} records",
            year,
            rows.len()
        );
        Ok(rows)
    }

    /// World -> continent -> country hierarchy for `year`.
    ///
    /// Continents are alphabetical; countries within a continent are ordered
    /// by descending population.
    pub fn query_sunburst(&self, year: i64) -> anyhow::Result<SunburstNode> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT continent, country, pop, life_exp
             FROM observations
             WHERE year = ?1
             ORDER BY continent, pop DESC, country",
        )?;
        let leaves = stmt
            .query_map(params![year], |row| {
                let continent: String = row.get(0)?;
                let country: String = row.get(1)?;
                let pop: i64 = row.get(2)?;
                let life_exp: f64 = row.get(3)?;
                Ok((continent, SunburstNode::leaf(&country, pop as f64, life_exp)))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut continents: Vec<SunburstNode> = Vec::new();
        let mut current: Option<(String, Vec<SunburstNode>)> = None;
        for (continent, leaf) in leaves {
            match current.as_mut() {
                Some((name, children)) if *name == continent => children.push(leaf),
                _ => {
                    if let Some((name, children)) = current.take() {
                        continents.push(SunburstNode::branch(&name, children));
                    }
                    current = Some((continent, vec![leaf]));
                }
            }
        }
        if let Some((name, children)) = current {
            continents.push(SunburstNode::branch(&name, children));
        }

        log::info!(
            "[GM] query: query_sunburst({}) built {} continents",
            year,
            continents.len()
        );
        Ok(SunburstNode::branch("World", continents))
    }

    /// Observation count per GDP quartile, Q1 first.
    pub fn query_quartile_counts(&self) -> anyhow::Result<Vec<QuartileCount>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT gdp_quartile, COUNT(*) FROM observations
             GROUP BY gdp_quartile
             ORDER BY gdp_quartile",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(QuartileCount {
                    quartile: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[GM] query: query_quartile_counts returned {} records",
            rows.len()
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use gm_data::dataset::Dataset;

    fn setup_test_db() -> Database {
        let db = Database::new().unwrap();
        db.load_dataset(&Dataset::embedded().unwrap()).unwrap();
        db
    }

    const SMALL: &str = "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n\
                         A,Asia,2007,40,300,100,AAA,1\n\
                         B,Asia,2007,80,100,200,BBB,2\n\
                         C,Europe,2007,70,50,400,CCC,3\n\
                         A,Asia,1952,30,200,50,AAA,1\n";

    #[test]
    fn years_are_distinct_and_sorted() {
        let db = setup_test_db();
        let years = db.query_years().unwrap();
        assert_eq!(years.first(), Some(&1952));
        assert_eq!(years.last(), Some(&2007));
        assert_eq!(years.len(), 12);
        assert!(years.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn quick_stats_on_small_dataset() {
        let db = Database::new().unwrap();
        db.load_csv(SMALL).unwrap();
        let stats = db.query_quick_stats().unwrap().unwrap();
        assert_eq!(stats.total_countries, 3);
        assert_eq!(stats.years_covered(), "1952 - 2007");
        assert!((stats.avg_gdp_percap - 187.5).abs() < 1e-9);
        assert!((stats.avg_life_exp - 55.0).abs() < 1e-9);
    }

    #[test]
    fn quick_stats_on_fixture() {
        let db = setup_test_db();
        let stats = db.query_quick_stats().unwrap().unwrap();
        assert_eq!(stats.total_countries, 12);
        assert_eq!(stats.first_year, 1952);
        assert_eq!(stats.last_year, 2007);
        // Means over all 44 fixture rows.
        assert!((stats.avg_gdp_percap - 10501.531926713636).abs() < 1e-6);
        assert!((stats.avg_life_exp - 58.455863636363645).abs() < 1e-9);
        assert_eq!(stats.avg_gdp_display(), "10501.53");
        assert_eq!(stats.avg_life_exp_display(), "58.46");
    }

    #[test]
    fn year_slice_pads_iso_codes() {
        let db = setup_test_db();
        let points = db.query_year(2007).unwrap();
        assert_eq!(points.len(), 12);
        let afghanistan = points.iter().find(|p| p.iso_alpha == "AFG").unwrap();
        assert_eq!(afghanistan.iso_num, "004");
        assert_eq!(afghanistan.pop, 31889923);
    }

    #[test]
    fn unknown_year_is_empty() {
        let db = setup_test_db();
        assert!(db.query_year(1800).unwrap().is_empty());
        assert!(db.query_gdp_values(Some(1800)).unwrap().is_empty());
        assert!(db.query_continent_totals(1800).unwrap().is_empty());
        let root = db.query_sunburst(1800).unwrap();
        assert!(root.children.is_empty());
        assert_eq!(root.value, 0.0);
    }

    #[test]
    fn all_rows_in_frame_order() {
        let db = setup_test_db();
        let rows = db.query_all().unwrap();
        assert_eq!(rows.len(), 44);
        assert!(rows
            .windows(2)
            .all(|w| (w[0].year, &w[0].country) <= (w[1].year, &w[1].country)));
    }

    #[test]
    fn gdp_values_by_year_and_overall() {
        let db = Database::new().unwrap();
        db.load_csv(SMALL).unwrap();
        assert_eq!(db.query_gdp_values(None).unwrap().len(), 4);
        assert_eq!(
            db.query_gdp_values(Some(2007)).unwrap(),
            vec![100.0, 200.0, 400.0]
        );
    }

    #[test]
    fn continent_totals_are_weighted() {
        let db = Database::new().unwrap();
        db.load_csv(SMALL).unwrap();
        let totals = db.query_continent_totals(2007).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].continent, "Asia");
        assert_eq!(totals[0].countries, 2);
        assert_eq!(totals[0].pop, 400);
        assert!((totals[0].life_exp - 50.0).abs() < 1e-9);
        assert_eq!(totals[1].continent, "Europe");
    }

    #[test]
    fn sunburst_hierarchy() {
        let db = Database::new().unwrap();
        db.load_csv(SMALL).unwrap();
        let root = db.query_sunburst(2007).unwrap();
        assert_eq!(root.name, "World");
        assert_eq!(root.value, 450.0);
        assert_eq!(root.children.len(), 2);

        let asia = &root.children[0];
        assert_eq!(asia.name, "Asia");
        assert_eq!(asia.value, 400.0);
        assert_eq!(asia.children[0].name, "A");
        assert_eq!(asia.children[1].name, "B");
        assert!((asia.life_exp - 50.0).abs() < 1e-9);
    }

    #[test]
    fn quartile_counts_sum_to_total() {
        let db = setup_test_db();
        let counts = db.query_quartile_counts().unwrap();
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[0].quartile, "Q1");
        assert_eq!(counts.iter().map(|c| c.count).sum::<i64>(), 44);
    }
}
