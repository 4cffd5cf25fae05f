//! Populating the in-memory database from a [`Dataset`].

use crate::Database;
use gm_data::dataset::Dataset;
use rusqlite::params;

impl Database {
    /// Replace the stored observations with every labelled row of `dataset`,
    /// in one transaction.
    ///
    /// Rows of a previously loaded dataset are removed first, so the store
    /// only ever holds one set of quartile labels.
    pub fn load_dataset(&self, dataset: &Dataset) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        let removed = tx.execute("DELETE FROM observations", [])?;
        if removed > 0 {
            log::info!("[GM] loader: Replaced {} previous observations", removed);
        }
        let mut count = 0u32;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO observations
                 (country, continent, year, life_exp, pop, gdp_percap, iso_alpha, iso_num, gdp_quartile)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in dataset.rows() {
                let o = &row.observation;
                stmt.execute(params![
                    o.country,
                    o.continent.as_str(),
                    o.year,
                    o.life_exp,
                    o.pop as i64,
                    o.gdp_percap,
                    o.iso_alpha,
                    o.iso_num as i64,
                    row.gdp_quartile.as_str(),
                ])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!("[GM] loader: Loaded {} observations", count);
        Ok(())
    }

    /// Parse a Gapminder CSV and load it.
    pub fn load_csv(&self, csv_data: &str) -> anyhow::Result<Dataset> {
        let dataset = Dataset::from_csv(csv_data)?;
        self.load_dataset(&dataset)?;
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    const SAMPLE: &str = "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n\
                          Afghanistan,Asia,1952,28.801,8425333,779.4453145,AFG,4\n\
                          Albania,Europe,1952,55.23,1282697,1601.056136,ALB,8\n";

    #[test]
    fn load_csv_inserts_rows() {
        let db = Database::new().unwrap();
        let dataset = db.load_csv(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(db.query_all().unwrap().len(), 2);
    }

    #[test]
    fn reload_replaces_previous_dataset() {
        let db = Database::new().unwrap();
        db.load_csv(
            "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n\
             A,Asia,2007,40,300,100,AAA,1\n\
             B,Asia,2007,80,100,200,BBB,2\n",
        )
        .unwrap();
        db.load_csv(
            "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n\
             C,Europe,2007,70,50,50000,CCC,3\n",
        )
        .unwrap();

        let rows = db.query_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country, "C");
        assert_eq!(rows[0].gdp_quartile, "Q1");

        let stats = db.query_quick_stats().unwrap().unwrap();
        assert_eq!(stats.total_countries, 1);
        assert_eq!(stats.avg_gdp_percap, 50000.0);
        let counts = db.query_quartile_counts().unwrap();
        assert_eq!(counts.iter().map(|c| c.count).sum::<i64>(), 1);
    }

    #[test]
    fn load_is_idempotent() {
        let db = Database::new().unwrap();
        db.load_csv(SAMPLE).unwrap();
        db.load_csv(SAMPLE).unwrap();
        assert_eq!(db.query_all().unwrap().len(), 2);
    }

    #[test]
    fn load_rejects_bad_csv() {
        let db = Database::new().unwrap();
        let bad = "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n\
                   Afghanistan,Nowhere,1952,28.8,1,779.4,AFG,4\n";
        assert!(db.load_csv(bad).is_err());
        assert!(db.query_all().unwrap().is_empty());
    }
}
