//! SQL schema for the in-memory SQLite database.

/// Returns the full SQL schema as a single batch string.
///
/// A single `observations` table holds one row per country and year,
/// including the GDP quartile label computed when the dataset was loaded.
/// Per-year and per-continent aggregates are derived with `GROUP BY`
/// queries against it.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS observations (
        country TEXT NOT NULL,
        continent TEXT NOT NULL,
        year INTEGER NOT NULL,
        life_exp REAL NOT NULL,
        pop INTEGER NOT NULL,
        gdp_percap REAL NOT NULL,
        iso_alpha TEXT NOT NULL,
        iso_num INTEGER NOT NULL,
        gdp_quartile TEXT NOT NULL,
        PRIMARY KEY (country, year)
    );
    CREATE INDEX IF NOT EXISTS idx_obs_year ON observations(year);
    CREATE INDEX IF NOT EXISTS idx_obs_continent ON observations(continent);
    "#
}
