//! In-memory SQLite database layer for the Gapminder dashboard.
//!
//! A [`gm_data::dataset::Dataset`] is loaded once into an in-memory SQLite
//! database; the chart components then run typed queries against it and
//! serialize the results to JSON for the D3.js scripts.
//!
//! - `Rc<RefCell<Connection>>` for interior mutability in single-threaded WASM
//! - In-memory SQLite via `rusqlite`
//! - Typed query methods returning serializable structs from [`models`]
//!
//! # Usage
//!
//! ```rust
//! use gm_data::dataset::Dataset;
//! use gm_db::Database;
//!
//! let dataset = Dataset::embedded().unwrap();
//! let db = Database::new().unwrap();
//! db.load_dataset(&dataset).unwrap();
//!
//! let years = db.query_years().unwrap();
//! let latest = db.query_year(*years.last().unwrap()).unwrap();
//! assert!(!latest.is_empty());
//! ```

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding one Gapminder dataset.
///
/// Cheaply cloneable (via `Rc`); clones share the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gm_data::dataset::Dataset;

    #[test]
    fn database_creates_successfully() {
        assert!(Database::new().is_ok());
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_dataset(&Dataset::embedded().unwrap()).unwrap();
        let years = db2.query_years().unwrap();
        assert_eq!(years.len(), 12, "Clone should see same data via shared Rc");
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert!(db.query_years().unwrap().is_empty());
        assert!(db.query_quick_stats().unwrap().is_none());
    }
}
