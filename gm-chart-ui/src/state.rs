//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use dioxus::prelude::*;
use gm_db::models::QuickStats;
use gm_db::Database;

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Map,
    Scatter,
    Sunburst,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Map, Tab::Scatter, Tab::Sunburst];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Map => "World Map",
            Tab::Scatter => "GDP vs Life Expectancy",
            Tab::Sunburst => "Population Breakdown",
        }
    }

    /// DOM id of the chart container rendered for this tab.
    pub fn container_id(&self) -> &'static str {
        match self {
            Tab::Map => "gm-choropleth",
            Tab::Scatter => "gm-scatter",
            Tab::Sunburst => "gm-sunburst",
        }
    }
}

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Database instance (None until loaded)
    pub db: Signal<Option<Database>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Currently visible tab
    pub active_tab: Signal<Tab>,
    /// Distinct years in the dataset, ascending
    pub years: Signal<Vec<i64>>,
    /// Year shown by the map and sunburst; starting frame of the scatter
    pub selected_year: Signal<i64>,
    /// Whether the raw data table is shown
    pub show_data: Signal<bool>,
    /// Header metrics
    pub quick_stats: Signal<Option<QuickStats>>,
    /// Download payload, built once after loading
    pub export_csv: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            db: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            active_tab: Signal::new(Tab::Map),
            years: Signal::new(Vec::new()),
            selected_year: Signal::new(0),
            show_data: Signal::new(false),
            quick_stats: Signal::new(None),
            export_csv: Signal::new(None),
        }
    }
}

/// Snap `year` to the nearest available year, preferring the earlier one on ties.
pub fn nearest_year(years: &[i64], year: i64) -> Option<i64> {
    years
        .iter()
        .copied()
        .min_by_key(|y| ((y - year).abs(), *y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_ids_are_unique() {
        let mut ids: Vec<&str> = Tab::ALL.iter().map(|t| t.container_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), Tab::ALL.len());
    }

    #[test]
    fn nearest_year_snaps() {
        let years = vec![1952, 1957, 1962];
        assert_eq!(nearest_year(&years, 1957), Some(1957));
        assert_eq!(nearest_year(&years, 1959), Some(1957));
        assert_eq!(nearest_year(&years, 1960), Some(1962));
        assert_eq!(nearest_year(&years, 2020), Some(1962));
        assert_eq!(nearest_year(&[], 2020), None);
    }
}
