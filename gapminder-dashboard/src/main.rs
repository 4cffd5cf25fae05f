//! World Bank GDP x life expectancy dashboard.
//!
//! Three views over the Gapminder panel (country x year):
//! - a world map colored by GDP per capita for the selected year,
//! - an animated GDP vs. life expectancy bubble chart over all years,
//! - a continent/country population sunburst for the selected year.
//!
//! Data flow:
//! 1. `build.rs` copies `gapminder.csv` into `OUT_DIR`.
//! 2. `include_str!` embeds it into the WASM binary.
//! 3. On mount the CSV becomes a quartile-labelled `Dataset`, which is loaded
//!    into the in-memory SQLite database.
//! 4. Tab, year and "Show data" changes re-query the database and re-render
//!    via D3.js.

use dioxus::prelude::*;
use gm_chart_ui::components::{
    ChartContainer, ChartHeader, DownloadButton, ErrorDisplay, LoadingSpinner, QuickStatsRow,
    ShowDataToggle, TabBar, YearSlider,
};
use gm_chart_ui::js_bridge;
use gm_chart_ui::state::{nearest_year, AppState, Tab};
use gm_data::continent::Continent;
use gm_data::dataset::Dataset;
use gm_db::models::CountryPoint;
use gm_db::Database;
use gm_stats::color_scale::{color_scale_range, ColorScaleRange};

const GAPMINDER_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/gapminder.csv"));

const PAGE_TITLE: &str = "World Bank GDP x life expectancy Timeseries";
const TABLE_ID: &str = "gm-data-table";
const WORLD_ATLAS_URL: &str = "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";

/// Scatter axes and bubble size.
const SCATTER_X_RANGE: [f64; 2] = [100.0, 100_000.0];
const SCATTER_Y_RANGE: [f64; 2] = [25.0, 90.0];
const SCATTER_SIZE_MAX: f64 = 60.0;
const SCATTER_FRAME_MS: u32 = 800;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("main"))
        .launch(App);
}

/// Parse, label and load the embedded CSV.
fn load(csv_data: &str) -> anyhow::Result<(Database, Dataset)> {
    let dataset = Dataset::from_csv(csv_data)?;
    dataset.ensure_not_empty()?;
    let db = Database::new()?;
    db.load_dataset(&dataset)?;
    Ok((db, dataset))
}

fn choropleth_config(year: i64, domain: ColorScaleRange) -> serde_json::Value {
    serde_json::json!({
        "title": format!("GDP per capita, {}", year),
        "domain": [domain.min, domain.max],
        "worldUrl": WORLD_ATLAS_URL,
        "colorLabel": "GDP per capita (US$)",
    })
}

fn continent_colors() -> serde_json::Map<String, serde_json::Value> {
    Continent::ALL
        .iter()
        .map(|c| (c.as_str().to_string(), serde_json::Value::from(c.color())))
        .collect()
}

fn scatter_config(start_year: i64) -> serde_json::Value {
    serde_json::json!({
        "title": "GDP per capita vs. life expectancy",
        "xRange": SCATTER_X_RANGE,
        "yRange": SCATTER_Y_RANGE,
        "sizeMax": SCATTER_SIZE_MAX,
        "startYear": start_year,
        "frameMs": SCATTER_FRAME_MS,
        "colors": continent_colors(),
    })
}

/// Color domain of the sunburst: the life expectancy spread of the whole
/// panel, so colors stay comparable between years.
fn life_exp_domain(points: &[CountryPoint]) -> [f64; 2] {
    let lo = points.iter().map(|p| p.life_exp).fold(f64::INFINITY, f64::min);
    let hi = points.iter().map(|p| p.life_exp).fold(f64::NEG_INFINITY, f64::max);
    if lo.is_finite() && hi > lo {
        [lo, hi]
    } else {
        [SCATTER_Y_RANGE[0], SCATTER_Y_RANGE[1]]
    }
}

fn table_config() -> serde_json::Value {
    serde_json::json!({
        "title": "Gapminder data",
        "columns": [
            {"key": "country", "label": "Country", "type": "text"},
            {"key": "continent", "label": "Continent", "type": "text"},
            {"key": "year", "label": "Year", "type": "number"},
            {"key": "life_exp", "label": "Life expectancy", "type": "number", "digits": 3},
            {"key": "pop", "label": "Population", "type": "number"},
            {"key": "gdp_percap", "label": "GDP per capita", "type": "number", "digits": 2},
            {"key": "iso_alpha", "label": "ISO alpha", "type": "text"},
            {"key": "iso_num", "label": "ISO num", "type": "text"},
            {"key": "gdp_quartile", "label": "GDP quartile", "type": "text"},
        ],
        "defaultSort": {"key": "country", "direction": "asc"},
    })
}

fn render_map(db: &Database, year: i64) -> anyhow::Result<()> {
    let points = db.query_year(year)?;
    let domain = color_scale_range(db.query_gdp_values(Some(year))?);
    log::info!(
        "[GM] map: {} countries in {}, color domain [{:.2}, {:.2}]",
        points.len(),
        year,
        domain.min,
        domain.max
    );
    js_bridge::render_choropleth(
        Tab::Map.container_id(),
        &serde_json::to_string(&points)?,
        &choropleth_config(year, domain).to_string(),
    );
    Ok(())
}

fn render_scatter(db: &Database, start_year: i64) -> anyhow::Result<()> {
    let points = db.query_all()?;
    js_bridge::render_scatter(
        Tab::Scatter.container_id(),
        &serde_json::to_string(&points)?,
        &scatter_config(start_year).to_string(),
    );
    Ok(())
}

fn render_sunburst(db: &Database, year: i64) -> anyhow::Result<()> {
    let root = db.query_sunburst(year)?;
    let domain = life_exp_domain(&db.query_all()?);
    let config = serde_json::json!({
        "title": format!("Population by continent and country, {}", year),
        "lifeExpDomain": domain,
    });
    js_bridge::render_sunburst(
        Tab::Sunburst.container_id(),
        &serde_json::to_string(&root)?,
        &config.to_string(),
    );
    Ok(())
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // ─── Effect 1: load the dataset once on mount ───
    use_effect(move || match load(GAPMINDER_CSV) {
        Ok((db, dataset)) => {
            let years = db.query_years().unwrap_or_default();
            if let Some(last) = years.last() {
                state.selected_year.set(*last);
            }
            match db.query_quick_stats() {
                Ok(stats) => state.quick_stats.set(stats),
                Err(e) => log::error!("[GM] Failed to query quick stats: {}", e),
            }
            match dataset.to_csv() {
                Ok(csv) => state.export_csv.set(Some(csv)),
                Err(e) => log::error!("[GM] Failed to build export CSV: {}", e),
            }
            web_sys::console::log_1(
                &format!("[GM] dashboard: {} rows over {} years", dataset.len(), years.len()).into(),
            );
            state.years.set(years);
            state.db.set(Some(db));
            state.loading.set(false);
            js_bridge::init_charts();
        }
        Err(e) => {
            log::error!("[GM] Failed to load Gapminder data: {}", e);
            state
                .error_msg
                .set(Some(format!("Failed to load Gapminder data: {}", e)));
            state.loading.set(false);
        }
    });

    // ─── Effect 2: render the active chart ───
    // Re-runs whenever loading, the active tab, or the selected year change.
    use_effect(move || {
        if (state.loading)() || (state.error_msg)().is_some() {
            return;
        }
        let tab = (state.active_tab)();
        let selected = (state.selected_year)();
        let year = nearest_year(&state.years.read(), selected).unwrap_or(selected);
        let db = match &*state.db.read() {
            Some(db) => db.clone(),
            None => return,
        };

        for other in Tab::ALL.iter().filter(|t| **t != tab) {
            js_bridge::destroy_chart(other.container_id());
        }

        let result = match tab {
            Tab::Map => render_map(&db, year),
            Tab::Scatter => render_scatter(&db, year),
            Tab::Sunburst => render_sunburst(&db, year),
        };
        if let Err(e) = result {
            log::error!("[GM] Failed to render {}: {}", tab.label(), e);
        }
    });

    // ─── Effect 3: raw data table ───
    use_effect(move || {
        if (state.loading)() || !(state.show_data)() {
            return;
        }
        let db = match &*state.db.read() {
            Some(db) => db.clone(),
            None => return,
        };
        match db.query_all() {
            Ok(rows) => {
                let data_json = serde_json::to_string(&rows).unwrap_or_default();
                js_bridge::render_data_table(TABLE_ID, &data_json, &table_config().to_string());
            }
            Err(e) => log::error!("[GM] Failed to query table rows: {}", e),
        }
    });

    let active = (state.active_tab)();
    let subtitle = match active {
        Tab::Map => "Color: GDP per capita (US$), log scale clipped to the bulk of the distribution",
        Tab::Scatter => "Bubble size: population. Color: continent. Press play to animate from the selected year.",
        Tab::Sunburst => "Arc size: population. Color: life expectancy. Click a continent to zoom.",
    };
    let (min_height, caption): (u32, &str) = match active {
        Tab::Map => (480, "Source: Gapminder via plotly. Borders: Natural Earth 1:110m."),
        Tab::Scatter => (520, ""),
        Tab::Sunburst => (660, ""),
    };

    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            h1 {
                style: "font-size: 24px; margin: 8px 0;",
                "{PAGE_TITLE}"
            }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            } else if *state.loading.read() {
                LoadingSpinner {}
            } else {
                QuickStatsRow {
                    DownloadButton {}
                }

                TabBar {}
                YearSlider {}

                ChartHeader {
                    title: active.label().to_string(),
                    subtitle: subtitle.to_string(),
                }

                // Keyed by tab so switching replaces the D3 container.
                ChartContainer {
                    key: "{active.container_id()}",
                    id: active.container_id().to_string(),
                    min_height: min_height,
                    caption: caption.to_string(),
                }

                ShowDataToggle {}
                if (state.show_data)() {
                    div { id: TABLE_ID, style: "width: 100%;" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_csv_loads() {
        let (db, dataset) = load(GAPMINDER_CSV).unwrap();
        assert!(!dataset.is_empty());
        assert_eq!(db.query_all().unwrap().len(), dataset.len());
    }

    #[test]
    fn load_rejects_header_only_csv() {
        let err = load("country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n");
        assert!(err.is_err());
    }

    #[test]
    fn choropleth_domain_is_passed_through() {
        let config = choropleth_config(2007, ColorScaleRange { min: 10.9, max: 1000.0 });
        assert_eq!(config["domain"], serde_json::json!([10.9, 1000.0]));
        assert_eq!(config["worldUrl"], WORLD_ATLAS_URL);
    }

    #[test]
    fn scatter_config_fixes_axes() {
        let config = scatter_config(1952);
        assert_eq!(config["xRange"], serde_json::json!([100.0, 100000.0]));
        assert_eq!(config["yRange"], serde_json::json!([25.0, 90.0]));
        assert_eq!(config["sizeMax"], serde_json::json!(60.0));
        assert_eq!(config["startYear"], 1952);
        assert_eq!(config["colors"].as_object().unwrap().len(), Continent::ALL.len());
    }

    #[test]
    fn table_shows_quartile_column() {
        let config = table_config();
        let keys: Vec<&str> = config["columns"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["key"].as_str())
            .collect();
        assert_eq!(keys.len(), 9);
        assert!(keys.contains(&"gdp_quartile"));
    }

    #[test]
    fn life_exp_domain_falls_back_when_empty() {
        assert_eq!(life_exp_domain(&[]), [25.0, 90.0]);
    }
}
