//! Query result models.
//!
//! All structs derive `Serialize` so they can be passed to D3.js as JSON.

use gm_stats::summary::format_fixed;
use serde::Serialize;

/// One country in one year: a map region, a scatter point or a table row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CountryPoint {
    pub country: String,
    pub continent: String,
    pub year: i64,
    pub life_exp: f64,
    pub pop: i64,
    pub gdp_percap: f64,
    pub iso_alpha: String,
    /// Zero-padded three-digit ISO numeric code, matching world-atlas feature ids.
    pub iso_num: String,
    pub gdp_quartile: String,
}

/// Header metrics of the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuickStats {
    pub total_countries: i64,
    pub first_year: i64,
    pub last_year: i64,
    /// Mean GDP per capita over every observation.
    pub avg_gdp_percap: f64,
    /// Mean life expectancy over every observation.
    pub avg_life_exp: f64,
}

impl QuickStats {
    /// e.g. "1952 - 2007"
    pub fn years_covered(&self) -> String {
        format!("{} - {}", self.first_year, self.last_year)
    }

    pub fn avg_gdp_display(&self) -> String {
        format_fixed(self.avg_gdp_percap, 2)
    }

    pub fn avg_life_exp_display(&self) -> String {
        format_fixed(self.avg_life_exp, 2)
    }
}

/// Per-continent aggregate for one year.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContinentTotal {
    pub continent: String,
    pub countries: i64,
    pub pop: i64,
    /// Population-weighted life expectancy.
    pub life_exp: f64,
}

/// A node of the world -> continent -> country hierarchy.
///
/// `value` is population; `life_exp` drives the color. Inner nodes carry the
/// population sum and the population-weighted life expectancy of their
/// children.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SunburstNode {
    pub name: String,
    pub value: f64,
    pub life_exp: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SunburstNode>,
}

impl SunburstNode {
    pub fn leaf(name: &str, pop: f64, life_exp: f64) -> Self {
        Self {
            name: name.to_string(),
            value: pop,
            life_exp,
            children: Vec::new(),
        }
    }

    /// Build an inner node whose value and color summarize `children`.
    pub fn branch(name: &str, children: Vec<SunburstNode>) -> Self {
        let value: f64 = children.iter().map(|c| c.value).sum();
        let life_exp = if value > 0.0 {
            children.iter().map(|c| c.life_exp * c.value).sum::<f64>() / value
        } else {
            0.0
        };
        Self {
            name: name.to_string(),
            value,
            life_exp,
            children,
        }
    }
}

/// Number of observations per GDP quartile.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuartileCount {
    pub quartile: String,
    pub count: i64,
}
