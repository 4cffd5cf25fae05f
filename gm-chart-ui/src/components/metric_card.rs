//! Header metric cards ("Quick Statistics").

use crate::state::AppState;
use dioxus::prelude::*;
use gm_stats::summary::format_thousands;

#[derive(Props, Clone, PartialEq)]
pub struct MetricCardProps {
    pub label: String,
    pub value: String,
}

/// A single labelled figure.
#[component]
pub fn MetricCard(props: MetricCardProps) -> Element {
    rsx! {
        div {
            style: "flex: 1; min-width: 160px; padding: 12px 16px; background: #F5F7FA; border-radius: 6px; border: 1px solid #E0E6ED;",
            div {
                style: "font-size: 12px; color: #607D8B; margin-bottom: 4px;",
                "{props.label}"
            }
            div {
                style: "font-size: 24px; font-weight: 600; color: #263238;",
                "{props.value}"
            }
        }
    }
}

/// The four dashboard metrics, plus an optional trailing slot (the download button).
#[component]
pub fn QuickStatsRow(children: Element) -> Element {
    let state = use_context::<AppState>();
    let stats = state.quick_stats.read().clone();

    let Some(stats) = stats else {
        return rsx! {};
    };

    rsx! {
        h2 {
            style: "font-size: 18px; margin: 16px 0 8px 0;",
            "Quick Statistics"
        }
        div {
            style: "display: flex; gap: 12px; flex-wrap: wrap; align-items: stretch;",
            MetricCard {
                label: "Total Countries".to_string(),
                value: format_thousands(stats.total_countries),
            }
            MetricCard {
                label: "Years Covered".to_string(),
                value: stats.years_covered(),
            }
            MetricCard {
                label: "Average GDP".to_string(),
                value: stats.avg_gdp_display(),
            }
            div {
                style: "flex: 1; min-width: 160px; display: flex; flex-direction: column; gap: 8px;",
                MetricCard {
                    label: "Average life expectancy".to_string(),
                    value: stats.avg_life_exp_display(),
                }
                {children}
            }
        }
    }
}
