//! Reusable Dioxus RSX components for the Gapminder dashboard.

mod chart_container;
mod chart_header;
mod download_button;
mod error_display;
mod loading_spinner;
mod metric_card;
mod show_data_toggle;
mod tab_bar;
mod year_slider;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use download_button::{DownloadButton, DOWNLOAD_FILENAME};
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use metric_card::{MetricCard, QuickStatsRow};
pub use show_data_toggle::ShowDataToggle;
pub use tab_bar::TabBar;
pub use year_slider::YearSlider;
