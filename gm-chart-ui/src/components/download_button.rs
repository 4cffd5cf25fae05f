//! CSV download of the full dataset.

use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;

/// File name offered to the browser.
pub const DOWNLOAD_FILENAME: &str = "gapminder_data.csv";

#[component]
pub fn DownloadButton() -> Element {
    let state = use_context::<AppState>();
    let ready = state.export_csv.read().is_some();

    let on_click = move |_: Event<MouseData>| {
        if let Some(csv) = state.export_csv.peek().as_ref() {
            log::info!("[GM] download: {} bytes as {}", csv.len(), DOWNLOAD_FILENAME);
            js_bridge::download_csv(DOWNLOAD_FILENAME, csv);
        }
    };

    rsx! {
        button {
            disabled: !ready,
            style: "padding: 8px 12px; border: 1px solid #90CAF9; background: #E3F2FD; color: #0D47A1; border-radius: 4px; cursor: pointer; font-size: 13px;",
            onclick: on_click,
            "📥 Download Dataset as CSV"
        }
    }
}
