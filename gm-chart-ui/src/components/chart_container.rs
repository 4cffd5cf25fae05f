//! Container div that a D3 chart renders into.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id the D3 script targets
    pub id: String,
    /// Minimum height in pixels, so the layout does not jump while D3 loads
    #[props(default = 480)]
    pub min_height: u32,
    /// Small caption under the chart (data source, scale notes)
    #[props(default = String::new())]
    pub caption: String,
}

/// A container div for a D3.js chart with an optional caption.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%; background: #fff; border: 1px solid #eceff1; border-radius: 6px;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            div {
                id: "{props.id}",
                style: "width: 100%;",
            }
        }
        if !props.caption.is_empty() {
            p {
                style: "font-size: 11px; color: #888; text-align: center; margin-top: 4px;",
                "{props.caption}"
            }
        }
    }
}
