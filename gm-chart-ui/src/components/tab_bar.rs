//! Tab strip switching between the three charts.

use crate::state::{AppState, Tab};
use dioxus::prelude::*;

#[component]
pub fn TabBar() -> Element {
    let mut state = use_context::<AppState>();
    let active = (state.active_tab)();

    rsx! {
        div {
            role: "tablist",
            style: "display: flex; gap: 4px; border-bottom: 2px solid #E0E0E0; margin: 16px 0 8px 0;",
            for tab in Tab::ALL {
                button {
                    key: "{tab.container_id()}",
                    role: "tab",
                    style: if tab == active {
                        "padding: 8px 16px; border: none; border-bottom: 3px solid #2196F3; background: none; font-weight: 600; color: #1565C0; cursor: pointer;"
                    } else {
                        "padding: 8px 16px; border: none; border-bottom: 3px solid transparent; background: none; color: #546E7A; cursor: pointer;"
                    },
                    onclick: move |_| state.active_tab.set(tab),
                    "{tab.label()}"
                }
            }
        }
    }
}
