use crate::state::AppState;
use dioxus::prelude::*;

/// "Show data" checkbox controlling the raw data table.
#[component]
pub fn ShowDataToggle() -> Element {
    let mut state = use_context::<AppState>();
    let checked = (state.show_data)();

    rsx! {
        label {
            style: "display: inline-flex; gap: 6px; align-items: center; margin: 12px 0; cursor: pointer;",
            input {
                r#type: "checkbox",
                checked: checked,
                onchange: move |evt: Event<FormData>| state.show_data.set(evt.checked()),
            }
            "Show data"
        }
    }
}
