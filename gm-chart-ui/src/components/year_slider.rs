//! Year selection slider. Steps through the years present in the data only.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn YearSlider() -> Element {
    let mut state = use_context::<AppState>();
    let years = state.years.read().clone();
    let selected = (state.selected_year)();

    if years.is_empty() {
        return rsx! {};
    }

    let index = years.iter().position(|y| *y == selected).unwrap_or(years.len() - 1);
    let max_index = years.len() - 1;
    let first = years[0];
    let last = years[max_index];

    let on_input = move |evt: Event<FormData>| {
        if let Ok(i) = evt.value().parse::<usize>() {
            let year = state.years.peek().get(i).copied();
            if let Some(year) = year {
                state.selected_year.set(year);
            }
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                r#for: "year-slider",
                style: "font-weight: bold;",
                "Year: {selected}"
            }
            span { style: "font-size: 12px; color: #888;", "{first}" }
            input {
                id: "year-slider",
                r#type: "range",
                min: "0",
                max: "{max_index}",
                step: "1",
                value: "{index}",
                style: "flex: 1;",
                oninput: on_input,
            }
            span { style: "font-size: 12px; color: #888;", "{last}" }
        }
    }
}
