//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js chart functions live in `assets/js/*.js` and are embedded at
//! compile time. They are evaluated as globals (no ES modules) and exposed via
//! `window.*`. Payloads cross the boundary as JSON, embedded as JS string
//! literals.

use wasm_bindgen::JsValue;

static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static CHOROPLETH_JS: &str = include_str!("../assets/js/choropleth.js");
static SCATTER_CHART_JS: &str = include_str!("../assets/js/scatter-chart.js");
static SUNBURST_CHART_JS: &str = include_str!("../assets/js/sunburst-chart.js");
static DATA_TABLE_JS: &str = include_str!("../assets/js/data-table.js");
static DOWNLOAD_JS: &str = include_str!("../assets/js/download.js");

/// Functions promoted to `window.*` once the scripts are evaluated.
const EXPORTED_FUNCTIONS: [&str; 8] = [
    "initTooltip",
    "showTooltip",
    "hideTooltip",
    "renderChoropleth",
    "renderScatterChart",
    "renderSunburstChart",
    "renderDataTable",
    "downloadCsv",
];

/// Encode `s` as a JS string literal (quotes included).
pub fn js_string_literal(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('GM JS call failed:', e); }}",
        code
    );
    if let Err(e) = js_sys::eval(&wrapped) {
        web_sys::console::warn_2(&JsValue::from_str("GM eval failed:"), &e);
    }
}

fn all_scripts() -> String {
    [
        TOOLTIP_JS,
        CHOROPLETH_JS,
        SCATTER_CHART_JS,
        SUNBURST_CHART_JS,
        DATA_TABLE_JS,
        DOWNLOAD_JS,
    ]
    .join("\n")
}

fn init_snippet() -> String {
    let promote: String = EXPORTED_FUNCTIONS
        .iter()
        .map(|name| {
            format!(
                "if (typeof {name} !== 'undefined') window.{name} = {name};\n",
                name = name
            )
        })
        .collect();
    format!(
        r#"
        (function() {{
            if (window.__gmChartsReady || window.__gmChartsInitializing) return;
            window.__gmChartsInitializing = true;
            var waitForD3 = setInterval(function() {{
                if (typeof d3 !== 'undefined') {{
                    clearInterval(waitForD3);
                    (0, eval)(window.__gmChartScripts);
                    delete window.__gmChartScripts;
                    {promote}
                    window.__gmChartsReady = true;
                    console.log('GM charts initialized');
                }}
            }}, 100);
        }})();
        "#,
        promote = promote
    )
}

/// Initialize chart scripts once D3 has loaded.
///
/// Scripts are stashed on `window` and evaluated at global scope by an
/// indirect eval, so their `function` declarations become globals rather
/// than being scoped to the polling callback.
pub fn init_charts() {
    let store_js = format!("window.__gmChartScripts = {};", js_string_literal(&all_scripts()));
    let _ = js_sys::eval(&store_js);
    let _ = js_sys::eval(&init_snippet());
}

/// JS that polls until the scripts and the container are ready, then calls
/// `window.{function}(containerId, data, config)`.
pub fn render_snippet(function: &str, container_id: &str, data_json: &str, config_json: &str) -> String {
    format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__gmChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window.{function}({id}, {data}, {config});
                    }} catch(e) {{ console.error('[GM] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
        function = function,
        id = js_string_literal(container_id),
        data = js_string_literal(data_json),
        config = js_string_literal(config_json),
    )
}

/// Render the GDP-per-capita world map for one year.
pub fn render_choropleth(container_id: &str, data_json: &str, config_json: &str) {
    call_js(&render_snippet("renderChoropleth", container_id, data_json, config_json));
}

/// Render the animated GDP vs. life expectancy scatter.
pub fn render_scatter(container_id: &str, data_json: &str, config_json: &str) {
    call_js(&render_snippet("renderScatterChart", container_id, data_json, config_json));
}

/// Render the continent/country sunburst.
pub fn render_sunburst(container_id: &str, data_json: &str, config_json: &str) {
    call_js(&render_snippet("renderSunburstChart", container_id, data_json, config_json));
}

/// Render a sortable data table.
pub fn render_data_table(container_id: &str, data_json: &str, config_json: &str) {
    call_js(&render_snippet("renderDataTable", container_id, data_json, config_json));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById({}); if (el) {{ if (el.__gmStop) el.__gmStop(); el.innerHTML = ''; }}",
        js_string_literal(container_id)
    ));
}

/// JS that defines `window.downloadCsv` if the chart scripts have not been
/// promoted yet, then downloads `body`. `download.js` has no D3 dependency.
fn download_snippet(filename: &str, body: &str) -> String {
    format!(
        r#"
        if (typeof window.downloadCsv === 'undefined') {{
            (0, eval)({script});
            window.downloadCsv = downloadCsv;
        }}
        window.downloadCsv({name}, {body}, 'text/csv');
        "#,
        script = js_string_literal(DOWNLOAD_JS),
        name = js_string_literal(filename),
        body = js_string_literal(body),
    )
}

/// Offer `body` to the browser as a file download.
pub fn download_csv(filename: &str, body: &str) {
    call_js(&download_snippet(filename, body));
}
