//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! D3.js drawing functions are split across `assets/js/*.js` and loaded at runtime.
//! They are evaluated as globals (no ES modules) and exposed via `window.*`.
//! Every argument crosses the boundary as a JSON string literal and is parsed
//! on the JS side, so no manual quote escaping is needed.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

// Embed all D3 chart JS files at compile time
static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static CHOROPLETH_JS: &str = include_str!("../assets/js/choropleth.js");
static BAR_CHART_JS: &str = include_str!("../assets/js/bar-chart.js");
static BUBBLE_CHART_JS: &str = include_str!("../assets/js/bubble-chart.js");

/// Functions promoted to `window.*` once the scripts are evaluated.
const EXPORTED_FUNCTIONS: [&str; 16] = [
    "climateEvent",
    "initClimateTooltip",
    "showClimateTooltip",
    "moveClimateTooltip",
    "hideClimateTooltip",
    "setClimateHighlight",
    "attachClimateEvents",
    "prepareClimateMap",
    "climateMapUnitBounds",
    "applyClimateFit",
    "drawClimateMap",
    "updateClimateMapFills",
    "reprojectClimateMap",
    "watchClimateResize",
    "renderClimateBarChart",
    "renderBubbleChart",
];

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Climate JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Evaluate an expression and return it if it is a string.
fn eval_string(expr: &str) -> Option<String> {
    let wrapped = format!(
        "(function() {{ try {{ return {}; }} catch(e) {{ return null; }} }})()",
        expr
    );
    js_sys::eval(&wrapped).ok().and_then(|value| value.as_string())
}

/// Quote `text` as a JS string literal.
fn js_str(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The scripts are stored on `window` and evaluated at global scope once
/// `d3` exists; `window.__climateChartsReady` is a promise resolved after
/// every exported function has been promoted to `window.*`.
pub fn init_charts() {
    let all_js = [TOOLTIP_JS, CHOROPLETH_JS, BAR_CHART_JS, BUBBLE_CHART_JS].join("\n");

    let store_js = format!(
        "window.__climateChartScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let promote: String = EXPORTED_FUNCTIONS
        .iter()
        .map(|name| format!("if (typeof {0} !== 'undefined') window.{0} = {0};", name))
        .collect::<Vec<_>>()
        .join("\n");

    let init_js = format!(
        r#"
        if (!window.__climateChartsReady) {{
            window.__climateChartsReady = new Promise(function(resolve) {{
                var waitForD3 = setInterval(function() {{
                    if (typeof d3 !== 'undefined') {{
                        clearInterval(waitForD3);
                        (0, eval)(window.__climateChartScripts + '\n' + {promote});
                        delete window.__climateChartScripts;
                        console.log('[Climate] charts initialized');
                        resolve(true);
                    }}
                }}, 100);
            }});
        }}
        "#,
        promote = js_str(&promote),
    );
    let _ = js_sys::eval(&init_js);
}

/// Resolves once [`init_charts`] has finished loading the scripts.
pub async fn wait_for_charts() -> Result<(), JsValue> {
    let ready = js_sys::eval("window.__climateChartsReady")?;
    JsFuture::from(js_sys::Promise::resolve(&ready)).await?;
    Ok(())
}

/// Whether the global `topojson` client library is loaded.
pub fn topojson_available() -> bool {
    eval_string("typeof topojson").as_deref() == Some("object")
}

/// Convert both topologies to features and build the unfitted projection.
pub fn prepare_map(container_id: &str, states_json: &str, countries_json: &str, setup_json: &str) {
    call_js(&format!(
        "window.initClimateTooltip(); window.watchClimateResize(); \
         window.prepareClimateMap({}, JSON.parse({}), JSON.parse({}), JSON.parse({}));",
        js_str(container_id),
        js_str(states_json),
        js_str(countries_json),
        js_str(setup_json),
    ));
}

/// Projected bounds of the kept regions at scale 1, translate [0, 0].
pub fn map_unit_bounds(container_id: &str) -> Option<[[f64; 2]; 2]> {
    let json = eval_string(&format!("window.climateMapUnitBounds({})", js_str(container_id)))?;
    // Empty collections yield Infinity bounds, which stringify to null.
    serde_json::from_str(&json).ok()
}

pub fn apply_fit(container_id: &str, fit_json: &str) {
    call_js(&format!(
        "window.applyClimateFit({}, JSON.parse({}));",
        js_str(container_id),
        js_str(fit_json)
    ));
}

pub fn draw_map(container_id: &str, encoding_json: &str) {
    call_js(&format!(
        "window.drawClimateMap({}, JSON.parse({}));",
        js_str(container_id),
        js_str(encoding_json)
    ));
}

/// Transition the region fills in place over `duration_ms`.
pub fn update_map_fills(container_id: &str, encoding_json: &str, duration_ms: u32) {
    call_js(&format!(
        "window.updateClimateMapFills({}, JSON.parse({}), {});",
        js_str(container_id),
        js_str(encoding_json),
        duration_ms
    ));
}

pub fn reproject_map(container_id: &str) {
    call_js(&format!("window.reprojectClimateMap({});", js_str(container_id)));
}

pub fn render_bar_chart(container_id: &str, chart_json: &str) {
    call_js(&format!(
        "window.renderClimateBarChart({}, JSON.parse({}));",
        js_str(container_id),
        js_str(chart_json)
    ));
}

pub fn set_highlight(class_key: &str, highlighted: bool) {
    call_js(&format!(
        "window.setClimateHighlight({}, {});",
        js_str(class_key),
        highlighted
    ));
}

pub fn show_tooltip(tooltip_json: &str) {
    call_js(&format!(
        "window.showClimateTooltip(JSON.parse({}));",
        js_str(tooltip_json)
    ));
}

pub fn move_tooltip(left: f64, top: f64) {
    call_js(&format!("window.moveClimateTooltip({}, {});", left, top));
}

pub fn hide_tooltip() {
    call_js("window.hideClimateTooltip();");
}

/// Render the city bubble chart.
///
/// Uses a polling loop to wait for D3.js to load, chart scripts to initialize,
/// and the container DOM element to exist before rendering.
pub fn render_bubble_chart(container_id: &str, layout_json: &str) {
    let id = js_str(container_id);
    let layout = js_str(layout_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (typeof window.renderBubbleChart !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window.renderBubbleChart({id}, JSON.parse({layout}));
                    }} catch(e) {{ console.error('[Climate] renderBubbleChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById({}); if (el) el.innerHTML = '';",
        js_str(container_id)
    ));
}

/// Client size of a DOM element, if it exists.
pub fn element_size(id: &str) -> Option<(f64, f64)> {
    let element = web_sys::window()?.document()?.get_element_by_id(id)?;
    Some((element.client_width() as f64, element.client_height() as f64))
}

/// Rust callbacks invoked from the D3 event listeners.
pub struct EventHandlers {
    /// Region name and page coordinates
    pub on_hover: Box<dyn FnMut(String, f64, f64)>,
    pub on_move: Box<dyn FnMut(f64, f64)>,
    /// Region name
    pub on_leave: Box<dyn FnMut(String)>,
    pub on_resize: Box<dyn FnMut()>,
}

/// Install `handlers` as `window.climateEvents`.
///
/// The closures are leaked; call once per page.
pub fn register_event_handlers(handlers: EventHandlers) {
    let events = js_sys::Object::new();

    let hover = Closure::wrap(handlers.on_hover);
    let moved = Closure::wrap(handlers.on_move);
    let leave = Closure::wrap(handlers.on_leave);
    let resize = Closure::wrap(handlers.on_resize);

    let entries: [(&str, &JsValue); 4] = [
        ("hover", hover.as_ref()),
        ("move", moved.as_ref()),
        ("leave", leave.as_ref()),
        ("resize", resize.as_ref()),
    ];
    for (name, callback) in entries {
        if js_sys::Reflect::set(&events, &JsValue::from_str(name), callback).is_err() {
            log::error!("[Climate] js_bridge: failed to register '{}' handler", name);
        }
    }
    if js_sys::Reflect::set(&js_sys::global(), &JsValue::from_str("climateEvents"), &events).is_err() {
        log::error!("[Climate] js_bridge: failed to install window.climateEvents");
    }

    hover.forget();
    moved.forget();
    leave.forget();
    resize.forget();
}
