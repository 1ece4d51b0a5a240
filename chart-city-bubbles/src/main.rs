//! City Populations
//!
//! Bubble chart of four Wisconsin cities: spread by index, placed and sized
//! by population. The city list is embedded at compile time; layout happens
//! in Rust and D3 only draws the result.

use climate_chart_ui::components::{ChartContainer, ErrorDisplay};
use climate_chart_ui::js_bridge;
use climate_chart_ui::state::AppState;
use climate_data::bubble::{default_cities, layout_bubble_chart, BubbleChartConfig};
use dioxus::prelude::*;

/// DOM id for the D3 chart container div.
const CHART_CONTAINER_ID: &str = "city-bubbles";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("city-bubbles-root"))
        .launch(App);
}

/// Lay out the bundled cities and hand them to D3. Returns the bubble count.
fn render_cities() -> Result<usize, Box<dyn std::error::Error>> {
    let cities = default_cities()?;
    let layout = layout_bubble_chart(&cities, &BubbleChartConfig::default())?;
    let layout_json = serde_json::to_string(&layout)?;
    js_bridge::render_bubble_chart(CHART_CONTAINER_ID, &layout_json);
    Ok(layout.bubbles.len())
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    use_effect(move || {
        js_bridge::init_charts();
        match render_cities() {
            Ok(count) => log::info!("[Climate] bubbles: laid out {} cities", count),
            Err(e) => {
                log::error!("[Climate] bubbles: {}", e);
                state.error_msg.set(Some(e.to_string()));
            }
        }
        state.loading.set(false);
    });

    rsx! {
        div {
            style: "max-width: 920px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay {
                    label: "Could not lay out the cities".to_string(),
                    message: err.clone(),
                }
            }

            ChartContainer {
                id: CHART_CONTAINER_ID.to_string(),
                loading: *state.loading.read(),
                height: 500,
            }
        }
    }
}
