//! US Climate Choropleth
//!
//! Shows one climate attribute per state as a quantile-classed choropleth next
//! to a sorted bar chart of the same values, colored by the same scale.
//!
//! Data flow:
//! 1. On mount: fetch the climate CSV and both TopoJSON files concurrently.
//! 2. Once all three have arrived and D3 is loaded: parse, join rows onto
//!    states, fit the projection and draw both views.
//! 3. On attribute change: rebuild the scale, transition the map fills and
//!    redraw the bars.
//! 4. Hover, pointer and resize events come back from D3 through
//!    `window.climateEvents`.

use std::cell::RefCell;
use std::rc::Rc;

use climate_chart_ui::components::{
    AttributeSelector, ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner,
};
use climate_chart_ui::js_bridge::{self, EventHandlers};
use climate_chart_ui::loader;
use climate_chart_ui::state::AppState;
use climate_chart_ui::surface::{self, container_dimensions, MapSetup, WebProjection, WebSurface};
use climate_data::attribute::Attribute;
use climate_data::config::MapConfig;
use climate_data::dashboard::Dashboard;
use climate_data::interaction::Pointer;
use climate_data::layout::Dimensions;
use dioxus::prelude::*;

/// DOM ids for the D3 containers.
const MAP_CONTAINER_ID: &str = "map-container";
const BAR_CHART_CONTAINER_ID: &str = "bar-chart-container";

const MAP_HEIGHT: u32 = 500;
const BAR_CHART_HEIGHT: u32 = 320;

type WebDashboard = Dashboard<WebSurface, WebProjection>;
type SharedDashboard = Rc<RefCell<Option<WebDashboard>>>;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("climate-map-root"))
        .launch(App);
}

fn current_sizes() -> (Dimensions, Dimensions) {
    let map = container_dimensions(
        MAP_CONTAINER_ID,
        Dimensions::new(960.0, f64::from(MAP_HEIGHT)),
    );
    let chart = container_dimensions(
        BAR_CHART_CONTAINER_ID,
        Dimensions::new(960.0, f64::from(BAR_CHART_HEIGHT)),
    );
    (map, chart)
}

/// Run `f` on the dashboard if it is built and not already borrowed.
fn with_dashboard(shared: &SharedDashboard, f: impl FnOnce(&mut WebDashboard)) {
    match shared.try_borrow_mut() {
        Ok(mut guard) => {
            if let Some(dashboard) = guard.as_mut() {
                f(dashboard);
            }
        }
        Err(_) => log::warn!("[Climate] map: dashboard busy, event dropped"),
    }
}

/// Fetch and parse every input, then draw both views.
///
/// Nothing is drawn unless all three inputs load and parse.
/// The three inputs fetched on mount.
fn input_sources() -> Vec<String> {
    let config = MapConfig::default();
    vec![config.dataset_path, config.states_path, config.countries_path]
}

async fn build_dashboard(config: MapConfig) -> anyhow::Result<WebDashboard> {
    config.validate()?;
    js_bridge::init_charts();

    let inputs = loader::load_inputs(&config).await?;
    js_bridge::wait_for_charts()
        .await
        .map_err(|e| anyhow::anyhow!("chart scripts failed to load: {:?}", e))?;
    if !js_bridge::topojson_available() {
        anyhow::bail!("topojson-client is not loaded");
    }

    let parsed = inputs.parse(&config)?;
    log::info!(
        "[Climate] map: {} regions, {} rows, {} countries",
        parsed.regions.len(),
        parsed.rows.len(),
        parsed.country_count
    );

    surface::prepare_map(
        MAP_CONTAINER_ID,
        &inputs.states,
        &inputs.countries,
        &MapSetup::new(&config, &parsed.regions),
    );

    let (map_size, chart_size) = current_sizes();
    let web_surface = WebSurface::new(MAP_CONTAINER_ID, BAR_CHART_CONTAINER_ID, config.transition_ms);
    Ok(Dashboard::new(
        config,
        parsed.regions,
        parsed.rows,
        web_surface,
        WebProjection::new(MAP_CONTAINER_ID),
        map_size,
        chart_size,
    ))
}

fn register_events(shared: &SharedDashboard) {
    let hover = shared.clone();
    let moved = shared.clone();
    let leave = shared.clone();
    let resize = shared.clone();

    js_bridge::register_event_handlers(EventHandlers {
        on_hover: Box::new(move |name: String, x: f64, y: f64| {
            with_dashboard(&hover, |d| d.on_hover(&name, Pointer::new(x, y)));
        }),
        on_move: Box::new(move |x: f64, y: f64| {
            with_dashboard(&moved, |d| d.on_pointer_move(Pointer::new(x, y)));
        }),
        on_leave: Box::new(move |name: String| {
            with_dashboard(&leave, |d| d.on_leave(&name));
        }),
        on_resize: Box::new(move || {
            let (map_size, chart_size) = current_sizes();
            with_dashboard(&resize, |d| d.on_resize(map_size, chart_size));
        }),
    });
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let dashboard: SharedDashboard = use_hook(|| Rc::new(RefCell::new(None)));

    // ─── Effect: load all inputs once on mount ───
    let loader_handle = dashboard.clone();
    use_effect(move || {
        let shared = loader_handle.clone();
        spawn(async move {
            match build_dashboard(MapConfig::default()).await {
                Ok(built) => {
                    state.selected_attribute.set(built.selection().attribute());
                    shared.replace(Some(built));
                    register_events(&shared);
                }
                Err(e) => {
                    log::error!("[Climate] map: {:#}", e);
                    js_bridge::destroy_chart(MAP_CONTAINER_ID);
                    js_bridge::destroy_chart(BAR_CHART_CONTAINER_ID);
                    state.error_msg.set(Some(format!("{:#}", e)));
                }
            }
            state.loading.set(false);
        });
    });

    let select_handle = dashboard.clone();
    let on_select = move |attribute: Attribute| {
        state.selected_attribute.set(attribute);
        with_dashboard(&select_handle, |d| d.on_select(attribute));
    };

    let loading = *state.loading.read();
    let failed = state.error_msg.read().is_some();

    // ─── Render ───
    // Containers stay mounted during loading so D3 can draw into them.
    rsx! {
        div {
            style: "max-width: 1000px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay {
                    label: "Could not load the climate data".to_string(),
                    message: err.clone(),
                }
            }

            ChartHeader {
                title: "US Climate by State".to_string(),
                subtitle: "Lower 48 states, classed into quantiles of the selected attribute".to_string(),
            }

            if loading {
                LoadingSpinner { pending: input_sources() }
            } else if !failed {
                AttributeSelector {
                    selected: (state.selected_attribute)(),
                    on_select: on_select,
                }
            }

            ChartContainer {
                id: MAP_CONTAINER_ID.to_string(),
                loading: loading,
                height: MAP_HEIGHT,
            }

            ChartContainer {
                id: BAR_CHART_CONTAINER_ID.to_string(),
                loading: loading,
                height: BAR_CHART_HEIGHT,
            }
        }
    }
}
