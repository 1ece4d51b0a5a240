//! Browser implementations of the dashboard's drawing seams.
//!
//! `WebSurface` forwards each drawing operation to the D3 functions loaded by
//! [`js_bridge::init_charts`]; `WebProjection` reads and fits the projection
//! held on the JS side by `prepareClimateMap`.

use climate_data::bar_chart::BarChartEncoding;
use climate_data::choropleth::ChoroplethEncoding;
use climate_data::config::MapConfig;
use climate_data::dashboard::RenderSurface;
use climate_data::interaction::Tooltip;
use climate_data::layout::{Bounds, Dimensions, FitTransform, Projection, ProjectionConfig};
use climate_data::region::Region;
use serde::Serialize;

use crate::js_bridge;

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("[Climate] surface: serialization failed: {}", e);
        "null".to_string()
    })
}

/// What `prepareClimateMap` needs to turn the topologies into shapes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSetup<'a> {
    pub states_object: &'a str,
    pub countries_object: &'a str,
    pub name_property: &'a str,
    pub fallback_color: &'a str,
    /// Regions left after exclusion; other features are not drawn
    pub region_names: Vec<&'a str>,
    pub projection: &'a ProjectionConfig,
}

impl<'a> MapSetup<'a> {
    pub fn new(config: &'a MapConfig, regions: &'a [Region]) -> Self {
        Self {
            states_object: &config.states_object,
            countries_object: &config.countries_object,
            name_property: &config.name_property,
            fallback_color: &config.fallback_color,
            region_names: regions.iter().map(|r| r.name()).collect(),
            projection: &config.projection,
        }
    }
}

/// Hand both topologies to the JS side; must run before the dashboard is built.
pub fn prepare_map(map_id: &str, states_json: &str, countries_json: &str, setup: &MapSetup<'_>) {
    js_bridge::prepare_map(map_id, states_json, countries_json, &to_json(setup));
}

/// Current client size of a container, or `fallback` if it is missing or collapsed.
pub fn container_dimensions(id: &str, fallback: Dimensions) -> Dimensions {
    match js_bridge::element_size(id) {
        Some((width, height)) if width > 0.0 && height > 0.0 => Dimensions::new(width, height),
        _ => fallback,
    }
}

pub struct WebSurface {
    map_id: String,
    chart_id: String,
    transition_ms: u32,
}

impl WebSurface {
    pub fn new(map_id: &str, chart_id: &str, transition_ms: u32) -> Self {
        Self {
            map_id: map_id.to_string(),
            chart_id: chart_id.to_string(),
            transition_ms,
        }
    }
}

impl RenderSurface for WebSurface {
    fn draw_map(&mut self, map: &ChoroplethEncoding, fit: Option<FitTransform>) {
        if fit.is_none() {
            log::warn!("[Climate] surface: drawing map without a fitted projection");
        }
        js_bridge::draw_map(&self.map_id, &to_json(map));
    }

    fn update_map_fills(&mut self, map: &ChoroplethEncoding) {
        js_bridge::update_map_fills(&self.map_id, &to_json(map), self.transition_ms);
    }

    fn draw_bars(&mut self, chart: &BarChartEncoding) {
        js_bridge::render_bar_chart(&self.chart_id, &to_json(chart));
    }

    fn set_highlight(&mut self, class_key: &str, highlighted: bool) {
        js_bridge::set_highlight(class_key, highlighted);
    }

    fn show_tooltip(&mut self, tooltip: &Tooltip) {
        js_bridge::show_tooltip(&to_json(tooltip));
    }

    fn move_tooltip(&mut self, left: f64, top: f64) {
        js_bridge::move_tooltip(left, top);
    }

    fn hide_tooltip(&mut self) {
        js_bridge::hide_tooltip();
    }

    fn reproject(&mut self, _fit: FitTransform) {
        js_bridge::reproject_map(&self.map_id);
    }
}

/// The conic equal-area projection living in the page.
pub struct WebProjection {
    map_id: String,
}

impl WebProjection {
    pub fn new(map_id: &str) -> Self {
        Self {
            map_id: map_id.to_string(),
        }
    }
}

impl Projection for WebProjection {
    fn unit_bounds(&self) -> Option<Bounds> {
        js_bridge::map_unit_bounds(&self.map_id).map(Bounds::from_corners)
    }

    fn apply_fit(&mut self, fit: FitTransform) {
        js_bridge::apply_fit(&self.map_id, &to_json(&fit));
    }
}
