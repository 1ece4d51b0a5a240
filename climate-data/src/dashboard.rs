//! Selection-driven controller keeping the choropleth and the bar chart in sync.
//!
//! The host (browser bridge, CLI or tests) owns the event loop and forwards
//! user events to the `on_*` handlers. Each handler runs to completion and
//! pushes its result to the [`RenderSurface`].
//!
//! On every selection change the color scale is rebuilt first, then the map
//! fills are updated in place and the bars are rebuilt, once each.

use crate::attribute::Attribute;
use crate::bar_chart::{encode_bar_chart, BarChartEncoding};
use crate::choropleth::{encode_choropleth, ChoroplethEncoding};
use crate::config::MapConfig;
use crate::dataset::{attribute_values, DatasetRow};
use crate::interaction::{Pointer, Tooltip};
use crate::layout::{Dimensions, FitTransform, Projection};
use crate::region::{class_key, join_rows, JoinReport, Region};
use crate::scale::QuantileScale;
use crate::selection::Selection;

/// Drawing operations the dashboard needs from its host.
pub trait RenderSurface {
    /// Create the region shapes with their initial fills.
    fn draw_map(&mut self, map: &ChoroplethEncoding, fit: Option<FitTransform>);

    /// Recolor the existing region shapes.
    fn update_map_fills(&mut self, map: &ChoroplethEncoding);

    /// Discard all bars and draw `chart` from scratch.
    fn draw_bars(&mut self, chart: &BarChartEncoding);

    /// Toggle the highlight on every element carrying `class_key`, in both views.
    fn set_highlight(&mut self, class_key: &str, highlighted: bool);

    fn show_tooltip(&mut self, tooltip: &Tooltip);

    fn move_tooltip(&mut self, left: f64, top: f64);

    fn hide_tooltip(&mut self);

    /// Re-project the existing map shapes with a new fit.
    fn reproject(&mut self, fit: FitTransform);
}

/// Color scale for `attribute` built from every row's finite value.
pub fn build_color_scale(rows: &[DatasetRow], attribute: Attribute, colors: &[String]) -> QuantileScale {
    QuantileScale::new(attribute_values(rows, attribute), colors.to_vec())
}

pub struct Dashboard<S, P> {
    config: MapConfig,
    regions: Vec<Region>,
    rows: Vec<DatasetRow>,
    selection: Selection,
    scale: QuantileScale,
    scale_builds: u64,
    map_size: Dimensions,
    chart_size: Dimensions,
    hovered: Option<(String, Pointer)>,
    surface: S,
    projection: P,
}

impl<S: RenderSurface, P: Projection> Dashboard<S, P> {
    /// Join `rows` onto `regions`, build the scale for the configured default
    /// attribute and draw both views.
    pub fn new(
        config: MapConfig,
        mut regions: Vec<Region>,
        rows: Vec<DatasetRow>,
        surface: S,
        projection: P,
        map_size: Dimensions,
        chart_size: Dimensions,
    ) -> Self {
        join_rows(&mut regions, &rows);
        let report = JoinReport::new(&regions, &rows);
        log::info!(
            "[Climate] dashboard: joined {} of {} regions, {} rows unmatched",
            report.matched_regions,
            regions.len(),
            report.unmatched_rows.len()
        );
        log::debug!("[Climate] dashboard: regions without data: {:?}", report.unmatched_regions);

        let selection = Selection::new(config.default_attribute);
        let scale = build_color_scale(&rows, selection.attribute(), &config.colors);

        let mut dashboard = Self {
            config,
            regions,
            rows,
            selection,
            scale,
            scale_builds: 1,
            map_size,
            chart_size,
            hovered: None,
            surface,
            projection,
        };

        let fit = dashboard.fit_projection();
        let map = dashboard.map_encoding();
        dashboard.surface.draw_map(&map, fit);
        let chart = dashboard.chart_encoding();
        dashboard.surface.draw_bars(&chart);
        dashboard
    }

    /// Replace the selected attribute, rebuild the scale, then redraw both views.
    pub fn on_select(&mut self, attribute: Attribute) {
        let previous = self.selection.select(attribute);
        log::info!("[Climate] dashboard: selection {} -> {}", previous, attribute);

        self.scale = build_color_scale(&self.rows, attribute, &self.config.colors);
        self.scale_builds += 1;
        if self.scale.is_empty() {
            log::warn!("[Climate] dashboard: no numeric values for '{}'", attribute);
        }

        let map = self.map_encoding();
        self.surface.update_map_fills(&map);
        let chart = self.chart_encoding();
        self.surface.draw_bars(&chart);

        // An open tooltip still shows the previous attribute's value.
        if let Some((name, pointer)) = &self.hovered {
            let tooltip = self.tooltip(name, *pointer);
            self.surface.show_tooltip(&tooltip);
        }
    }

    /// Pointer entered an element of region `name` (map shape or bar).
    pub fn on_hover(&mut self, name: &str, pointer: Pointer) {
        if let Some((previous, _)) = self.hovered.take() {
            if previous != name {
                self.surface.set_highlight(&class_key(&previous), false);
            }
        }
        self.surface.set_highlight(&class_key(name), true);
        let tooltip = self.tooltip(name, pointer);
        self.surface.show_tooltip(&tooltip);
        self.hovered = Some((name.to_string(), pointer));
    }

    pub fn on_pointer_move(&mut self, pointer: Pointer) {
        if let Some((_, last)) = self.hovered.as_mut() {
            *last = pointer;
            let (left, top) = pointer.tooltip_position();
            self.surface.move_tooltip(left, top);
        }
    }

    /// Pointer left an element of region `name`.
    pub fn on_leave(&mut self, name: &str) {
        self.surface.set_highlight(&class_key(name), false);
        self.surface.hide_tooltip();
        if self.hovered.as_ref().is_some_and(|(hovered, _)| hovered == name) {
            self.hovered = None;
        }
    }

    /// Containers changed size: refit the projection and lay the bars out again.
    pub fn on_resize(&mut self, map_size: Dimensions, chart_size: Dimensions) {
        self.map_size = map_size;
        self.chart_size = chart_size;
        if let Some(fit) = self.fit_projection() {
            self.surface.reproject(fit);
        }
        let chart = self.chart_encoding();
        self.surface.draw_bars(&chart);
    }

    pub fn map_encoding(&self) -> ChoroplethEncoding {
        encode_choropleth(
            &self.regions,
            &self.scale,
            &self.selection,
            &self.config.fallback_color,
        )
    }

    pub fn chart_encoding(&self) -> BarChartEncoding {
        encode_bar_chart(
            &self.rows,
            &self.scale,
            &self.selection,
            self.chart_size,
            self.config.chart_padding,
            &self.config.fallback_color,
        )
    }

    /// Selected value for `name`, preferring the joined region over the raw row.
    pub fn value_of(&self, name: &str) -> Option<f64> {
        let attribute = self.selection.attribute();
        self.regions
            .iter()
            .find(|r| r.name() == name)
            .and_then(|r| r.defined_value(attribute))
            .or_else(|| {
                self.rows
                    .iter()
                    .find(|r| r.key() == name)
                    .and_then(|r| r.defined_value(attribute))
            })
    }

    fn tooltip(&self, name: &str, pointer: Pointer) -> Tooltip {
        Tooltip::new(name, self.selection.attribute(), self.value_of(name), pointer)
    }

    /// Name of the region under the pointer, if any.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_ref().map(|(name, _)| name.as_str())
    }

    fn fit_projection(&mut self) -> Option<FitTransform> {
        let bounds = self.projection.unit_bounds()?;
        let fit = FitTransform::fit(bounds, self.map_size, self.config.fit_margin)?;
        self.projection.apply_fit(fit);
        Some(fit)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn scale(&self) -> &QuantileScale {
        &self.scale
    }

    /// How many times the color scale has been built, initial build included.
    pub fn scale_builds(&self) -> u64 {
        self.scale_builds
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }
}
