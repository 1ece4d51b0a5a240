//! Export of the map fills and bar chart layout as a JSON document.
//!
//! The dashboard drives a surface that only records what it was asked to
//! draw, so the output matches what the browser would render.

use anyhow::Context;
use climate_data::attribute::Attribute;
use climate_data::bar_chart::BarChartEncoding;
use climate_data::choropleth::ChoroplethEncoding;
use climate_data::config::MapConfig;
use climate_data::dashboard::{Dashboard, RenderSurface};
use climate_data::inputs::ParsedInputs;
use climate_data::interaction::Tooltip;
use climate_data::layout::{Bounds, Dimensions, FitTransform, Projection};
use climate_data::region::JoinReport;
use log::{debug, info};
use serde::Serialize;

use crate::load::load_inputs;

/// Keeps the latest map and chart the dashboard drew.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub map: Option<ChoroplethEncoding>,
    pub chart: Option<BarChartEncoding>,
    pub fit: Option<FitTransform>,
}

impl RenderSurface for RecordingSurface {
    fn draw_map(&mut self, map: &ChoroplethEncoding, fit: Option<FitTransform>) {
        self.map = Some(map.clone());
        self.fit = fit;
    }

    fn update_map_fills(&mut self, map: &ChoroplethEncoding) {
        self.map = Some(map.clone());
    }

    fn draw_bars(&mut self, chart: &BarChartEncoding) {
        self.chart = Some(chart.clone());
    }

    fn set_highlight(&mut self, class_key: &str, highlighted: bool) {
        debug!("highlight {} = {}", class_key, highlighted);
    }

    fn show_tooltip(&mut self, tooltip: &Tooltip) {
        debug!("tooltip {}: {}", tooltip.title, tooltip.value);
    }

    fn move_tooltip(&mut self, _left: f64, _top: f64) {}

    fn hide_tooltip(&mut self) {}

    fn reproject(&mut self, fit: FitTransform) {
        self.fit = Some(fit);
    }
}

/// No geometry is projected outside the browser.
pub struct Unprojected;

impl Projection for Unprojected {
    fn unit_bounds(&self) -> Option<Bounds> {
        None
    }

    fn apply_fit(&mut self, _fit: FitTransform) {}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingDocument {
    pub attribute: Attribute,
    pub class_breaks: Vec<f64>,
    pub colors: Vec<String>,
    pub join: JoinReport,
    pub map: ChoroplethEncoding,
    pub chart: BarChartEncoding,
}

/// Build the dashboard over `parsed` and collect what it draws for `attribute`.
pub fn encode_document(
    config: &MapConfig,
    parsed: ParsedInputs,
    attribute: Option<Attribute>,
    chart_size: Dimensions,
) -> anyhow::Result<EncodingDocument> {
    let mut dashboard = Dashboard::new(
        config.clone(),
        parsed.regions,
        parsed.rows,
        RecordingSurface::default(),
        Unprojected,
        chart_size,
        chart_size,
    );
    if let Some(attribute) = attribute {
        dashboard.on_select(attribute);
    }

    let surface = dashboard.surface();
    let map = surface.map.clone().context("map was never drawn")?;
    let chart = surface.chart.clone().context("bar chart was never drawn")?;
    Ok(EncodingDocument {
        attribute: dashboard.selection().attribute(),
        class_breaks: dashboard.scale().thresholds().to_vec(),
        colors: dashboard.scale().range().to_vec(),
        join: JoinReport::new(dashboard.regions(), dashboard.rows()),
        map,
        chart,
    })
}

pub async fn run_encode(
    config: &MapConfig,
    attribute: Option<Attribute>,
    output: Option<&str>,
    width: f64,
    height: f64,
) -> anyhow::Result<()> {
    let chart_size = Dimensions::new(width, height);
    if chart_size.is_empty() {
        anyhow::bail!("chart size must be positive, got {}x{}", width, height);
    }

    let inputs = load_inputs(config).await?;
    let parsed = inputs.parse(config)?;
    let document = encode_document(config, parsed, attribute, chart_size)?;
    let json = serde_json::to_string_pretty(&document)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &json)
                .await
                .with_context(|| format!("failed to write {}", path))?;
            info!(
                "Wrote {} regions and {} bars to {}",
                document.map.regions.len(),
                document.chart.bars.len(),
                path
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_config;

    async fn fixture_document(attribute: Option<Attribute>) -> EncodingDocument {
        let config = fixture_config();
        let parsed = load_inputs(&config).await.unwrap().parse(&config).unwrap();
        encode_document(&config, parsed, attribute, Dimensions::new(600.0, 300.0)).unwrap()
    }

    #[tokio::test]
    async fn test_encode_default_attribute() {
        let doc = fixture_document(None).await;
        assert_eq!(doc.attribute, Attribute::AverageTemp);
        assert_eq!(doc.class_breaks.len(), 4);
        // Alaska and Hawaii are filtered out of the map but stay in the chart
        assert_eq!(doc.map.regions.len(), 9);
        assert_eq!(doc.chart.bars.len(), 11);
        assert_eq!(doc.join.unmatched_regions, vec!["Vermont".to_string()]);
        assert_eq!(doc.join.unmatched_rows.len(), 3);
    }

    #[tokio::test]
    async fn test_map_and_bars_agree() {
        let doc = fixture_document(Some(Attribute::Precipitation)).await;
        assert_eq!(doc.chart.title, "Precipitation by State");
        for bar in &doc.chart.bars {
            if let Some(fill) = doc.map.fill_of(&bar.name) {
                assert_eq!(fill, bar.fill, "{}", bar.name);
            }
        }
        assert_eq!(doc.map.fill_of("Vermont"), Some("#ccc"));
    }

    #[tokio::test]
    async fn test_missing_value_uses_fallback() {
        let doc = fixture_document(Some(Attribute::PalmerDroughtSeverityIndex)).await;
        assert_eq!(doc.map.fill_of("Ohio"), Some("#ccc"));
        let ohio = doc.chart.bars.iter().find(|b| b.name == "Ohio").unwrap();
        assert_eq!(ohio.height, 0.0);
        assert_eq!(doc.chart.bars.last().map(|b| b.name.as_str()), Some("Ohio"));
    }

    #[tokio::test]
    async fn test_run_encode_writes_file() {
        let path = std::env::temp_dir().join("climate-encode-test.json");
        let path_str = path.to_string_lossy().to_string();
        run_encode(&fixture_config(), None, Some(&path_str), 600.0, 300.0)
            .await
            .unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["attribute"], "Average Temp");
        assert_eq!(written["map"]["regions"].as_array().unwrap().len(), 9);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_run_encode_rejects_empty_chart() {
        assert!(run_encode(&fixture_config(), None, None, 0.0, 300.0).await.is_err());
    }
}
