//! Map and chart configuration.
//!
//! Every field has a default matching the bundled data files, so a config
//! file only needs the keys it overrides:
//!
//! ```json
//! { "defaultAttribute": "Precipitation", "excludedRegions": ["Alaska"] }
//! ```

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::bar_chart::ChartPadding;
use crate::color::Rgb;
use crate::dataset::DEFAULT_KEY_COLUMN;
use crate::error::ConfigError;
use crate::layout::ProjectionConfig;
use crate::topology::DEFAULT_NAME_PROPERTY;

/// Number of quantile classes on the map and chart.
pub const COLOR_CLASSES: usize = 5;

/// Default quantile colors, lightest to darkest.
pub const DEFAULT_COLORS: [&str; COLOR_CLASSES] =
    ["#D4B9DA", "#C994C7", "#DF65B0", "#DD1C77", "#980043"];

/// Fill for regions and bars without a value.
pub const DEFAULT_FALLBACK_COLOR: &str = "#ccc";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// Climate CSV, one row per state
    pub dataset_path: String,
    pub states_path: String,
    pub countries_path: String,
    /// Object collection holding the states in `states_path`
    pub states_object: String,
    pub countries_object: String,
    /// Dataset column holding the region name
    pub key_column: String,
    /// Geometry property holding the region name
    pub name_property: String,
    /// Regions dropped before fitting and drawing
    pub excluded_regions: Vec<String>,
    pub default_attribute: Attribute,
    pub colors: Vec<String>,
    pub fallback_color: String,
    /// Share of the container the states fill after fitting
    pub fit_margin: f64,
    pub chart_padding: ChartPadding,
    /// Duration of the in-place fill transition, in milliseconds
    pub transition_ms: u32,
    pub projection: ProjectionConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            dataset_path: "data/climate-data.csv".to_string(),
            states_path: "data/us-states.topojson".to_string(),
            countries_path: "data/countries.topojson".to_string(),
            states_object: "cb_2018_us_state_20m".to_string(),
            countries_object: "ne_10m_admin_0_countries".to_string(),
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            name_property: DEFAULT_NAME_PROPERTY.to_string(),
            excluded_regions: vec!["Alaska".to_string(), "Hawaii".to_string()],
            default_attribute: Attribute::default(),
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
            fit_margin: 0.95,
            chart_padding: ChartPadding::default(),
            transition_ms: 1000,
            projection: ProjectionConfig::default(),
        }
    }
}

impl MapConfig {
    /// Parse and validate a JSON config, filling unspecified keys with defaults.
    pub fn from_json(text: &str) -> Result<MapConfig, Box<dyn std::error::Error + Send + Sync>> {
        let config: MapConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors.len() != COLOR_CLASSES {
            return Err(ConfigError::ColorCount {
                expected: COLOR_CLASSES,
                found: self.colors.len(),
            });
        }
        for color in self.colors.iter().chain(std::iter::once(&self.fallback_color)) {
            Rgb::from_hex(color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.colors.len(), 5);
        assert_eq!(config.default_attribute, Attribute::AverageTemp);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MapConfig::from_json(
            r#"{ "defaultAttribute": "Precipitation", "excludedRegions": ["Alaska"] }"#,
        )
        .unwrap();
        assert_eq!(config.default_attribute, Attribute::Precipitation);
        assert_eq!(config.excluded_regions, vec!["Alaska".to_string()]);
        assert_eq!(config.key_column, "State");
        assert_eq!(config.chart_padding, ChartPadding::default());
    }

    #[test]
    fn test_rejects_wrong_color_count() {
        let err = MapConfig::from_json(r##"{ "colors": ["#fff", "#000"] }"##).unwrap_err();
        assert!(err.to_string().contains("expected 5 colors"));
    }

    #[test]
    fn test_rejects_invalid_color() {
        let config = MapConfig {
            fallback_color: "grey".to_string(),
            ..MapConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidColor("grey".to_string()))
        );
    }
}
