//! Fill colors of the map regions for the selected attribute.

use serde::Serialize;

use crate::attribute::Attribute;
use crate::region::Region;
use crate::scale::ColorScale;
use crate::selection::Selection;

/// Fill of one region shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionFill {
    pub name: String,
    pub class_key: String,
    pub fill: String,
    pub value: Option<f64>,
}

/// Visual encoding of the whole map for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethEncoding {
    pub attribute: Attribute,
    pub regions: Vec<RegionFill>,
}

impl ChoroplethEncoding {
    pub fn fill_of(&self, name: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.fill.as_str())
    }
}

/// Scale color of the region's selected value, or `fallback` when the value
/// is unset or not a number.
pub fn region_fill(
    region: &Region,
    scale: &dyn ColorScale,
    attribute: Attribute,
    fallback: &str,
) -> String {
    region
        .defined_value(attribute)
        .and_then(|v| scale.color(v))
        .unwrap_or_else(|| fallback.to_string())
}

pub fn encode_choropleth(
    regions: &[Region],
    scale: &dyn ColorScale,
    selection: &Selection,
    fallback: &str,
) -> ChoroplethEncoding {
    let attribute = selection.attribute();
    ChoroplethEncoding {
        attribute,
        regions: regions
            .iter()
            .map(|region| RegionFill {
                name: region.name().to_string(),
                class_key: region.class_key(),
                fill: region_fill(region, scale, attribute, fallback),
                value: region.defined_value(attribute),
            })
            .collect(),
    }
}
