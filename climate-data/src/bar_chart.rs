//! Bar chart of the dataset rows, sorted by the selected attribute.
//!
//! Bars share the map's quantile scale so a state has the same color in both
//! views. The whole set of bars is rebuilt on every selection change.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::attribute::Attribute;
use crate::dataset::DatasetRow;
use crate::layout::Dimensions;
use crate::region::class_key;
use crate::scale::{BandScale, ColorScale, LinearScale};
use crate::selection::Selection;

/// Inner padding between bars, as a share of the band step.
pub const BAR_PADDING: f64 = 0.1;

/// Space kept free around the bars for the title and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for ChartPadding {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 10.0,
            bottom: 50.0,
            left: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub name: String,
    pub class_key: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartEncoding {
    pub attribute: Attribute,
    pub title: String,
    pub width: f64,
    pub height: f64,
    /// Vertical position of the zero line
    pub baseline: f64,
    pub bars: Vec<Bar>,
}

/// Chart title for an attribute.
pub fn chart_title(attribute: Attribute) -> String {
    format!("{} by State", attribute)
}

/// Rows ordered by descending value of `attribute`; rows without a value go last.
pub fn sort_rows_descending(rows: &[DatasetRow], attribute: Attribute) -> Vec<&DatasetRow> {
    let mut sorted: Vec<&DatasetRow> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        match (a.defined_value(attribute), b.defined_value(attribute)) {
            (Some(va), Some(vb)) => vb.total_cmp(&va),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    sorted
}

pub fn encode_bar_chart(
    rows: &[DatasetRow],
    scale: &dyn ColorScale,
    selection: &Selection,
    size: Dimensions,
    padding: ChartPadding,
    fallback: &str,
) -> BarChartEncoding {
    let attribute = selection.attribute();
    let sorted = sort_rows_descending(rows, attribute);

    let x = BandScale::new(
        sorted.len(),
        (padding.left, size.width - padding.right),
        BAR_PADDING,
    );

    // The zero line stays in the domain so negative values hang below it.
    let (lo, hi) = sorted
        .iter()
        .filter_map(|row| row.defined_value(attribute))
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let y = LinearScale::new((lo, hi), (size.height - padding.bottom, padding.top));
    let baseline = y.scale(0.0);

    let bars = sorted
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let value = row.defined_value(attribute);
            let top = value.map_or(baseline, |v| y.scale(v));
            Bar {
                name: row.key().to_string(),
                class_key: class_key(row.key()),
                x: x.position(i).unwrap_or(padding.left),
                y: top.min(baseline),
                width: x.bandwidth(),
                height: (baseline - top).abs(),
                fill: value
                    .and_then(|v| scale.color(v))
                    .unwrap_or_else(|| fallback.to_string()),
                value,
            }
        })
        .collect();

    BarChartEncoding {
        attribute,
        title: chart_title(attribute),
        width: size.width,
        height: size.height,
        baseline,
        bars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_COLORS;
    use crate::dataset::attribute_values;
    use crate::scale::QuantileScale;

    fn rows() -> Vec<DatasetRow> {
        vec![
            DatasetRow::from_pairs("Wisconsin", [("Average Temp", "19.5"), ("Precipitation", "4.0")]),
            DatasetRow::from_pairs("Texas", [("Average Temp", "60.1"), ("Precipitation", "1.0")]),
            DatasetRow::from_pairs("Ohio", [("Average Temp", "n/a"), ("Precipitation", "3.0")]),
            DatasetRow::from_pairs("New York", [("Average Temp", "25.3"), ("Precipitation", "2.0")]),
        ]
    }

    fn encode(rows: &[DatasetRow], attribute: Attribute) -> BarChartEncoding {
        let scale = QuantileScale::new(
            attribute_values(rows, attribute),
            DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        );
        encode_bar_chart(
            rows,
            &scale,
            &Selection::new(attribute),
            Dimensions::new(450.0, 300.0),
            ChartPadding::default(),
            "#ccc",
        )
    }

    #[test]
    fn test_sorted_descending_missing_last() {
        let rows = rows();
        let names: Vec<&str> = sort_rows_descending(&rows, Attribute::AverageTemp)
            .iter()
            .map(|r| r.key())
            .collect();
        assert_eq!(names, vec!["Texas", "New York", "Wisconsin", "Ohio"]);
    }

    #[test]
    fn test_heights_proportional_to_value() {
        let chart = encode(&rows(), Attribute::AverageTemp);
        // y range [250, 40], domain [0, 60.1]
        assert_eq!(chart.baseline, 250.0);
        let texas = &chart.bars[0];
        assert!((texas.height - 210.0).abs() < 1e-9);
        assert!((texas.y - 40.0).abs() < 1e-9);
        let ny = &chart.bars[1];
        assert!((ny.height - 210.0 * 25.3 / 60.1).abs() < 1e-9);
        assert!((ny.y + ny.height - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_value_has_no_height_and_fallback_fill() {
        let chart = encode(&rows(), Attribute::AverageTemp);
        let ohio = chart.bars.last().unwrap();
        assert_eq!(ohio.name, "Ohio");
        assert_eq!(ohio.height, 0.0);
        assert_eq!(ohio.fill, "#ccc");
        assert_eq!(ohio.value, None);
    }

    #[test]
    fn test_bars_span_chart_width() {
        let chart = encode(&rows(), Attribute::Precipitation);
        assert_eq!(chart.bars.len(), 4);
        let first = &chart.bars[0];
        let last = chart.bars.last().unwrap();
        assert!(first.x > 40.0);
        assert!(last.x + last.width < 440.0);
        assert!(chart.bars.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn test_resort_on_new_attribute() {
        let chart = encode(&rows(), Attribute::Precipitation);
        let names: Vec<&str> = chart.bars.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Wisconsin", "Ohio", "New York", "Texas"]);
        assert_eq!(chart.title, "Precipitation by State");
    }

    #[test]
    fn test_negative_values_hang_below_zero() {
        let rows = vec![
            DatasetRow::from_pairs("Dry", [("Palmer Drought Severity Index", "-2")]),
            DatasetRow::from_pairs("Wet", [("Palmer Drought Severity Index", "2")]),
        ];
        let chart = encode(&rows, Attribute::PalmerDroughtSeverityIndex);
        // domain [-2, 2] over [250, 40]: zero line in the middle
        assert!((chart.baseline - 145.0).abs() < 1e-9);
        let dry = &chart.bars[1];
        assert!((dry.y - 145.0).abs() < 1e-9);
        assert!((dry.height - 105.0).abs() < 1e-9);
        assert!(chart.bars.iter().all(|b| b.height >= 0.0));
    }

    #[test]
    fn test_bar_fills_match_scale() {
        let rows = rows();
        let chart = encode(&rows, Attribute::Precipitation);
        let scale = QuantileScale::new(
            attribute_values(&rows, Attribute::Precipitation),
            DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        );
        for bar in &chart.bars {
            assert_eq!(Some(bar.fill.clone()), scale.color(bar.value.unwrap()));
        }
    }
}
