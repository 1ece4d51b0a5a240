//! Layout of the city population bubble chart.
//!
//! Bubbles are spread evenly along x by index, placed on y by population,
//! sized by area and colored on a light-to-dark orange ramp.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::color::Rgb;
use crate::error::LoadError;
use crate::scale::{ColorScale, LinearColorScale, LinearScale};

/// Embedded CSV of the Wisconsin cities shown in the chart.
pub static CITY_POPULATION_CSV: &str = include_str!("../../fixtures/city-populations.csv");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPopulation {
    pub city: String,
    pub population: u64,
}

/// Parse a `city,population` CSV (with headers).
pub fn parse_city_csv(csv_data: &str) -> Result<Vec<CityPopulation>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());
    let cities = rdr
        .deserialize()
        .collect::<Result<Vec<CityPopulation>, csv::Error>>()?;
    Ok(cities)
}

/// The bundled city list.
pub fn default_cities() -> Result<Vec<CityPopulation>, LoadError> {
    parse_city_csv(CITY_POPULATION_CSV)
}

/// Fixed geometry of the bubble chart canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BubbleChartConfig {
    pub width: f64,
    pub height: f64,
    /// Inner rectangle as `[x, y, width, height]`
    pub inner_rect: [f64; 4],
    pub x_range: [f64; 2],
    pub y_domain: [f64; 2],
    pub y_range: [f64; 2],
    /// People per unit of circle area
    pub area_factor: f64,
    pub color_from: String,
    pub color_to: String,
    pub title: String,
}

impl Default for BubbleChartConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 500.0,
            inner_rect: [50.0, 50.0, 800.0, 400.0],
            x_range: [90.0, 750.0],
            y_domain: [0.0, 700_000.0],
            y_range: [450.0, 50.0],
            area_factor: 0.01,
            color_from: "#FDBE85".to_string(),
            color_to: "#D94701".to_string(),
            title: "City Populations".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bubble {
    pub city: String,
    pub population: u64,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    pub label_x: f64,
    pub label_y: f64,
    pub population_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleChartLayout {
    pub width: f64,
    pub height: f64,
    pub inner_rect: [f64; 4],
    pub title: String,
    /// x of the left axis, with its domain and range for `d3.axisLeft`
    pub axis_x: f64,
    pub y_domain: [f64; 2],
    pub y_range: [f64; 2],
    pub bubbles: Vec<Bubble>,
}

/// Circle radius for a population, area proportional to population.
pub fn bubble_radius(population: u64, area_factor: f64) -> f64 {
    (population as f64 * area_factor / PI).sqrt()
}

/// Group digits by thousands: `594833` -> `"594,833"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn layout_bubble_chart(
    cities: &[CityPopulation],
    config: &BubbleChartConfig,
) -> Result<BubbleChartLayout, crate::error::ConfigError> {
    let from = Rgb::from_hex(&config.color_from)?;
    let to = Rgb::from_hex(&config.color_to)?;

    let min = cities.iter().map(|c| c.population).min().unwrap_or(0) as f64;
    let max = cities.iter().map(|c| c.population).max().unwrap_or(0) as f64;

    let last_index = cities.len().saturating_sub(1) as f64;
    let x = LinearScale::new((0.0, last_index), (config.x_range[0], config.x_range[1]));
    let y = LinearScale::new(
        (config.y_domain[0], config.y_domain[1]),
        (config.y_range[0], config.y_range[1]),
    );
    let color = LinearColorScale::new((min, max), from, to);

    let bubbles = cities
        .iter()
        .enumerate()
        .map(|(i, city)| {
            let cx = x.scale(i as f64);
            let cy = y.scale(city.population as f64);
            let r = bubble_radius(city.population, config.area_factor);
            Bubble {
                city: city.city.clone(),
                population: city.population,
                cx,
                cy,
                r,
                fill: color
                    .color(city.population as f64)
                    .unwrap_or_else(|| config.color_from.clone()),
                label_x: cx + r + 5.0,
                label_y: cy + 5.0,
                population_label: format!("Pop. {}", format_thousands(city.population)),
            }
        })
        .collect();

    Ok(BubbleChartLayout {
        width: config.width,
        height: config.height,
        inner_rect: config.inner_rect,
        title: config.title.clone(),
        axis_x: config.inner_rect[0],
        y_domain: config.y_domain,
        y_range: config.y_range,
        bubbles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cities() {
        let cities = default_cities().unwrap();
        assert_eq!(cities.len(), 4);
        assert_eq!(cities[0].city, "Madison");
        assert_eq!(cities[1].population, 594833);
        assert_eq!(cities[2].city, "Green Bay");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(27244), "27,244");
        assert_eq!(format_thousands(594833), "594,833");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_layout_positions() {
        let cities = default_cities().unwrap();
        let layout = layout_bubble_chart(&cities, &BubbleChartConfig::default()).unwrap();
        let expected = [90.0, 310.0, 530.0, 750.0];
        for (bubble, x) in layout.bubbles.iter().zip(expected) {
            assert!((bubble.cx - x).abs() < 1e-9, "{} at {}", bubble.city, bubble.cx);
        }

        let madison = &layout.bubbles[0];
        assert!((madison.cy - (450.0 - 400.0 * 233209.0 / 700000.0)).abs() < 1e-9);
        assert!((madison.r - (2332.09 / PI).sqrt()).abs() < 1e-9);
        assert!((madison.label_x - (90.0 + madison.r + 5.0)).abs() < 1e-9);
        assert_eq!(madison.population_label, "Pop. 233,209");
    }

    #[test]
    fn test_layout_colors_span_ramp() {
        let cities = default_cities().unwrap();
        let layout = layout_bubble_chart(&cities, &BubbleChartConfig::default()).unwrap();
        let superior = layout.bubbles.iter().find(|b| b.city == "Superior").unwrap();
        let milwaukee = layout.bubbles.iter().find(|b| b.city == "Milwaukee").unwrap();
        assert_eq!(superior.fill, "rgb(253, 190, 133)");
        assert_eq!(milwaukee.fill, "rgb(217, 71, 1)");
    }

    #[test]
    fn test_layout_rejects_bad_color() {
        let config = BubbleChartConfig {
            color_to: "orange".to_string(),
            ..BubbleChartConfig::default()
        };
        assert!(layout_bubble_chart(&[], &config).is_err());
    }
}
