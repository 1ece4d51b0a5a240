//! Join report and quantile class breaks per attribute.

use climate_data::attribute::Attribute;
use climate_data::config::MapConfig;
use climate_data::dashboard::build_color_scale;
use climate_data::dataset::DatasetRow;
use climate_data::interaction::format_value;
use climate_data::region::{join_rows, JoinReport};
use log::info;

use crate::load::load_inputs;

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSummary {
    pub attribute: Attribute,
    /// Number of finite values in the scale domain
    pub values: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub thresholds: Vec<f64>,
    /// Color and domain count of each class, lowest first
    pub classes: Vec<(String, usize)>,
}

pub fn summarize(rows: &[DatasetRow], attribute: Attribute, colors: &[String]) -> AttributeSummary {
    let scale = build_color_scale(rows, attribute, colors);
    let domain = scale.domain();
    AttributeSummary {
        attribute,
        values: domain.len(),
        min: domain.first().copied(),
        max: domain.last().copied(),
        thresholds: scale.thresholds().to_vec(),
        classes: scale
            .range()
            .iter()
            .cloned()
            .zip(scale.class_counts())
            .collect(),
    }
}

pub fn format_summary(summary: &AttributeSummary) -> String {
    let mut out = format!(
        "{}: {} values, min {}, max {}\n",
        summary.attribute,
        summary.values,
        format_value(summary.min),
        format_value(summary.max)
    );
    if summary.values == 0 {
        out.push_str("  no numeric values, every region uses the fallback color\n");
        return out;
    }
    for (i, (color, count)) in summary.classes.iter().enumerate() {
        let lower = if i == 0 { summary.min } else { summary.thresholds.get(i - 1).copied() };
        out.push_str(&format!(
            "  {} from {:>8}  {} values\n",
            color,
            format_value(lower),
            count
        ));
    }
    out
}

pub fn format_join_report(report: &JoinReport, regions: usize) -> String {
    let mut out = format!("Joined {} of {} regions\n", report.matched_regions, regions);
    if !report.unmatched_regions.is_empty() {
        out.push_str(&format!("  regions without data: {}\n", report.unmatched_regions.join(", ")));
    }
    if !report.unmatched_rows.is_empty() {
        out.push_str(&format!("  rows without a region: {}\n", report.unmatched_rows.join(", ")));
    }
    out
}

pub async fn run_summary(config: &MapConfig, attribute: Option<Attribute>) -> anyhow::Result<()> {
    let inputs = load_inputs(config).await?;
    let mut parsed = inputs.parse(config)?;
    join_rows(&mut parsed.regions, &parsed.rows);
    info!(
        "Parsed {} rows, {} regions, {} countries",
        parsed.rows.len(),
        parsed.regions.len(),
        parsed.country_count
    );

    let report = JoinReport::new(&parsed.regions, &parsed.rows);
    print!("{}", format_join_report(&report, parsed.regions.len()));

    let attributes: Vec<Attribute> = match attribute {
        Some(attribute) => vec![attribute],
        None => Attribute::ALL.to_vec(),
    };
    for attribute in attributes {
        print!("{}", format_summary(&summarize(&parsed.rows, attribute, &config.colors)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_config;
    use climate_data::dataset::parse_dataset_csv;

    fn fixture_rows() -> Vec<DatasetRow> {
        let text = std::fs::read_to_string(fixture_config().dataset_path).unwrap();
        parse_dataset_csv(&text, "State").unwrap()
    }

    #[test]
    fn test_summary_classes_cover_domain() {
        let config = MapConfig::default();
        let summary = summarize(&fixture_rows(), Attribute::AverageTemp, &config.colors);
        assert_eq!(summary.values, 11);
        assert_eq!(summary.min, Some(26.6));
        assert_eq!(summary.max, Some(77.0));
        assert_eq!(summary.thresholds.len(), 4);
        let expected = [43.1, 45.4, 50.7, 64.8];
        for (t, e) in summary.thresholds.iter().zip(expected) {
            assert!((t - e).abs() < 1e-9, "threshold {} != {}", t, e);
        }
        let counts: Vec<usize> = summary.classes.iter().map(|(_, n)| *n).collect();
        assert_eq!(counts.iter().sum::<usize>(), 11);
        assert_eq!(summary.classes[0].0, "#D4B9DA");
    }

    #[test]
    fn test_summary_skips_blank_cells() {
        let config = MapConfig::default();
        let summary = summarize(&fixture_rows(), Attribute::PalmerDroughtSeverityIndex, &config.colors);
        // Ohio has no drought index
        assert_eq!(summary.values, 10);
        assert_eq!(summary.min, Some(-2.1));
    }

    #[test]
    fn test_format_empty_summary() {
        let summary = summarize(&[], Attribute::MaxTemp, &MapConfig::default().colors);
        let text = format_summary(&summary);
        assert!(text.starts_with("Max Temp: 0 values, min No data"));
        assert!(text.contains("fallback color"));
    }

    #[tokio::test]
    async fn test_run_summary_on_fixtures() {
        run_summary(&fixture_config(), Some(Attribute::Precipitation))
            .await
            .unwrap();
    }
}
