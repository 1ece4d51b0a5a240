//! The three startup inputs and their parsing into regions and rows.
//!
//! Fetching is left to the host (HTTP in the browser, files or HTTP natively);
//! all three texts must be available before anything is parsed or drawn.

use crate::config::MapConfig;
use crate::dataset::{parse_dataset_csv, DatasetRow};
use crate::error::LoadError;
use crate::region::Region;
use crate::topology::Topology;

/// Raw text of the dataset and both topology files.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateInputs {
    pub dataset: String,
    pub states: String,
    pub countries: String,
}

/// Unjoined regions and dataset rows, ready for a dashboard.
#[derive(Debug, Clone)]
pub struct ParsedInputs {
    pub regions: Vec<Region>,
    pub rows: Vec<DatasetRow>,
    /// Number of country outlines declared in the countries topology
    pub country_count: usize,
}

impl ClimateInputs {
    /// Parse everything; any failure rejects the whole set.
    pub fn parse(&self, config: &MapConfig) -> Result<ParsedInputs, LoadError> {
        let rows = parse_dataset_csv(&self.dataset, &config.key_column)?;

        let states = Topology::parse(&self.states)?;
        let regions = states.regions(
            &config.states_object,
            &config.name_property,
            &config.excluded_regions,
        )?;

        let countries = Topology::parse(&self.countries)?;
        let country_count = countries.object(&config.countries_object)?.geometries.len();

        Ok(ParsedInputs {
            regions,
            rows,
            country_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> ClimateInputs {
        ClimateInputs {
            dataset: "State,Average Temp\nWisconsin,19.5\nAlaska,-3.0\n".to_string(),
            states: r#"{"type":"Topology","objects":{"cb_2018_us_state_20m":{"type":"GeometryCollection","geometries":[
                {"type":"Polygon","arcs":[],"properties":{"NAME":"Wisconsin"}},
                {"type":"Polygon","arcs":[],"properties":{"NAME":"Alaska"}},
                {"type":"Polygon","arcs":[],"properties":{"NAME":"Illinois"}}]}}}"#
                .to_string(),
            countries: r#"{"type":"Topology","objects":{"ne_10m_admin_0_countries":{"type":"GeometryCollection","geometries":[
                {"type":"Polygon","arcs":[],"properties":{"NAME":"Canada"}}]}}}"#
                .to_string(),
        }
    }

    #[test]
    fn test_parse_all_inputs() {
        let parsed = inputs().parse(&MapConfig::default()).unwrap();
        let names: Vec<&str> = parsed.regions.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Wisconsin", "Illinois"]);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.country_count, 1);
    }

    #[test]
    fn test_any_failure_rejects_everything() {
        let mut bad = inputs();
        bad.countries = r#"{"type":"Topology","objects":{}}"#.to_string();
        let err = bad.parse(&MapConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingObject(_)));

        let mut bad = inputs();
        bad.dataset = "Name,Average Temp\nOhio,1\n".to_string();
        assert!(matches!(
            bad.parse(&MapConfig::default()).unwrap_err(),
            LoadError::MissingKeyColumn(_)
        ));
    }
}
