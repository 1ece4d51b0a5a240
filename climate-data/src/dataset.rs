//! Climate dataset rows parsed from CSV.
//!
//! # CSV Format
//!
//! Headers are required. One column holds the region key (`State` by default);
//! every other column is kept as a raw string and parsed on demand.
//!
//! ```text
//! State,Average Temp,Max Temp,Min Temp,Precipitation,Palmer Drought Severity Index
//! Wisconsin,19.5,28.1,10.9,1.52,-0.44
//! ```

use csv::ReaderBuilder;
use std::collections::BTreeMap;

use crate::attribute::Attribute;
use crate::error::LoadError;

/// Default name of the column that identifies the region of a row.
pub const DEFAULT_KEY_COLUMN: &str = "State";

/// One row of the climate dataset, keyed by region name.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    key: String,
    cells: BTreeMap<String, String>,
}

impl DatasetRow {
    pub fn new(key: impl Into<String>, cells: BTreeMap<String, String>) -> Self {
        Self {
            key: key.into(),
            cells,
        }
    }

    /// Build a row from `(column, raw value)` pairs.
    pub fn from_pairs<'a>(key: &str, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let cells = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self::new(key, cells)
    }

    /// Region name this row belongs to.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cell(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Parsed value of `attribute`; NaN when the cell is missing or not numeric.
    pub fn value(&self, attribute: Attribute) -> f64 {
        self.cell(attribute.column()).map_or(f64::NAN, parse_value)
    }

    /// Parsed value of `attribute` when it is a finite number.
    pub fn defined_value(&self, attribute: Attribute) -> Option<f64> {
        let value = self.value(attribute);
        value.is_finite().then_some(value)
    }
}

/// Parse a raw dataset cell. Non-numeric input yields NaN instead of an error.
///
/// The whole trimmed cell must be a number. Unlike JavaScript's `parseFloat`,
/// a numeric prefix is not accepted: `"12abc"` is NaN, not 12.
pub fn parse_value(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse the climate CSV into rows keyed by `key_column`.
pub fn parse_dataset_csv(csv_data: &str, key_column: &str) -> Result<Vec<DatasetRow>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let key_index = headers
        .iter()
        .position(|h| h == key_column)
        .ok_or_else(|| LoadError::MissingKeyColumn(key_column.to_string()))?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let key = record.get(key_index).unwrap_or("").to_string();
        let cells = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != key_index)
            .filter_map(|(i, h)| record.get(i).map(|v| (h.clone(), v.to_string())))
            .collect();
        rows.push(DatasetRow::new(key, cells));
    }
    log::info!("[Climate] dataset: Loaded {} rows", rows.len());
    Ok(rows)
}

/// Finite values of `attribute` across all rows, in row order.
pub fn attribute_values(rows: &[DatasetRow], attribute: Attribute) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| row.defined_value(attribute))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
State,Average Temp,Max Temp,Min Temp,Precipitation,Palmer Drought Severity Index
Wisconsin,19.5,28.1,10.9,1.52,-0.44
New York,25.3,33.0,17.6,3.01,1.12
Texas,n/a,72.4,,2.2,0
";

    #[test]
    fn test_parse_dataset_csv() {
        let rows = parse_dataset_csv(CSV, DEFAULT_KEY_COLUMN).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].key(), "Wisconsin");
        assert_eq!(rows[0].value(Attribute::AverageTemp), 19.5);
        assert_eq!(rows[1].key(), "New York");
        assert_eq!(rows[1].cell("Precipitation"), Some("3.01"));
        assert_eq!(rows[0].cell("State"), None);
    }

    #[test]
    fn test_non_numeric_cells_become_nan() {
        let rows = parse_dataset_csv(CSV, DEFAULT_KEY_COLUMN).unwrap();
        assert!(rows[2].value(Attribute::AverageTemp).is_nan());
        assert!(rows[2].value(Attribute::MinTemp).is_nan());
        assert_eq!(rows[2].defined_value(Attribute::AverageTemp), None);
        assert_eq!(rows[2].defined_value(Attribute::PalmerDroughtSeverityIndex), Some(0.0));
    }

    #[test]
    fn test_missing_column_is_nan() {
        let row = DatasetRow::from_pairs("Ohio", [("Average Temp", "22")]);
        assert!(row.value(Attribute::Precipitation).is_nan());
    }

    #[test]
    fn test_missing_key_column() {
        let err = parse_dataset_csv("Name,Average Temp\nOhio,22\n", DEFAULT_KEY_COLUMN).unwrap_err();
        assert!(matches!(err, LoadError::MissingKeyColumn(ref c) if c == "State"));
    }

    #[test]
    fn test_attribute_values_skip_missing() {
        let rows = parse_dataset_csv(CSV, DEFAULT_KEY_COLUMN).unwrap();
        assert_eq!(attribute_values(&rows, Attribute::AverageTemp), vec![19.5, 25.3]);
        assert_eq!(attribute_values(&rows, Attribute::MaxTemp).len(), 3);
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 3.5 "), 3.5);
        assert_eq!(parse_value("-2"), -2.0);
        assert!(parse_value("").is_nan());
        assert!(parse_value("abc").is_nan());
    }

    #[test]
    fn test_parse_value_rejects_numeric_prefix() {
        assert!(parse_value("12abc").is_nan());
        assert!(parse_value("3.5 in").is_nan());
        assert_eq!(parse_value("1e2"), 100.0);
    }
}
