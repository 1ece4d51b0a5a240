use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// One of the climate metrics tracked per state.
///
/// The serialized form is the dataset column header, so the same string is
/// used for CSV lookup, the dropdown and the JSON handed to D3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "Average Temp")]
    AverageTemp,
    #[serde(rename = "Max Temp")]
    MaxTemp,
    #[serde(rename = "Min Temp")]
    MinTemp,
    #[serde(rename = "Precipitation")]
    Precipitation,
    #[serde(rename = "Palmer Drought Severity Index")]
    PalmerDroughtSeverityIndex,
}

impl Attribute {
    /// Every attribute, in dropdown order.
    pub const ALL: [Attribute; 5] = [
        Attribute::AverageTemp,
        Attribute::MaxTemp,
        Attribute::MinTemp,
        Attribute::Precipitation,
        Attribute::PalmerDroughtSeverityIndex,
    ];

    /// Column header of this attribute in the dataset CSV.
    pub fn column(&self) -> &'static str {
        match self {
            Attribute::AverageTemp => "Average Temp",
            Attribute::MaxTemp => "Max Temp",
            Attribute::MinTemp => "Min Temp",
            Attribute::Precipitation => "Precipitation",
            Attribute::PalmerDroughtSeverityIndex => "Palmer Drought Severity Index",
        }
    }

    pub fn from_column(column: &str) -> Option<Attribute> {
        Attribute::ALL.into_iter().find(|a| a.column() == column)
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Attribute::AverageTemp
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Attribute {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::from_column(s).ok_or_else(|| ConfigError::UnknownAttribute(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_round_trip() {
        for attribute in Attribute::ALL {
            assert_eq!(Attribute::from_column(attribute.column()), Some(attribute));
        }
        assert_eq!(Attribute::from_column("average temp"), None);
    }

    #[test]
    fn test_parse_unknown_attribute() {
        let err = "Humidity".parse::<Attribute>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownAttribute("Humidity".to_string()));
        assert_eq!(
            "Max Temp".parse::<Attribute>().unwrap(),
            Attribute::MaxTemp
        );
    }

    #[test]
    fn test_serde_uses_column_names() {
        let json = serde_json::to_string(&Attribute::PalmerDroughtSeverityIndex).unwrap();
        assert_eq!(json, "\"Palmer Drought Severity Index\"");
        let back: Attribute = serde_json::from_str("\"Min Temp\"").unwrap();
        assert_eq!(back, Attribute::MinTemp);
    }
}
