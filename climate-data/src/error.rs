//! Error types for loading inputs and validating configuration.

use std::fmt;

/// Failure to load one of the three startup inputs.
///
/// Any of these aborts the whole render; there is no partial map.
#[derive(Debug)]
pub enum LoadError {
    /// The input could not be fetched or read.
    Fetch { source: String, reason: String },
    /// The dataset CSV is malformed.
    Csv(csv::Error),
    /// The dataset has no column with the configured region key.
    MissingKeyColumn(String),
    /// The topology file is not valid TopoJSON.
    Topology(serde_json::Error),
    /// The topology does not declare the expected object collection.
    MissingObject(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Fetch { source, reason } => {
                write!(f, "failed to load {}: {}", source, reason)
            }
            LoadError::Csv(e) => write!(f, "invalid dataset CSV: {}", e),
            LoadError::MissingKeyColumn(column) => {
                write!(f, "dataset has no '{}' column", column)
            }
            LoadError::Topology(e) => write!(f, "invalid topology: {}", e),
            LoadError::MissingObject(name) => {
                write!(f, "topology has no object named '{}'", name)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Csv(e) => Some(e),
            LoadError::Topology(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        LoadError::Csv(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Topology(e)
    }
}

/// Invalid user-supplied configuration.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The color range must hold exactly this many classes.
    ColorCount { expected: usize, found: usize },
    InvalidColor(String),
    UnknownAttribute(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ColorCount { expected, found } => {
                write!(f, "expected {} colors, found {}", expected, found)
            }
            ConfigError::InvalidColor(c) => write!(f, "invalid color '{}'", c),
            ConfigError::UnknownAttribute(a) => write!(f, "unknown attribute '{}'", a),
        }
    }
}

impl std::error::Error for ConfigError {}
