//! Named regions and the join of dataset rows onto them.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::attribute::Attribute;
use crate::dataset::DatasetRow;

/// A named geographic area drawn on the map.
///
/// Attribute values stay unset until a dataset row with the same name is
/// joined; a joined cell that was not numeric is stored as NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    name: String,
    values: BTreeMap<Attribute, f64>,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw stored value: `None` when unset, possibly NaN when set.
    pub fn value(&self, attribute: Attribute) -> Option<f64> {
        self.values.get(&attribute).copied()
    }

    /// Stored value when it is a finite number.
    pub fn defined_value(&self, attribute: Attribute) -> Option<f64> {
        self.value(attribute).filter(|v| v.is_finite())
    }

    pub fn set_value(&mut self, attribute: Attribute, value: f64) {
        self.values.insert(attribute, value);
    }

    /// DOM class shared by every element drawn for this region.
    pub fn class_key(&self) -> String {
        class_key(&self.name)
    }
}

/// Replace whitespace so a name can be used as a CSS class.
pub fn class_key(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Copy every attribute of each row onto all regions with exactly the same name.
///
/// Regions without a matching row and rows without a matching region are
/// skipped. The regions are updated in place and handed back.
pub fn join_rows<'a>(regions: &'a mut Vec<Region>, rows: &[DatasetRow]) -> &'a mut Vec<Region> {
    for row in rows {
        for region in regions.iter_mut().filter(|r| r.name == row.key()) {
            for attribute in Attribute::ALL {
                region.set_value(attribute, row.value(attribute));
            }
        }
    }
    regions
}

/// Counts of matched and unmatched names between regions and rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinReport {
    pub matched_regions: usize,
    pub unmatched_regions: Vec<String>,
    pub unmatched_rows: Vec<String>,
}

impl JoinReport {
    pub fn new(regions: &[Region], rows: &[DatasetRow]) -> Self {
        let row_keys: HashSet<&str> = rows.iter().map(|r| r.key()).collect();
        let region_names: HashSet<&str> = regions.iter().map(|r| r.name()).collect();

        let mut report = JoinReport::default();
        for region in regions {
            if row_keys.contains(region.name()) {
                report.matched_regions += 1;
            } else {
                report.unmatched_regions.push(region.name().to_string());
            }
        }
        report.unmatched_rows = rows
            .iter()
            .filter(|r| !region_names.contains(r.key()))
            .map(|r| r.key().to_string())
            .collect();
        report
    }
}
