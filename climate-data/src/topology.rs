//! Minimal TopoJSON reading: named object collections and feature properties.
//!
//! Arc decoding and conversion to boundary polygons stay with `topojson-client`
//! in the browser. This module only reads what the join needs: the names of
//! the geometries in one object collection.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::LoadError;
use crate::region::Region;

/// Default property holding a feature's display name.
pub const DEFAULT_NAME_PROPERTY: &str = "NAME";

#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub objects: BTreeMap<String, TopoObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopoObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub geometries: Vec<TopoGeometry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopoGeometry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl TopoGeometry {
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

impl Topology {
    pub fn parse(text: &str) -> Result<Topology, LoadError> {
        let topology: Topology = serde_json::from_str(text)?;
        log::debug!(
            "[Climate] topology: {} objects ({})",
            topology.objects.len(),
            topology.objects.keys().cloned().collect::<Vec<_>>().join(", ")
        );
        Ok(topology)
    }

    /// Look up a declared object collection by name.
    pub fn object(&self, name: &str) -> Result<&TopoObject, LoadError> {
        self.objects
            .get(name)
            .ok_or_else(|| LoadError::MissingObject(name.to_string()))
    }

    /// Names of every geometry of `object`, read from `name_property`.
    ///
    /// Geometries without that property are skipped.
    pub fn feature_names(&self, object: &str, name_property: &str) -> Result<Vec<String>, LoadError> {
        let collection = self.object(object)?;
        let mut names = Vec::with_capacity(collection.geometries.len());
        for geometry in &collection.geometries {
            match geometry.property_str(name_property) {
                Some(name) => names.push(name.to_string()),
                None => log::warn!(
                    "[Climate] topology: geometry {:?} in '{}' has no '{}' property",
                    geometry.id,
                    object,
                    name_property
                ),
            }
        }
        Ok(names)
    }

    /// Build unjoined regions for `object`, dropping any name in `excluded`.
    pub fn regions(
        &self,
        object: &str,
        name_property: &str,
        excluded: &[String],
    ) -> Result<Vec<Region>, LoadError> {
        let regions: Vec<Region> = self
            .feature_names(object, name_property)?
            .into_iter()
            .filter(|name| !excluded.contains(name))
            .map(Region::new)
            .collect();
        log::info!(
            "[Climate] topology: {} regions from '{}'",
            regions.len(),
            object
        );
        Ok(regions)
    }
}
