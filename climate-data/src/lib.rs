//! Core types and pure logic for the US climate choropleth and city bubble chart.
//!
//! This crate provides:
//! - `dataset` / `topology`: parsing of the climate CSV and the region names of a TopoJSON object
//! - `region`: the name-based join of dataset rows onto regions
//! - `scale`: quantile, linear, band and color scales (d3 semantics)
//! - `choropleth` / `bar_chart` / `bubble`: visual encodings serialized to JSON for D3.js
//! - `inputs`: the three startup inputs, parsed all-or-nothing
//! - `dashboard`: the selection-driven controller keeping map and bar chart in sync
//!
//! Nothing here touches the DOM; drawing goes through the [`dashboard::RenderSurface`]
//! and [`layout::Projection`] traits.

pub mod attribute;
pub mod bar_chart;
pub mod bubble;
pub mod choropleth;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod inputs;
pub mod interaction;
pub mod layout;
pub mod region;
pub mod scale;
pub mod selection;
pub mod topology;
