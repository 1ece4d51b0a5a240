//! Shared Dioxus components and D3.js bridge for the climate chart apps.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for D3.js chart functions via `js_sys::eval()`
//! - `surface`: browser implementations of the dashboard's `RenderSurface` and `Projection`
//! - `loader`: concurrent fetch of the dataset and topology files
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (selector, containers, etc.)

pub mod components;
pub mod js_bridge;
pub mod loader;
pub mod state;
pub mod surface;
