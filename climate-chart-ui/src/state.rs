//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use climate_data::attribute::Attribute;
use dioxus::prelude::*;

/// Shared application state for the climate chart apps.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Whether the inputs are still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Attribute shown on the map and bar chart
    pub selected_attribute: Signal<Attribute>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            selected_attribute: Signal::new(Attribute::default()),
        }
    }
}
