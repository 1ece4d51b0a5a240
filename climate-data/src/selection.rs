use serde::Serialize;

use crate::attribute::Attribute;

/// The single attribute currently expressed by both views.
///
/// Replaced wholesale on every selection; no history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    attribute: Attribute,
}

impl Selection {
    pub fn new(attribute: Attribute) -> Self {
        Self { attribute }
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Replace the selection, returning the previous attribute.
    pub fn select(&mut self, attribute: Attribute) -> Attribute {
        std::mem::replace(&mut self.attribute, attribute)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(Attribute::default())
    }
}
