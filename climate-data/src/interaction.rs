//! Pointer interaction: tooltip content and placement.

use serde::Serialize;

use crate::attribute::Attribute;

/// Tooltip offset from the pointer, in page pixels.
pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, -30.0);

/// Pointer position in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Where the tooltip's top-left corner goes for this pointer.
    pub fn tooltip_position(&self) -> (f64, f64) {
        (self.x + TOOLTIP_OFFSET.0, self.y + TOOLTIP_OFFSET.1)
    }
}

/// Content and placement of the hover tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub attribute: Attribute,
    pub value: String,
    pub left: f64,
    pub top: f64,
}

impl Tooltip {
    pub fn new(title: &str, attribute: Attribute, value: Option<f64>, pointer: Pointer) -> Self {
        let (left, top) = pointer.tooltip_position();
        Self {
            title: title.to_string(),
            attribute,
            value: format_value(value),
            left,
            top,
        }
    }
}

/// The shortest text that reads back as `value`; missing values read "No data".
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}", v),
        _ => "No data".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_position() {
        let tooltip = Tooltip::new("Wisconsin", Attribute::AverageTemp, Some(19.5), Pointer::new(100.0, 200.0));
        assert_eq!(tooltip.left, 110.0);
        assert_eq!(tooltip.top, 170.0);
        assert_eq!(tooltip.value, "19.5");
        assert_eq!(tooltip.title, "Wisconsin");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(19.5)), "19.5");
        assert_eq!(format_value(Some(3.0)), "3");
        assert_eq!(format_value(Some(-0.44)), "-0.44");
        assert_eq!(format_value(Some(1.234)), "1.234");
        assert_eq!(format_value(Some(1.525)), "1.525");
        assert_eq!(format_value(None), "No data");
        assert_eq!(format_value(Some(f64::NAN)), "No data");
    }

    #[test]
    fn test_small_values_are_not_rounded_away() {
        assert_eq!(format_value(Some(0.004)), "0.004");
        assert_eq!(format_value(Some(-0.004)), "-0.004");
        let tooltip = Tooltip::new("Nevada", Attribute::Precipitation, Some(0.004), Pointer::new(0.0, 0.0));
        assert_eq!(tooltip.value, "0.004");
    }
}
