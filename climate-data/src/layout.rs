//! Container dimensions and fitting the map projection to them.

use serde::{Deserialize, Serialize};

/// Width and height of a drawing container in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned bounds `[[x0, y0], [x1, y1]]` of projected geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bounds {
    /// From the nested-array form returned by `d3.geoPath().bounds`.
    pub fn from_corners(corners: [[f64; 2]; 2]) -> Self {
        let [[x0, y0], [x1, y1]] = corners;
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Projection scale and translation placing the regions in a container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitTransform {
    pub scale: f64,
    pub translate: [f64; 2],
}

impl FitTransform {
    /// Fit `bounds` (measured at unit scale, zero translation) into `size`,
    /// centered and filling `margin` of the tighter dimension.
    ///
    /// Returns `None` for empty containers or degenerate bounds.
    pub fn fit(bounds: Bounds, size: Dimensions, margin: f64) -> Option<FitTransform> {
        if size.is_empty() {
            return None;
        }
        let ratio = (bounds.width() / size.width).max(bounds.height() / size.height);
        if !(ratio > 0.0 && ratio.is_finite()) {
            return None;
        }
        let scale = margin / ratio;
        let translate = [
            (size.width - scale * (bounds.x1 + bounds.x0)) / 2.0,
            (size.height - scale * (bounds.y1 + bounds.y0)) / 2.0,
        ];
        Some(FitTransform { scale, translate })
    }
}

/// Geographic projection supplied by the host.
///
/// The projection math itself lives in d3-geo; this crate only needs the
/// regions' extent at unit scale and a way to push a new fit back.
pub trait Projection {
    /// Bounds of all regions projected at scale 1 and translation (0, 0).
    fn unit_bounds(&self) -> Option<Bounds>;

    fn apply_fit(&mut self, fit: FitTransform);
}

/// Conic equal-area parameters handed to `d3.geoConicEqualArea`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectionConfig {
    pub rotate: [f64; 2],
    pub center: [f64; 2],
    pub parallels: [f64; 2],
    pub graticule_step: [f64; 2],
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            rotate: [96.0, 0.0],
            center: [0.0, 37.5],
            parallels: [29.5, 45.5],
            graticule_step: [5.0, 5.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_centers_bounds() {
        // Unit bounds 2 wide, 1 tall, centered on the origin.
        let bounds = Bounds::from_corners([[-1.0, -0.5], [1.0, 0.5]]);
        let fit = FitTransform::fit(bounds, Dimensions::new(800.0, 600.0), 0.95).unwrap();
        // Width is the tighter dimension: 2 / 800 > 1 / 600
        assert!((fit.scale - 0.95 * 400.0).abs() < 1e-9);
        assert!((fit.translate[0] - 400.0).abs() < 1e-9);
        assert!((fit.translate[1] - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_offset_bounds() {
        let bounds = Bounds::from_corners([[0.0, 0.0], [1.0, 1.0]]);
        let fit = FitTransform::fit(bounds, Dimensions::new(100.0, 100.0), 1.0).unwrap();
        assert!((fit.scale - 100.0).abs() < 1e-9);
        assert!(fit.translate[0].abs() < 1e-9);
        assert!(fit.translate[1].abs() < 1e-9);
    }

    #[test]
    fn test_fit_rejects_degenerate_input() {
        let point = Bounds::from_corners([[1.0, 1.0], [1.0, 1.0]]);
        assert_eq!(FitTransform::fit(point, Dimensions::new(100.0, 100.0), 0.95), None);

        let bounds = Bounds::from_corners([[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(FitTransform::fit(bounds, Dimensions::new(0.0, 100.0), 0.95), None);
    }
}
