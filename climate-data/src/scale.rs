//! Scales with the semantics of their d3-scale counterparts.
//!
//! - [`QuantileScale`]: `d3.scaleQuantile`, equal-count classes onto a color range
//! - [`LinearScale`]: `d3.scaleLinear` on numbers
//! - [`LinearColorScale`]: `d3.scaleLinear` with an RGB color range
//! - [`BandScale`]: `d3.scaleBand` with symmetric padding

use serde::Serialize;

use crate::color::Rgb;

/// Maps a numeric value to a CSS color.
///
/// `None` means the value cannot be colored (NaN input or an empty domain);
/// callers paint those with a neutral fallback.
pub trait ColorScale {
    fn color(&self, value: f64) -> Option<String>;
}

/// Equal-count classification of a value distribution onto a fixed color range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantileScale {
    domain: Vec<f64>,
    thresholds: Vec<f64>,
    range: Vec<String>,
}

impl QuantileScale {
    /// Build the scale from `values`; NaN and infinite values are dropped.
    pub fn new(values: impl IntoIterator<Item = f64>, range: Vec<String>) -> Self {
        let mut domain: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        domain.sort_by(f64::total_cmp);

        let classes = range.len();
        let thresholds = if domain.is_empty() || classes == 0 {
            Vec::new()
        } else {
            (1..classes)
                .filter_map(|i| quantile_sorted(&domain, i as f64 / classes as f64))
                .collect()
        };

        Self {
            domain,
            thresholds,
            range,
        }
    }

    /// Sorted values the scale was built from.
    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    /// Class breakpoints; a value equal to a threshold falls in the upper class.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn range(&self) -> &[String] {
        &self.range
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty() || self.range.is_empty()
    }

    /// Index into the color range for `value`.
    pub fn class_index(&self, value: f64) -> Option<usize> {
        if self.is_empty() || value.is_nan() {
            return None;
        }
        Some(self.thresholds.partition_point(|t| *t <= value))
    }

    /// Number of domain values falling into each class.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.range.len()];
        for value in &self.domain {
            if let Some(i) = self.class_index(*value) {
                counts[i] += 1;
            }
        }
        counts
    }
}

impl ColorScale for QuantileScale {
    fn color(&self, value: f64) -> Option<String> {
        self.class_index(value).map(|i| self.range[i].clone())
    }
}

/// R-7 quantile of an ascending slice (d3.quantileSorted).
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || p.is_nan() {
        return None;
    }
    if p <= 0.0 || n < 2 {
        return Some(sorted[0]);
    }
    if p >= 1.0 {
        return Some(sorted[n - 1]);
    }
    let h = (n - 1) as f64 * p;
    let i = h.floor() as usize;
    let lo = sorted[i];
    let hi = sorted[i + 1];
    Some(lo + (hi - lo) * (h - i as f64))
}

/// Continuous linear map from a numeric domain to a numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Normalized position of `x` in the domain; 0.5 for a collapsed domain.
    fn normalize(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let span = d1 - d0;
        if span == 0.0 {
            0.5
        } else {
            (x - d0) / span
        }
    }

    pub fn scale(&self, x: f64) -> f64 {
        let (r0, r1) = self.range;
        r0 + (r1 - r0) * self.normalize(x)
    }
}

/// Linear interpolation between two colors over a numeric domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearColorScale {
    position: LinearScale,
    from: Rgb,
    to: Rgb,
}

impl LinearColorScale {
    pub fn new(domain: (f64, f64), from: Rgb, to: Rgb) -> Self {
        Self {
            position: LinearScale::new(domain, (0.0, 1.0)),
            from,
            to,
        }
    }
}

impl ColorScale for LinearColorScale {
    fn color(&self, value: f64) -> Option<String> {
        let t = self.position.scale(value);
        if t.is_nan() {
            return None;
        }
        Some(self.from.lerp(self.to, t).to_css_rgb())
    }
}

/// Evenly spaced bands for an ordinal domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandScale {
    start: f64,
    step: f64,
    bandwidth: f64,
    count: usize,
}

impl BandScale {
    /// `padding` is used for both inner and outer padding, alignment is centered.
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let (r0, r1) = range;
        let n = count as f64;
        let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        Self {
            start,
            step,
            bandwidth: step * (1.0 - padding),
            count,
        }
    }

    /// Left edge of the band at `index`.
    pub fn position(&self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.start + self.step * index as f64)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Vec<String> {
        ["#D4B9DA", "#C994C7", "#DF65B0", "#DD1C77", "#980043"]
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn test_quantile_sorted() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&xs, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&xs, 1.0), Some(4.0));
        assert_eq!(quantile_sorted(&xs, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(quantile_sorted(&[7.0], 0.3), Some(7.0));
    }

    #[test]
    fn test_quantile_thresholds() {
        let scale = QuantileScale::new((1..=10).map(f64::from), colors());
        let expected = [2.8, 4.6, 6.4, 8.2];
        for (t, e) in scale.thresholds().iter().zip(expected) {
            assert!((t - e).abs() < 1e-9, "{} != {}", t, e);
        }
    }

    #[test]
    fn test_quantile_equal_count_classes() {
        let scale = QuantileScale::new((1..=10).map(f64::from), colors());
        assert_eq!(scale.class_counts(), vec![2, 2, 2, 2, 2]);
        assert_eq!(scale.color(1.0).as_deref(), Some("#D4B9DA"));
        assert_eq!(scale.color(10.0).as_deref(), Some("#980043"));

        let uneven = QuantileScale::new((1..=48).map(f64::from), colors());
        for count in uneven.class_counts() {
            assert!((9..=10).contains(&count), "class size {}", count);
        }
    }

    #[test]
    fn test_quantile_excludes_nan_from_domain() {
        let scale = QuantileScale::new(vec![3.0, f64::NAN, 1.0, 2.0, f64::INFINITY], colors());
        assert_eq!(scale.domain(), &[1.0, 2.0, 3.0]);
        assert_eq!(scale.color(f64::NAN), None);
    }

    #[test]
    fn test_quantile_maps_out_of_domain_values_to_end_classes() {
        let scale = QuantileScale::new((1..=10).map(f64::from), colors());
        assert_eq!(scale.class_index(-100.0), Some(0));
        assert_eq!(scale.class_index(1e9), Some(4));
        assert_eq!(scale.class_index(3.0), Some(1));
    }

    #[test]
    fn test_quantile_empty_domain_has_no_colors() {
        let scale = QuantileScale::new(Vec::new(), colors());
        assert!(scale.is_empty());
        assert_eq!(scale.color(5.0), None);
        assert!(scale.thresholds().is_empty());
    }

    #[test]
    fn test_linear_scale() {
        let y = LinearScale::new((0.0, 100.0), (450.0, 50.0));
        assert_eq!(y.scale(0.0), 450.0);
        assert_eq!(y.scale(100.0), 50.0);
        assert_eq!(y.scale(50.0), 250.0);

        let collapsed = LinearScale::new((3.0, 3.0), (0.0, 10.0));
        assert_eq!(collapsed.scale(3.0), 5.0);
    }

    #[test]
    fn test_linear_color_scale() {
        let from = Rgb::from_hex("#FDBE85").unwrap();
        let to = Rgb::from_hex("#D94701").unwrap();
        let scale = LinearColorScale::new((0.0, 10.0), from, to);
        assert_eq!(scale.color(0.0).as_deref(), Some("rgb(253, 190, 133)"));
        assert_eq!(scale.color(10.0).as_deref(), Some("rgb(217, 71, 1)"));
        assert_eq!(scale.color(f64::NAN), None);
    }

    #[test]
    fn test_band_scale() {
        // 4 bands over [0, 100] with padding 0.1:
        // step = 100 / (4 - 0.1 + 0.2) = 24.39..., bandwidth = 0.9 * step
        let x = BandScale::new(4, (0.0, 100.0), 0.1);
        let step = 100.0 / 4.1;
        assert!((x.step() - step).abs() < 1e-9);
        assert!((x.bandwidth() - step * 0.9).abs() < 1e-9);
        let first = x.position(0).unwrap();
        assert!((first - step * 0.1).abs() < 1e-9);
        let last = x.position(3).unwrap();
        assert!((last + x.bandwidth() + step * 0.1 - 100.0).abs() < 1e-9);
        assert_eq!(x.position(4), None);
    }
}
