//! Pan/zoom transform applied to the marker+label layer.

use crate::config::ZoomConfig;
use crate::geom::Point;

/// `screen = layer * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    pub fn invert(&self, p: Point) -> Point {
        Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    /// Scale by `factor` keeping the layer point under `anchor` fixed on
    /// screen. The resulting scale is clamped to the configured extent.
    pub fn scaled_at(&self, anchor: Point, factor: f64, cfg: &ZoomConfig) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return *self;
        }
        let k = cfg.clamp_scale(self.k * factor);
        let fixed = self.invert(anchor);
        Self {
            k,
            x: anchor.x - fixed.x * k,
            y: anchor.y - fixed.y * k,
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            k: self.k,
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// SVG `transform` attribute value.
    pub fn to_svg(&self) -> String {
        format!("translate({},{}) scale({})", self.x, self.y, self.k)
    }
}

/// Wheel delta → zoom factor. `delta_mode` follows the DOM `WheelEvent`
/// constants: 0 pixels, 1 lines, 2 pages.
pub fn wheel_factor(delta_y: f64, delta_mode: u32, cfg: &ZoomConfig) -> f64 {
    let per_unit = match delta_mode {
        0 => cfg.wheel_pixel_factor,
        1 => cfg.wheel_line_factor,
        _ => 1.0,
    };
    2f64.powf(-delta_y * per_unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_keeps_anchor_fixed() {
        let cfg = ZoomConfig::default();
        let t = ZoomTransform::IDENTITY.translated(30.0, -10.0);
        let anchor = Point::new(200.0, 120.0);
        let layer = t.invert(anchor);
        let z = t.scaled_at(anchor, 2.0, &cfg);
        let back = z.apply(layer);
        assert!((back.x - anchor.x).abs() < 1e-9);
        assert!((back.y - anchor.y).abs() < 1e-9);
        assert_eq!(z.k, 2.0);
    }

    #[test]
    fn scale_is_clamped() {
        let cfg = ZoomConfig::default();
        let t = ZoomTransform::IDENTITY.scaled_at(Point::new(0.0, 0.0), 100.0, &cfg);
        assert_eq!(t.k, 5.0);
        let t = t.scaled_at(Point::new(0.0, 0.0), 1e-6, &cfg);
        assert_eq!(t.k, 0.2);
    }

    #[test]
    fn wheel_down_zooms_out() {
        let cfg = ZoomConfig::default();
        assert!(wheel_factor(100.0, 0, &cfg) < 1.0);
        assert!(wheel_factor(-100.0, 0, &cfg) > 1.0);
        assert_eq!(wheel_factor(0.0, 1, &cfg), 1.0);
    }

    #[test]
    fn svg_attr() {
        let t = ZoomTransform { k: 2.0, x: 10.0, y: -4.5 };
        assert_eq!(t.to_svg(), "translate(10,-4.5) scale(2)");
    }
}
