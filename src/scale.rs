//! Embedding-space → pixel-space mapping.
//!
//! Scales are built once per drawing surface. Pan and zoom never touch them;
//! those are applied as a transform on the whole marker layer.

use crate::config::LayoutConfig;
use crate::dataset::Dataset;
use crate::error::SceneError;
use crate::geom::{Point, Size};

/// Span used in place of a zero-width extent (single point, or all points on
/// one line).
pub const FALLBACK_SPAN: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Min/max over the finite values, `None` if there are none.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(e) => Some(Self {
                    min: e.min.min(v),
                    max: e.max.max(v),
                }),
            })
    }

    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Expand by `margin * span` on both ends. A degenerate extent is first
    /// widened to [`FALLBACK_SPAN`] around its midpoint. Extents whose span
    /// overflows `f64` are padded in half-steps and saturate at `±f64::MAX`.
    pub fn padded(self, margin: f64) -> Self {
        if !self.span().is_finite() {
            let mid = self.min / 2.0 + self.max / 2.0;
            let half = self.max / 2.0 - self.min / 2.0;
            let half = half + half * 2.0 * margin;
            return Self {
                min: (mid - half).max(f64::MIN),
                max: (mid + half).min(f64::MAX),
            };
        }
        let base = if self.span() > 0.0 {
            self
        } else {
            let mid = (self.min + self.max) / 2.0;
            Self {
                min: mid - FALLBACK_SPAN / 2.0,
                max: mid + FALLBACK_SPAN / 2.0,
            }
        };
        let pad = base.span() * margin;
        Self {
            min: base.min - pad,
            max: base.max + pad,
        }
    }
}

/// Linear interpolation from a domain interval onto a range interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        // Halved differences stay finite across the whole f64 range.
        let dd = d1 / 2.0 - d0 / 2.0;
        if dd == 0.0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v / 2.0 - d0 / 2.0) / dd * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let dr = r1 - r0;
        if dr == 0.0 {
            return d0 / 2.0 + d1 / 2.0;
        }
        (d0 / 2.0 + (px - r0) / dr * (d1 / 2.0 - d0 / 2.0)) * 2.0
    }
}

/// The pair of scales for one drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    x: LinearScale,
    y: LinearScale,
    size: Size,
}

impl CoordinateMapper {
    /// Fit every argument of `dataset` into `size`, leaving `layout.inset_px`
    /// on each edge. The y axis is inverted (larger values draw higher).
    pub fn new(dataset: &Dataset, size: Size, layout: &LayoutConfig) -> Result<Self, SceneError> {
        let x = Extent::of(dataset.arguments().map(|(_, a)| a.x)).ok_or(SceneError::NoData)?;
        let y = Extent::of(dataset.arguments().map(|(_, a)| a.y)).ok_or(SceneError::NoData)?;
        Ok(Self::from_extents(x, y, size, layout))
    }

    pub fn from_extents(x: Extent, y: Extent, size: Size, layout: &LayoutConfig) -> Self {
        let x = x.padded(layout.domain_margin);
        let y = y.padded(layout.domain_margin);
        let inset = layout.inset_px;
        Self {
            x: LinearScale::new((x.min, x.max), (inset, size.width - inset)),
            y: LinearScale::new((y.min, y.max), (size.height - inset, inset)),
            size,
        }
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn map(&self, x: f64, y: f64) -> Point {
        Point::new(self.x.map(x), self.y.map(y))
    }

    pub fn invert(&self, p: Point) -> (f64, f64) {
        (self.x.invert(p.x), self.y.invert(p.y))
    }
}
