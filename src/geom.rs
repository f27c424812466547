//! Small 2D value types shared by the scales, scene and tooltip code.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Arithmetic mean of a point set, `None` when empty.
pub fn centroid<I>(points: I) -> Option<Point>
where
    I: IntoIterator<Item = Point>,
{
    let mut n = 0usize;
    let mut sx = 0.0;
    let mut sy = 0.0;
    for p in points {
        n += 1;
        sx += p.x;
        sy += p.y;
    }
    if n == 0 {
        return None;
    }
    Some(Point::new(sx / n as f64, sy / n as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_empty_is_none() {
        assert!(centroid(std::iter::empty()).is_none());
    }

    #[test]
    fn centroid_is_mean() {
        let c = centroid([Point::new(0.0, 0.0), Point::new(4.0, 2.0)]).unwrap();
        assert_eq!(c, Point::new(2.0, 1.0));
    }
}
