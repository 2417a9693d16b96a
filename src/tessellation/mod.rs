mod curve_samples;
mod tessellate_curve;

pub use curve_samples::CurveSamples;
pub use tessellate_curve::TessellateCurve;

use crate::math::Point2;

/// Parameters controlling tessellation density.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Number of evenly spaced parameter intervals. Zero is treated as one.
    pub segments: u32,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self { segments: 1000 }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Aabb {
    /// Width and height of the box.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        (self.max.x - self.min.x, self.max.y - self.min.y)
    }
}

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point2>,
}

impl Polyline {
    /// Returns the bounding box of the vertices, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        let first = self.points.first()?;
        let init = Aabb {
            min: *first,
            max: *first,
        };
        Some(self.points.iter().fold(init, |acc, p| Aabb {
            min: Point2::new(acc.min.x.min(p.x), acc.min.y.min(p.y)),
            max: Point2::new(acc.max.x.max(p.x), acc.max.y.max(p.y)),
        }))
    }

    /// Sum of the segment lengths.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}
