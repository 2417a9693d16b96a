use crate::geometry::curve::Bezier;
use crate::math::Point2;

/// Lazy sequence of points on a Bezier curve at evenly spaced parameters.
///
/// Yields `segments + 1` points, the first at `t = 0` and the last exactly at
/// `t = 1`. Clone it to restart from the beginning.
#[derive(Debug, Clone)]
pub struct CurveSamples<'a> {
    curve: &'a Bezier,
    segments: u32,
    next: Option<u32>,
}

impl<'a> CurveSamples<'a> {
    /// Creates the sequence. A `segments` of zero is treated as one.
    #[must_use]
    pub fn new(curve: &'a Bezier, segments: u32) -> Self {
        Self {
            curve,
            segments: segments.max(1),
            next: Some(0),
        }
    }

    fn remaining(&self) -> usize {
        self.next.map_or(0, |i| {
            usize::try_from(self.segments - i).map_or(usize::MAX, |r| r.saturating_add(1))
        })
    }
}

impl Iterator for CurveSamples<'_> {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        let i = self.next?;
        self.next = (i < self.segments).then_some(i + 1);
        let t = if i == self.segments {
            1.0
        } else {
            f64::from(i) / f64::from(self.segments)
        };
        Some(self.curve.point_at(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for CurveSamples<'_> {}
