use crate::error::{GeometryError, Result};
use crate::math::bernstein::weight;
use crate::math::combinatorics::binomial;
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::operations::query::ParameterAtX;
use crate::tessellation::CurveSamples;

use super::{Curve, CurveDomain};

/// A Bezier curve of arbitrary degree in the plane.
///
/// The parametric form is `P(t) = sum_k B(n, k, t) * P_k` for `t` in `[0, 1]`,
/// where `n` is the degree (control point count minus one) and `B` is the
/// Bernstein weight. The control points are fixed at construction, so a
/// `Bezier` can be shared freely between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Bezier {
    control_points: Vec<Point2>,
    degree: u32,
}

impl Bezier {
    /// Creates a new Bezier curve from its control points.
    ///
    /// A single point (degree 0) and two points (a line segment) are valid.
    ///
    /// # Errors
    ///
    /// Returns an error if `control_points` is empty, if any coordinate is
    /// NaN or infinite, or if the degree is so high that its Bernstein
    /// coefficients overflow `f64` (roughly above 1000).
    pub fn new(control_points: Vec<Point2>) -> Result<Self> {
        if control_points.is_empty() {
            return Err(GeometryError::EmptyControlPoints.into());
        }
        if let Some((index, p)) = control_points
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(GeometryError::NonFiniteControlPoint {
                index,
                x: p.x,
                y: p.y,
            }
            .into());
        }
        let degree = u32::try_from(control_points.len() - 1).map_err(|_| {
            GeometryError::Degenerate("too many control points for a single curve".into())
        })?;
        // The middle coefficient is the largest; past it the weights overflow.
        if !binomial(degree, degree / 2).is_finite() {
            return Err(GeometryError::Degenerate(format!(
                "degree {degree} overflows the Bernstein coefficients"
            ))
            .into());
        }
        Ok(Self {
            control_points,
            degree,
        })
    }

    /// Returns the control points in order.
    #[must_use]
    pub fn control_points(&self) -> &[Point2] {
        &self.control_points
    }

    /// Returns the degree (control point count minus one).
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Returns the first control point, which is also `P(0)`.
    #[must_use]
    pub fn first(&self) -> &Point2 {
        &self.control_points[0]
    }

    /// Returns the last control point, which is also `P(1)`.
    #[must_use]
    pub fn last(&self) -> &Point2 {
        &self.control_points[self.control_points.len() - 1]
    }

    /// Returns `(min_x, max_x)` over the control points.
    ///
    /// The curve lies in the convex hull of its control points, so every
    /// evaluated x falls inside this range.
    #[must_use]
    pub fn control_x_range(&self) -> (f64, f64) {
        self.control_points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.x), hi.max(p.x))
            })
    }

    /// Lazily samples the curve at `segments + 1` evenly spaced parameters.
    ///
    /// The first and last samples sit exactly on `t = 0` and `t = 1`. A
    /// `segments` of zero is treated as one. The sequence can be cloned to
    /// restart it.
    #[must_use]
    pub fn samples(&self, segments: u32) -> CurveSamples<'_> {
        CurveSamples::new(self, segments)
    }

    /// Finds the first parameter whose x matches `x`, with default solver
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SolverError::NotFound`] if no such parameter
    /// exists, or an invalid-parameter error for a non-finite `x`.
    pub fn parameter_at_x(&self, x: f64) -> Result<f64> {
        ParameterAtX::new(x).execute(self)
    }

    /// Evaluates without the domain check. Callers guarantee `t` in `[0, 1]`.
    pub(crate) fn point_at(&self, t: f64) -> Point2 {
        let mut x = 0.0;
        let mut y = 0.0;
        for (k, p) in (0..=self.degree).zip(&self.control_points) {
            let w = weight(self.degree, k, t);
            x += p.x * w;
            y += p.y * w;
        }
        Point2::new(x, y)
    }

    pub(crate) fn x_at(&self, t: f64) -> f64 {
        self.point_at(t).x
    }
}

impl Curve for Bezier {
    fn evaluate(&self, t: f64) -> Result<Point2> {
        self.domain().check(t)?;
        Ok(self.point_at(t))
    }

    fn derivative(&self, t: f64) -> Result<Vector2> {
        self.domain().check(t)?;
        if self.degree == 0 {
            return Ok(Vector2::zeros());
        }
        let n = self.degree;
        let mut d = Vector2::zeros();
        for (k, pair) in (0..n).zip(self.control_points.windows(2)) {
            d += (pair[1] - pair[0]) * weight(n - 1, k, t);
        }
        Ok(d * f64::from(n))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        self.degree > 0 && (self.last() - self.first()).norm() < TOLERANCE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BezolveError;
    use approx::assert_abs_diff_eq;

    fn cubic() -> Bezier {
        Bezier::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(5.0, 10.0),
            Point2::new(10.0, 10.0),
        ])
        .unwrap()
    }

    fn assorted() -> Vec<Bezier> {
        vec![
            Bezier::new(vec![Point2::new(3.0, -2.0)]).unwrap(),
            Bezier::new(vec![Point2::new(-1.0, 4.0), Point2::new(7.5, 0.25)]).unwrap(),
            Bezier::new(vec![
                Point2::new(0.0, 0.0),
                Point2::new(50.0, 75.0),
                Point2::new(100.0, 100.0),
            ])
            .unwrap(),
            cubic(),
            Bezier::new(vec![
                Point2::new(0.1, 0.2),
                Point2::new(-3.0, 8.0),
                Point2::new(12.0, -4.0),
                Point2::new(6.0, 6.0),
                Point2::new(2.0, 9.0),
                Point2::new(1.0, 1.0),
            ])
            .unwrap(),
        ]
    }

    #[test]
    fn cubic_reference_values() {
        let curve = cubic();
        let expected = [
            (0.1, 1.36, 0.28),
            (0.2, 2.48, 1.04),
            (0.3, 3.42, 2.16),
            (0.4, 4.24, 3.52),
        ];
        for (t, x, y) in expected {
            let p = curve.evaluate(t).unwrap();
            assert_abs_diff_eq!(p.x, x, epsilon = 0.001);
            assert_abs_diff_eq!(p.y, y, epsilon = 0.001);
        }
    }

    #[test]
    fn endpoints_are_first_and_last_control_points() {
        for curve in assorted() {
            let start = curve.evaluate(0.0).unwrap();
            let end = curve.evaluate(1.0).unwrap();
            assert_abs_diff_eq!(start, *curve.first(), epsilon = 1e-12);
            assert_abs_diff_eq!(end, *curve.last(), epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_parameters_outside_unit_interval() {
        for curve in assorted() {
            for t in [-1.0, -1e-9, 1.0 + 1e-9, 2.0, f64::NAN, f64::INFINITY] {
                let err = curve.evaluate(t).unwrap_err();
                assert!(err.is_out_of_domain(), "t={t}: {err}");
                assert!(curve.derivative(t).is_err());
            }
        }
    }

    #[test]
    fn single_point_is_constant() {
        let curve = Bezier::new(vec![Point2::new(3.0, -2.0)]).unwrap();
        assert_eq!(curve.degree(), 0);
        for t in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(curve.evaluate(t).unwrap(), Point2::new(3.0, -2.0));
        }
        assert_eq!(curve.derivative(0.5).unwrap(), Vector2::zeros());
        assert!(!curve.is_closed());
    }

    #[test]
    fn two_points_interpolate_linearly() {
        let curve = Bezier::new(vec![Point2::new(0.0, 0.0), Point2::new(4.0, 2.0)]).unwrap();
        let p = curve.evaluate(0.25).unwrap();
        assert_abs_diff_eq!(p, Point2::new(1.0, 0.5), epsilon = 1e-12);
        let d = curve.derivative(0.7).unwrap();
        assert_abs_diff_eq!(d, Vector2::new(4.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let curve = cubic();
        for i in 0..=100 {
            let t = f64::from(i) / 100.0;
            let a = curve.evaluate(t).unwrap();
            let b = curve.evaluate(t).unwrap();
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }

    #[test]
    fn derivative_matches_central_difference() {
        let h = 1e-6;
        for curve in assorted() {
            for t in [0.1, 0.35, 0.5, 0.8] {
                let d = curve.derivative(t).unwrap();
                let ahead = curve.evaluate(t + h).unwrap();
                let behind = curve.evaluate(t - h).unwrap();
                let approx = (ahead - behind) / (2.0 * h);
                assert_abs_diff_eq!(d, approx, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn rejects_empty_control_points() {
        let err = Bezier::new(Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            BezolveError::Geometry(GeometryError::EmptyControlPoints)
        ));
    }

    #[test]
    fn rejects_non_finite_control_points() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Bezier::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, bad)]).unwrap_err();
            assert!(matches!(
                err,
                BezolveError::Geometry(GeometryError::NonFiniteControlPoint { index: 1, .. })
            ));
        }
    }

    #[test]
    fn high_degree_curve_stays_finite() {
        let points: Vec<_> = (0..=300).map(|i| Point2::new(f64::from(i), 0.0)).collect();
        let curve = Bezier::new(points).unwrap();
        assert_eq!(curve.evaluate(0.0).unwrap(), Point2::new(0.0, 0.0));
        assert_abs_diff_eq!(
            curve.evaluate(1.0).unwrap(),
            Point2::new(300.0, 0.0),
            epsilon = 1e-9
        );
        // Evenly spaced x control points make x(t) = 300 t.
        let mid = curve.evaluate(0.5).unwrap();
        assert!(mid.x.is_finite() && mid.y.is_finite());
        assert_abs_diff_eq!(mid.x, 150.0, epsilon = 1e-6);
    }

    #[test]
    fn rejects_degree_whose_coefficients_overflow() {
        let points: Vec<_> = (0..=1100).map(|i| Point2::new(f64::from(i), 0.0)).collect();
        let err = Bezier::new(points).unwrap_err();
        assert!(matches!(
            err,
            BezolveError::Geometry(GeometryError::Degenerate(_))
        ));
    }

    #[test]
    fn control_x_range_spans_all_points() {
        let curve = Bezier::new(vec![
            Point2::new(2.0, 0.0),
            Point2::new(-4.0, 1.0),
            Point2::new(9.0, 1.0),
            Point2::new(3.0, 0.0),
        ])
        .unwrap();
        assert_eq!(curve.control_x_range(), (-4.0, 9.0));
    }

    #[test]
    fn samples_are_restartable_and_hit_endpoints() {
        let curve = cubic();
        let samples = curve.samples(10);
        let first_pass: Vec<_> = samples.clone().collect();
        let second_pass: Vec<_> = samples.collect();
        assert_eq!(first_pass.len(), 11);
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass[0], *curve.first());
        assert_abs_diff_eq!(first_pass[10], *curve.last(), epsilon = 1e-12);
        assert_abs_diff_eq!(first_pass[1], curve.evaluate(0.1).unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn zero_segments_still_yields_both_ends() {
        assert_eq!(cubic().samples(0).count(), 2);
    }

    #[test]
    fn closed_when_ends_meet() {
        let closed = Bezier::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 5.0),
            Point2::new(0.0, 0.0),
        ])
        .unwrap();
        assert!(closed.is_closed());
        assert!(!cubic().is_closed());
    }

    #[test]
    fn shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Bezier>();

        let curve = cubic();
        let xs: Vec<f64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (1..=4)
                .map(|i| {
                    let curve = &curve;
                    scope.spawn(move || curve.evaluate(f64::from(i) / 10.0).unwrap().x)
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_abs_diff_eq!(xs[0], 1.36, epsilon = 0.001);
        assert_abs_diff_eq!(xs[3], 4.24, epsilon = 0.001);
    }
}
