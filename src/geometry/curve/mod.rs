mod bezier;

pub use bezier::Bezier;

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns whether `t` lies in the closed range `[t_min, t_max]`.
    ///
    /// NaN is never contained.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        (self.t_min..=self.t_max).contains(&t)
    }

    /// Rejects `t` outside the domain with [`GeometryError::ParameterOutOfRange`].
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is outside the domain or NaN.
    pub fn check(&self, t: f64) -> Result<()> {
        if self.contains(t) {
            Ok(())
        } else {
            Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: self.t_min,
                max: self.t_max,
            }
            .into())
        }
    }
}

/// Trait for parametric curves in the plane.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 2D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn evaluate(&self, t: f64) -> Result<Point2>;

    /// Computes the first derivative with respect to `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn derivative(&self, t: f64) -> Result<Vector2>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::BezolveError;

    #[test]
    fn unit_domain_contains_closed_range() {
        let domain = CurveDomain::new(0.0, 1.0);
        assert!(domain.contains(0.0));
        assert!(domain.contains(1.0));
        assert!(!domain.contains(-1e-12));
        assert!(!domain.contains(1.0 + 1e-12));
        assert!(!domain.contains(f64::NAN));
    }

    #[test]
    fn check_reports_bounds() {
        let err = CurveDomain::new(0.0, 1.0).check(2.0).unwrap_err();
        match err {
            BezolveError::Geometry(GeometryError::ParameterOutOfRange {
                value, min, max, ..
            }) => {
                assert_eq!(value, 2.0);
                assert_eq!(min, 0.0);
                assert_eq!(max, 1.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
