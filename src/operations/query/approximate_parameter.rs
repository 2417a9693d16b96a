use crate::error::{Result, SolverError};
use crate::geometry::curve::Bezier;

/// Number of secant corrections applied.
const SECANT_STEPS: usize = 8;

/// Approximates a parameter for a target x with a fixed number of secant
/// steps.
///
/// This is a fast, non-authoritative alternative to
/// [`ParameterAtX`](super::ParameterAtX): it starts at `t = 1`, estimates the
/// slope of x from the two most recent evaluations and nudges `t` toward the
/// target, clamping to `[0, 1]`. Nothing checks how close the result is. Use
/// it only where a rough answer is acceptable.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateParameterAtX {
    x: f64,
}

impl ApproximateParameterAtX {
    /// Creates a new `ApproximateParameterAtX` query.
    #[must_use]
    pub fn new(x: f64) -> Self {
        Self { x }
    }

    /// Executes the approximation, returning a parameter in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidParameters`] if the target is not finite.
    pub fn execute(&self, curve: &Bezier) -> Result<f64> {
        if !self.x.is_finite() {
            return Err(SolverError::InvalidParameters(format!(
                "target x must be finite, got {}",
                self.x
            ))
            .into());
        }

        let mut prev_t = 1.0;
        let mut prev_offset = curve.x_at(prev_t) - self.x;
        let mut t = 0.5;
        for _ in 0..SECANT_STEPS {
            let offset = curve.x_at(t) - self.x;
            let slope = (offset - prev_offset) / (t - prev_t);
            // Flat secant or repeated parameter: nothing left to learn.
            if !slope.is_normal() {
                break;
            }
            prev_t = t;
            prev_offset = offset;
            t = (t - offset / slope).clamp(0.0, 1.0);
        }
        Ok(t)
    }
}
