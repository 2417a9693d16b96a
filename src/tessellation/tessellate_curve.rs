use crate::error::Result;
use crate::geometry::curve::Curve;

use super::{Polyline, TessellationParams};

/// Tessellates a curve into a polyline by uniform parameter sampling.
pub struct TessellateCurve {
    params: TessellationParams,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation.
    #[must_use]
    pub fn new(params: TessellationParams) -> Self {
        Self { params }
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// The polyline has `segments + 1` vertices, the first and last of which
    /// are the curve evaluated at the ends of its domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve rejects a parameter inside its own domain.
    pub fn execute<C: Curve>(&self, curve: &C) -> Result<Polyline> {
        let domain = curve.domain();
        let segments = self.params.segments.max(1);
        let span = domain.t_max - domain.t_min;
        let points = (0..=segments)
            .map(|i| {
                let t = if i == segments {
                    domain.t_max
                } else {
                    domain.t_min + span * f64::from(i) / f64::from(segments)
                };
                curve.evaluate(t)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Polyline { points })
    }
}
