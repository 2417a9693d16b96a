use thiserror::Error;

use crate::math::Point2;

/// Top-level error type for bezolve.
#[derive(Debug, Error)]
pub enum BezolveError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Errors related to curve construction and evaluation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("a curve needs at least one control point")]
    EmptyControlPoints,

    #[error("control point {index} = ({x}, {y}) is not finite")]
    NonFiniteControlPoint { index: usize, x: f64, y: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Why the inverse search gave up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchFailure {
    /// The scan left `[0, 1]` without reaching the target.
    LeftDomain,
    /// The step shrank below the floor while the residual was still too large.
    StepFloor { best_t: f64, residual: f64 },
    /// The evaluation budget was used up.
    EvaluationLimit { evaluations: usize },
}

/// Errors related to inverse solving.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("no parameter found for x = {x} on curve {control_points:?} ({reason:?})")]
    NotFound {
        x: f64,
        control_points: Vec<Point2>,
        reason: SearchFailure,
    },

    #[error("invalid solver parameters: {0}")]
    InvalidParameters(String),
}

impl BezolveError {
    /// Returns `true` if this is a [`SolverError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Solver(SolverError::NotFound { .. }))
    }

    /// Returns `true` if this is a [`GeometryError::ParameterOutOfRange`].
    #[must_use]
    pub fn is_out_of_domain(&self) -> bool {
        matches!(
            self,
            Self::Geometry(GeometryError::ParameterOutOfRange { .. })
        )
    }
}

/// Convenience type alias for results using [`BezolveError`].
pub type Result<T> = std::result::Result<T, BezolveError>;
