use tracing::debug;

use crate::error::{Result, SearchFailure, SolverError};
use crate::geometry::curve::Bezier;

/// Residual under which an endpoint is accepted before any scanning.
///
/// Applied as `min(ENDPOINT_TOLERANCE, accuracy)`.
pub const ENDPOINT_TOLERANCE: f64 = 1e-6;

/// Parameters controlling the inverse search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParams {
    /// Step used by the first forward scan from `t = 0`.
    pub initial_step: f64,
    /// Maximum accepted `|x(t) - target|`.
    pub accuracy: f64,
    /// The search gives up once the step magnitude falls below this.
    pub min_step: f64,
    /// Multiplier applied to the step on every refinement. Negative, so the
    /// scan reverses direction.
    pub step_factor: f64,
    /// Upper bound on curve evaluations per search.
    pub max_evaluations: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            initial_step: 0.1,
            accuracy: 1e-6,
            min_step: 1e-12,
            step_factor: -0.1,
            max_evaluations: 1_000_000,
        }
    }
}

impl SolverParams {
    /// Returns a copy with a different initial step.
    #[must_use]
    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = initial_step;
        self
    }

    /// Returns a copy with a different accuracy.
    #[must_use]
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Checks that the parameters describe a terminating search.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidParameters`] describing the first
    /// offending field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> {
            Err(SolverError::InvalidParameters(msg).into())
        };
        if !(self.initial_step.is_finite() && self.initial_step > 0.0 && self.initial_step <= 1.0)
        {
            return invalid(format!(
                "initial_step must be in (0, 1], got {}",
                self.initial_step
            ));
        }
        if !(self.accuracy.is_finite() && self.accuracy > 0.0) {
            return invalid(format!("accuracy must be positive, got {}", self.accuracy));
        }
        if !(self.min_step.is_finite() && self.min_step > 0.0) {
            return invalid(format!("min_step must be positive, got {}", self.min_step));
        }
        if self.min_step > self.initial_step {
            return invalid(format!(
                "min_step {} exceeds initial_step {}",
                self.min_step, self.initial_step
            ));
        }
        if !(self.step_factor.is_finite() && self.step_factor < 0.0 && self.step_factor > -1.0) {
            return invalid(format!(
                "step_factor must be in (-1, 0), got {}",
                self.step_factor
            ));
        }
        if self.max_evaluations == 0 {
            return invalid("max_evaluations must be at least 1".into());
        }
        Ok(())
    }
}

/// One evaluated parameter and its signed x offset from the target.
#[derive(Debug, Clone, Copy)]
struct Sample {
    t: f64,
    offset: f64,
}

impl Sample {
    fn residual(self) -> f64 {
        self.offset.abs()
    }

    /// The target x lies strictly between the two samples.
    fn crossed(self, other: Self) -> bool {
        (self.offset < 0.0 && other.offset > 0.0) || (self.offset > 0.0 && other.offset < 0.0)
    }
}

/// Per-call search state. Never shared between calls.
#[derive(Debug)]
struct SearchState {
    t: f64,
    dt: f64,
    evaluations: usize,
    best: Option<Sample>,
}

impl SearchState {
    fn new(dt: f64) -> Self {
        Self {
            t: 0.0,
            dt,
            evaluations: 0,
            best: None,
        }
    }

    fn record(&mut self, sample: Sample) {
        if self.best.is_none_or(|b| sample.residual() < b.residual()) {
            self.best = Some(sample);
        }
    }
}

enum LevelOutcome {
    Found(f64),
    Refine { from: f64 },
    LeftDomain,
}

/// Finds the first parameter `t` in `[0, 1]` where a Bezier curve reaches a
/// target x.
///
/// The search first accepts an exactly matching endpoint, then scans forward
/// from `t = 0`. When the scan steps past the target (the residual grows, or
/// `x(t) - target` changes sign) it restarts at the nearer side with the step
/// multiplied by `step_factor`, walking back with a finer resolution. This
/// repeats until a sample is within `accuracy`.
///
/// For curves whose x is not monotonic, the root returned is the first the
/// scan reaches, not necessarily the smallest `t`.
///
/// A failed search emits one `DEBUG` event under the
/// `bezolve::operations::query::parameter_at_x` target before returning
/// [`SolverError::NotFound`]. Successful searches emit nothing.
#[derive(Debug, Clone, Copy)]
pub struct ParameterAtX {
    x: f64,
    params: SolverParams,
}

impl ParameterAtX {
    /// Creates a new `ParameterAtX` query with default parameters.
    #[must_use]
    pub fn new(x: f64) -> Self {
        Self {
            x,
            params: SolverParams::default(),
        }
    }

    /// Replaces the solver parameters.
    #[must_use]
    pub fn with_params(mut self, params: SolverParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the search, returning the parameter.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidParameters`] for a non-finite target or
    /// unusable parameters, and [`SolverError::NotFound`] when the scan
    /// leaves `[0, 1]`, the step drops below `min_step`, or the evaluation
    /// budget runs out without a sample inside `accuracy`.
    pub fn execute(&self, curve: &Bezier) -> Result<f64> {
        self.params.validate()?;
        if !self.x.is_finite() {
            return Err(SolverError::InvalidParameters(format!(
                "target x must be finite, got {}",
                self.x
            ))
            .into());
        }

        let endpoint_tolerance = self.params.accuracy.min(ENDPOINT_TOLERANCE);
        for t in [0.0, 1.0] {
            if (curve.x_at(t) - self.x).abs() <= endpoint_tolerance {
                return Ok(t);
            }
        }

        let mut state = SearchState::new(self.params.initial_step);
        loop {
            if state.dt.abs() < self.params.min_step {
                let best = state.best.unwrap_or_else(|| Sample {
                    t: state.t,
                    offset: curve.x_at(state.t) - self.x,
                });
                return Err(self.not_found(
                    curve,
                    SearchFailure::StepFloor {
                        best_t: best.t,
                        residual: best.residual(),
                    },
                ));
            }
            match self.scan(curve, &mut state)? {
                LevelOutcome::Found(t) => return Ok(t),
                LevelOutcome::Refine { from } => {
                    state.t = from;
                    state.dt *= self.params.step_factor;
                }
                LevelOutcome::LeftDomain => {
                    return Err(self.not_found(curve, SearchFailure::LeftDomain));
                }
            }
        }
    }

    /// Walks from `state.t` in steps of `state.dt` until the target is hit,
    /// passed, or the walk leaves `[0, 1]`.
    fn scan(&self, curve: &Bezier, state: &mut SearchState) -> Result<LevelOutcome> {
        let start = state.t;
        let dt = state.dt;
        let boundary = if dt > 0.0 { 1.0 } else { 0.0 };
        let mut previous: Option<Sample> = None;
        let mut steps = 0.0;

        loop {
            let mut t = start + steps * dt;
            if !(0.0..=1.0).contains(&t) {
                // The grid may skip the boundary; sample it once so a root
                // between the last grid point and the end is not lost.
                match previous {
                    Some(prev) if (prev.t - boundary).abs() > f64::EPSILON => t = boundary,
                    _ => return Ok(LevelOutcome::LeftDomain),
                }
            }

            if state.evaluations >= self.params.max_evaluations {
                return Err(self.not_found(
                    curve,
                    SearchFailure::EvaluationLimit {
                        evaluations: state.evaluations,
                    },
                ));
            }
            let sample = Sample {
                t,
                offset: curve.x_at(t) - self.x,
            };
            state.evaluations += 1;
            state.record(sample);

            if sample.residual() < self.params.accuracy {
                return Ok(LevelOutcome::Found(t));
            }
            if let Some(prev) = previous {
                if prev.crossed(sample) {
                    return Ok(LevelOutcome::Refine { from: t });
                }
                if sample.residual() > prev.residual() {
                    return Ok(LevelOutcome::Refine { from: prev.t });
                }
            }
            previous = Some(sample);
            steps += 1.0;
        }
    }

    fn not_found(&self, curve: &Bezier, reason: SearchFailure) -> crate::BezolveError {
        debug!(x = self.x, ?reason, "no parameter found for x");
        SolverError::NotFound {
            x: self.x,
            control_points: curve.control_points().to_vec(),
            reason,
        }
        .into()
    }
}
