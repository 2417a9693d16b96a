//! Samples a cubic Bezier curve and inverts a handful of x values.
//!
//! Usage:
//! ```text
//! cargo run --example sample
//! RUST_LOG=bezolve=trace cargo run --example sample
//! ```

use bezolve::geometry::{Bezier, Curve};
use bezolve::math::Point2;
use bezolve::operations::query::{ApproximateParameterAtX, ParameterAtX, SolverParams};
use bezolve::tessellation::{TessellateCurve, TessellationParams};
use bezolve::BezolveError;

fn main() -> Result<(), BezolveError> {
    // Default: WARN for everything, INFO for bezolve.
    // Override with RUST_LOG env var (e.g. RUST_LOG=bezolve=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("bezolve=info".parse().unwrap_or_default())
        .add_directive("sample=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let curve = Bezier::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(5.0, 0.0),
        Point2::new(5.0, 10.0),
        Point2::new(10.0, 10.0),
    ])?;

    for (i, p) in curve.samples(10).enumerate() {
        tracing::info!(i, x = p.x, y = p.y, "sample");
    }

    let polyline = TessellateCurve::new(TessellationParams::default()).execute(&curve)?;
    if let Some(bounds) = polyline.bounds() {
        tracing::info!(
            vertices = polyline.points.len(),
            length = polyline.length(),
            min = ?bounds.min,
            max = ?bounds.max,
            "tessellated"
        );
    }

    let params = SolverParams::default()
        .with_initial_step(0.01)
        .with_accuracy(1e-8);
    for x in [0.0, 2.5, 5.0, 7.5, 10.0, 11.0] {
        match ParameterAtX::new(x).with_params(params).execute(&curve) {
            Ok(t) => {
                let rough = ApproximateParameterAtX::new(x).execute(&curve)?;
                let p = curve.evaluate(t)?;
                tracing::info!(x, t, rough, y = p.y, "inverted");
            }
            Err(err) if err.is_not_found() => tracing::warn!(x, %err, "x is not on the curve"),
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
