pub mod curve;

pub use curve::{Bezier, Curve, CurveDomain};
