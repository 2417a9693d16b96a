mod approximate_parameter;
mod parameter_at_x;

pub use approximate_parameter::ApproximateParameterAtX;
pub use parameter_at_x::{ParameterAtX, SolverParams, ENDPOINT_TOLERANCE};
