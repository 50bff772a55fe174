//! Pure interpolation kernels used by the evaluation cursor

pub mod functions;

pub use functions::{hermite_scalar, interpolate_hermite, interpolate_linear, lerp_scalar};
