//! Configuration for the evaluation engine

use serde::{Deserialize, Serialize};

/// Caller-owned evaluation policy, passed by reference into every evaluate
/// call. There is no module-level global: two drivers with different matrix
/// policies can evaluate concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Interpolate matrix tracks at all. When disabled, a matrix segment
    /// evaluates to its start key's value regardless of gradient.
    pub allow_matrix_interpolation: bool,
    /// Use the decompose/slerp/recompose path instead of a component-wise
    /// lerp. Slower, but stable for mixed rotation and scale.
    pub use_matrix_decomposition: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            allow_matrix_interpolation: false,
            use_matrix_decomposition: false,
        }
    }
}

impl AnimationConfig {
    /// Enable or disable matrix interpolation
    #[inline]
    pub fn with_matrix_interpolation(mut self, enabled: bool) -> Self {
        self.allow_matrix_interpolation = enabled;
        self
    }

    /// Enable or disable the decomposition path for matrix interpolation
    #[inline]
    pub fn with_matrix_decomposition(mut self, enabled: bool) -> Self {
        self.use_matrix_decomposition = enabled;
        self
    }
}
