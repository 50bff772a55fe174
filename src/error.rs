//! Error types for the track engine

use serde::{Deserialize, Serialize};

use crate::value::ValueKind;

/// Comprehensive error type for track operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TrackError {
    /// A track with no keyframes was evaluated
    #[error("Track has no keys: {track}")]
    NoKeys { track: String },

    /// Value kind mismatch between keys or operands
    #[error("Value kind mismatch: expected {expected:?}, got {actual:?}")]
    ValueKindMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Interpolation mode not defined for a value kind
    #[error("Interpolation '{function}' is not defined for {kind:?}")]
    UnsupportedInterpolation { kind: ValueKind, function: String },

    /// Invalid value
    #[error("Invalid value: {reason}")]
    InvalidValue { reason: String },

    /// Malformed serialized track data
    #[error("Parse error: {reason}")]
    Parse { reason: String },
}

impl TrackError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NoKeys { .. } => "precondition",
            Self::ValueKindMismatch { .. } | Self::InvalidValue { .. } => "validation",
            Self::UnsupportedInterpolation { .. } => "interpolation",
            Self::Parse { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for TrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}
