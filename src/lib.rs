//! Animation Tracks Core
//!
//! Keyframe track storage and per-frame evaluation for real-time animation.
//! A track owns an ordered list of keyframes for one animatable property;
//! drivers evaluate it once per rendered frame through a small caller-owned
//! cursor that keeps the bracketing search amortized O(1) under forward
//! playback.

pub mod config;
pub mod easing;
pub mod error;
pub mod event;
pub mod interpolation;
pub mod serialization;
pub mod track;
pub mod value;

// Re-export common types for convenience
pub use config::AnimationConfig;
pub use easing::EasingFunction;
pub use error::TrackError;
pub use event::AnimationEvent;
pub use track::{
    make_additive, AdditiveOptions, AnimationRange, AnimationTrack, EvaluationState,
    KeyInterpolation, Keyframe, LoopMode,
};
pub use value::{Color3, Color4, Matrix, Quaternion, Size, Value, ValueKind, Vector2, Vector3};

/// Animation tracks result type
pub type Result<T> = core::result::Result<T, TrackError>;
