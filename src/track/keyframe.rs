use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::value::Value;

/// Per-key interpolation override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyInterpolation {
    /// Blend toward the next key (the default when unset)
    Linear,
    /// Hold this key's value through the whole interval
    Step,
}

/// A keyframe in an animation track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Frame at which this key occurs
    pub frame: f64,
    /// Value at this key
    pub value: Value,
    /// Incoming tangent, per unit frame; the cursor scales it by the
    /// segment's frame delta before the Hermite blend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_tangent: Option<Value>,
    /// Outgoing tangent, per unit frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_tangent: Option<Value>,
    /// Interpolation override for the interval starting at this key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpolation: Option<KeyInterpolation>,
    /// Editor hint: both tangents move together
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_tangent: Option<bool>,
    /// Easing applied to this key's interval, overriding the track easing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<EasingFunction>,
}

impl Keyframe {
    /// Create a plain key with no tangents or overrides
    #[inline]
    pub fn new(frame: f64, value: Value) -> Self {
        Self {
            frame,
            value,
            in_tangent: None,
            out_tangent: None,
            interpolation: None,
            locked_tangent: None,
            easing: None,
        }
    }

    #[inline]
    pub fn with_tangents(mut self, in_tangent: Option<Value>, out_tangent: Option<Value>) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }

    #[inline]
    pub fn with_interpolation(mut self, interpolation: KeyInterpolation) -> Self {
        self.interpolation = Some(interpolation);
        self
    }

    #[inline]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = Some(easing);
        self
    }
}
