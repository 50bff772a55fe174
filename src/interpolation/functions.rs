//! Linear and cubic Hermite interpolation per value kind.
//!
//! Gradients are not clamped here: callers apply easing and clamping policy
//! before dispatching, and extrapolation (gradient outside [0, 1]) must
//! still produce a well-defined affine blend.
//!
//! Coverage gaps are intentional and mirror the engine's policy: Size has
//! no Hermite variant and Matrix has no per-component entry at all (the
//! cursor handles matrices through its own special case).

use crate::value::{Value, ValueKind};
use crate::{Result, TrackError};

/// Affine blend between two scalars
#[inline]
pub fn lerp_scalar(start: f64, end: f64, gradient: f64) -> f64 {
    start + (end - start) * gradient
}

/// 3rd-order Hermite basis over one segment. Tangents are expected to be
/// pre-scaled by the segment's frame delta.
#[inline]
pub fn hermite_scalar(value1: f64, tangent1: f64, value2: f64, tangent2: f64, gradient: f64) -> f64 {
    let squared = gradient * gradient;
    let cubed = gradient * squared;
    let part1 = 2.0 * cubed - 3.0 * squared + 1.0;
    let part2 = -2.0 * cubed + 3.0 * squared;
    let part3 = cubed - 2.0 * squared + gradient;
    let part4 = cubed - squared;

    value1 * part1 + value2 * part2 + tangent1 * part3 + tangent2 * part4
}

/// Linear interpolation dispatched over the closed value kind set.
///
/// Quaternions blend spherically; all remaining kinds blend component-wise.
/// Matrix has no entry here.
pub fn interpolate_linear(start: &Value, end: &Value, gradient: f64) -> Result<Value> {
    if !start.same_kind(end) {
        return Err(TrackError::ValueKindMismatch {
            expected: start.kind(),
            actual: end.kind(),
        });
    }

    match (start, end) {
        (Value::Quaternion(a), Value::Quaternion(b)) => {
            Ok(Value::Quaternion(a.slerp(b, gradient)))
        }
        (Value::Matrix(_), Value::Matrix(_)) => Err(TrackError::UnsupportedInterpolation {
            kind: ValueKind::Matrix,
            function: "lerp".to_string(),
        }),
        _ => {
            let components: Vec<f64> = start
                .as_components()
                .iter()
                .zip(end.as_components().iter())
                .map(|(s, e)| lerp_scalar(*s, *e, gradient))
                .collect();
            Value::from_components(start.kind(), &components)
        }
    }
}

/// Cubic Hermite interpolation dispatched over the closed value kind set.
///
/// Applied component-wise; the quaternion result is re-normalized since a
/// component Hermite does not preserve unit length. Size and Matrix have no
/// entry.
pub fn interpolate_hermite(
    start: &Value,
    out_tangent: &Value,
    end: &Value,
    in_tangent: &Value,
    gradient: f64,
) -> Result<Value> {
    if !start.same_kind(end) {
        return Err(TrackError::ValueKindMismatch {
            expected: start.kind(),
            actual: end.kind(),
        });
    }
    if !start.same_kind(out_tangent) || !start.same_kind(in_tangent) {
        return Err(TrackError::ValueKindMismatch {
            expected: start.kind(),
            actual: if start.same_kind(out_tangent) {
                in_tangent.kind()
            } else {
                out_tangent.kind()
            },
        });
    }

    match start.kind() {
        ValueKind::Size => Err(TrackError::UnsupportedInterpolation {
            kind: ValueKind::Size,
            function: "hermite".to_string(),
        }),
        ValueKind::Matrix => Err(TrackError::UnsupportedInterpolation {
            kind: ValueKind::Matrix,
            function: "hermite".to_string(),
        }),
        kind => {
            let components: Vec<f64> = start
                .as_components()
                .iter()
                .zip(out_tangent.as_components().iter())
                .zip(end.as_components().iter())
                .zip(in_tangent.as_components().iter())
                .map(|(((v1, t1), v2), t2)| hermite_scalar(*v1, *t1, *v2, *t2, gradient))
                .collect();
            let value = Value::from_components(kind, &components)?;
            if let Value::Quaternion(q) = value {
                Ok(Value::Quaternion(q.normalize()))
            } else {
                Ok(value)
            }
        }
    }
}
