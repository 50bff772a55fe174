use serde::{Deserialize, Serialize};

use crate::value::color::{Color3, Color4};
use crate::value::matrix::Matrix;
use crate::value::quaternion::Quaternion;
use crate::value::size::Size;
use crate::value::vector2::Vector2;
use crate::value::vector3::Vector3;
use crate::TrackError;

/// Enum representing the kind of a `Value`. Closed set: every dispatch in
/// the engine matches exhaustively on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Scalar,
    Vector2,
    Vector3,
    Quaternion,
    Matrix,
    Color3,
    Color4,
    Size,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Scalar => "scalar",
            ValueKind::Vector2 => "vector2",
            ValueKind::Vector3 => "vector3",
            ValueKind::Quaternion => "quaternion",
            ValueKind::Matrix => "matrix",
            ValueKind::Color3 => "color3",
            ValueKind::Color4 => "color4",
            ValueKind::Size => "size",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "scalar" => Some(ValueKind::Scalar),
            "vector2" => Some(ValueKind::Vector2),
            "vector3" => Some(ValueKind::Vector3),
            "quaternion" => Some(ValueKind::Quaternion),
            "matrix" => Some(ValueKind::Matrix),
            "color3" => Some(ValueKind::Color3),
            "color4" => Some(ValueKind::Color4),
            "size" => Some(ValueKind::Size),
            _ => None,
        }
    }

    /// Number of float components in the wire encoding
    pub fn component_count(&self) -> usize {
        match self {
            ValueKind::Scalar => 1,
            ValueKind::Vector2 | ValueKind::Size => 2,
            ValueKind::Vector3 | ValueKind::Color3 => 3,
            ValueKind::Quaternion | ValueKind::Color4 => 4,
            ValueKind::Matrix => 16,
        }
    }
}

/// Primary value type covering every animatable category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Scalar(f64),
    Vector2(Vector2),
    Vector3(Vector3),
    Quaternion(Quaternion),
    Matrix(Matrix),
    Color3(Color3),
    Color4(Color4),
    Size(Size),
}

impl Value {
    /// Get the kind of this value as a `ValueKind` enum.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Vector2(_) => ValueKind::Vector2,
            Value::Vector3(_) => ValueKind::Vector3,
            Value::Quaternion(_) => ValueKind::Quaternion,
            Value::Matrix(_) => ValueKind::Matrix,
            Value::Color3(_) => ValueKind::Color3,
            Value::Color4(_) => ValueKind::Color4,
            Value::Size(_) => ValueKind::Size,
        }
    }

    /// The zero element for a kind, used as the loop-offset sentinel when no
    /// offset has been captured yet. Note the quaternion zero is (0,0,0,0),
    /// not identity: relative-loop offsets are combined component-wise.
    pub fn zero(kind: ValueKind) -> Value {
        match kind {
            ValueKind::Scalar => Value::Scalar(0.0),
            ValueKind::Vector2 => Value::Vector2(Vector2::zero()),
            ValueKind::Vector3 => Value::Vector3(Vector3::zero()),
            ValueKind::Quaternion => Value::Quaternion(Quaternion::zero()),
            ValueKind::Matrix => Value::Matrix(Matrix::zero()),
            ValueKind::Color3 => Value::Color3(Color3::black()),
            ValueKind::Color4 => Value::Color4(Color4::transparent()),
            ValueKind::Size => Value::Size(Size::zero()),
        }
    }

    /// Check if this value can be interpolated with another value
    pub fn same_kind(&self, other: &Value) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }

    /// Flatten into float components (wire order)
    pub fn as_components(&self) -> Vec<f64> {
        match self {
            Value::Scalar(f) => vec![*f],
            Value::Vector2(v) => vec![v.x, v.y],
            Value::Vector3(v) => vec![v.x, v.y, v.z],
            Value::Quaternion(q) => vec![q.x, q.y, q.z, q.w],
            Value::Matrix(m) => m.as_array().to_vec(),
            Value::Color3(c) => vec![c.r, c.g, c.b],
            Value::Color4(c) => vec![c.r, c.g, c.b, c.a],
            Value::Size(s) => vec![s.width, s.height],
        }
    }

    /// Rebuild a value from float components
    pub fn from_components(kind: ValueKind, components: &[f64]) -> Result<Value, TrackError> {
        if components.len() != kind.component_count() {
            return Err(TrackError::InvalidValue {
                reason: format!(
                    "{} requires {} components, got {}",
                    kind.name(),
                    kind.component_count(),
                    components.len()
                ),
            });
        }
        Ok(match kind {
            ValueKind::Scalar => Value::Scalar(components[0]),
            ValueKind::Vector2 => Value::Vector2(Vector2::new(components[0], components[1])),
            ValueKind::Vector3 => {
                Value::Vector3(Vector3::new(components[0], components[1], components[2]))
            }
            ValueKind::Quaternion => Value::Quaternion(Quaternion::new(
                components[0],
                components[1],
                components[2],
                components[3],
            )),
            ValueKind::Matrix => {
                let mut m = [0.0; 16];
                m.copy_from_slice(components);
                Value::Matrix(Matrix::from_array(m))
            }
            ValueKind::Color3 => {
                Value::Color3(Color3::new(components[0], components[1], components[2]))
            }
            ValueKind::Color4 => Value::Color4(Color4::new(
                components[0],
                components[1],
                components[2],
                components[3],
            )),
            ValueKind::Size => Value::Size(Size::new(components[0], components[1])),
        })
    }

    /// Scale every component, used for tangent frame-delta scaling
    pub fn scale(&self, factor: f64) -> Value {
        match self {
            Value::Scalar(f) => Value::Scalar(f * factor),
            Value::Vector2(v) => Value::Vector2(v.scale(factor)),
            Value::Vector3(v) => Value::Vector3(v.scale(factor)),
            Value::Quaternion(q) => Value::Quaternion(q.scale(factor)),
            Value::Matrix(m) => {
                let mut scaled = *m.as_array();
                for component in scaled.iter_mut() {
                    *component *= factor;
                }
                Value::Matrix(Matrix::from_array(scaled))
            }
            Value::Color3(c) => Value::Color3(c.scale(factor)),
            Value::Color4(c) => Value::Color4(c.scale(factor)),
            Value::Size(s) => Value::Size(s.scale(factor)),
        }
    }

    /// Relative-loop accumulation: `self + offset * factor`, component-wise
    /// for every kind. Matrix tracks ignore relative offsets and return the
    /// value unchanged.
    pub fn add_scaled(&self, offset: &Value, factor: f64) -> Result<Value, TrackError> {
        if !self.same_kind(offset) {
            return Err(TrackError::ValueKindMismatch {
                expected: self.kind(),
                actual: offset.kind(),
            });
        }
        match (self, offset) {
            (Value::Matrix(_), Value::Matrix(_)) => Ok(self.clone()),
            (Value::Quaternion(q), Value::Quaternion(o)) => {
                Ok(Value::Quaternion(q.add(&o.scale(factor))))
            }
            _ => {
                let components: Vec<f64> = self
                    .as_components()
                    .iter()
                    .zip(offset.as_components().iter())
                    .map(|(value, delta)| value + delta * factor)
                    .collect();
                Value::from_components(self.kind(), &components)
            }
        }
    }

    /// Component-wise subtraction for the additive categories that use it
    /// (everything except quaternion composition and matrix decomposition)
    pub fn component_sub(&self, other: &Value) -> Result<Value, TrackError> {
        if !self.same_kind(other) {
            return Err(TrackError::ValueKindMismatch {
                expected: self.kind(),
                actual: other.kind(),
            });
        }
        let components: Vec<f64> = self
            .as_components()
            .iter()
            .zip(other.as_components().iter())
            .map(|(a, b)| a - b)
            .collect();
        Value::from_components(self.kind(), &components)
    }
}

// Conversion implementations
impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

impl From<Vector2> for Value {
    fn from(value: Vector2) -> Self {
        Value::Vector2(value)
    }
}

impl From<Vector3> for Value {
    fn from(value: Vector3) -> Self {
        Value::Vector3(value)
    }
}

impl From<Quaternion> for Value {
    fn from(value: Quaternion) -> Self {
        Value::Quaternion(value)
    }
}

impl From<Matrix> for Value {
    fn from(value: Matrix) -> Self {
        Value::Matrix(value)
    }
}

impl From<Color3> for Value {
    fn from(value: Color3) -> Self {
        Value::Color3(value)
    }
}

impl From<Color4> for Value {
    fn from(value: Color4) -> Self {
        Value::Color4(value)
    }
}

impl From<Size> for Value {
    fn from(value: Size) -> Self {
        Value::Size(value)
    }
}

impl TryFrom<Value> for f64 {
    type Error = TrackError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Scalar(f) => Ok(f),
            _ => Err(TrackError::ValueKindMismatch {
                expected: ValueKind::Scalar,
                actual: value.kind(),
            }),
        }
    }
}

impl TryFrom<Value> for Vector3 {
    type Error = TrackError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Vector3(v) => Ok(v),
            _ => Err(TrackError::ValueKindMismatch {
                expected: ValueKind::Vector3,
                actual: value.kind(),
            }),
        }
    }
}

impl TryFrom<Value> for Quaternion {
    type Error = TrackError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Quaternion(q) => Ok(q),
            _ => Err(TrackError::ValueKindMismatch {
                expected: ValueKind::Quaternion,
                actual: value.kind(),
            }),
        }
    }
}
