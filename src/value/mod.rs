//! Value types animatable by a track

pub mod color;
pub mod matrix;
pub mod quaternion;
pub mod size;
pub mod value_enum;
pub mod vector2;
pub mod vector3;

pub use color::{Color3, Color4};
pub use matrix::Matrix;
pub use quaternion::Quaternion;
pub use size::Size;
pub use value_enum::{Value, ValueKind};
pub use vector2::Vector2;
pub use vector3::Vector3;
