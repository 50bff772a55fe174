use nalgebra::{Matrix3, Quaternion as NQuaternion, Rotation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::value::quaternion::Quaternion;
use crate::value::vector3::Vector3;

/// 4x4 transformation matrix, column-major storage with the translation in
/// elements 12..15
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub m: [f64; 16],
}

impl Matrix {
    pub fn from_array(m: [f64; 16]) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        let mut m = [0.0; 16];
        m[0] = 1.0;
        m[5] = 1.0;
        m[10] = 1.0;
        m[15] = 1.0;
        Self { m }
    }

    pub fn zero() -> Self {
        Self { m: [0.0; 16] }
    }

    pub fn as_array(&self) -> &[f64; 16] {
        &self.m
    }

    /// Component-wise linear blend of all 16 elements
    pub fn lerp(&self, other: &Matrix, gradient: f64) -> Self {
        let mut m = [0.0; 16];
        for (i, slot) in m.iter_mut().enumerate() {
            *slot = self.m[i] + (other.m[i] - self.m[i]) * gradient;
        }
        Self { m }
    }

    /// Split into (scale, rotation, position)
    pub fn decompose(&self) -> (Vector3, Quaternion, Vector3) {
        let position = Vector3::new(self.m[12], self.m[13], self.m[14]);
        let sx = Vector3::new(self.m[0], self.m[1], self.m[2]).length();
        let sy = Vector3::new(self.m[4], self.m[5], self.m[6]).length();
        let sz = Vector3::new(self.m[8], self.m[9], self.m[10]).length();
        let scale = Vector3::new(sx, sy, sz);

        if sx == 0.0 || sy == 0.0 || sz == 0.0 {
            return (scale, Quaternion::identity(), position);
        }

        // Basis columns with scale removed; Matrix3::new takes rows.
        let basis = Matrix3::new(
            self.m[0] / sx,
            self.m[4] / sy,
            self.m[8] / sz,
            self.m[1] / sx,
            self.m[5] / sy,
            self.m[9] / sz,
            self.m[2] / sx,
            self.m[6] / sy,
            self.m[10] / sz,
        );
        let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(basis));

        (scale, Quaternion::from(rotation), position)
    }

    /// Rebuild a matrix from (scale, rotation, position)
    pub fn compose(scale: &Vector3, rotation: &Quaternion, position: &Vector3) -> Self {
        let unit = UnitQuaternion::new_normalize(NQuaternion::from(*rotation));
        let mut homogeneous = unit.to_homogeneous();
        for (column, factor) in [(0, scale.x), (1, scale.y), (2, scale.z)] {
            let mut basis = homogeneous.column_mut(column);
            basis *= factor;
        }
        homogeneous[(0, 3)] = position.x;
        homogeneous[(1, 3)] = position.y;
        homogeneous[(2, 3)] = position.z;

        let mut m = [0.0; 16];
        m.copy_from_slice(homogeneous.as_slice());
        Self { m }
    }

    /// Decompose both endpoints, blend position/scale linearly and rotation
    /// spherically, then recompose. Slower than [`Matrix::lerp`] but stable
    /// for mixed rotation and scale.
    pub fn decompose_lerp(&self, other: &Matrix, gradient: f64) -> Self {
        let (start_scale, start_rotation, start_position) = self.decompose();
        let (end_scale, end_rotation, end_position) = other.decompose();

        let scale = Vector3::new(
            start_scale.x + (end_scale.x - start_scale.x) * gradient,
            start_scale.y + (end_scale.y - start_scale.y) * gradient,
            start_scale.z + (end_scale.z - start_scale.z) * gradient,
        );
        let position = Vector3::new(
            start_position.x + (end_position.x - start_position.x) * gradient,
            start_position.y + (end_position.y - start_position.y) * gradient,
            start_position.z + (end_position.z - start_position.z) * gradient,
        );
        let rotation = start_rotation.slerp(&end_rotation, gradient);

        Self::compose(&scale, &rotation, &position)
    }
}
