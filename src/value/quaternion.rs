use nalgebra::{Quaternion as NQuaternion, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// Quaternion rotation type (x, y, z, w)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// All-zero quaternion, the additive offset sentinel for relative
    /// looping (offsets are combined component-wise, not composed)
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
        } else {
            Self::identity()
        }
    }

    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Hamilton product `self * rhs`
    pub fn multiply(&self, rhs: &Quaternion) -> Self {
        let product = NQuaternion::from(*self) * NQuaternion::from(*rhs);
        Self::new(product.i, product.j, product.k, product.w)
    }

    /// Spherical linear interpolation toward `other`
    pub fn slerp(&self, other: &Quaternion, t: f64) -> Self {
        let q1 = UnitQuaternion::new_normalize(NQuaternion::from(*self));
        let q2 = UnitQuaternion::new_normalize(NQuaternion::from(*other));
        let slerped = q1.slerp(&q2, t);
        Self::new(slerped.i, slerped.j, slerped.k, slerped.w)
    }

    pub fn add(&self, other: &Quaternion) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.z * factor,
            self.w * factor,
        )
    }
}

impl From<Quaternion> for NQuaternion<f64> {
    fn from(q: Quaternion) -> Self {
        NQuaternion::new(q.w, q.x, q.y, q.z)
    }
}

impl From<NQuaternion<f64>> for Quaternion {
    fn from(q: NQuaternion<f64>) -> Self {
        Quaternion::new(q.i, q.j, q.k, q.w)
    }
}

impl From<UnitQuaternion<f64>> for Quaternion {
    fn from(q: UnitQuaternion<f64>) -> Self {
        Quaternion::new(q.i, q.j, q.k, q.w)
    }
}
