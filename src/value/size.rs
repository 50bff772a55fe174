use serde::{Deserialize, Serialize};

/// Width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn add(&self, other: &Size) -> Self {
        Self::new(self.width + other.width, self.height + other.height)
    }

    pub fn sub(&self, other: &Size) -> Self {
        Self::new(self.width - other.width, self.height - other.height)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}
