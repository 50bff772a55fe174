use serde::{Deserialize, Serialize};

/// A named span of frames within a track. Weakly tied to key frame
/// numbers: deleting keys does not move ranges, and a range may cover
/// frames with no keys at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationRange {
    pub from: f64,
    pub to: f64,
}

impl AnimationRange {
    #[inline]
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    /// Check if a frame lies within this range (inclusive)
    #[inline]
    pub fn contains(&self, frame: f64) -> bool {
        frame >= self.from && frame <= self.to
    }
}
