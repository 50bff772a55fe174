//! Frame-anchored track events.
//!
//! Events are carried by a track, kept sorted by frame, and consumed by the
//! driver during playback; the evaluation core never fires them.

use serde::{Deserialize, Serialize};

/// An event anchored to a track frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationEvent {
    /// Frame at which the driver should fire this event
    pub frame: f64,
    /// Driver-defined action name
    pub name: String,
    /// Fire at most once across repeated playback cycles
    pub only_once: bool,
}

impl AnimationEvent {
    #[inline]
    pub fn new(frame: f64, name: impl Into<String>) -> Self {
        Self {
            frame,
            name: name.into(),
            only_once: false,
        }
    }

    #[inline]
    pub fn with_only_once(mut self, only_once: bool) -> Self {
        self.only_once = only_once;
        self
    }
}
