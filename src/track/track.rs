use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::AnimationConfig;
use crate::easing::EasingFunction;
use crate::event::AnimationEvent;
use crate::track::evaluation::{self, EvaluationState, LoopMode};
use crate::track::keyframe::Keyframe;
use crate::track::range::AnimationRange;
use crate::value::{Value, ValueKind};
use crate::{Result, TrackError};

/// An animation track: the ordered keyframe sequence for one animatable
/// property, plus named ranges, frame-anchored events, and interpolation
/// metadata.
///
/// The track owns its keys and ranges; cloning deep-copies both. The key
/// array may be read concurrently by any number of evaluation states, but
/// the caller must serialize mutation (key insertion, range deletion,
/// additive re-basing) against in-flight evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationTrack {
    /// Human-readable name for this track
    pub name: String,
    /// Dotted path of the property this track drives (e.g.
    /// "transform.position"); resolved by the driver, never by this crate
    pub target_property: String,
    /// Authoring rate in frames per second. Informational only: evaluation
    /// takes frame numbers, not time.
    pub frame_per_second: f64,
    /// Default loop-mode for playbacks of this track
    pub loop_mode: LoopMode,
    /// Track-level easing, overridden by any per-key easing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<EasingFunction>,
    /// Driver hint: blend toward this track's output instead of snapping
    pub enable_blending: bool,
    /// Blend factor per frame when `enable_blending` is set
    pub blending_speed: f64,
    value_kind: ValueKind,
    keys: Vec<Keyframe>,
    ranges: HashMap<String, AnimationRange>,
    events: Vec<AnimationEvent>,
}

impl AnimationTrack {
    /// Create a new empty track
    pub fn new(
        name: impl Into<String>,
        target_property: impl Into<String>,
        frame_per_second: f64,
        value_kind: ValueKind,
    ) -> Self {
        Self {
            name: name.into(),
            target_property: target_property.into(),
            frame_per_second,
            loop_mode: LoopMode::default(),
            easing: None,
            enable_blending: false,
            blending_speed: 0.01,
            value_kind,
            keys: Vec::new(),
            ranges: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// The value kind every key of this track carries
    #[inline]
    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Replace the key list wholesale. The vector is taken as-is: no sort,
    /// no dedup, no kind validation. Use [`AnimationTrack::add_key`] for
    /// checked, ordered insertion.
    #[inline]
    pub fn set_keys(&mut self, keys: Vec<Keyframe>) {
        self.keys = keys;
    }

    /// The live key list. Callers must not assume immutability across
    /// mutation calls on the same track.
    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Mutable access to the live key list
    #[inline]
    pub fn keys_mut(&mut self) -> &mut Vec<Keyframe> {
        &mut self.keys
    }

    /// Insert a key in frame order, validating its value kind
    pub fn add_key(&mut self, key: Keyframe) -> Result<usize> {
        if key.value.kind() != self.value_kind {
            return Err(TrackError::ValueKindMismatch {
                expected: self.value_kind,
                actual: key.value.kind(),
            });
        }
        let index = self.keys.partition_point(|k| k.frame <= key.frame);
        self.keys.insert(index, key);
        Ok(index)
    }

    /// Highest frame over all keys, 0 when the track is empty
    pub fn highest_frame(&self) -> f64 {
        self.keys.iter().fold(0.0, |max, key| key.frame.max(max))
    }

    /// Insert a named range. Intentionally idempotent: an existing name is
    /// left untouched so that re-entrant deserialization cannot clobber it.
    pub fn create_range(&mut self, name: impl Into<String>, from: f64, to: f64) {
        self.ranges
            .entry(name.into())
            .or_insert(AnimationRange::new(from, to));
    }

    /// Remove a named range. When `delete_frames` is set, every key whose
    /// frame lies within `[from, to]` inclusive is removed as well.
    pub fn delete_range(&mut self, name: &str, delete_frames: bool) {
        let Some(range) = self.ranges.remove(name) else {
            return;
        };
        if delete_frames {
            let before = self.keys.len();
            self.keys.retain(|key| !range.contains(key.frame));
            log::debug!(
                "deleted range '{}' and {} keys in [{}, {}]",
                name,
                before - self.keys.len(),
                range.from,
                range.to
            );
        }
    }

    /// Look up a named range; `None` for a missing name, never an error
    #[inline]
    pub fn range(&self, name: &str) -> Option<&AnimationRange> {
        self.ranges.get(name)
    }

    /// All named ranges
    #[inline]
    pub fn ranges(&self) -> &HashMap<String, AnimationRange> {
        &self.ranges
    }

    /// Add an event, keeping the event list sorted ascending by frame
    pub fn add_event(&mut self, event: AnimationEvent) {
        let index = self.events.partition_point(|e| e.frame <= event.frame);
        self.events.insert(index, event);
    }

    /// Remove every event anchored at the given frame
    pub fn remove_events(&mut self, frame: f64) {
        self.events.retain(|event| event.frame != frame);
    }

    /// The event list, sorted ascending by frame
    #[inline]
    pub fn events(&self) -> &[AnimationEvent] {
        &self.events
    }

    /// Ensure a key exists at exactly `frame`, evaluating the current curve
    /// to synthesize one when absent, and return its index. Calling this
    /// for a frame that already has a key never duplicates it.
    pub fn create_key_for_frame(&mut self, frame: f64) -> Result<usize> {
        if self.keys.is_empty() {
            return Err(TrackError::NoKeys {
                track: self.name.clone(),
            });
        }

        let config = AnimationConfig::default();
        let mut state = EvaluationState::new(self.loop_mode);
        let (value, key) = evaluation::closest_key_sample(self, frame, &mut state, &config)?;

        match value {
            // Strictly inside a segment: insert right after the bracketing
            // start key.
            Some(value) => {
                let index = key as usize + 1;
                self.keys.insert(index, Keyframe::new(frame, value));
                Ok(index)
            }
            // Either a key already sits exactly at this frame, or the frame
            // falls outside the key range and clamps to an endpoint value.
            None => {
                if let Some(index) = self.keys.iter().position(|k| k.frame == frame) {
                    return Ok(index);
                }
                let clamped = if frame < self.keys[0].frame {
                    self.keys[0].value.clone()
                } else {
                    self.keys[self.keys.len() - 1].value.clone()
                };
                self.add_key(Keyframe::new(frame, clamped))
            }
        }
    }

    /// Evaluate this track at a frame with the default engine config
    #[inline]
    pub fn evaluate(&self, frame: f64, state: &mut EvaluationState) -> Result<Value> {
        evaluation::evaluate(self, frame, state, &AnimationConfig::default())
    }

    /// Evaluate this track at a frame under an explicit engine config
    #[inline]
    pub fn evaluate_with_config(
        &self,
        frame: f64,
        state: &mut EvaluationState,
        config: &AnimationConfig,
    ) -> Result<Value> {
        evaluation::evaluate(self, frame, state, config)
    }

    /// Rate of change at a frame via symmetric finite differences, in value
    /// units per frame. Matrix tracks are not differentiable and yield
    /// `None`.
    pub fn derivative_at_frame(
        &self,
        frame: f64,
        width: f64,
        config: &AnimationConfig,
    ) -> Result<Option<Value>> {
        if self.value_kind == ValueKind::Matrix {
            return Ok(None);
        }
        if width <= 0.0 || !width.is_finite() {
            return Err(TrackError::InvalidValue {
                reason: format!("derivative width must be positive and finite, got {width}"),
            });
        }

        let half = width / 2.0;
        let lowest = self.keys.first().map(|k| k.frame).unwrap_or(0.0);
        let highest = self.highest_frame();
        // Fall back to one-sided differences at the key-range boundaries.
        let (frame_before, frame_after) = if frame - half < lowest {
            (frame, frame + width)
        } else if frame + half > highest {
            (frame - width, frame)
        } else {
            (frame - half, frame + half)
        };

        let mut state = EvaluationState::new(LoopMode::Cycle);
        let before = evaluation::evaluate(self, frame_before, &mut state, config)?;
        state.reset();
        let after = evaluation::evaluate(self, frame_after, &mut state, config)?;

        Ok(Some(after.component_sub(&before)?.scale(1.0 / width)))
    }
}
