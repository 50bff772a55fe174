//! Evaluation cursor and loop-mode state machine.
//!
//! Evaluation is pull-based: every call recomputes the value from the key
//! list, and the only cached state is the bracketing key index inside the
//! caller-owned [`EvaluationState`]. Under monotonically increasing frame
//! queries the bracketing search is amortized O(1); an arbitrary jump
//! degrades to a linear re-scan, never worse than O(n).

use serde::{Deserialize, Serialize};

use crate::config::AnimationConfig;
use crate::interpolation::{interpolate_hermite, interpolate_linear};
use crate::track::keyframe::{KeyInterpolation, Keyframe};
use crate::track::track::AnimationTrack;
use crate::value::Value;
use crate::{Result, TrackError};

/// Policy governing how the evaluated value behaves across repeated
/// playback cycles. Only `Relative` and `RelativeFromCurrent` alter the raw
/// interpolated value (by adding `offset_value * repeat_count`); the two
/// differ in what the offset means to the driver, not in track math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    Relative,
    #[default]
    Cycle,
    Constant,
    Yoyo,
    RelativeFromCurrent,
}

/// Caller-owned cursor for one playing instance of a track.
///
/// Never share one state between two simultaneously-advancing playbacks:
/// the cached `key` index is what makes forward playback cheap, and two
/// interleaved frame sequences would thrash it. Reading the same immutable
/// track from many states concurrently is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationState {
    /// Last bracketing key index; may be stale between calls
    pub key: isize,
    /// Completed playback cycles, maintained by the driver
    pub repeat_count: u32,
    /// Loop-mode policy for this playback
    pub loop_mode: LoopMode,
    /// Per-cycle offset for the relative loop modes; a kind-specific zero
    /// is substituted when unset
    pub offset_value: Option<Value>,
    /// Value to freeze at once a constant-mode playback has completed a
    /// full pass
    pub high_limit_value: Option<Value>,
}

impl EvaluationState {
    #[inline]
    pub fn new(loop_mode: LoopMode) -> Self {
        Self {
            key: 0,
            repeat_count: 0,
            loop_mode,
            offset_value: None,
            high_limit_value: None,
        }
    }

    /// Rewind the cursor before a non-monotonic frame jump (seek, restart,
    /// or evaluating a different context)
    #[inline]
    pub fn reset(&mut self) {
        self.key = 0;
    }
}

impl Default for EvaluationState {
    fn default() -> Self {
        Self::new(LoopMode::default())
    }
}

/// Walk the cursor to the bracketing key for `current_frame` and persist it.
///
/// Returns -1 when the frame precedes every key; returns the last index
/// when the frame is at or past the final key.
fn locate(keys: &[Keyframe], current_frame: f64, state: &mut EvaluationState) -> isize {
    let last = keys.len() as isize - 1;
    // The cached index may be stale after key insertion or removal.
    let mut key = state.key.clamp(0, last);
    while key >= 0 && current_frame < keys[key as usize].frame {
        key -= 1;
    }
    while key + 1 <= last && current_frame >= keys[(key + 1) as usize].frame {
        key += 1;
    }
    state.key = key;
    key
}

/// Evaluate a track at a frame.
///
/// Frames outside the key range clamp to the first/last key's value; there
/// is no extrapolation. An empty key list is a precondition violation and
/// returns [`TrackError::NoKeys`] rather than a silent zero. `state` stays
/// well-formed after a failed call.
pub fn evaluate(
    track: &AnimationTrack,
    current_frame: f64,
    state: &mut EvaluationState,
    config: &AnimationConfig,
) -> Result<Value> {
    let keys = track.keys();
    if keys.is_empty() {
        return Err(TrackError::NoKeys {
            track: track.name.clone(),
        });
    }

    // A constant-mode playback that has completed a pass stays frozen at
    // the captured end value, skipping the key search entirely.
    if state.loop_mode == LoopMode::Constant && state.repeat_count > 0 {
        if let Some(high_limit) = &state.high_limit_value {
            return Ok(high_limit.clone());
        }
    }

    let key = locate(keys, current_frame, state);

    if key < 0 {
        return Ok(keys[0].value.clone());
    }
    let last = keys.len() - 1;
    if (key as usize) >= last {
        return Ok(keys[last].value.clone());
    }

    interpolate_segment(track, key as usize, current_frame, state, config)
}

/// Closest-key search used by key insertion: instead of clamping, signals
/// out-of-range frames and frames that already sit exactly on a key with
/// `None`, alongside the bracket index the cursor landed on.
pub(crate) fn closest_key_sample(
    track: &AnimationTrack,
    current_frame: f64,
    state: &mut EvaluationState,
    config: &AnimationConfig,
) -> Result<(Option<Value>, isize)> {
    let keys = track.keys();
    if keys.is_empty() {
        return Err(TrackError::NoKeys {
            track: track.name.clone(),
        });
    }

    let key = locate(keys, current_frame, state);
    let last = keys.len() - 1;
    if key < 0 || (key as usize) >= last {
        return Ok((None, key));
    }

    let start_key = &keys[key as usize];
    let end_key = &keys[key as usize + 1];
    if current_frame == start_key.frame || current_frame == end_key.frame {
        return Ok((None, key));
    }

    let value = interpolate_segment(track, key as usize, current_frame, state, config)?;
    Ok((Some(value), key))
}

/// Interpolate within the segment starting at `start_index`, then apply
/// loop-mode post-processing.
fn interpolate_segment(
    track: &AnimationTrack,
    start_index: usize,
    current_frame: f64,
    state: &EvaluationState,
    config: &AnimationConfig,
) -> Result<Value> {
    let keys = track.keys();
    let start_key = &keys[start_index];
    let end_key = &keys[start_index + 1];

    // Step holds the start value through the whole interval and switches
    // only at the interval boundary.
    if start_key.interpolation == Some(KeyInterpolation::Step) {
        return Ok(if end_key.frame <= current_frame {
            end_key.value.clone()
        } else {
            start_key.value.clone()
        });
    }

    let frame_delta = end_key.frame - start_key.frame;
    let mut gradient = (current_frame - start_key.frame) / frame_delta;
    if let Some(easing) = start_key.easing.as_ref().or(track.easing.as_ref()) {
        gradient = easing.ease(gradient);
    }

    // Matrix segments bypass the kernel dispatch: under the relative loop
    // modes the start value is returned unchanged (no offset is ever
    // applied to matrices), and otherwise interpolation happens only when
    // the config opts in.
    if let (Value::Matrix(start), Value::Matrix(end)) = (&start_key.value, &end_key.value) {
        let value = match state.loop_mode {
            LoopMode::Relative | LoopMode::RelativeFromCurrent => *start,
            _ if !config.allow_matrix_interpolation => *start,
            _ if config.use_matrix_decomposition => start.decompose_lerp(end, gradient),
            _ => start.lerp(end, gradient),
        };
        return Ok(Value::Matrix(value));
    }

    // Cubic only when this segment carries both tangents; availability is
    // decided per segment, not per track.
    let raw = match (&start_key.out_tangent, &end_key.in_tangent) {
        (Some(out_tangent), Some(in_tangent)) => interpolate_hermite(
            &start_key.value,
            &out_tangent.scale(frame_delta),
            &end_key.value,
            &in_tangent.scale(frame_delta),
            gradient,
        )?,
        _ => interpolate_linear(&start_key.value, &end_key.value, gradient)?,
    };

    match state.loop_mode {
        LoopMode::Cycle | LoopMode::Constant | LoopMode::Yoyo => Ok(raw),
        LoopMode::Relative | LoopMode::RelativeFromCurrent => {
            let offset = state
                .offset_value
                .clone()
                .unwrap_or_else(|| Value::zero(raw.kind()));
            raw.add_scaled(&offset, f64::from(state.repeat_count))
        }
    }
}
