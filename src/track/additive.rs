//! Additive re-basing: convert a track of absolute values into a track of
//! deltas relative to a reference value, so its output can be added on top
//! of another track's output (additive blending).
//!
//! This is a batch transform invoked once when a track is registered for
//! additive blending, not a per-frame operation.

use serde::{Deserialize, Serialize};

use crate::config::AnimationConfig;
use crate::track::evaluation::{self, EvaluationState};
use crate::track::track::AnimationTrack;
use crate::value::{Matrix, Quaternion, Value, ValueKind, Vector3};
use crate::Result;

/// Options for [`make_additive`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditiveOptions {
    /// Frame whose curve value becomes the subtraction reference
    pub reference_frame: f64,
    /// Named range selecting the key span to convert; takes priority over
    /// `from_frame`/`to_frame`
    pub range: Option<String>,
    /// Explicit span start, defaulting to the first key's frame
    pub from_frame: Option<f64>,
    /// Explicit span end, defaulting to the last key's frame
    pub to_frame: Option<f64>,
    /// Convert a clone and leave the source untouched
    pub clone_original: bool,
    /// Keep only the converted span and renumber its frames from zero
    pub clip_keys: bool,
}

impl Default for AdditiveOptions {
    fn default() -> Self {
        Self {
            reference_frame: 0.0,
            range: None,
            from_frame: None,
            to_frame: None,
            clone_original: false,
            clip_keys: false,
        }
    }
}

/// Reference value prepared for per-category subtraction
enum Reference {
    Plain(Value),
    Quaternion(Quaternion),
    Matrix {
        position: Vector3,
        scale: Vector3,
        rotation_conjugate: Quaternion,
    },
}

/// Convert a track into its additive (delta-from-reference) form.
///
/// Returns `Ok(Some(track))` with a converted clone when
/// `options.clone_original` is set (the source is untouched), or `Ok(None)`
/// after converting in place.
pub fn make_additive(
    track: &mut AnimationTrack,
    options: &AdditiveOptions,
    config: &AnimationConfig,
) -> Result<Option<AnimationTrack>> {
    if options.clone_original {
        let mut clone = track.clone();
        convert(&mut clone, options, config)?;
        Ok(Some(clone))
    } else {
        convert(track, options, config)?;
        Ok(None)
    }
}

impl AnimationTrack {
    /// In-place additive conversion; see [`make_additive`]
    pub fn make_additive(
        &mut self,
        options: &AdditiveOptions,
        config: &AnimationConfig,
    ) -> Result<()> {
        convert(self, options, config)
    }
}

fn convert(
    track: &mut AnimationTrack,
    options: &AdditiveOptions,
    config: &AnimationConfig,
) -> Result<()> {
    if track.keys().is_empty() {
        log::debug!("additive conversion of '{}' skipped: no keys", track.name);
        return Ok(());
    }

    // Span resolution: named range, then explicit frames, then the track's
    // natural first/last key frames.
    let first_frame = track.keys()[0].frame;
    let last_frame = track.keys()[track.keys().len() - 1].frame;
    let (from, to) = match options.range.as_ref().and_then(|name| track.range(name)) {
        Some(range) => (range.from, range.to),
        None => (
            options.from_frame.unwrap_or(first_frame),
            options.to_frame.unwrap_or(last_frame),
        ),
    };

    // Synthesize boundary keys so the subtraction below operates on a
    // closed, exactly-bounded key subset.
    let mut start_index = 0;
    if from != track.keys()[0].frame {
        start_index = track.create_key_for_frame(from)?;
    }
    let mut end_index = track.keys().len() - 1;
    if to != track.keys()[track.keys().len() - 1].frame {
        end_index = track.create_key_for_frame(to)?;
    }

    // Reference value: single key uses itself, frames outside the key range
    // clamp to an endpoint, anything else samples the curve.
    let keys = track.keys();
    let reference_value = if keys.len() == 1 {
        keys[0].value.clone()
    } else if options.reference_frame <= keys[0].frame {
        keys[0].value.clone()
    } else if options.reference_frame >= keys[keys.len() - 1].frame {
        keys[keys.len() - 1].value.clone()
    } else {
        let mut state = EvaluationState::new(track.loop_mode);
        evaluation::evaluate(track, options.reference_frame, &mut state, config)?
    };

    let reference = match reference_value {
        Value::Quaternion(q) => Reference::Quaternion(q.normalize().conjugate()),
        Value::Matrix(m) => {
            let (scale, rotation, position) = m.decompose();
            Reference::Matrix {
                position,
                scale,
                rotation_conjugate: rotation.normalize().conjugate(),
            }
        }
        value => Reference::Plain(value),
    };

    let clip = options.clip_keys;
    let frame_offset = if clip {
        track.keys()[start_index].frame
    } else {
        0.0
    };
    let first_key_value = track.keys()[0].value.clone();

    let mut clipped_keys = Vec::new();
    for index in start_index..=end_index {
        let mut key = track.keys()[index].clone();
        if clip {
            key.frame -= frame_offset;
        }

        // A boundary key synthesized from the first key's value was already
        // folded into the reference; re-subtracting it would double-count.
        // Scalars are excluded from this guard.
        let skip = index > start_index
            && key.value.kind() != ValueKind::Scalar
            && key.value == first_key_value;

        if !skip {
            key.value = subtract_reference(key.value, &reference)?;
        }

        if clip {
            clipped_keys.push(key);
        } else {
            track.keys_mut()[index] = key;
        }
    }

    if clip {
        track.set_keys(clipped_keys);
    }

    Ok(())
}

fn subtract_reference(value: Value, reference: &Reference) -> Result<Value> {
    match (value, reference) {
        (
            Value::Matrix(matrix),
            Reference::Matrix {
                position,
                scale,
                rotation_conjugate,
            },
        ) => {
            let (key_scale, key_rotation, key_position) = matrix.decompose();
            let delta_position = key_position.sub(position);
            let delta_scale = key_scale.divide(scale);
            let delta_rotation = rotation_conjugate.multiply(&key_rotation);
            Ok(Value::Matrix(Matrix::compose(
                &delta_scale,
                &delta_rotation,
                &delta_position,
            )))
        }
        (Value::Quaternion(quaternion), Reference::Quaternion(conjugate)) => {
            Ok(Value::Quaternion(conjugate.multiply(&quaternion)))
        }
        (value, Reference::Plain(plain)) => value.component_sub(plain),
        // Kind consistency within a track means the reference always pairs
        // with its own category; a mismatch is a corrupted track.
        (value, _) => Err(crate::TrackError::InvalidValue {
            reason: format!(
                "additive reference does not match key kind {:?}",
                value.kind()
            ),
        }),
    }
}
