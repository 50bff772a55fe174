//! Legacy nested-array wire format for tracks.
//!
//! The wire shape is `{ name, property, framePerSecond, dataType,
//! loopBehavior, enableBlending, blendingSpeed, keys, ranges }` where each
//! key packs its payload as `values: [value, inTangent?, outTangent?,
//! interpolation?]`. Scalars encode components as bare numbers, every other
//! kind as arrays. When a later optional field is present without an
//! earlier one, the gap is padded with an explicit `null`. Events and
//! easing are runtime-only and not part of the wire shape.
//!
//! Validation happens entirely at this boundary: the evaluation core never
//! sees malformed data.

use serde_json::{json, Map, Value as JsonValue};

use crate::track::{AnimationTrack, KeyInterpolation, Keyframe, LoopMode};
use crate::value::{Value, ValueKind};
use crate::{Result, TrackError};

fn loop_mode_name(mode: LoopMode) -> &'static str {
    match mode {
        LoopMode::Relative => "relative",
        LoopMode::Cycle => "cycle",
        LoopMode::Constant => "constant",
        LoopMode::Yoyo => "yoyo",
        LoopMode::RelativeFromCurrent => "relative_from_current",
    }
}

fn loop_mode_from_name(name: &str) -> Option<LoopMode> {
    match name {
        "relative" => Some(LoopMode::Relative),
        "cycle" => Some(LoopMode::Cycle),
        "constant" => Some(LoopMode::Constant),
        "yoyo" => Some(LoopMode::Yoyo),
        "relative_from_current" => Some(LoopMode::RelativeFromCurrent),
        _ => None,
    }
}

fn parse_error(reason: impl Into<String>) -> TrackError {
    TrackError::Parse {
        reason: reason.into(),
    }
}

/// Convert a track to its plain wire representation
pub fn serialize_track(track: &AnimationTrack) -> JsonValue {
    let keys: Vec<JsonValue> = track.keys().iter().map(serialize_key).collect();

    let mut ranges: Vec<_> = track.ranges().iter().collect();
    ranges.sort_by(|a, b| a.0.cmp(b.0));
    let ranges: Vec<JsonValue> = ranges
        .into_iter()
        .map(|(name, range)| json!({ "name": name, "from": range.from, "to": range.to }))
        .collect();

    json!({
        "name": track.name,
        "property": track.target_property,
        "framePerSecond": track.frame_per_second,
        "dataType": track.value_kind().name(),
        "loopBehavior": loop_mode_name(track.loop_mode),
        "enableBlending": track.enable_blending,
        "blendingSpeed": track.blending_speed,
        "keys": keys,
        "ranges": ranges,
    })
}

/// Convert a track to a wire-format JSON string
pub fn serialize_track_to_string(track: &AnimationTrack) -> Result<String> {
    Ok(serde_json::to_string(&serialize_track(track))?)
}

fn serialize_value(value: &Value) -> JsonValue {
    match value {
        Value::Scalar(f) => json!(f),
        _ => json!(value.as_components()),
    }
}

fn serialize_key(key: &Keyframe) -> JsonValue {
    let step = key.interpolation == Some(KeyInterpolation::Step);

    let mut values = vec![serialize_value(&key.value)];
    if let Some(tangent) = &key.in_tangent {
        values.push(serialize_value(tangent));
    } else if key.out_tangent.is_some() || step {
        values.push(JsonValue::Null);
    }
    if let Some(tangent) = &key.out_tangent {
        values.push(serialize_value(tangent));
    } else if step {
        values.push(JsonValue::Null);
    }
    if step {
        values.push(json!(1));
    }

    json!({ "frame": key.frame, "values": values })
}

/// Parse a track from its plain wire representation
pub fn parse_track(json: &JsonValue) -> Result<AnimationTrack> {
    let object = json
        .as_object()
        .ok_or_else(|| parse_error("track must be an object"))?;

    let name = field_str(object, "name")?;
    let property = field_str(object, "property")?;
    let frame_per_second = field_f64(object, "framePerSecond")?;
    let data_type = field_str(object, "dataType")?;
    let kind = ValueKind::from_name(data_type)
        .ok_or_else(|| parse_error(format!("unknown dataType '{data_type}'")))?;

    let mut track = AnimationTrack::new(name, property, frame_per_second, kind);

    track.loop_mode = match object.get("loopBehavior") {
        None => LoopMode::default(),
        Some(value) => value
            .as_str()
            .and_then(loop_mode_from_name)
            .ok_or_else(|| parse_error(format!("unknown loopBehavior '{value}'")))?,
    };
    track.enable_blending = object
        .get("enableBlending")
        .and_then(JsonValue::as_bool)
        .unwrap_or(false);
    track.blending_speed = object
        .get("blendingSpeed")
        .and_then(JsonValue::as_f64)
        .unwrap_or(0.01);

    let key_entries = object
        .get("keys")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| parse_error("missing keys array"))?;
    let mut keys = Vec::with_capacity(key_entries.len());
    for entry in key_entries {
        keys.push(parse_key(kind, entry)?);
    }
    if keys.is_empty() {
        log::warn!("parsed track '{}' has no keys", track.name);
    }
    track.set_keys(keys);

    if let Some(range_entries) = object.get("ranges").and_then(JsonValue::as_array) {
        for entry in range_entries {
            let range = entry
                .as_object()
                .ok_or_else(|| parse_error("range must be an object"))?;
            track.create_range(
                field_str(range, "name")?,
                field_f64(range, "from")?,
                field_f64(range, "to")?,
            );
        }
    }

    Ok(track)
}

/// Parse a track from a wire-format JSON string
pub fn parse_track_from_str(json: &str) -> Result<AnimationTrack> {
    let value: JsonValue = serde_json::from_str(json)?;
    parse_track(&value)
}

fn field_str<'a>(object: &'a Map<String, JsonValue>, field: &str) -> Result<&'a str> {
    object
        .get(field)
        .and_then(JsonValue::as_str)
        .ok_or_else(|| parse_error(format!("missing or non-string field '{field}'")))
}

fn field_f64(object: &Map<String, JsonValue>, field: &str) -> Result<f64> {
    object
        .get(field)
        .and_then(JsonValue::as_f64)
        .ok_or_else(|| parse_error(format!("missing or non-numeric field '{field}'")))
}

fn parse_key(kind: ValueKind, entry: &JsonValue) -> Result<Keyframe> {
    let object = entry
        .as_object()
        .ok_or_else(|| parse_error("key must be an object"))?;
    let frame = field_f64(object, "frame")?;
    let values = object
        .get("values")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| parse_error("key missing values array"))?;
    if values.is_empty() {
        return Err(parse_error(format!("key at frame {frame} has empty values")));
    }

    let value = decode_value(kind, &values[0])?;
    let in_tangent = decode_optional_value(kind, values.get(1))?;
    let out_tangent = decode_optional_value(kind, values.get(2))?;
    let interpolation = match values.get(3) {
        None | Some(JsonValue::Null) => None,
        Some(flag) => match flag.as_u64() {
            Some(0) => None,
            Some(1) => Some(KeyInterpolation::Step),
            _ => {
                return Err(parse_error(format!(
                    "invalid interpolation flag {flag} at frame {frame}"
                )))
            }
        },
    };

    Ok(Keyframe {
        frame,
        value,
        in_tangent,
        out_tangent,
        interpolation,
        locked_tangent: None,
        easing: None,
    })
}

fn decode_optional_value(kind: ValueKind, element: Option<&JsonValue>) -> Result<Option<Value>> {
    match element {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => Ok(Some(decode_value(kind, value)?)),
    }
}

fn decode_value(kind: ValueKind, element: &JsonValue) -> Result<Value> {
    match kind {
        ValueKind::Scalar => element
            .as_f64()
            .map(Value::Scalar)
            .ok_or_else(|| parse_error(format!("expected number, got {element}"))),
        _ => {
            let array = element
                .as_array()
                .ok_or_else(|| parse_error(format!("expected component array, got {element}")))?;
            let components = array
                .iter()
                .map(|component| {
                    component
                        .as_f64()
                        .ok_or_else(|| parse_error(format!("non-numeric component {component}")))
                })
                .collect::<Result<Vec<f64>>>()?;
            Value::from_components(kind, &components).map_err(|_| {
                parse_error(format!(
                    "{} requires {} components, got {}",
                    kind.name(),
                    kind.component_count(),
                    components.len()
                ))
            })
        }
    }
}
