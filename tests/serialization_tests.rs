use animation_tracks::serialization::{
    parse_track, parse_track_from_str, serialize_track, serialize_track_to_string,
};
use animation_tracks::{
    AnimationTrack, EvaluationState, KeyInterpolation, Keyframe, LoopMode, TrackError, Value,
    ValueKind, Vector3,
};
use approx::assert_abs_diff_eq;

fn vector3_track() -> AnimationTrack {
    let mut track = AnimationTrack::new("move", "transform.position", 60.0, ValueKind::Vector3);
    track.loop_mode = LoopMode::Cycle;
    track.set_keys(vec![
        Keyframe::new(0.0, Value::Vector3(Vector3::zero()))
            .with_tangents(None, Some(Value::Vector3(Vector3::new(0.5, 0.0, 0.0)))),
        Keyframe::new(10.0, Value::Vector3(Vector3::new(5.0, 1.0, -2.0))).with_tangents(
            Some(Value::Vector3(Vector3::new(0.2, 0.1, 0.0))),
            Some(Value::Vector3(Vector3::new(0.0, -0.1, 0.3))),
        ),
        Keyframe::new(20.0, Value::Vector3(Vector3::new(10.0, 0.0, 4.0)))
            .with_tangents(Some(Value::Vector3(Vector3::zero())), None),
    ]);
    track.create_range("span", 0.0, 20.0);
    track
}

#[test]
fn test_round_trip_preserves_evaluation() {
    let track = vector3_track();
    let parsed = parse_track(&serialize_track(&track)).unwrap();

    assert_eq!(parsed.value_kind(), ValueKind::Vector3);
    for i in 0..=10 {
        let frame = i as f64 * 2.0;
        let mut original_state = EvaluationState::default();
        let mut parsed_state = EvaluationState::default();
        let original = track.evaluate(frame, &mut original_state).unwrap();
        let reparsed = parsed.evaluate(frame, &mut parsed_state).unwrap();

        let (Value::Vector3(a), Value::Vector3(b)) = (original, reparsed) else {
            panic!("expected vectors");
        };
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-5);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-5);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-5);
    }
}

#[test]
fn test_round_trip_preserves_ranges_and_metadata() {
    let track = vector3_track();
    let parsed = parse_track(&serialize_track(&track)).unwrap();

    let range = parsed.range("span").unwrap();
    assert_eq!(range.from, 0.0);
    assert_eq!(range.to, 20.0);
    assert_eq!(parsed.name, "move");
    assert_eq!(parsed.target_property, "transform.position");
    assert_eq!(parsed.frame_per_second, 60.0);
    assert_eq!(parsed.loop_mode, LoopMode::Cycle);
}

#[test]
fn test_string_round_trip() {
    let track = vector3_track();
    let json = serialize_track_to_string(&track).unwrap();
    let parsed = parse_track_from_str(&json).unwrap();
    assert_eq!(parsed.keys(), track.keys());
}

#[test]
fn test_step_flag_round_trip() {
    let mut track = AnimationTrack::new("vis", "visibility", 30.0, ValueKind::Scalar);
    track.set_keys(vec![
        Keyframe::new(0.0, Value::Scalar(0.0)).with_interpolation(KeyInterpolation::Step),
        Keyframe::new(10.0, Value::Scalar(1.0)),
    ]);

    let parsed = parse_track(&serialize_track(&track)).unwrap();
    assert_eq!(
        parsed.keys()[0].interpolation,
        Some(KeyInterpolation::Step)
    );
    assert_eq!(parsed.keys()[1].interpolation, None);
}

#[test]
fn test_all_loop_modes_round_trip() {
    for loop_mode in [
        LoopMode::Relative,
        LoopMode::Cycle,
        LoopMode::Constant,
        LoopMode::Yoyo,
        LoopMode::RelativeFromCurrent,
    ] {
        let mut track = AnimationTrack::new("test", "test", 30.0, ValueKind::Scalar);
        track.loop_mode = loop_mode;
        track.set_keys(vec![Keyframe::new(0.0, Value::Scalar(0.0))]);
        let parsed = parse_track(&serialize_track(&track)).unwrap();
        assert_eq!(parsed.loop_mode, loop_mode);
    }
}

#[test]
fn test_quaternion_and_matrix_component_counts() {
    let mut track = AnimationTrack::new("rot", "rotation", 30.0, ValueKind::Quaternion);
    track.set_keys(vec![Keyframe::new(
        0.0,
        Value::Quaternion(animation_tracks::Quaternion::identity()),
    )]);
    let json = serialize_track(&track);
    assert_eq!(json["keys"][0]["values"][0].as_array().unwrap().len(), 4);

    let mut track = AnimationTrack::new("bone", "bone.matrix", 30.0, ValueKind::Matrix);
    track.set_keys(vec![Keyframe::new(
        0.0,
        Value::Matrix(animation_tracks::Matrix::identity()),
    )]);
    let json = serialize_track(&track);
    assert_eq!(json["keys"][0]["values"][0].as_array().unwrap().len(), 16);
    assert!(parse_track(&json).is_ok());
}

#[test]
fn test_missing_values_is_a_parse_error() {
    let json = serde_json::json!({
        "name": "bad",
        "property": "x",
        "framePerSecond": 30.0,
        "dataType": "scalar",
        "loopBehavior": "cycle",
        "enableBlending": false,
        "blendingSpeed": 0.01,
        "keys": [ { "frame": 0.0 } ],
        "ranges": [],
    });
    assert!(matches!(parse_track(&json), Err(TrackError::Parse { .. })));
}

#[test]
fn test_wrong_component_count_is_a_parse_error() {
    let json = serde_json::json!({
        "name": "bad",
        "property": "rotation",
        "framePerSecond": 30.0,
        "dataType": "quaternion",
        "loopBehavior": "cycle",
        "enableBlending": false,
        "blendingSpeed": 0.01,
        "keys": [ { "frame": 0.0, "values": [[0.0, 0.0, 1.0]] } ],
        "ranges": [],
    });
    assert!(matches!(parse_track(&json), Err(TrackError::Parse { .. })));
}

#[test]
fn test_gap_padding_with_out_tangent_only() {
    let mut track = AnimationTrack::new("test", "test", 30.0, ValueKind::Scalar);
    track.set_keys(vec![
        Keyframe::new(0.0, Value::Scalar(0.0)).with_tangents(None, Some(Value::Scalar(1.5))),
        Keyframe::new(10.0, Value::Scalar(5.0)),
    ]);

    let json = serialize_track(&track);
    let values = json["keys"][0]["values"].as_array().unwrap();
    // [value, null (absent in-tangent), outTangent]
    assert_eq!(values.len(), 3);
    assert!(values[1].is_null());
    assert_eq!(values[2], serde_json::json!(1.5));

    let parsed = parse_track(&json).unwrap();
    assert_eq!(parsed.keys()[0].in_tangent, None);
    assert_eq!(parsed.keys()[0].out_tangent, Some(Value::Scalar(1.5)));
}
