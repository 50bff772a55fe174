use animation_tracks::{
    AnimationConfig, AnimationTrack, EvaluationState, KeyInterpolation, Keyframe, LoopMode, Matrix,
    TrackError, Value, ValueKind, Vector3,
};

fn scalar_track(keys: &[(f64, f64)]) -> AnimationTrack {
    let mut track = AnimationTrack::new("test", "test", 30.0, ValueKind::Scalar);
    track.set_keys(
        keys.iter()
            .map(|(frame, value)| Keyframe::new(*frame, Value::Scalar(*value)))
            .collect(),
    );
    track
}

fn as_scalar(value: Value) -> f64 {
    match value {
        Value::Scalar(f) => f,
        other => panic!("expected scalar, got {:?}", other.kind()),
    }
}

#[test]
fn test_linear_midpoint() {
    let track = scalar_track(&[(0.0, 0.0), (30.0, 10.0)]);
    let mut state = EvaluationState::new(LoopMode::Cycle);
    let value = track.evaluate(15.0, &mut state).unwrap();
    assert_eq!(as_scalar(value), 5.0);
}

#[test]
fn test_hermite_zero_tangents_matches_linear_midpoint() {
    let mut track = AnimationTrack::new("test", "test", 30.0, ValueKind::Scalar);
    track.set_keys(vec![
        Keyframe::new(0.0, Value::Scalar(0.0)).with_tangents(None, Some(Value::Scalar(0.0))),
        Keyframe::new(30.0, Value::Scalar(10.0)).with_tangents(Some(Value::Scalar(0.0)), None),
    ]);
    let mut state = EvaluationState::new(LoopMode::Cycle);
    let value = track.evaluate(15.0, &mut state).unwrap();
    assert!((as_scalar(value) - 5.0).abs() < 1e-12);
}

#[test]
fn test_boundary_clamp() {
    let track = scalar_track(&[(10.0, 3.0), (20.0, 7.0)]);
    let mut state = EvaluationState::default();
    assert_eq!(as_scalar(track.evaluate(-5.0, &mut state).unwrap()), 3.0);
    state.reset();
    assert_eq!(as_scalar(track.evaluate(0.0, &mut state).unwrap()), 3.0);
    state.reset();
    assert_eq!(as_scalar(track.evaluate(25.0, &mut state).unwrap()), 7.0);
    state.reset();
    assert_eq!(as_scalar(track.evaluate(1000.0, &mut state).unwrap()), 7.0);
}

#[test]
fn test_exact_key_identity() {
    let keys = [(0.0, 1.0), (7.5, -2.0), (12.0, 4.0), (30.0, 9.0)];
    let track = scalar_track(&keys);
    for (frame, expected) in keys {
        let mut state = EvaluationState::default();
        assert_eq!(as_scalar(track.evaluate(frame, &mut state).unwrap()), expected);
    }
}

#[test]
fn test_step_holds_start_value() {
    let mut track = AnimationTrack::new("test", "test", 30.0, ValueKind::Scalar);
    track.set_keys(vec![
        Keyframe::new(0.0, Value::Scalar(1.0)).with_interpolation(KeyInterpolation::Step),
        Keyframe::new(10.0, Value::Scalar(2.0)),
    ]);

    for frame in [0.0, 0.1, 5.0, 9.999] {
        let mut state = EvaluationState::default();
        assert_eq!(as_scalar(track.evaluate(frame, &mut state).unwrap()), 1.0);
    }
    for frame in [10.0, 10.001, 50.0] {
        let mut state = EvaluationState::default();
        assert_eq!(as_scalar(track.evaluate(frame, &mut state).unwrap()), 2.0);
    }
}

#[test]
fn test_monotonic_cursor_reuse_matches_fresh_state() {
    let track = scalar_track(&[(0.0, 0.0), (5.0, 2.0), (12.0, -1.0), (20.0, 8.0), (30.0, 3.0)]);
    let frames = [0.0, 1.0, 4.9, 5.0, 8.0, 11.0, 15.5, 19.9, 20.0, 25.0, 29.0, 30.0, 35.0];

    let mut shared = EvaluationState::default();
    for frame in frames {
        let reused = track.evaluate(frame, &mut shared).unwrap();
        let mut fresh = EvaluationState::default();
        let independent = track.evaluate(frame, &mut fresh).unwrap();
        assert_eq!(reused, independent, "divergence at frame {frame}");
    }
}

#[test]
fn test_backward_jump_recovers() {
    let track = scalar_track(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)]);
    let mut state = EvaluationState::default();
    assert_eq!(as_scalar(track.evaluate(18.0, &mut state).unwrap()), 2.0);
    // Cursor is sitting on the last segment; a jump backwards must rescan.
    assert_eq!(as_scalar(track.evaluate(2.0, &mut state).unwrap()), 2.0);
}

#[test]
fn test_relative_loop_adds_offset_per_repeat() {
    let track = scalar_track(&[(0.0, 0.0), (30.0, 10.0)]);
    let mut state = EvaluationState::new(LoopMode::Relative);
    state.offset_value = Some(Value::Scalar(10.0));
    state.repeat_count = 2;
    assert_eq!(as_scalar(track.evaluate(15.0, &mut state).unwrap()), 25.0);
}

#[test]
fn test_relative_loop_without_offset_uses_zero() {
    let track = scalar_track(&[(0.0, 0.0), (30.0, 10.0)]);
    let mut state = EvaluationState::new(LoopMode::RelativeFromCurrent);
    state.repeat_count = 5;
    assert_eq!(as_scalar(track.evaluate(15.0, &mut state).unwrap()), 5.0);
}

#[test]
fn test_constant_loop_freezes_at_high_limit() {
    let track = scalar_track(&[(0.0, 0.0), (30.0, 10.0)]);
    let mut state = EvaluationState::new(LoopMode::Constant);
    state.repeat_count = 1;
    state.high_limit_value = Some(Value::Scalar(42.0));
    assert_eq!(as_scalar(track.evaluate(15.0, &mut state).unwrap()), 42.0);
    // Without a captured high limit the call falls through to the curve.
    state.high_limit_value = None;
    assert_eq!(as_scalar(track.evaluate(15.0, &mut state).unwrap()), 5.0);
}

#[test]
fn test_yoyo_returns_raw_value() {
    let track = scalar_track(&[(0.0, 0.0), (30.0, 10.0)]);
    let mut state = EvaluationState::new(LoopMode::Yoyo);
    state.repeat_count = 3;
    assert_eq!(as_scalar(track.evaluate(15.0, &mut state).unwrap()), 5.0);
}

#[test]
fn test_per_key_easing_overrides_track_easing() {
    use animation_tracks::EasingFunction;

    let mut track = scalar_track(&[(0.0, 0.0), (30.0, 10.0)]);
    track.easing = Some(EasingFunction::EaseIn);
    let mut keys = track.keys().to_vec();
    keys[0].easing = Some(EasingFunction::EaseOut);
    track.set_keys(keys);

    let mut state = EvaluationState::default();
    // EaseOut(0.5) = 0.75, so the midpoint lands at 7.5 rather than the
    // EaseIn result of 2.5.
    assert_eq!(as_scalar(track.evaluate(15.0, &mut state).unwrap()), 7.5);
}

#[test]
fn test_empty_track_is_an_error() {
    let track = AnimationTrack::new("empty", "test", 30.0, ValueKind::Scalar);
    let mut state = EvaluationState::default();
    assert!(matches!(
        track.evaluate(0.0, &mut state),
        Err(TrackError::NoKeys { .. })
    ));
    // The cursor survives a failed call.
    assert_eq!(state, EvaluationState::default());
}

fn matrix_track() -> AnimationTrack {
    let mut track = AnimationTrack::new("bone", "bone.matrix", 30.0, ValueKind::Matrix);
    let start = Matrix::identity();
    let end = Matrix::compose(
        &Vector3::one(),
        &animation_tracks::Quaternion::identity(),
        &Vector3::new(10.0, 0.0, 0.0),
    );
    track.set_keys(vec![
        Keyframe::new(0.0, Value::Matrix(start)),
        Keyframe::new(10.0, Value::Matrix(end)),
    ]);
    track
}

#[test]
fn test_matrix_interpolation_requires_opt_in() {
    let track = matrix_track();
    let mut state = EvaluationState::default();
    let value = track.evaluate(5.0, &mut state).unwrap();
    assert_eq!(value, track.keys()[0].value);
}

#[test]
fn test_matrix_lerp_when_enabled() {
    let track = matrix_track();
    let config = AnimationConfig::default().with_matrix_interpolation(true);
    let mut state = EvaluationState::default();
    let value = track.evaluate_with_config(5.0, &mut state, &config).unwrap();
    let Value::Matrix(matrix) = value else {
        panic!("expected matrix");
    };
    let (_, _, position) = matrix.decompose();
    assert!((position.x - 5.0).abs() < 1e-9);
}

#[test]
fn test_matrix_decompose_lerp_when_enabled() {
    let track = matrix_track();
    let config = AnimationConfig::default()
        .with_matrix_interpolation(true)
        .with_matrix_decomposition(true);
    let mut state = EvaluationState::default();
    let value = track.evaluate_with_config(5.0, &mut state, &config).unwrap();
    let Value::Matrix(matrix) = value else {
        panic!("expected matrix");
    };
    let (scale, _, position) = matrix.decompose();
    assert!((position.x - 5.0).abs() < 1e-9);
    assert!((scale.x - 1.0).abs() < 1e-9);
}

#[test]
fn test_matrix_relative_loop_returns_start_value() {
    let track = matrix_track();
    let config = AnimationConfig::default().with_matrix_interpolation(true);
    let mut state = EvaluationState::new(LoopMode::Relative);
    state.repeat_count = 3;
    state.offset_value = Some(track.keys()[1].value.clone());
    let value = track.evaluate_with_config(5.0, &mut state, &config).unwrap();
    assert_eq!(value, track.keys()[0].value);
}
