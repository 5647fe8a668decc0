use super::*;

fn ramp(mode: InterpMode) -> Keyframes<f64> {
    Keyframes {
        keys: vec![
            Keyframe {
                frame: 0.0,
                value: 0.0,
                ease: Ease::Linear,
            },
            Keyframe {
                frame: 10.0,
                value: 10.0,
                ease: Ease::Linear,
            },
        ],
        mode,
    }
}

#[test]
fn keyframes_hold_is_constant_between_keys() {
    let kf = ramp(InterpMode::Hold);
    assert_eq!(kf.sample(5.0).unwrap(), 0.0);
    assert_eq!(kf.sample(10.0).unwrap(), 10.0);
}

#[test]
fn keyframes_linear_interpolates_fractional_frames() {
    let kf = ramp(InterpMode::Linear);
    assert_eq!(kf.sample(5.0).unwrap(), 5.0);
    assert!((kf.sample(2.5).unwrap() - 2.5).abs() < 1e-12);
}

#[test]
fn keyframes_clamp_outside_key_range() {
    let kf = ramp(InterpMode::Linear);
    assert_eq!(kf.sample(-4.0).unwrap(), 0.0);
    assert_eq!(kf.sample(40.0).unwrap(), 10.0);
}

#[test]
fn validate_rejects_unsorted_and_empty() {
    let mut kf = ramp(InterpMode::Linear);
    kf.keys.reverse();
    assert!(kf.validate().is_err());
    let empty: Keyframes<f64> = Keyframes {
        keys: Vec::new(),
        mode: InterpMode::Linear,
    };
    assert!(empty.validate().is_err());
    assert!(empty.sample(0.0).is_err());
}

#[test]
fn keyframes_deserialize_with_defaults() {
    let kf: Keyframes<f64> =
        serde_json::from_str(r#"{"keys":[{"frame":0,"value":1},{"frame":4,"value":3}]}"#)
            .unwrap();
    assert_eq!(kf.mode, InterpMode::Linear);
    assert_eq!(kf.sample(2.0).unwrap(), 2.0);
}
