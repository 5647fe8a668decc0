use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn web_names_deserialize() {
    let e: Ease = serde_json::from_str("\"power2.inOut\"").unwrap();
    assert_eq!(e, Ease::InOutCubic);
    let e: Ease = serde_json::from_str("\"power1.out\"").unwrap();
    assert_eq!(e, Ease::OutQuad);
    let e: Ease = serde_json::from_str("\"none\"").unwrap();
    assert_eq!(e, Ease::Linear);
    assert_eq!(Ease::default(), Ease::OutQuad);
}

#[test]
fn in_out_cubic_is_symmetric() {
    let e = Ease::InOutCubic;
    assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((e.apply(0.2) + e.apply(0.8) - 1.0).abs() < 1e-12);
}
