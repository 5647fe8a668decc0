use super::*;

#[test]
fn default_config_is_valid_and_matches_page() {
    let cfg = StoryConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.sections.len(), 4);
    assert!(cfg.sections[0].morph && cfg.sections[0].vector);
    assert_eq!(cfg.fade.start, "top 80%");
    assert_eq!(cfg.fade.duration_s, 1.2);
    assert_eq!(cfg.scene.knot.tubular_segments, 100);
    assert_eq!(cfg.scene.knot.radial_segments, 16);
    assert_eq!(cfg.scene.light.position, [10.0, 10.0, 10.0]);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = StoryConfig::from_json_str(
        r##"{"offset_top": 900, "scene": {"rotation_step": 0.02, "color": "#ff0000"}}"##,
    )
    .unwrap();
    assert_eq!(cfg.offset_top, 900.0);
    assert_eq!(cfg.scene.rotation_step, 0.02);
    assert_eq!(cfg.scene.color, RgbColor::from_hex(0xff0000));
    assert_eq!(cfg.scene.fov_deg, 75.0);
    assert_eq!(cfg.sections.len(), 4);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = StoryConfig::from_json_str(r#"{"sectionz": []}"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn invalid_values_are_rejected() {
    let mut cfg = StoryConfig::default();
    cfg.scene.far = 0.01;
    assert!(cfg.validate().is_err());

    let mut cfg = StoryConfig::default();
    cfg.fade.start = "top".to_string();
    assert!(cfg.validate().is_err());

    let mut cfg = StoryConfig::default();
    cfg.morph.start = "+=100".to_string();
    assert!(cfg.validate().is_err());

    let mut cfg = StoryConfig::default();
    cfg.sections[1].morph = true;
    assert!(cfg.validate().is_err());

    let mut cfg = StoryConfig::default();
    cfg.scene.knot.radial_segments = 2;
    assert!(cfg.validate().is_err());
}

#[test]
fn config_roundtrips_through_json() {
    let cfg = StoryConfig::default();
    let s = serde_json::to_string(&cfg).unwrap();
    assert_eq!(StoryConfig::from_json_str(&s).unwrap(), cfg);
}
