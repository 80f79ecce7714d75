use super::*;

#[test]
fn empty_object_gives_defaults() {
    let cfg = GradientConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, GradientConfig::default());
    assert_eq!((cfg.width, cfg.height), (800, 600));
    assert_eq!(cfg.cell_count, 12);
    assert_eq!(cfg.blur_amount, 40.0);
    assert_eq!(cfg.harmony, Harmony::Analogous);
    assert_eq!(cfg.blur_kind, BlurKind::Gaussian);
}

#[test]
fn parses_full_document() {
    let json = r##"{
        "width": 320,
        "height": 200,
        "cell_count": 3,
        "blur_amount": 0,
        "blur_kind": "box",
        "harmony": "split-complementary",
        "seed": 42,
        "sites": [{"x": 10, "y": 10}, {"x": 100, "y": 50}, {"x": 300, "y": 190}],
        "palette": ["#102030", "#405060"],
        "overrides": {"2": "#abcdef"},
        "locks": {"1": "#ff8800"},
        "distortions": [{"kind": "ripple", "params": {"amplitude": 4}}],
        "show_overlay": true,
        "animation": {"hue_speed": 45, "hue_direction": "reverse"}
    }"##;
    let cfg = GradientConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.canvas().unwrap(), Canvas::new(320, 200).unwrap());
    assert_eq!(cfg.blur_kind, BlurKind::Box);
    assert_eq!(cfg.harmony, Harmony::SplitComplementary);
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.sites.as_ref().map(Vec::len), Some(3));
    assert_eq!(cfg.palette, ["#102030", "#405060"]);
    assert_eq!(cfg.overrides.get(&2).map(String::as_str), Some("#abcdef"));
    assert_eq!(cfg.locks.get(&1).map(String::as_str), Some("#ff8800"));
    assert_eq!(cfg.distortions[0].kind, "ripple");
    assert!(cfg.show_overlay);
    assert_eq!(cfg.animation.hue_direction, HueDirection::Reverse);
    assert_eq!(cfg.animation.wander_speed, DEFAULT_WANDER_SPEED);
}

#[test]
fn unknown_harmony_falls_back() {
    let cfg = GradientConfig::from_json_str(r#"{"harmony": "plaid"}"#).unwrap();
    assert_eq!(cfg.harmony, Harmony::Analogous);
}

#[test]
fn rejects_out_of_range_values() {
    for json in [
        r#"{"width": 0}"#,
        r#"{"height": 5000}"#,
        r#"{"cell_count": 2}"#,
        r#"{"cell_count": 65}"#,
        r#"{"blur_amount": 101}"#,
        r#"{"blur_amount": -1}"#,
        r#"{"cell_count": 3, "sites": [{"x": 1, "y": 1}]}"#,
        r##"{"cell_count": 3, "locks": {"3": "#000000"}}"##,
        r#"{"locks": {"0": "not-a-color"}}"#,
        r##"{"palette": ["#102030", "nope"]}"##,
        r##"{"cell_count": 3, "overrides": {"5": "#000000"}}"##,
        r#"{"animation": {"hue_speed": -5}}"#,
    ] {
        let err = GradientConfig::from_json_str(json).unwrap_err();
        assert!(
            matches!(err, MeshgradError::Validation(_)),
            "{json}: {err}"
        );
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = GradientConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, MeshgradError::Serde(_)));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = GradientConfig::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("here.json"));
}

#[test]
fn pretty_json_round_trips() {
    let mut cfg = GradientConfig {
        seed: Some(7),
        ..GradientConfig::default()
    };
    cfg.locks.insert(0, "#112233".to_string());
    let text = cfg.to_json_pretty().unwrap();
    assert_eq!(GradientConfig::from_json_str(&text).unwrap(), cfg);
}

#[test]
fn limits_clamp() {
    assert_eq!(CELL_LIMITS.clamp(1), 3);
    assert_eq!(CELL_LIMITS.clamp(1000), 64);
    assert_eq!(BLUR_LIMITS.clamp(f64::NAN), 40.0);
    assert_eq!(BLUR_LIMITS.clamp(250.0), 100.0);
}
