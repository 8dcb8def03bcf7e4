use cardlens_core::alignment::AlignmentSettings;
use cardlens_core::config::{ViewerConfig, ZoomConfig};
use cardlens_core::geometry::NormalizedPoint;

// ---------------------------------------------------------------------------
// ViewerConfig defaults
// ---------------------------------------------------------------------------

#[test]
fn test_viewer_config_defaults() {
    let config = ViewerConfig::default();
    assert_eq!(config.view.width, 448.0);
    assert_eq!(config.view.height, 640.0);
    assert_eq!(config.view.device_pixel_ratio, 1.0);
    assert_eq!(config.zoom.step, 1.2);
    assert_eq!(config.zoom.min, 0.5);
    assert_eq!(config.zoom.max, 5.0);
    assert_eq!(config.interaction.click_threshold, 5.0);
    assert!(!config.interaction.lock_scale);
}

#[test]
fn test_zoom_config_clamp() {
    let zoom = ZoomConfig::default();
    assert_eq!(zoom.clamp(0.1), 0.5);
    assert_eq!(zoom.clamp(9.0), 5.0);
    assert_eq!(zoom.clamp(1.44), 1.44);
    assert_eq!(zoom.clamp(0.0), 1.0);
    assert_eq!(zoom.clamp(f64::INFINITY), 1.0);
}

#[test]
fn test_zoom_config_clamp_with_inverted_limits_uses_defaults() {
    let inverted = ZoomConfig {
        step: 1.2,
        min: 5.0,
        max: 0.5,
    };
    assert!(!inverted.has_valid_limits());
    assert_eq!(inverted.clamp(9.0), 5.0);
    assert_eq!(inverted.clamp(0.1), 0.5);
    assert_eq!(inverted.clamp(2.0), 2.0);

    let nan = ZoomConfig {
        min: f64::NAN,
        ..ZoomConfig::default()
    };
    assert_eq!(nan.limits(), (0.5, 5.0));
    assert_eq!(nan.clamp(1.44), 1.44);
}

#[test]
fn test_sanitized_replaces_unusable_values() {
    let text = r#"
[view]
device_pixel_ratio = 0.0

[zoom]
min = 5.0
max = 0.5
step = 0.8

[interaction]
click_threshold = -3.0

[diff]
mismatch_threshold = 7.0
"#;
    let parsed: ViewerConfig = toml::from_str(text).expect("parse");
    let config = parsed.sanitized();

    assert_eq!(config.view.device_pixel_ratio, 1.0);
    assert_eq!(config.zoom, ZoomConfig::default());
    assert_eq!(config.interaction.click_threshold, 5.0);
    assert_eq!(config.diff.mismatch_threshold, 0.1);
}

#[test]
fn test_sanitized_keeps_valid_values() {
    let mut config = ViewerConfig::default();
    config.view.device_pixel_ratio = 3.0;
    config.zoom.min = 1.0;
    config.zoom.max = 1.0;
    config.interaction.click_threshold = 0.0;

    assert_eq!(config.clone().sanitized(), config);
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_viewer_config_toml_round_trip() {
    let mut config = ViewerConfig::default();
    config.view.device_pixel_ratio = 2.0;
    config.interaction.lock_scale = true;
    config.diff.mismatch_threshold = 0.25;

    let text = toml::to_string_pretty(&config).expect("serialize");
    let parsed: ViewerConfig = toml::from_str(&text).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn test_viewer_config_partial_toml_fills_defaults() {
    let text = r#"
[view]
width = 300.0
height = 420.0
device_pixel_ratio = 1.5
"#;
    let parsed: ViewerConfig = toml::from_str(text).expect("parse");
    assert_eq!(parsed.view.width, 300.0);
    assert_eq!(parsed.zoom, ZoomConfig::default());
    assert_eq!(parsed.interaction.click_threshold, 5.0);
}

#[test]
fn test_viewer_config_empty_toml_is_default() {
    let parsed: ViewerConfig = toml::from_str("").expect("parse");
    assert_eq!(parsed, ViewerConfig::default());
}

// ---------------------------------------------------------------------------
// AlignmentSettings JSON
// ---------------------------------------------------------------------------

#[test]
fn test_alignment_json_round_trip() {
    let alignment = AlignmentSettings {
        scale_x: 1.1,
        scale_y: 0.9,
        offset_x: -112.0,
        offset_y: 149.33,
        rotate: -7.5,
        pivot: Some(NormalizedPoint::new(0.25, 0.75)),
    };
    let json = serde_json::to_string(&alignment).expect("serialize");
    let parsed: AlignmentSettings = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed, alignment);
}

#[test]
fn test_alignment_json_omits_unset_pivot() {
    let json = serde_json::to_string(&AlignmentSettings::identity()).expect("serialize");
    assert!(!json.contains("pivot"), "{json}");
}

#[test]
fn test_alignment_json_missing_fields_default() {
    let parsed: AlignmentSettings =
        serde_json::from_str(r#"{"rotate": 12.5}"#).expect("parse");
    assert_eq!(parsed.rotate, 12.5);
    assert_eq!(parsed.scale_x, 1.0);
    assert_eq!(parsed.offset_y, 0.0);
    assert!(parsed.pivot.is_none());
}

#[test]
fn test_alignment_clamped_restores_ranges() {
    let wild = AlignmentSettings {
        scale_x: 0.1,
        scale_y: f64::NAN,
        offset_x: f64::INFINITY,
        offset_y: 12.0,
        rotate: 90.0,
        pivot: Some(NormalizedPoint::new(1.5, -0.5)),
    };
    let c = wild.clamped();
    assert_eq!(c.scale_x, 0.5);
    assert_eq!(c.scale_y, 1.0);
    assert_eq!(c.offset_x, 0.0);
    assert_eq!(c.offset_y, 12.0);
    assert_eq!(c.rotate, 45.0);
    assert_eq!(c.pivot, Some(NormalizedPoint::new(1.0, 0.0)));
}
