use pdf_header::*;
use serde_json::json;

#[test]
fn test_defaults() {
    let config = HeaderConfig::default();
    assert!(config.use_filename);
    assert!(!config.use_custom);
    assert_eq!(config.font_size, 8.0);
    assert_eq!(config.color_hex, "#FF0000");
    assert_eq!(config.last_x_ratio, 0.85);
    assert_eq!(config.last_y_ratio, 0.97);
    assert!(config.all_pages);
    assert_eq!(config.position(), Position::Manual { rx: 0.85, ry: 0.97 });
}

#[test]
fn test_missing_keys_take_defaults() {
    let config = HeaderConfig::from_json_str(r#"{"font_size": 12}"#).unwrap();
    assert_eq!(config.font_size, 12.0);
    assert!(config.use_filename);
    assert_eq!(config.line_spacing, 1.2);
    assert_eq!(config.bg_color, "#FFFFFF");
}

#[test]
fn test_unknown_keys_are_preserved() {
    let config =
        HeaderConfig::from_json_str(r#"{"use_filename": true, "window_geometry": "1050x750"}"#)
            .unwrap();
    assert_eq!(config.extra.get("window_geometry"), Some(&json!("1050x750")));

    let written: serde_json::Value =
        serde_json::from_str(&config.to_json_string().unwrap()).unwrap();
    assert_eq!(written["window_geometry"], json!("1050x750"));
}

#[test]
fn test_legacy_prefix_mode() {
    let legacy = r##"{
        "text_mode": "prefixe",
        "prefixe": "CONFIDENTIEL",
        "suffixe": "",
        "custom": "",
        "color_hex": "#0000ff",
        "font_size": 10,
        "all_pages": false,
        "last_x_ratio": 0.5,
        "last_y_ratio": 0.1
    }"##;
    let config = HeaderConfig::from_json_str(legacy).unwrap();
    assert!(config.use_filename);
    assert!(config.use_prefix);
    assert_eq!(config.prefix_text, "CONFIDENTIEL");
    assert!(!config.use_suffix);
    assert!(!config.use_custom);
    assert_eq!(config.color_hex, "#0000FF");
    assert_eq!(config.font_size, 10.0);
    assert!(!config.all_pages);
    assert_eq!(config.last_x_ratio, 0.5);
    assert!(!config.extra.contains_key("text_mode"));
}

#[test]
fn test_legacy_custom_mode() {
    let config =
        HeaderConfig::from_json_str(r#"{"text_mode": "custom", "custom": "ACME Corp"}"#).unwrap();
    assert!(config.use_custom);
    assert!(!config.use_filename);
    assert_eq!(config.custom_text, "ACME Corp");

    // Custom mode with no text keeps the filename
    let config = HeaderConfig::from_json_str(r#"{"text_mode": "custom", "custom": " "}"#).unwrap();
    assert!(!config.use_custom);
    assert!(config.use_filename);
}

#[test]
fn test_legacy_migration_skipped_for_new_schema() {
    let value = json!({"use_filename": false, "text_mode": "suffixe"});
    let migrated = migrate_legacy(value.clone());
    assert_eq!(migrated, value);
}

#[test]
fn test_normalize_clamps() {
    let config = HeaderConfig::from_json_str(
        r#"{
            "font_size": 500,
            "line_spacing": 0.1,
            "last_x_ratio": 1.5,
            "last_y_ratio": -2,
            "bg_opacity": 3,
            "color_hex": "nope",
            "preset_position": "somewhere"
        }"#,
    )
    .unwrap();
    assert_eq!(config.font_size, 72.0);
    assert_eq!(config.line_spacing, 0.5);
    assert_eq!(config.last_x_ratio, 0.99);
    assert_eq!(config.last_y_ratio, 0.01);
    assert_eq!(config.bg_opacity, 1.0);
    assert_eq!(config.color_hex, "#FF0000");
    assert_eq!(config.preset_position, "custom");
}

#[test]
fn test_invalid_rotation_is_rejected() {
    assert!(HeaderConfig::from_json_str(r#"{"rotation": 45}"#).is_err());
    let config = HeaderConfig::from_json_str(r#"{"rotation": 270}"#).unwrap();
    assert_eq!(config.rotation, Rotation::Deg270);
}

#[test]
fn test_font_size_step_clamped() {
    let mut config = HeaderConfig {
        font_size: 72.0,
        ..Default::default()
    };
    config.step_font_size(1);
    assert_eq!(config.font_size, 72.0);

    config.font_size = 4.0;
    config.step_font_size(-1);
    assert_eq!(config.font_size, 4.0);

    config.step_font_size(2);
    assert_eq!(config.font_size, 6.0);
}

#[test]
fn test_preset_position_round_trip() {
    let mut config = HeaderConfig::default();
    let position = Position::Preset {
        preset: Preset::BottomCenter,
        margin_x_pt: 12.0,
        margin_y_pt: 30.0,
    };
    config.set_position(&position, Ratio::new(0.5, 0.96));
    assert_eq!(config.preset_position, "bottom_center");
    assert_eq!(config.position(), position);
    assert_eq!(config.last_y_ratio, 0.96);
}

#[tokio::test]
async fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join(constants::CONFIG_FILE_NAME);

    let config = HeaderConfig {
        use_custom: true,
        use_filename: false,
        custom_text: "Pièce n°3".to_string(),
        frame_style: FrameStyle::Dashed,
        ..Default::default()
    };
    config.save(&path).await.unwrap();

    let loaded = HeaderConfig::load(&path).await.unwrap();
    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_load_or_default() {
    let dir = tempfile::tempdir().unwrap();

    let missing = HeaderConfig::load_or_default(dir.path().join("missing.json")).await;
    assert_eq!(missing, HeaderConfig::default());

    let broken = dir.path().join("broken.json");
    tokio::fs::write(&broken, "{ not json").await.unwrap();
    assert_eq!(
        HeaderConfig::load_or_default(&broken).await,
        HeaderConfig::default()
    );
}
