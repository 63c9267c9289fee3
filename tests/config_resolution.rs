//! Configuration file parsing and render-option resolution

use qrforge::render::color;
use qrforge::{DotStyle, QrforgeConfig};
use std::fs;

#[test]
fn toml_config_resolves_render_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qrforge.toml");
    fs::write(
        &path,
        r##"
        [render]
        size = 420
        foreground = "#10b981"
        background = "#111827"
        dot_style = "extra-rounded"
        logo_margin = 8
        logo_scale = 0.25

        [logging]
        level = "debug"
        color = false
        "##,
    )
    .unwrap();

    let config = QrforgeConfig::from_file(&path).unwrap();
    let options = config.render_options().unwrap();

    assert_eq!(options.size, 420);
    assert_eq!(options.foreground, color::parse_hex("#10b981").unwrap());
    assert_eq!(options.background, color::parse_hex("#111827").unwrap());
    assert_eq!(options.dot_style, DotStyle::ExtraRounded);
    assert_eq!(config.render.logo_margin, Some(8));
    assert_eq!(config.logging.level, "debug");
    assert!(!config.logging.color);
}

#[test]
fn yaml_config_resolves_render_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qrforge.yaml");
    fs::write(
        &path,
        "render:\n  size: 150\n  dot_style: dots\nlogging:\n  level: warn\n",
    )
    .unwrap();

    let config = QrforgeConfig::from_file(&path).unwrap();
    let options = config.render_options().unwrap();

    assert_eq!(options.size, 150);
    assert_eq!(options.dot_style, DotStyle::Dots);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn out_of_range_size_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qrforge.toml");
    fs::write(&path, "[render]\nsize = 2000\n").unwrap();

    let config = QrforgeConfig::from_file(&path).unwrap();
    assert_eq!(config.render_options().unwrap().size, 500);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qrforge.ini");
    fs::write(&path, "size = 300").unwrap();

    assert!(QrforgeConfig::from_file(&path).is_err());
}

#[test]
fn invalid_dot_style_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qrforge.toml");
    fs::write(&path, "[render]\ndot_style = \"hexagons\"\n").unwrap();

    let config = QrforgeConfig::from_file(&path).unwrap();
    assert!(config.render_options().is_err());
}
