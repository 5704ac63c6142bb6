mod common;

use approx::assert_relative_eq;

use pixcluscol_core::consts::{DEFAULT_HIGHLIGHT_COLOR, DEFAULT_PICKER_SIZE};
use pixcluscol_core::{Annotator, AnnotatorConfig};

use common::scenario_grid;

#[test]
fn test_defaults() {
    let config = AnnotatorConfig::default();
    assert_eq!(config.highlight_color, DEFAULT_HIGHLIGHT_COLOR);
    assert_eq!(config.dim_offset, 32);
    assert_eq!(config.picker.size, DEFAULT_PICKER_SIZE);
    assert_relative_eq!(config.picker.saturation, 0.7);
    assert_relative_eq!(config.picker.value_span, 0.6);
}

#[test]
fn test_empty_toml_is_default() {
    let config = AnnotatorConfig::from_toml_str("").unwrap();
    assert_eq!(config, AnnotatorConfig::default());
}

#[test]
fn test_partial_toml() {
    let config = AnnotatorConfig::from_toml_str(
        r#"
        dim_offset = 0

        [picker]
        size = 64
        "#,
    )
    .unwrap();
    assert_eq!(config.dim_offset, 0);
    assert_eq!(config.highlight_color, DEFAULT_HIGHLIGHT_COLOR);
    assert_eq!(config.picker.size, 64);
    assert_relative_eq!(config.picker.saturation, 0.7);
}

#[test]
fn test_bad_toml_rejected() {
    assert!(AnnotatorConfig::from_toml_str("dim_offset = \"lots\"").is_err());
}

#[test]
fn test_toml_round_trip() {
    let mut config = AnnotatorConfig::default();
    config.highlight_color = [255, 0, 255];
    let text = toml::to_string_pretty(&config).unwrap();
    assert_eq!(AnnotatorConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_custom_highlight_color_applied() {
    let config = AnnotatorConfig::from_toml_str("highlight_color = [255, 0, 0]\ndim_offset = 10").unwrap();
    let mut a = Annotator::with_config(scenario_grid(), config).unwrap();
    a.set_color(1, [100, 100, 100]).unwrap();

    let hl = a.highlight(0).unwrap();
    assert_eq!([hl[[0, 0, 0]], hl[[0, 0, 1]], hl[[0, 0, 2]]], [255, 0, 0]);
    assert_eq!(hl[[0, 2, 0]], 60);
}

#[test]
fn test_picker_size_follows_config() {
    let config = AnnotatorConfig::from_toml_str("[picker]\nsize = 32").unwrap();
    let a = Annotator::with_config(scenario_grid(), config).unwrap();
    assert_eq!(a.picker().dim(), (32, 32, 3));
}
