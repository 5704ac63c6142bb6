use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DIM_OFFSET, DEFAULT_HIGHLIGHT_COLOR, DEFAULT_PICKER_SATURATION, DEFAULT_PICKER_SIZE,
    DEFAULT_PICKER_VALUE_SPAN,
};
use crate::error::Result;

/// Rendering parameters for the annotator's derived images.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    /// Color written over the hovered cluster.
    #[serde(default = "default_highlight_color")]
    pub highlight_color: [u8; 3],
    /// Background of a highlight image is `color / 2 + dim_offset`.
    #[serde(default = "default_dim_offset")]
    pub dim_offset: u8,
    #[serde(default)]
    pub picker: PickerConfig,
}

/// Shape of the HSV color-picker gradient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Edge length of the square picker image.
    #[serde(default = "default_picker_size")]
    pub size: usize,
    /// Fixed saturation of every picker pixel.
    #[serde(default = "default_picker_saturation")]
    pub saturation: f32,
    /// Value falls from 1.0 on the top row by up to this amount on the bottom row.
    #[serde(default = "default_picker_value_span")]
    pub value_span: f32,
}

fn default_highlight_color() -> [u8; 3] {
    DEFAULT_HIGHLIGHT_COLOR
}
fn default_dim_offset() -> u8 {
    DEFAULT_DIM_OFFSET
}
fn default_picker_size() -> usize {
    DEFAULT_PICKER_SIZE
}
fn default_picker_saturation() -> f32 {
    DEFAULT_PICKER_SATURATION
}
fn default_picker_value_span() -> f32 {
    DEFAULT_PICKER_VALUE_SPAN
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
            dim_offset: DEFAULT_DIM_OFFSET,
            picker: PickerConfig::default(),
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_PICKER_SIZE,
            saturation: DEFAULT_PICKER_SATURATION,
            value_span: DEFAULT_PICKER_VALUE_SPAN,
        }
    }
}

impl AnnotatorConfig {
    /// Parse a config from TOML. Missing fields fall back to their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
