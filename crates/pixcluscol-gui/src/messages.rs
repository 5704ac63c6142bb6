use std::path::PathBuf;

use ndarray::{Array2, Array3};
use pixcluscol_core::{Annotation, AnnotatorConfig};

/// Results sent from file-dialog threads back to the UI thread.
pub enum DialogResult {
    /// A label grid was picked and loaded.
    Labels { path: PathBuf, grid: Array2<u32> },

    /// A reference image was picked and loaded.
    Reference { path: PathBuf, image: Array3<u8> },

    /// A saved annotation was picked and parsed.
    Annotation {
        path: PathBuf,
        annotation: Annotation,
    },

    /// A TOML config was picked and parsed.
    Config {
        path: PathBuf,
        config: AnnotatorConfig,
    },

    /// The annotation was written to disk.
    Saved { path: PathBuf },

    Error { message: String },
}
