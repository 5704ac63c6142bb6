pub mod config;
pub mod info;
pub mod picker;
pub mod render;
pub mod replay;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pixcluscol_core::io::load_cluster_image;
use pixcluscol_core::{Annotator, AnnotatorConfig};

/// Load a config file, or the defaults when none is given.
pub fn load_config(path: Option<&PathBuf>) -> Result<AnnotatorConfig> {
    match path {
        Some(p) => AnnotatorConfig::load(p)
            .with_context(|| format!("Failed to read config {}", p.display())),
        None => Ok(AnnotatorConfig::default()),
    }
}

/// Build an annotator from a label file and optionally apply a saved
/// annotation on top of it.
pub fn open_annotator(
    labels: &Path,
    annotation: Option<&PathBuf>,
    config: AnnotatorConfig,
) -> Result<Annotator> {
    let grid = load_cluster_image(labels)
        .with_context(|| format!("Failed to load labels from {}", labels.display()))?;
    let mut annotator = Annotator::with_config(grid, config)?;

    if let Some(path) = annotation {
        annotator
            .load_annotation_file(path)
            .with_context(|| format!("Failed to load annotation {}", path.display()))?;
    }
    Ok(annotator)
}
