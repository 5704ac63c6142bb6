pub mod image_io;
pub mod npy;

use std::path::Path;

use ndarray::Array2;

use crate::error::Result;

/// Load a cluster label grid, choosing the reader from the file extension:
/// `.npy` arrays, anything else as a grayscale image.
pub fn load_cluster_image(path: &Path) -> Result<Array2<u32>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("npy") => npy::load_labels_npy(path),
        _ => image_io::load_label_image(path),
    }
}
