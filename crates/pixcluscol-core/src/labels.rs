use ndarray::Array2;

use crate::consts::MAX_CLUSTERS;
use crate::error::{AnnotatorError, Result};

/// Zero-based cluster index for a stored (one-based) label.
///
/// Every read from the label grid goes through this function, and every
/// write back into storage form goes through [`label_of`].
#[inline]
pub fn cluster_index(label: u32) -> usize {
    debug_assert!(label >= 1, "labels are one-based");
    (label - 1) as usize
}

/// Stored (one-based) label for a zero-based cluster index.
#[inline]
pub fn label_of(index: usize) -> u32 {
    index as u32 + 1
}

/// Check that a label grid is non-empty and every label is at least 1.
///
/// Returns the number of clusters, i.e. the largest label, which may not
/// exceed [`MAX_CLUSTERS`].
pub fn validate(grid: &Array2<u32>) -> Result<usize> {
    if grid.is_empty() {
        return Err(AnnotatorError::EmptyImage);
    }
    let mut max = 0u32;
    for ((row, col), &value) in grid.indexed_iter() {
        if value == 0 {
            return Err(AnnotatorError::InvalidLabel {
                row,
                col,
                value: 0,
            });
        }
        max = max.max(value);
    }
    check_cluster_count(max as usize)?;
    Ok(max as usize)
}

/// Reject cluster counts above [`MAX_CLUSTERS`].
pub fn check_cluster_count(count: usize) -> Result<()> {
    if count > MAX_CLUSTERS {
        return Err(AnnotatorError::TooManyClusters {
            count,
            max: MAX_CLUSTERS,
        });
    }
    Ok(())
}

/// Convert a signed label grid (as commonly stored by NumPy) to storage form.
pub fn from_signed(grid: &Array2<i64>) -> Result<Array2<u32>> {
    if let Some(((row, col), &value)) = grid
        .indexed_iter()
        .find(|(_, &v)| v < 1 || v > u32::MAX as i64)
    {
        return Err(AnnotatorError::InvalidLabel { row, col, value });
    }
    Ok(grid.mapv(|v| v as u32))
}

/// Default display names: `_1`, `_2`, ...
pub fn default_names(num_labels: usize) -> Vec<String> {
    (0..num_labels).map(|i| format!("_{}", label_of(i))).collect()
}

/// Flatten a label grid row-major into zero-based cluster indices.
pub fn to_assignment(grid: &Array2<u32>) -> Vec<u32> {
    grid.iter().map(|&label| cluster_index(label) as u32).collect()
}

/// Rebuild a label grid from a row-major zero-based assignment.
pub fn from_assignment(assignment: &[u32], shape: (usize, usize)) -> Result<Array2<u32>> {
    let expected = shape.0 * shape.1;
    if assignment.len() != expected {
        return Err(AnnotatorError::AnnotationFormat(format!(
            "assignment has {} entries, grid {}x{} needs {expected}",
            assignment.len(),
            shape.1,
            shape.0
        )));
    }
    if let Some(&bad) = assignment.iter().find(|&&i| i == u32::MAX) {
        return Err(AnnotatorError::AnnotationFormat(format!(
            "cluster id {bad} has no one-based label"
        )));
    }
    let labels: Vec<u32> = assignment.iter().map(|&i| label_of(i as usize)).collect();
    Array2::from_shape_vec(shape, labels)
        .map_err(|e| AnnotatorError::AnnotationFormat(e.to_string()))
}

/// Map a pointer position in plot data coordinates to the nearest grid cell.
///
/// `x` runs along columns, `y` along rows. Positions off the grid are
/// clamped onto its border; non-finite positions are rejected.
pub fn pixel_at(shape: (usize, usize), x: f64, y: f64) -> Result<(usize, usize)> {
    if !x.is_finite() || !y.is_finite() {
        return Err(AnnotatorError::PointerOutOfBounds { x, y });
    }
    let (h, w) = shape;
    let row = y.round().clamp(0.0, (h - 1) as f64) as usize;
    let col = x.round().clamp(0.0, (w - 1) as f64) as usize;
    Ok((row, col))
}

/// Number of pixels owned by each cluster.
pub fn cluster_sizes(grid: &Array2<u32>, num_labels: usize) -> Vec<usize> {
    let mut sizes = vec![0usize; num_labels];
    for &label in grid.iter() {
        let index = cluster_index(label);
        if index < num_labels {
            sizes[index] += 1;
        }
    }
    sizes
}
