use ndarray::{Array2, Array3, Array4, ArrayView2, ArrayView3, ArrayViewMut3, Axis};
use rayon::prelude::*;
use tracing::debug;

use crate::color::{dim, Rgb};
use crate::config::AnnotatorConfig;
use crate::consts::{COLOR_CHANNEL_COUNT, PARALLEL_PIXEL_THRESHOLD, SUPPORTED_REFERENCE_SCALES};
use crate::error::{AnnotatorError, Result};
use crate::labels::{cluster_index, label_of};

/// How a highlight image is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightStyle {
    pub color: Rgb,
    pub dim_offset: u8,
}

impl From<&AnnotatorConfig> for HighlightStyle {
    fn from(config: &AnnotatorConfig) -> Self {
        Self {
            color: config.highlight_color,
            dim_offset: config.dim_offset,
        }
    }
}

/// Build one boolean mask per cluster: `mask[i] = (grid == i + 1)`.
///
/// Shape: (num_labels, h, w).
pub fn build_masks(grid: &Array2<u32>, num_labels: usize) -> Array3<bool> {
    let (h, w) = grid.dim();
    let mut masks = Array3::<bool>::from_elem((num_labels, h, w), false);
    for (i, mut mask) in masks.axis_iter_mut(Axis(0)).enumerate() {
        let label = label_of(i);
        mask.zip_mut_with(grid, |m, &g| *m = g == label);
    }
    masks
}

/// Paint every pixel of `color_image` with its cluster's palette entry.
pub fn recolor(color_image: &mut Array3<u8>, grid: &Array2<u32>, palette: &[Rgb]) {
    let (h, w) = grid.dim();
    for row in 0..h {
        for col in 0..w {
            let rgb = palette[cluster_index(grid[[row, col]])];
            for ch in 0..COLOR_CHANNEL_COUNT {
                color_image[[row, col, ch]] = rgb[ch];
            }
        }
    }
}

/// Build the color image for a label grid and palette.
pub fn build_color_image(grid: &Array2<u32>, palette: &[Rgb]) -> Array3<u8> {
    let (h, w) = grid.dim();
    let mut color_image = Array3::<u8>::zeros((h, w, COLOR_CHANNEL_COUNT));
    recolor(&mut color_image, grid, palette);
    color_image
}

/// Precompute one highlight image per cluster.
///
/// Outside mask `i` each channel is `c / 2 + dim_offset`; inside it the pixel
/// is set to `style.color`. Shape: (num_labels, h, w, 3).
pub fn build_highlights(
    color_image: &Array3<u8>,
    masks: &Array3<bool>,
    style: HighlightStyle,
) -> Array4<u8> {
    let (n, h, w) = masks.dim();
    let mut highlights = Array4::<u8>::zeros((n, h, w, COLOR_CHANNEL_COUNT));

    for_each_cluster(&mut highlights, |i, out| {
        paint_highlight(
            out,
            color_image.view(),
            masks.index_axis(Axis(0), i),
            |_, _| style.color,
            style.dim_offset,
        );
    });

    debug!(clusters = n, height = h, width = w, "Highlight images rebuilt");
    highlights
}

/// Write a dimmed copy of `base` into `out`, replacing masked pixels with
/// whatever `inside` returns for that pixel.
fn paint_highlight<F>(
    mut out: ArrayViewMut3<'_, u8>,
    base: ArrayView3<'_, u8>,
    mask: ArrayView2<'_, bool>,
    inside: F,
    dim_offset: u8,
) where
    F: Fn(usize, usize) -> Rgb,
{
    let (h, w) = mask.dim();
    for row in 0..h {
        for col in 0..w {
            if mask[[row, col]] {
                let rgb = inside(row, col);
                for ch in 0..COLOR_CHANNEL_COUNT {
                    out[[row, col, ch]] = rgb[ch];
                }
            } else {
                for ch in 0..COLOR_CHANNEL_COUNT {
                    out[[row, col, ch]] = dim(base[[row, col, ch]], dim_offset);
                }
            }
        }
    }
}

/// Integer scale of a reference image relative to the cluster grid.
///
/// Both axes must agree and the scale must be 1 or 2.
pub fn reference_scale(base: (usize, usize), reference: (usize, usize)) -> Result<usize> {
    let err = || AnnotatorError::ReferenceScale { base, reference };
    let (bh, bw) = base;
    let (rh, rw) = reference;
    if bh == 0 || bw == 0 || rh % bh != 0 || rw % bw != 0 {
        return Err(err());
    }
    let scale = rh / bh;
    if rw / bw != scale || !SUPPORTED_REFERENCE_SCALES.contains(&scale) {
        return Err(err());
    }
    Ok(scale)
}

/// Nearest-neighbour upscale of a mask stack by an integer factor.
pub fn upscale_masks(masks: &Array3<bool>, scale: usize) -> Array3<bool> {
    if scale == 1 {
        return masks.clone();
    }
    let (n, h, w) = masks.dim();
    Array3::from_shape_fn((n, h * scale, w * scale), |(i, row, col)| {
        masks[[i, row / scale, col / scale]]
    })
}

/// Highlight stack for a reference image: the reference is dimmed like a
/// regular highlight image, and the highlighted cluster keeps the
/// reference's own pixels at full brightness.
pub fn build_reference_highlights(
    reference: &Array3<u8>,
    masks: &Array3<bool>,
    style: HighlightStyle,
) -> Array4<u8> {
    let (n, h, w) = masks.dim();
    let mut highlights = Array4::<u8>::zeros((n, h, w, COLOR_CHANNEL_COUNT));
    for_each_cluster(&mut highlights, |i, out| {
        paint_highlight(
            out,
            reference.view(),
            masks.index_axis(Axis(0), i),
            |row, col| {
                [
                    reference[[row, col, 0]],
                    reference[[row, col, 1]],
                    reference[[row, col, 2]],
                ]
            },
            style.dim_offset,
        );
    });
    highlights
}

/// Run `fill` on every cluster's slice of a highlight stack, in parallel
/// once the stack is large enough.
fn for_each_cluster<F>(stack: &mut Array4<u8>, fill: F)
where
    F: Fn(usize, ArrayViewMut3<'_, u8>) + Sync + Send,
{
    if stack.len() / COLOR_CHANNEL_COUNT >= PARALLEL_PIXEL_THRESHOLD {
        stack
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(i, out)| fill(i, out));
    } else {
        for (i, out) in stack.axis_iter_mut(Axis(0)).enumerate() {
            fill(i, out);
        }
    }
}
