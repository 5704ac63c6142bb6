use ndarray::Array3;

use crate::color::{hsv_to_rgb, quantize, Rgb};
use crate::config::PickerConfig;
use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{AnnotatorError, Result};

/// Build the square HSV color-picker image.
///
/// Hue runs left to right over `[0, 1)`, saturation is fixed, and value
/// falls from 1.0 on the top row towards `1 - value_span` on the bottom row.
pub fn build_picker(config: &PickerConfig) -> Array3<u8> {
    let size = config.size.max(1);
    let step = 1.0 / size as f32;
    Array3::from_shape_fn((size, size, COLOR_CHANNEL_COUNT), |(row, col, ch)| {
        let hue = col as f32 * step;
        let value = 1.0 - row as f32 * step * config.value_span;
        let (r, g, b) = hsv_to_rgb(hue, config.saturation, value);
        quantize([r, g, b][ch])
    })
}

/// Read the picker color under a pointer.
///
/// While picking, the picker is stretched over the plot extent of the
/// cluster image (`plot_shape` = rows, cols), so the pointer position is
/// rescaled from plot data coordinates onto the picker grid.
pub fn sample(picker: &Array3<u8>, plot_shape: (usize, usize), x: f64, y: f64) -> Result<Rgb> {
    if !x.is_finite() || !y.is_finite() {
        return Err(AnnotatorError::PointerOutOfBounds { x, y });
    }
    let (ph, pw, _) = picker.dim();
    let (h, w) = plot_shape;
    let to_cell = |v: f64, extent: usize, cells: usize| -> usize {
        let frac = (v + 0.5) / extent as f64;
        ((frac * cells as f64).floor().max(0.0) as usize).min(cells - 1)
    };
    let row = to_cell(y, h, ph);
    let col = to_cell(x, w, pw);
    Ok([
        picker[[row, col, 0]],
        picker[[row, col, 1]],
        picker[[row, col, 2]],
    ])
}
