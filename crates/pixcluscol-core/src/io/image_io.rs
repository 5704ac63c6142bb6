use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use ndarray::{Array2, Array3, ArrayView3};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{AnnotatorError, Result};
use crate::labels;

/// Convert an (h, w, 3) array to an `RgbImage`.
pub fn to_rgb_image(data: ArrayView3<'_, u8>) -> Result<RgbImage> {
    let (h, w, channels) = data.dim();
    if channels != COLOR_CHANNEL_COUNT {
        return Err(AnnotatorError::UnsupportedLayout(format!(
            "expected {COLOR_CHANNEL_COUNT} channels, got {channels}"
        )));
    }

    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            img.put_pixel(
                col as u32,
                row as u32,
                Rgb([data[[row, col, 0]], data[[row, col, 1]], data[[row, col, 2]]]),
            );
        }
    }
    Ok(img)
}

/// Save an (h, w, 3) array as 8-bit RGB PNG.
pub fn save_rgb_png(data: ArrayView3<'_, u8>, path: &Path) -> Result<()> {
    let img = to_rgb_image(data)?;
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save an (h, w, 3) array, choosing format from file extension.
pub fn save_rgb_image(data: ArrayView3<'_, u8>, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") | None => save_rgb_png(data, path),
        _ => {
            to_rgb_image(data)?.save(path)?;
            Ok(())
        }
    }
}

/// Load an image file as an (h, w, 3) RGB array, e.g. for use as a reference.
pub fn load_reference_image(path: &Path) -> Result<Array3<u8>> {
    let rgb = image::open(path)?.to_rgb8();
    let (w, h) = rgb.dimensions();
    let mut data = Array3::<u8>::zeros((h as usize, w as usize, COLOR_CHANNEL_COUNT));

    for (col, row, pixel) in rgb.enumerate_pixels() {
        for ch in 0..COLOR_CHANNEL_COUNT {
            data[[row as usize, col as usize, ch]] = pixel.0[ch];
        }
    }

    Ok(data)
}

/// Load a grayscale image whose gray levels are the cluster labels.
///
/// 8- and 16-bit gray images keep their raw values; any other color type is
/// reduced to 8-bit luma first. Labels are not checked here; a 16-bit image
/// with a stray large value is refused later by the annotator once it exceeds
/// [`crate::consts::MAX_CLUSTERS`].
pub fn load_label_image(path: &Path) -> Result<Array2<u32>> {
    let img = image::open(path)?;
    let (w, h) = (img.width() as usize, img.height() as usize);

    let values: Vec<i64> = match img {
        DynamicImage::ImageLuma16(gray) => gray.into_raw().into_iter().map(i64::from).collect(),
        DynamicImage::ImageLuma8(gray) => gray.into_raw().into_iter().map(i64::from).collect(),
        other => other.to_luma8().into_raw().into_iter().map(i64::from).collect(),
    };

    let grid = Array2::from_shape_vec((h, w), values)
        .map_err(|e| AnnotatorError::UnsupportedLayout(e.to_string()))?;
    labels::from_signed(&grid)
}

/// Save a label grid as a 16-bit grayscale PNG.
pub fn save_label_image(grid: &Array2<u32>, path: &Path) -> Result<()> {
    let (h, w) = grid.dim();
    let mut pixels: Vec<u16> = Vec::with_capacity(h * w);
    for &label in grid.iter() {
        let value = u16::try_from(label).map_err(|_| {
            AnnotatorError::UnsupportedLayout(format!("label {label} does not fit in 16 bits"))
        })?;
        pixels.push(value);
    }

    let img = image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| AnnotatorError::UnsupportedLayout("buffer size mismatch".into()))?;
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
