use ndarray::ArrayView3;

/// Convert an (h, w, 3) RGB array to an egui ColorImage.
pub fn rgb_to_color_image(data: ArrayView3<'_, u8>) -> egui::ColorImage {
    let (h, w, _) = data.dim();
    let mut pixels = Vec::with_capacity(h * w);

    for row in 0..h {
        for col in 0..w {
            pixels.push(egui::Color32::from_rgb(
                data[[row, col, 0]],
                data[[row, col, 1]],
                data[[row, col, 2]],
            ));
        }
    }

    egui::ColorImage {
        size: [w, h],
        pixels,
        source_size: Default::default(),
    }
}
