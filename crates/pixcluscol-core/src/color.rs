/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// Convert HSV to RGB.
///
/// All inputs and outputs are in `0.0..=1.0`; hue wraps at 1.0.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h6 = h.rem_euclid(1.0) * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Quantize a unit-range channel to 8 bits as `floor(c * 256)`, saturating at 255.
pub fn quantize(c: f32) -> u8 {
    (c * 256.0).clamp(0.0, 255.0) as u8
}

/// Dim a channel for the background of a highlight image.
#[inline]
pub fn dim(c: u8, offset: u8) -> u8 {
    (c / 2).saturating_add(offset)
}
