use pixcluscol_core::Shown;

/// A texture plus the (shown image, annotator revision) it was built from.
#[derive(Default)]
pub struct TextureSlot {
    pub texture: Option<egui::TextureHandle>,
    pub key: Option<(Shown, u64)>,
}

impl TextureSlot {
    pub fn is_stale(&self, key: (Shown, u64)) -> bool {
        self.key != Some(key)
    }

    pub fn clear(&mut self) {
        self.texture = None;
        self.key = None;
    }
}

/// Viewport display state.
pub struct ViewportState {
    pub primary: TextureSlot,
    pub reference: TextureSlot,
    pub zoom: f32,
    pub pan_offset: egui::Vec2,
    /// Fit the image to the panel on the next frame.
    pub needs_fit: bool,
    /// Pointer was over the plot on the previous frame.
    pub pointer_in_plot: bool,
    /// Last pointer position forwarded, in plot data coordinates.
    pub last_pointer: Option<(f64, f64)>,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            primary: TextureSlot::default(),
            reference: TextureSlot::default(),
            zoom: 1.0,
            pan_offset: egui::Vec2::ZERO,
            needs_fit: true,
            pointer_in_plot: false,
            last_pointer: None,
        }
    }
}
