/// Minimum element count (clusters * h * w) to fan highlight precomputation
/// out over Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in a color image (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Color written over the hovered cluster in a highlight image.
pub const DEFAULT_HIGHLIGHT_COLOR: [u8; 3] = [200, 200, 200];

/// Constant added to halved channel values when dimming the background of a
/// highlight image.
pub const DEFAULT_DIM_OFFSET: u8 = 32;

/// Edge length of the square color-picker image.
pub const DEFAULT_PICKER_SIZE: usize = 256;

/// Fixed saturation of the color-picker gradient.
pub const DEFAULT_PICKER_SATURATION: f32 = 0.7;

/// How far the picker's value channel falls from top row to bottom row.
pub const DEFAULT_PICKER_VALUE_SPAN: f32 = 0.6;

/// Largest cluster count an annotator accepts.
///
/// Masks and highlights together take `N * h * w * 4` bytes, so a single
/// stray label value in a 16-bit image would otherwise exhaust memory.
pub const MAX_CLUSTERS: usize = 1024;

/// Reference images may be shown at these integer multiples of the cluster grid.
pub const SUPPORTED_REFERENCE_SCALES: [usize; 2] = [1, 2];

/// Marker appended to the hovered cluster index in the status line while a
/// label is being typed.
pub const EDITING_MARKER: &str = "(editing)";
