//! The pixel-cluster annotator: derived images plus the interaction state
//! machine that drives them.

pub mod event;
mod session;

use std::path::Path;

use ndarray::{Array2, Array3, Array4, ArrayView3, Axis};
use tracing::{debug, info};

use crate::codec::Annotation;
use crate::color::Rgb;
use crate::config::AnnotatorConfig;
use crate::consts::{COLOR_CHANNEL_COUNT, EDITING_MARKER};
use crate::error::{AnnotatorError, Result};
use crate::labels;
use crate::masks::{self, HighlightStyle};
use crate::picker;

pub use event::{parse_event_log, Event, Key};
pub use session::{SessionMode, Shown};

/// Derived data for an attached reference image.
#[derive(Clone, Debug)]
pub struct ReferenceBundle {
    /// RGB reference image, shape (h * scale, w * scale, 3).
    pub image: Array3<u8>,
    /// 1 or 2.
    pub scale: usize,
    /// Cluster masks upscaled to the reference resolution.
    pub masks: Array3<bool>,
    pub highlights: Array4<u8>,
}

/// Interactive pixel-cluster annotator.
///
/// Owns the label grid, the user's palette and names, every image derived
/// from them, and the session state. All mutation goes through its methods,
/// which leave the derived images consistent before returning.
#[derive(Clone, Debug)]
pub struct Annotator {
    config: AnnotatorConfig,
    cluster_image: Array2<u32>,
    num_labels: usize,
    masks: Array3<bool>,
    palette: Vec<Rgb>,
    label_names: Vec<String>,
    color_image: Array3<u8>,
    highlights: Array4<u8>,
    picker: Array3<u8>,
    reference: Option<ReferenceBundle>,

    mode: SessionMode,
    hovered: Option<usize>,
    label_buffer: String,
    pointer_inside: bool,
    shown: Shown,
    revision: u64,
}

impl Annotator {
    /// Create an annotator with the default config.
    pub fn new(cluster_image: Array2<u32>) -> Result<Self> {
        Self::with_config(cluster_image, AnnotatorConfig::default())
    }

    /// Create an annotator for a grid of one-based cluster labels.
    pub fn with_config(cluster_image: Array2<u32>, config: AnnotatorConfig) -> Result<Self> {
        let num_labels = labels::validate(&cluster_image)?;
        let (h, w) = cluster_image.dim();
        let palette = vec![[0u8; 3]; num_labels];
        let masks = masks::build_masks(&cluster_image, num_labels);
        let color_image = masks::build_color_image(&cluster_image, &palette);
        let highlights = masks::build_highlights(&color_image, &masks, (&config).into());
        let picker = picker::build_picker(&config.picker);

        info!(height = h, width = w, clusters = num_labels, "Annotator ready");

        Ok(Self {
            label_names: labels::default_names(num_labels),
            config,
            cluster_image,
            num_labels,
            masks,
            palette,
            color_image,
            highlights,
            picker,
            reference: None,
            mode: SessionMode::Idle,
            hovered: None,
            label_buffer: String::new(),
            pointer_inside: false,
            shown: Shown::Color,
            revision: 0,
        })
    }

    // --- accessors -------------------------------------------------------

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// (rows, cols) of the cluster grid.
    pub fn shape(&self) -> (usize, usize) {
        self.cluster_image.dim()
    }

    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    /// One-based label grid.
    pub fn cluster_image(&self) -> &Array2<u32> {
        &self.cluster_image
    }

    pub fn masks(&self) -> &Array3<bool> {
        &self.masks
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    pub fn color_image(&self) -> &Array3<u8> {
        &self.color_image
    }

    pub fn highlights(&self) -> &Array4<u8> {
        &self.highlights
    }

    pub fn highlight(&self, cluster: usize) -> Result<ArrayView3<'_, u8>> {
        self.check_cluster(cluster)?;
        Ok(self.highlights.index_axis(Axis(0), cluster))
    }

    pub fn picker(&self) -> &Array3<u8> {
        &self.picker
    }

    pub fn reference(&self) -> Option<&ReferenceBundle> {
        self.reference.as_ref()
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Cluster awaiting a new color, while picking.
    pub fn pending_color(&self) -> Option<usize> {
        match self.mode {
            SessionMode::PickingColor { pending } => Some(pending),
            _ => None,
        }
    }

    pub fn label_buffer(&self) -> &str {
        &self.label_buffer
    }

    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// Which image the primary panel should show.
    pub fn shown(&self) -> Shown {
        self.shown
    }

    /// Bumped every time any derived image is rebuilt.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The image the primary panel should show right now.
    pub fn displayed(&self) -> ArrayView3<'_, u8> {
        match self.shown {
            Shown::Color => self.color_image.view(),
            Shown::Highlight(i) => self.highlights.index_axis(Axis(0), i),
            Shown::Picker => self.picker.view(),
        }
    }

    /// The image the reference panel should show, mirroring [`Self::displayed`].
    pub fn displayed_reference(&self) -> Option<ArrayView3<'_, u8>> {
        let reference = self.reference.as_ref()?;
        Some(match self.shown {
            Shown::Highlight(i) => reference.highlights.index_axis(Axis(0), i),
            Shown::Color | Shown::Picker => reference.image.view(),
        })
    }

    /// One-line status: hovered cluster, edit marker and label buffer.
    pub fn status_text(&self) -> String {
        let index = match self.mode {
            SessionMode::PickingColor { pending } => Some(pending),
            _ => self.hovered,
        };
        match index {
            Some(i) => {
                let marker = if self.mode == SessionMode::EditingLabel {
                    EDITING_MARKER
                } else {
                    ""
                };
                format!("{i}{marker}: {}", self.label_buffer)
            }
            None => String::new(),
        }
    }

    /// Cluster index under a pointer position in plot data coordinates.
    pub fn cluster_at(&self, x: f64, y: f64) -> Result<usize> {
        let (row, col) = labels::pixel_at(self.shape(), x, y)?;
        Ok(labels::cluster_index(self.cluster_image[[row, col]]))
    }

    // --- direct mutation -------------------------------------------------

    /// Assign a color to a cluster, recolor its pixels and rebuild every
    /// highlight image.
    pub fn set_color(&mut self, cluster: usize, rgb: Rgb) -> Result<()> {
        self.check_cluster(cluster)?;
        self.palette[cluster] = rgb;
        let mask = self.masks.index_axis(Axis(0), cluster);
        for ((row, col), &inside) in mask.indexed_iter() {
            if inside {
                for ch in 0..COLOR_CHANNEL_COUNT {
                    self.color_image[[row, col, ch]] = rgb[ch];
                }
            }
        }
        self.rebuild_highlights();
        debug!(cluster, ?rgb, "Cluster recolored");
        Ok(())
    }

    pub fn rename(&mut self, cluster: usize, name: impl Into<String>) -> Result<()> {
        self.check_cluster(cluster)?;
        self.label_names[cluster] = name.into();
        debug!(cluster, name = %self.label_names[cluster], "Cluster renamed");
        Ok(())
    }

    /// Show the color picker and wait for a color for `cluster`.
    pub fn begin_pick(&mut self, cluster: usize) -> Result<()> {
        self.check_cluster(cluster)?;
        self.mode = SessionMode::PickingColor { pending: cluster };
        self.hovered = Some(cluster);
        self.shown = Shown::Picker;
        self.label_buffer = self.label_names[cluster].clone();
        Ok(())
    }

    /// Finish a pick with the color read under the cursor.
    ///
    /// Does nothing unless a pick is in progress.
    pub fn commit_color(&mut self, rgb: Rgb) -> Result<()> {
        let Some(pending) = self.pending_color() else {
            debug!("commit_color outside a pick, ignored");
            return Ok(());
        };
        self.set_color(pending, rgb)?;
        self.mode = self.resting_mode();
        self.shown = Shown::Color;
        self.label_buffer.clear();
        Ok(())
    }

    /// Abandon a pick, discarding anything typed meanwhile.
    pub fn cancel_pick(&mut self) {
        if self.pending_color().is_none() {
            return;
        }
        self.mode = self.resting_mode();
        self.shown = Shown::Color;
        self.label_buffer = self
            .hovered
            .map(|i| self.label_names[i].clone())
            .unwrap_or_default();
    }

    /// Attach a reference image at 1x or 2x the cluster grid resolution.
    ///
    /// On a resolution mismatch nothing is changed.
    pub fn attach_reference(&mut self, image: Array3<u8>) -> Result<()> {
        let (rh, rw, channels) = image.dim();
        if channels != COLOR_CHANNEL_COUNT {
            return Err(AnnotatorError::UnsupportedLayout(format!(
                "reference image has {channels} channels, expected {COLOR_CHANNEL_COUNT}"
            )));
        }
        let scale = masks::reference_scale(self.shape(), (rh, rw))?;
        self.reference = Some(self.build_reference(image, scale));
        self.revision += 1;
        info!(scale, "Reference image attached");
        Ok(())
    }

    pub fn detach_reference(&mut self) -> Option<ReferenceBundle> {
        self.revision += 1;
        self.reference.take()
    }

    // --- annotation round trip -------------------------------------------

    pub fn annotation(&self) -> Annotation {
        Annotation::capture(&self.palette, &self.label_names, &self.cluster_image)
    }

    /// Encode palette, names and assignment as a list literal.
    pub fn serialize(&self) -> Result<String> {
        self.annotation().encode()
    }

    /// Replace palette, names and assignment from the list-literal text
    /// form. The cluster count may change; every derived image is rebuilt.
    pub fn deserialize(&mut self, text: &str) -> Result<()> {
        let annotation = Annotation::decode(text)?;
        self.apply_annotation(annotation)
    }

    /// Apply a decoded annotation. On error nothing is changed.
    pub fn apply_annotation(&mut self, annotation: Annotation) -> Result<()> {
        let (grid, num_labels) = annotation.to_grid(self.shape())?;

        self.cluster_image = grid;
        self.num_labels = num_labels;
        self.palette = annotation.palette;
        self.label_names = annotation.label_names;
        self.rebuild_all();

        self.mode = self.resting_mode();
        self.hovered = None;
        self.label_buffer.clear();
        self.shown = Shown::Color;

        info!(clusters = num_labels, "Annotation loaded");
        Ok(())
    }

    pub fn save_annotation(&self, path: &Path) -> Result<()> {
        self.annotation().save(path)
    }

    pub fn load_annotation_file(&mut self, path: &Path) -> Result<()> {
        let annotation = Annotation::load(path)?;
        self.apply_annotation(annotation)
    }

    // --- internals -------------------------------------------------------

    fn check_cluster(&self, cluster: usize) -> Result<()> {
        if cluster >= self.num_labels {
            return Err(AnnotatorError::ClusterOutOfRange {
                index: cluster,
                total: self.num_labels,
            });
        }
        Ok(())
    }

    /// Mode to fall back to once a pick or edit is over.
    fn resting_mode(&self) -> SessionMode {
        if self.pointer_inside {
            SessionMode::Hovering
        } else {
            SessionMode::Idle
        }
    }

    fn style(&self) -> HighlightStyle {
        (&self.config).into()
    }

    fn rebuild_highlights(&mut self) {
        self.highlights = masks::build_highlights(&self.color_image, &self.masks, self.style());
        self.revision += 1;
    }

    fn rebuild_all(&mut self) {
        self.masks = masks::build_masks(&self.cluster_image, self.num_labels);
        self.color_image = masks::build_color_image(&self.cluster_image, &self.palette);
        if let Some(old) = self.reference.take() {
            self.reference = Some(self.build_reference(old.image, old.scale));
        }
        self.rebuild_highlights();
    }

    fn build_reference(&self, image: Array3<u8>, scale: usize) -> ReferenceBundle {
        let masks = masks::upscale_masks(&self.masks, scale);
        let highlights = masks::build_reference_highlights(&image, &masks, self.style());
        ReferenceBundle {
            image,
            scale,
            masks,
            highlights,
        }
    }
}
