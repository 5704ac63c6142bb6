use std::sync::mpsc;

use anyhow::Result;
use pixcluscol_core::{Annotator, AnnotatorConfig, Event};
use tracing::warn;

use crate::convert::rgb_to_color_image;
use crate::messages::DialogResult;
use crate::panels;
use crate::states::{UIState, ViewportState};

pub struct PixclusApp {
    pub result_tx: mpsc::Sender<DialogResult>,
    pub result_rx: mpsc::Receiver<DialogResult>,
    pub annotator: Option<Annotator>,
    pub config: AnnotatorConfig,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub show_about: bool,
}

impl PixclusApp {
    pub fn new(_ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();

        Self {
            result_tx,
            result_rx,
            annotator: None,
            config: AnnotatorConfig::default(),
            ui_state: UIState {
                show_reference: true,
                ..Default::default()
            },
            viewport: ViewportState::default(),
            show_about: false,
        }
    }

    /// Drain all pending results from dialog threads.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                DialogResult::Labels { path, grid } => {
                    match Annotator::with_config(grid, self.config.clone()) {
                        Ok(annotator) => {
                            let (h, w) = annotator.shape();
                            self.ui_state.add_log(format!(
                                "Opened: {} ({}x{}, {} clusters)",
                                path.display(),
                                w,
                                h,
                                annotator.num_labels()
                            ));
                            self.annotator = Some(annotator);
                            self.ui_state.labels_path = Some(path);
                            self.ui_state.reference_path = None;
                            self.ui_state.annotation_path = None;
                            self.viewport.primary.clear();
                            self.viewport.reference.clear();
                            self.viewport.needs_fit = true;
                            self.viewport.pointer_in_plot = false;
                            self.viewport.last_pointer = None;
                        }
                        Err(e) => self.report_error(&e),
                    }
                }
                DialogResult::Reference { path, image } => {
                    let Some(annotator) = self.annotator.as_mut() else {
                        self.ui_state.add_log("Open a label file before a reference".into());
                        continue;
                    };
                    match annotator.attach_reference(image) {
                        Ok(()) => {
                            let scale = annotator.reference().map_or(1, |r| r.scale);
                            self.ui_state
                                .add_log(format!("Reference: {} ({scale}x)", path.display()));
                            self.ui_state.reference_path = Some(path);
                        }
                        Err(e) => self.report_error(&e),
                    }
                }
                DialogResult::Annotation { path, annotation } => {
                    let Some(annotator) = self.annotator.as_mut() else {
                        self.ui_state.add_log("Open a label file before an annotation".into());
                        continue;
                    };
                    match annotator.apply_annotation(annotation) {
                        Ok(()) => {
                            self.ui_state.add_log(format!(
                                "Loaded annotation: {} ({} clusters)",
                                path.display(),
                                annotator.num_labels()
                            ));
                            self.ui_state.annotation_path = Some(path);
                        }
                        Err(e) => self.report_error(&e),
                    }
                }
                DialogResult::Config { path, config } => {
                    self.config = config;
                    self.ui_state
                        .add_log(format!("Config: {}", path.display()));
                    if let Err(e) = self.rebuild_with_config() {
                        self.ui_state.add_log(format!("ERROR: {e:#}"));
                    }
                }
                DialogResult::Saved { path } => {
                    self.ui_state
                        .add_log(format!("Saved: {}", path.display()));
                    self.ui_state.annotation_path = Some(path);
                }
                DialogResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    /// Recreate the annotator under the current config, carrying over the
    /// annotation and reference image.
    fn rebuild_with_config(&mut self) -> Result<()> {
        let Some(old) = self.annotator.take() else {
            return Ok(());
        };
        let mut annotator = Annotator::with_config(old.cluster_image().clone(), self.config.clone())?;
        annotator.apply_annotation(old.annotation())?;
        if let Some(reference) = old.reference() {
            annotator.attach_reference(reference.image.clone())?;
        }
        self.annotator = Some(annotator);
        self.viewport.primary.clear();
        self.viewport.reference.clear();
        Ok(())
    }

    fn report_error(&mut self, e: &pixcluscol_core::AnnotatorError) {
        warn!(error = %e, "Operation failed");
        self.ui_state.add_log(format!("ERROR: {e}"));
    }

    /// Forward one event to the annotator, logging rejected pointer positions.
    pub fn dispatch(&mut self, event: Event) {
        let Some(annotator) = self.annotator.as_mut() else {
            return;
        };
        if let Err(e) = annotator.handle(event) {
            warn!(error = %e, "Event rejected");
        }
    }

    /// Rebuild the viewport textures when the shown image or the annotator
    /// revision changed.
    fn refresh_textures(&mut self, ctx: &egui::Context) {
        let Some(annotator) = self.annotator.as_ref() else {
            self.viewport.primary.clear();
            self.viewport.reference.clear();
            return;
        };
        let key = (annotator.shown(), annotator.revision());

        if self.viewport.primary.is_stale(key) {
            let image = rgb_to_color_image(annotator.displayed());
            self.viewport.primary.texture =
                Some(ctx.load_texture("viewport", image, egui::TextureOptions::NEAREST));
            self.viewport.primary.key = Some(key);
        }

        match annotator.displayed_reference() {
            Some(view) if self.viewport.reference.is_stale(key) => {
                let image = rgb_to_color_image(view);
                self.viewport.reference.texture =
                    Some(ctx.load_texture("reference", image, egui::TextureOptions::LINEAR));
                self.viewport.reference.key = Some(key);
            }
            Some(_) => {}
            None => self.viewport.reference.clear(),
        }
    }
}

impl eframe::App for PixclusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.refresh_textures(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::clusters::show(ctx, self);
        panels::reference::show(ctx, self);
        panels::viewport::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Pixel Cluster Annotator");
                        ui.label("Name and color the clusters of a label image");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
