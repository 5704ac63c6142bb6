use pixcluscol_core::labels::cluster_sizes;
use pixcluscol_core::SessionMode;

use crate::app::PixclusApp;
use crate::panels::section_header;

const SWATCH_SIZE: f32 = 14.0;

/// Right panel listing every cluster with its color, name and size.
pub fn show(ctx: &egui::Context, app: &mut PixclusApp) {
    let Some(annotator) = app.annotator.as_mut() else {
        return;
    };

    egui::SidePanel::right("clusters")
        .default_width(240.0)
        .resizable(true)
        .show(ctx, |ui| {
            let count = format!("{}", annotator.num_labels());
            section_header(ui, "Clusters", Some(&count));
            ui.separator();

            let sizes = cluster_sizes(annotator.cluster_image(), annotator.num_labels());
            let hovered = annotator.hovered();
            let pending = annotator.pending_color();
            let mut pick = None;

            egui::ScrollArea::vertical().show(ui, |ui| {
                for (i, &size) in sizes.iter().enumerate() {
                    ui.horizontal(|ui| {
                        let [r, g, b] = annotator.palette()[i];
                        let (swatch, _) = ui.allocate_exact_size(
                            egui::vec2(SWATCH_SIZE, SWATCH_SIZE),
                            egui::Sense::hover(),
                        );
                        ui.painter()
                            .rect_filled(swatch, 2.0, egui::Color32::from_rgb(r, g, b));

                        let name = format!("{i}  {}", annotator.label_names()[i]);
                        let text = if hovered == Some(i) || pending == Some(i) {
                            egui::RichText::new(name).strong()
                        } else {
                            egui::RichText::new(name)
                        };
                        ui.label(text);

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Color").clicked() {
                                pick = Some(i);
                            }
                            ui.small(format!("{size} px"));
                        });
                    });
                }
            });

            if let Some(i) = pick {
                // The next click on the plot samples the picker.
                if let Err(e) = annotator.begin_pick(i) {
                    tracing::warn!(error = %e, "Pick rejected");
                }
            }

            if matches!(annotator.mode(), SessionMode::PickingColor { .. }) {
                ui.separator();
                ui.small("Click the picker to choose a color, Escape to cancel");
            }
        });
}
