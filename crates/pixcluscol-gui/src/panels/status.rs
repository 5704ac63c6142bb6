use pixcluscol_core::SessionMode;

use crate::app::PixclusApp;

pub fn show(ctx: &egui::Context, app: &mut PixclusApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Annotator status line: hovered cluster, edit marker, label buffer.
        let status = app
            .annotator
            .as_ref()
            .map(|a| a.status_text())
            .unwrap_or_default();
        ui.label(egui::RichText::new(status).monospace().size(15.0));

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if let Some(ref annotator) = app.annotator {
                let (h, w) = annotator.shape();
                ui.label(format!("{w}x{h}"));
                ui.separator();
                ui.label(format!("Mode: {}", mode_name(annotator.mode())));
                ui.separator();
            }
            ui.label(format!("Zoom: {:.0}%", app.viewport.zoom * 100.0));
            if let Some(ref path) = app.ui_state.annotation_path {
                ui.separator();
                ui.label(format!("Annotation: {}", path.display()));
            }
        });

        ui.add_space(2.0);
    });
}

fn mode_name(mode: SessionMode) -> &'static str {
    match mode {
        SessionMode::Idle => "idle",
        SessionMode::Hovering => "hovering",
        SessionMode::PickingColor { .. } => "picking color",
        SessionMode::EditingLabel => "editing label",
    }
}
