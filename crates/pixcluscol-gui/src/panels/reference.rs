use crate::app::PixclusApp;
use crate::panels::section_header;

/// Left panel mirroring the primary view on the reference image.
pub fn show(ctx: &egui::Context, app: &mut PixclusApp) {
    if !app.ui_state.show_reference {
        return;
    }
    let Some(texture) = app.viewport.reference.texture.as_ref() else {
        return;
    };
    let scale = app
        .annotator
        .as_ref()
        .and_then(|a| a.reference())
        .map_or(1, |r| r.scale);

    egui::SidePanel::left("reference")
        .default_width(360.0)
        .resizable(true)
        .show(ctx, |ui| {
            let status = format!("{scale}x");
            section_header(ui, "Reference", Some(&status));
            if let Some(ref path) = app.ui_state.reference_path {
                ui.small(path.display().to_string());
            }
            ui.separator();

            let size = texture.size_vec2();
            let width = ui.available_width();
            let fitted = size * (width / size.x);
            ui.add(egui::Image::new((texture.id(), fitted)));
        });
}
