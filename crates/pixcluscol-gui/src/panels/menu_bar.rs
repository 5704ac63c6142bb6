use pixcluscol_core::io::{image_io, load_cluster_image};
use pixcluscol_core::{Annotation, AnnotatorConfig};
use tracing::info;

use crate::app::PixclusApp;
use crate::messages::DialogResult;

pub fn show(ctx: &egui::Context, app: &mut PixclusApp) {
    let has_labels = app.annotator.is_some();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Labels...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_labels(ctx, app);
                }

                if ui.add_enabled(has_labels, egui::Button::new("Open Reference...")).clicked() {
                    ui.close();
                    open_reference(ctx, app);
                }

                ui.separator();

                if ui.add_enabled(has_labels, egui::Button::new("Load Annotation...")).clicked() {
                    ui.close();
                    load_annotation(ctx, app);
                }

                let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                if ui.add_enabled(has_labels, egui::Button::new("Save Annotation...").shortcut_text(ctx.format_shortcut(&save_shortcut))).clicked() {
                    ui.close();
                    save_annotation(ctx, app);
                }

                if ui.add_enabled(has_labels, egui::Button::new("Print Annotation")).clicked() {
                    ui.close();
                    print_annotation(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(&mut app.ui_state.show_reference, "Reference Panel");
                if ui.button("Fit to Window").clicked() {
                    ui.close();
                    app.viewport.needs_fit = true;
                }
                let has_reference = app.annotator.as_ref().is_some_and(|a| a.reference().is_some());
                if ui.add_enabled(has_reference, egui::Button::new("Detach Reference")).clicked() {
                    ui.close();
                    if let Some(annotator) = app.annotator.as_mut() {
                        annotator.detach_reference();
                    }
                    app.ui_state.reference_path = None;
                    app.ui_state.add_log("Reference detached".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_labels(ctx, app);
        }
        if has_labels && ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S))) {
            save_annotation(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_labels(ctx: &egui::Context, app: &mut PixclusApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Label grids", &["npy", "png", "tif", "tiff", "bmp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let result = match load_cluster_image(&path) {
                Ok(grid) => DialogResult::Labels { path, grid },
                Err(e) => DialogResult::Error {
                    message: format!("{}: {e}", path.display()),
                },
            };
            let _ = result_tx.send(result);
            ctx.request_repaint();
        }
    });
}

fn open_reference(ctx: &egui::Context, app: &mut PixclusApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "tif", "tiff", "bmp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let result = match image_io::load_reference_image(&path) {
                Ok(image) => DialogResult::Reference { path, image },
                Err(e) => DialogResult::Error {
                    message: format!("{}: {e}", path.display()),
                },
            };
            let _ = result_tx.send(result);
            ctx.request_repaint();
        }
    });
}

fn load_annotation(ctx: &egui::Context, app: &mut PixclusApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Annotation", &["txt"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let result = match Annotation::load(&path) {
                Ok(annotation) => DialogResult::Annotation { path, annotation },
                Err(e) => DialogResult::Error {
                    message: format!("{}: {e}", path.display()),
                },
            };
            let _ = result_tx.send(result);
            ctx.request_repaint();
        }
    });
}

fn save_annotation(ctx: &egui::Context, app: &mut PixclusApp) {
    let Some(annotator) = app.annotator.as_ref() else {
        return;
    };
    let annotation = annotator.annotation();
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Annotation", &["txt"])
            .set_file_name("annotation.txt")
            .save_file()
        {
            let result = match annotation.save(&path) {
                Ok(()) => DialogResult::Saved { path },
                Err(e) => DialogResult::Error {
                    message: format!("{}: {e}", path.display()),
                },
            };
            let _ = result_tx.send(result);
            ctx.request_repaint();
        }
    });
}

/// Print the encoded annotation to stdout and the log panel.
fn print_annotation(app: &mut PixclusApp) {
    let Some(annotator) = app.annotator.as_ref() else {
        return;
    };
    match annotator.serialize() {
        Ok(text) => {
            println!("{text}");
            info!(bytes = text.len(), "Annotation printed");
            app.ui_state.add_log(text);
        }
        Err(e) => app.ui_state.add_log(format!("ERROR: {e}")),
    }
}

fn import_config(ctx: &egui::Context, app: &mut PixclusApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        {
            let result = match AnnotatorConfig::load(&path) {
                Ok(config) => DialogResult::Config { path, config },
                Err(e) => DialogResult::Error {
                    message: format!("{}: {e}", path.display()),
                },
            };
            let _ = result_tx.send(result);
            ctx.request_repaint();
        }
    });
}
