use pixcluscol_core::{Annotator, Event, Key, SessionMode, Shown};

use crate::app::PixclusApp;

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 40.0;

pub fn show(ctx: &egui::Context, app: &mut PixclusApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let texture_id = app.viewport.primary.texture.as_ref().map(|t| t.id());
        let Some((texture_id, (h, w))) = texture_id.zip(app.annotator.as_ref().map(Annotator::shape))
        else {
            show_placeholder(ui);
            return;
        };

        // The picker is stretched over the same extent as the cluster image.
        let image_size = egui::vec2(w as f32, h as f32);
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        if app.viewport.needs_fit {
            fit_to_rect(&mut app.viewport.zoom, &mut app.viewport.pan_offset, image_size, rect);
            app.viewport.needs_fit = false;
        }
        handle_zoom(ui, &response, app, rect);
        handle_pan(ui, &response, app);

        let img_rect = compute_img_rect(rect, image_size, app);
        forward_pointer(ui, &response, app, img_rect, (h, w));
        forward_keys(ui, app);

        let stale = app
            .annotator
            .as_ref()
            .is_some_and(|a| app.viewport.primary.is_stale((a.shown(), a.revision())));
        if stale {
            ctx.request_repaint();
        }

        draw_image(ui, texture_id, img_rect);
        if let Some(annotator) = app.annotator.as_ref() {
            draw_viewing_label(ui, rect, &viewing_label(annotator));
        }
    });
}

/// Map a screen position to plot data coordinates: pixel centers on
/// integers, `x` along columns and `y` along rows.
fn screen_to_data(pos: egui::Pos2, img_rect: egui::Rect, (h, w): (usize, usize)) -> (f64, f64) {
    let u = ((pos.x - img_rect.min.x) / img_rect.width()) as f64;
    let v = ((pos.y - img_rect.min.y) / img_rect.height()) as f64;
    (u * w as f64 - 0.5, v * h as f64 - 0.5)
}

fn forward_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut PixclusApp,
    img_rect: egui::Rect,
    shape: (usize, usize),
) {
    let hover = response.hover_pos().filter(|p| img_rect.contains(*p));

    match (app.viewport.pointer_in_plot, hover) {
        (false, Some(_)) => {
            app.viewport.pointer_in_plot = true;
            app.dispatch(Event::PointerEnter);
        }
        (true, None) => {
            app.viewport.pointer_in_plot = false;
            app.viewport.last_pointer = None;
            app.dispatch(Event::PointerLeave);
        }
        _ => {}
    }

    if let Some(pos) = hover {
        let (x, y) = screen_to_data(pos, img_rect, shape);
        if app.viewport.last_pointer != Some((x, y)) {
            app.viewport.last_pointer = Some((x, y));
            app.dispatch(Event::PointerMove { x, y });
        }
    }

    let panning = ui.input(|i| i.modifiers.command);
    if response.clicked() && !panning {
        if let Some(pos) = response.interact_pointer_pos().filter(|p| img_rect.contains(*p)) {
            let (x, y) = screen_to_data(pos, img_rect, shape);
            app.dispatch(Event::Click { x, y });
        }
    }
}

/// Forward typed text and editing keys, but only while the pointer is over
/// the plot or a pick or edit is in progress.
fn forward_keys(ui: &egui::Ui, app: &mut PixclusApp) {
    let busy = app.annotator.as_ref().is_some_and(|a| {
        matches!(
            a.mode(),
            SessionMode::PickingColor { .. } | SessionMode::EditingLabel
        )
    });
    if !app.viewport.pointer_in_plot && !busy {
        return;
    }

    let events = ui.input(|i| i.events.clone());
    for event in events {
        match event {
            egui::Event::Text(text) => {
                for c in text.chars() {
                    app.dispatch(Event::Key(Key::Char(c)));
                }
            }
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => {
                if let Some(name) = key_name(key, modifiers) {
                    app.dispatch(Event::Key(Key::from_name(name)));
                }
            }
            _ => {}
        }
    }
}

fn key_name(key: egui::Key, modifiers: egui::Modifiers) -> Option<&'static str> {
    match key {
        egui::Key::Escape => Some("escape"),
        egui::Key::Enter => Some("enter"),
        egui::Key::Backspace if modifiers.shift => Some("shift+backspace"),
        egui::Key::Backspace if modifiers.ctrl => Some("ctrl+backspace"),
        egui::Key::Backspace => Some("backspace"),
        egui::Key::D if modifiers.ctrl => Some("ctrl+d"),
        _ => None,
    }
}

fn viewing_label(annotator: &Annotator) -> String {
    match annotator.shown() {
        Shown::Color => "Colors".to_string(),
        Shown::Highlight(i) => format!("Cluster {i}: {}", annotator.label_names()[i]),
        Shown::Picker => match annotator.pending_color() {
            Some(i) => format!("Pick a color for cluster {i}"),
            None => "Picker".to_string(),
        },
    }
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut PixclusApp, rect: egui::Rect) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }

    let zoom_factor = (scroll_delta * 0.005).exp();
    let new_zoom = (app.viewport.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);

    // Zoom toward mouse cursor
    if let Some(mouse_pos) = ui.input(|i| i.pointer.hover_pos()) {
        let center = rect.center().to_vec2() + app.viewport.pan_offset;
        let mouse_rel = mouse_pos.to_vec2() - center;
        let scale_change = new_zoom / app.viewport.zoom;
        app.viewport.pan_offset += mouse_rel * (1.0 - scale_change);
    }

    app.viewport.zoom = new_zoom;
}

fn handle_pan(ui: &egui::Ui, response: &egui::Response, app: &mut PixclusApp) {
    if response.dragged_by(egui::PointerButton::Middle)
        || (response.dragged_by(egui::PointerButton::Primary) && ui.input(|i| i.modifiers.command))
    {
        app.viewport.pan_offset += response.drag_delta();
    }
}

fn compute_img_rect(rect: egui::Rect, image_size: egui::Vec2, app: &PixclusApp) -> egui::Rect {
    let scaled = image_size * app.viewport.zoom;
    let center = rect.center() + app.viewport.pan_offset;
    egui::Rect::from_center_size(center, scaled)
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_viewing_label(ui: &egui::Ui, rect: egui::Rect, label: &str) {
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open a label file to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}

fn fit_to_rect(zoom: &mut f32, pan: &mut egui::Vec2, image_size: egui::Vec2, rect: egui::Rect) {
    let available = rect.size();
    let fit_x = available.x / image_size.x;
    let fit_y = available.y / image_size.y;
    *zoom = fit_x.min(fit_y).clamp(MIN_ZOOM, MAX_ZOOM);
    *pan = egui::Vec2::ZERO;
}
