use crate::app::SketchApp;
use crate::renderer::{CANVAS_HEIGHT, CANVAS_WIDTH};
use egui::{Color32, Pos2, Rect};

/// The canvas: a fixed-size frame texture plus pointer capture.
pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let canvas_size = egui::vec2(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32);
        let (response, painter) = ui.allocate_painter(canvas_size, egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        let texture = app.frame_texture(ctx);
        painter.image(
            texture,
            canvas_rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
        painter.rect_stroke(canvas_rect, 0.0, egui::Stroke::new(1.0, Color32::from_gray(90)));

        app.handle_pointer(ctx, canvas_rect);
    });
}
