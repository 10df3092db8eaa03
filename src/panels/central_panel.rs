use egui::{Color32, Rect, Sense, pos2, vec2};

use crate::PaintApp;
use crate::input::CanvasView;
use crate::panels::text_overlay;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let surface = app.editor().surface();
            let canvas_size = vec2(surface.width() as f32, surface.height() as f32);
            let (response, painter) = ui.allocate_painter(canvas_size, Sense::click_and_drag());
            let canvas_rect = response.rect;

            // Handle input, only where the canvas can actually be seen
            let view = CanvasView {
                rect: canvas_rect,
                visible: canvas_rect.intersect(ui.clip_rect()),
                size: canvas_size,
                accepts_presses: response.hovered(),
                covered: app.overlay_rect,
            };
            let events = app.input.process_input(ctx, &view);
            for event in events {
                app.editor_mut().handle_input(event);
            }

            if response.hovered() {
                ctx.set_cursor_icon(app.editor().cursor());
            }

            // Render the canvas over a white page; erased pixels show through
            painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);
            if let Some(texture) = app.canvas_texture() {
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(texture.id(), canvas_rect, uv, Color32::WHITE);
            }

            app.overlay_rect = text_overlay(app, ctx, canvas_rect);
        });
    });
}
