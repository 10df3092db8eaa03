use egui::{FontId, Key, Rect};

use crate::PaintApp;
use crate::editor::UiAction;
use crate::text::text_px_size;

/// Floating single-line entry for the text tool, placed at the clicked point.
///
/// Enter commits, Escape cancels. Returns the overlay's screen rect while it is open.
pub fn text_overlay(app: &mut PaintApp, ctx: &egui::Context, canvas_rect: Rect) -> Option<Rect> {
    let Some(anchor) = app.editor().pending_text().map(|pending| pending.anchor) else {
        app.focused_text_anchor = None;
        return None;
    };
    let needs_focus = app.focused_text_anchor != Some(anchor);
    app.focused_text_anchor = Some(anchor);

    let scale = canvas_rect.width() / app.editor().surface().width().max(1) as f32;
    let tools = app.editor().tools().clone();
    let font = FontId::new(text_px_size(tools.size) * scale, tools.font.egui_family());
    let screen_pos = canvas_rect.min + anchor.to_vec2() * scale;

    let mut action = None;
    let area = egui::Area::new(egui::Id::new("text_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen_pos)
        .show(ctx, |ui| {
            let Some(pending) = app.editor_mut().pending_text_mut() else {
                return;
            };
            let response = ui.add(
                egui::TextEdit::singleline(&mut pending.value)
                    .font(font)
                    .text_color(tools.color.to_color32())
                    .hint_text("Type, then Enter"),
            );
            if needs_focus {
                response.request_focus();
            }
            if response.lost_focus() {
                if ui.input(|i| i.key_pressed(Key::Enter)) {
                    action = Some(UiAction::CommitText);
                } else if ui.input(|i| i.key_pressed(Key::Escape)) {
                    action = Some(UiAction::CancelText);
                }
            }
        });

    match action {
        Some(action) => {
            app.dispatch(action);
            app.focused_text_anchor = None;
            None
        }
        None => Some(area.response.rect),
    }
}
