use egui::{Color32, RichText, Sense, TextureHandle};

use crate::PaintApp;
use crate::color::Rgb;
use crate::editor::{UiAction, rainbow_hue};
use crate::text::FontChoice;
use crate::tools::ToolKind;
use crate::util::time;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.editor().tools().tool;
            for tool in ToolKind::ALL {
                let mut label = RichText::new(tool.label());
                if tool == ToolKind::RainbowBrush && active == tool {
                    // the active rainbow button cycles through the same hues the brush paints
                    let hue = rainbow_hue(time::now_millis());
                    label = label.color(Rgb::from_hue(hue).to_color32()).strong();
                    ctx.request_repaint_after(std::time::Duration::from_millis(50));
                }
                if ui.selectable_label(active == tool, label).clicked() {
                    app.dispatch(UiAction::SelectTool(tool));
                }
            }
            ui.separator();

            let tools = app.editor().tools().clone();
            ui.horizontal(|ui| {
                let mode = if tools.fill_mode { "Fill" } else { "Stroke" };
                if ui.button(mode).on_hover_text("Toggle fill for shapes").clicked() {
                    app.dispatch(UiAction::ToggleFill);
                }
            });

            let mut size = tools.size;
            if ui
                .add(egui::Slider::new(&mut size, app.editor().brush_range()).text("Size"))
                .changed()
            {
                app.dispatch(UiAction::SetBrushSize(size));
            }

            let mut font = tools.font;
            egui::ComboBox::from_label("Font")
                .selected_text(font.label())
                .show_ui(ui, |ui| {
                    for choice in FontChoice::ALL {
                        ui.selectable_value(&mut font, choice, choice.label());
                    }
                });
            if font != tools.font {
                app.dispatch(UiAction::SetFont(font));
            }
            ui.separator();

            ui.horizontal(|ui| {
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(24.0, 24.0), Sense::hover());
                ui.painter().rect_filled(swatch, 4.0, tools.color.to_color32());
                ui.painter()
                    .rect_stroke(swatch, 4.0, egui::Stroke::new(1.0, Color32::GRAY));
                ui.label(tools.color.to_string());
            });

            let hue_texture = app.hue_texture().cloned();
            let sv_texture = app.sv_texture().cloned();
            ui.horizontal(|ui| {
                let hue_click = hue_texture.as_ref().and_then(|texture| clicked_pixel(ui, texture));
                if let Some((_, y)) = hue_click {
                    app.dispatch(UiAction::PickHue { y });
                }
                let sv_click = sv_texture.as_ref().and_then(|texture| clicked_pixel(ui, texture));
                if let Some((x, y)) = sv_click {
                    app.dispatch(UiAction::PickColor { x, y });
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.editor().history().can_undo();
                let can_redo = app.editor().history().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.dispatch(UiAction::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.dispatch(UiAction::Redo);
                }
                if ui.button("Clear").clicked() {
                    app.dispatch(UiAction::Clear);
                }
            });

            ui.horizontal(|ui| {
                let importing = app.is_importing();
                if ui.add_enabled(!importing, egui::Button::new("Upload")).clicked() {
                    app.start_import(ctx);
                }
                if ui.button("Download").clicked() {
                    app.export();
                }
            });
            ui.separator();

            let history = app.editor().history();
            ui.horizontal(|ui| {
                ui.label(format!("Undo stack size: {}", history.undo_len()));
                ui.label(format!("Redo stack size: {}", history.redo_len()));
            });
            ui.label(format!("State: {}", app.editor().state().name()));
        });
}

/// Show a picker raster at its native size and report a click in its pixel space
fn clicked_pixel(ui: &mut egui::Ui, texture: &TextureHandle) -> Option<(f32, f32)> {
    let size = texture.size_vec2();
    let response = ui.add(egui::Image::new((texture.id(), size)).sense(Sense::click()));
    if !response.clicked() {
        return None;
    }
    let pos = response.interact_pointer_pos()?;
    let rect = response.rect;
    let x = (pos.x - rect.min.x) * size.x / rect.width().max(1.0);
    let y = (pos.y - rect.min.y) * size.y / rect.height().max(1.0);
    Some((x, y))
}
