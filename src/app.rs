use egui::{TextureHandle, TextureOptions};

use crate::config::PaintConfig;
use crate::editor::{Editor, UiAction};
use crate::error::{PaintError, PaintResult};
use crate::export;
use crate::import::{self, PendingImport};
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};

/// The eframe shell around the editor: textures, panels and async imports
pub struct PaintApp {
    editor: Editor,
    pub(crate) input: InputHandler,
    canvas_texture: Option<TextureHandle>,
    /// Editor revision last uploaded to `canvas_texture`
    canvas_revision: Option<u64>,
    hue_texture: Option<TextureHandle>,
    sv_texture: Option<TextureHandle>,
    /// Picker revision last uploaded to `sv_texture`
    sv_revision: Option<u64>,
    pending_import: Option<PendingImport>,
    /// Anchor of the text entry that already received focus
    pub(crate) focused_text_anchor: Option<egui::Pos2>,
    /// Screen rect of the text overlay in the previous frame
    pub(crate) overlay_rect: Option<egui::Rect>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &PaintConfig) -> PaintResult<Self> {
        Ok(Self::with_editor(Editor::new(config)?))
    }

    pub fn with_editor(editor: Editor) -> Self {
        Self {
            editor,
            input: InputHandler::new(),
            canvas_texture: None,
            canvas_revision: None,
            hue_texture: None,
            sv_texture: None,
            sv_revision: None,
            pending_import: None,
            focused_text_anchor: None,
            overlay_rect: None,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn dispatch(&mut self, action: UiAction) {
        self.editor.dispatch(action);
    }

    pub fn canvas_texture(&self) -> Option<&TextureHandle> {
        self.canvas_texture.as_ref()
    }

    pub fn hue_texture(&self) -> Option<&TextureHandle> {
        self.hue_texture.as_ref()
    }

    pub fn sv_texture(&self) -> Option<&TextureHandle> {
        self.sv_texture.as_ref()
    }

    pub fn is_importing(&self) -> bool {
        self.pending_import.is_some()
    }

    /// Open the file picker unless an import is already running
    pub fn start_import(&mut self, ctx: &egui::Context) {
        if self.pending_import.is_none() {
            self.pending_import = Some(PendingImport::pick_file(ctx));
        }
    }

    /// Encode the canvas and hand it to the user
    pub fn export(&self) {
        let result = self
            .editor
            .export_png()
            .map_err(PaintError::from)
            .and_then(|png| export::save_png(&png).map_err(PaintError::from));
        match result {
            Ok(true) => {}
            Ok(false) => log::debug!("Export cancelled"),
            Err(err) => log::error!("Export failed: {}", err),
        }
    }

    fn poll_import(&mut self) {
        let Some(result) = self.pending_import.as_mut().and_then(PendingImport::poll) else {
            return;
        };
        self.pending_import = None;
        match result {
            Ok(Some(image)) => self.dispatch(UiAction::ImportImage(image)),
            Ok(None) => {}
            Err(err) => log::error!("Image import failed: {}", err),
        }
    }

    fn import_dropped(&mut self, ctx: &egui::Context) {
        for image in import::dropped_images(ctx) {
            self.dispatch(UiAction::ImportImage(image));
        }
    }

    /// Re-upload whichever rasters changed since the last frame
    fn sync_textures(&mut self, ctx: &egui::Context) {
        if self.canvas_revision != Some(self.editor.revision()) {
            let image = self.editor.surface().to_color_image();
            upload(ctx, &mut self.canvas_texture, "canvas", image);
            self.canvas_revision = Some(self.editor.revision());
        }
        if self.hue_texture.is_none() {
            let image = self.editor.picker().hue_bar_image();
            upload(ctx, &mut self.hue_texture, "hue_bar", image);
        }
        let picker_revision = self.editor.picker().revision();
        if self.sv_revision != Some(picker_revision) {
            let image = self.editor.picker().sv_panel_image();
            upload(ctx, &mut self.sv_texture, "sv_panel", image);
            self.sv_revision = Some(picker_revision);
        }
    }
}

fn upload(
    ctx: &egui::Context,
    slot: &mut Option<TextureHandle>,
    name: &str,
    image: egui::ColorImage,
) {
    match slot {
        Some(handle) => handle.set(image, TextureOptions::NEAREST),
        None => *slot = Some(ctx.load_texture(name, image, TextureOptions::NEAREST)),
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_import();
        self.import_dropped(ctx);

        self.sync_textures(ctx);
        tools_panel(self, ctx);

        central_panel(self, ctx);

        // edits from this frame's input are uploaded on the next one
        if self.canvas_revision != Some(self.editor.revision()) {
            ctx.request_repaint();
        }
    }
}
