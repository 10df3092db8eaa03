//! The interaction controller.
//!
//! `Editor` owns every piece of mutable application state: the canvas, its
//! history, the brush settings, the pointer state machine, the pending text
//! entry and the colour picker. The UI feeds it `InputEvent`s from the canvas
//! and `UiAction`s from the controls; nothing else mutates it.

use std::ops::RangeInclusive;

use egui::{CursorIcon, Pos2};
use image::RgbaImage;

use crate::color::Rgb;
use crate::color_picker::ColorPicker;
use crate::config::PaintConfig;
use crate::error::{ExportError, PaintResult};
use crate::history::History;
use crate::input::InputEvent;
use crate::state::{DragSession, EditorState};
use crate::surface::{Pen, Surface};
use crate::text::{FontChoice, PendingText, text_px_size};
use crate::tools::{Shape, ToolKind, ToolState};
use crate::util::time::{self, Clock};

/// Discrete actions triggered by the toolbar and panels
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SelectTool(ToolKind),
    ToggleFill,
    SetBrushSize(u32),
    SetFont(FontChoice),
    /// Click on the hue bar at this vertical offset
    PickHue { y: f32 },
    /// Click on the saturation/value panel
    PickColor { x: f32, y: f32 },
    Undo,
    Redo,
    Clear,
    CommitText,
    CancelText,
    /// A decoded image is ready to be drawn at the canvas origin
    ImportImage(RgbaImage),
}

/// Hue of the rainbow brush at a given wall-clock time.
///
/// Each new segment takes the hue current when it is drawn, so a slow stroke
/// leaves a band of colours; earlier segments are never repainted.
pub fn rainbow_hue(now_ms: f64) -> f32 {
    ((now_ms / 10.0) % 360.0) as f32
}

pub struct Editor {
    surface: Surface,
    history: History,
    tools: ToolState,
    state: EditorState,
    pending_text: Option<PendingText>,
    picker: ColorPicker,
    brush_range: RangeInclusive<u32>,
    clock: Clock,
    /// Imports that arrived mid-drag, drawn once the drag ends
    deferred_imports: Vec<RgbaImage>,
    /// Bumped on every canvas change so the UI knows when to re-upload
    revision: u64,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("surface", &self.surface)
            .field("history", &self.history)
            .field("tools", &self.tools)
            .field("state", &self.state.name())
            .field("revision", &self.revision)
            .finish()
    }
}

impl Editor {
    /// Build an editor with a blank canvas, recorded once as the initial state
    pub fn new(config: &PaintConfig) -> PaintResult<Self> {
        let surface = Surface::new(config.canvas_width, config.canvas_height)?;
        let picker = ColorPicker::new(config.hue_bar_size, config.sv_panel_size)?;
        let mut history = History::new(config.history_capacity);
        history.record(&surface);

        log::info!(
            "Canvas {}x{}, history capacity {}",
            surface.width(),
            surface.height(),
            history.capacity()
        );

        Ok(Self {
            surface,
            history,
            tools: ToolState::with_size(config.brush_size),
            state: EditorState::Idle,
            pending_text: None,
            picker,
            brush_range: config.min_brush_size..=config.max_brush_size,
            clock: time::now_millis,
            deferred_imports: Vec::new(),
            revision: 0,
        })
    }

    /// Replace the wall clock driving the rainbow brush
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn picker(&self) -> &ColorPicker {
        &self.picker
    }

    pub fn pending_text(&self) -> Option<&PendingText> {
        self.pending_text.as_ref()
    }

    /// The overlay edits the pending value in place
    pub fn pending_text_mut(&mut self) -> Option<&mut PendingText> {
        self.pending_text.as_mut()
    }

    pub fn brush_range(&self) -> RangeInclusive<u32> {
        self.brush_range.clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cursor(&self) -> CursorIcon {
        self.tools.tool.cursor()
    }

    /// Encode the current canvas for download
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        self.surface.encode_png()
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // ------------------------------------------------------------------
    // Pointer state machine
    // ------------------------------------------------------------------

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { pos } => self.on_pointer_down(pos),
            InputEvent::PointerMove { pos } => self.on_pointer_move(pos),
            InputEvent::PointerUp { .. } => self.on_pointer_up(),
            InputEvent::PointerLeave => self.on_pointer_leave(),
            InputEvent::Click { pos } => self.on_click(pos),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2) {
        let tool = self.tools.tool;
        if tool == ToolKind::Text {
            // text entry starts on click, not on drag
            return;
        }
        if self.state.is_dragging() {
            log::debug!("Pointer down during a drag, restarting");
        }

        let base = tool.is_shape().then(|| self.surface.snapshot());
        self.state = EditorState::Dragging(DragSession {
            style: self.tools.clone(),
            origin: pos,
            last: pos,
            base,
        });
        log::debug!("{} drag started at {:?}", tool.name(), pos);
    }

    fn on_pointer_move(&mut self, pos: Pos2) {
        let now = (self.clock)();
        let Some(session) = self.state.drag_mut() else {
            return;
        };

        let tool = session.tool();
        if tool.is_freehand() {
            let width = session.style.line_width();
            let pen = match tool {
                ToolKind::Eraser => Pen::eraser(width),
                ToolKind::RainbowBrush => Pen::new(Rgb::from_hue(rainbow_hue(now)), width),
                _ => Pen::new(session.style.color, width),
            };
            self.surface.stroke_segment(session.last, pos, &pen);
            session.last = pos;
        } else if let Some(shape) = Shape::from_drag(tool, session.origin, pos) {
            if let Some(base) = &session.base {
                self.surface.restore(base);
            }
            shape.render(&mut self.surface, &session.style);
        }
        self.touch();
    }

    fn on_pointer_up(&mut self) {
        if let Some(session) = self.state.take_drag() {
            self.history.record(&self.surface);
            log::debug!(
                "{} drag committed, {} snapshots",
                session.tool().name(),
                self.history.undo_len()
            );
            self.flush_imports();
        }
    }

    fn on_pointer_leave(&mut self) {
        if let Some(session) = self.state.take_drag() {
            log::debug!("{} drag abandoned outside the canvas", session.tool().name());
            self.flush_imports();
        }
    }

    fn on_click(&mut self, pos: Pos2) {
        if self.tools.tool == ToolKind::Text {
            self.pending_text = Some(PendingText::new(pos));
            log::debug!("Text entry opened at {:?}", pos);
        }
    }

    // ------------------------------------------------------------------
    // Controls
    // ------------------------------------------------------------------

    pub fn dispatch(&mut self, action: UiAction) {
        match action {
            UiAction::SelectTool(tool) => {
                if self.tools.tool != tool {
                    log::info!("Tool selected: {}", tool.name());
                }
                self.tools.tool = tool;
            }
            UiAction::ToggleFill => {
                self.tools.fill_mode = !self.tools.fill_mode;
                log::debug!("Fill mode: {}", self.tools.fill_mode);
            }
            UiAction::SetBrushSize(size) => {
                self.tools.size = size.clamp(*self.brush_range.start(), *self.brush_range.end());
            }
            UiAction::SetFont(font) => self.tools.font = font,
            UiAction::PickHue { y } => {
                self.picker.pick_hue(y);
            }
            UiAction::PickColor { x, y } => {
                if let Some(color) = self.picker.pick_color(x, y) {
                    log::debug!("Brush colour set to {}", color);
                    self.tools.color = color;
                }
            }
            UiAction::Undo => {
                if self.history.undo(&mut self.surface) {
                    self.touch();
                }
            }
            UiAction::Redo => {
                if self.history.redo(&mut self.surface) {
                    self.touch();
                }
            }
            UiAction::Clear => {
                self.history.record(&self.surface);
                self.surface.clear();
                self.touch();
                log::info!("Canvas cleared");
            }
            UiAction::CommitText => self.commit_text(),
            UiAction::CancelText => {
                if self.pending_text.take().is_some() {
                    log::debug!("Text entry cancelled");
                }
            }
            UiAction::ImportImage(image) => {
                if self.state.is_dragging() {
                    // a shape preview would restore its base over the image
                    log::debug!("Deferring import until the drag ends");
                    self.deferred_imports.push(image);
                } else {
                    self.import_image(&image);
                }
            }
        }
    }

    fn import_image(&mut self, image: &RgbaImage) {
        self.surface.draw_image(image);
        self.history.record(&self.surface);
        self.touch();
        log::info!("Imported image {}x{}", image.width(), image.height());
    }

    fn flush_imports(&mut self) {
        for image in std::mem::take(&mut self.deferred_imports) {
            self.import_image(&image);
        }
    }

    fn commit_text(&mut self) {
        let Some(pending) = self.pending_text.take() else {
            return;
        };
        self.surface.draw_text(
            &pending.value,
            pending.anchor,
            self.tools.font,
            text_px_size(self.tools.size),
            self.tools.color,
        );
        self.history.record(&self.surface);
        self.touch();
        log::debug!("Committed text {:?} at {:?}", pending.value, pending.anchor);
    }
}
