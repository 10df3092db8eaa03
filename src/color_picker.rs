//! Hue bar and saturation/value panel.
//!
//! Both panels are small rasters; the picker never computes HSV maths on a
//! click, it reads back what the gradients painted.

use tiny_skia::{GradientStop, LinearGradient, Paint, Pixmap, Point, Rect, SpreadMode, Transform};

use crate::color::{HUE_STOPS, Rgb};
use crate::error::SurfaceError;

pub struct ColorPicker {
    hue: f32,
    hue_bar: Pixmap,
    sv_panel: Pixmap,
    /// Bumped whenever the SV panel is regenerated
    revision: u64,
}

impl std::fmt::Debug for ColorPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorPicker")
            .field("hue", &self.hue)
            .field("revision", &self.revision)
            .finish()
    }
}

impl ColorPicker {
    pub fn new(hue_bar_size: [u32; 2], sv_panel_size: [u32; 2]) -> Result<Self, SurfaceError> {
        let hue_bar = new_pixmap(hue_bar_size)?;
        let sv_panel = new_pixmap(sv_panel_size)?;
        let mut picker = Self {
            hue: 0.0,
            hue_bar,
            sv_panel,
            revision: 0,
        };
        picker.draw_hue_bar();
        picker.draw_sv_panel();
        Ok(picker)
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Select the hue under a click on the hue bar and redraw the SV panel
    pub fn pick_hue(&mut self, y: f32) -> f32 {
        let height = self.hue_bar.height() as f32;
        let y = y.clamp(0.0, height);
        self.hue = (y / height * 360.0).rem_euclid(360.0);
        self.draw_sv_panel();
        log::debug!("Hue set to {:.1}", self.hue);
        self.hue
    }

    /// Colour of the SV panel pixel under a click
    pub fn pick_color(&self, x: f32, y: f32) -> Option<Rgb> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let x = (x.max(0.0) as u32).min(self.sv_panel.width() - 1);
        let y = (y.max(0.0) as u32).min(self.sv_panel.height() - 1);
        let pixel = self.sv_panel.pixel(x, y)?.demultiply();
        Some(Rgb::new(pixel.red(), pixel.green(), pixel.blue()))
    }

    pub fn hue_bar_image(&self) -> egui::ColorImage {
        to_color_image(&self.hue_bar)
    }

    pub fn sv_panel_image(&self) -> egui::ColorImage {
        to_color_image(&self.sv_panel)
    }

    fn draw_hue_bar(&mut self) {
        let height = self.hue_bar.height() as f32;
        let stops = HUE_STOPS
            .iter()
            .map(|(offset, color)| GradientStop::new(*offset, color.to_skia()))
            .collect();
        fill_gradient(&mut self.hue_bar, Point::from_xy(0.0, height), stops);
    }

    fn draw_sv_panel(&mut self) {
        let width = self.sv_panel.width() as f32;
        let height = self.sv_panel.height() as f32;

        self.sv_panel.fill(tiny_skia::Color::TRANSPARENT);
        let saturation = vec![
            GradientStop::new(0.0, Rgb::WHITE.to_skia()),
            GradientStop::new(1.0, Rgb::from_hue(self.hue).to_skia()),
        ];
        fill_gradient(&mut self.sv_panel, Point::from_xy(width, 0.0), saturation);

        let value = vec![
            GradientStop::new(0.0, tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
            GradientStop::new(1.0, tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        ];
        fill_gradient(&mut self.sv_panel, Point::from_xy(0.0, height), value);
        self.revision += 1;
    }
}

fn new_pixmap([width, height]: [u32; 2]) -> Result<Pixmap, SurfaceError> {
    Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })
}

/// Paint a linear gradient from the top-left corner to `end` over the whole pixmap
fn fill_gradient(pixmap: &mut Pixmap, end: Point, stops: Vec<GradientStop>) {
    let Some(shader) = LinearGradient::new(
        Point::from_xy(0.0, 0.0),
        end,
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    ) else {
        return;
    };
    let Some(rect) = Rect::from_xywh(0.0, 0.0, pixmap.width() as f32, pixmap.height() as f32) else {
        return;
    };
    let paint = Paint {
        shader,
        anti_alias: false,
        ..Paint::default()
    };
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

fn to_color_image(pixmap: &Pixmap) -> egui::ColorImage {
    egui::ColorImage::from_rgba_premultiplied(
        [pixmap.width() as usize, pixmap.height() as usize],
        pixmap.data(),
    )
}
