//! The raster canvas.
//!
//! `Surface` wraps a tiny-skia pixmap and exposes exactly the drawing
//! primitives the editor needs: segments, rectangles, circles, closed
//! polygons, text, image blits and whole-buffer snapshots. Pixels are stored
//! premultiplied; everything that leaves the surface (pixel reads, PNG
//! export) is converted back to straight alpha.

use egui::Pos2;
use image::RgbaImage;
use tiny_skia::{
    BlendMode, ColorU8, FillRule, IntSize, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap,
    PixmapPaint, Rect, Stroke, Transform,
};

use crate::color::Rgb;
use crate::error::{ExportError, SurfaceError};
use crate::text::{self, FontChoice};

/// Immutable full-canvas pixel buffer captured at a point in time
#[derive(Clone, PartialEq)]
pub struct Snapshot {
    pixmap: Pixmap,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Raw premultiplied RGBA bytes
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// How new paint combines with what is already on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Paint over existing pixels
    SourceOver,
    /// Remove existing pixels where the paint lands
    Erase,
}

impl Composite {
    fn blend_mode(self) -> BlendMode {
        match self {
            Composite::SourceOver => BlendMode::SourceOver,
            Composite::Erase => BlendMode::DestinationOut,
        }
    }
}

/// Colour, width and composite mode used for one draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Rgb,
    pub width: f32,
    pub composite: Composite,
}

impl Pen {
    pub fn new(color: Rgb, width: f32) -> Self {
        Self {
            color,
            width,
            composite: Composite::SourceOver,
        }
    }

    pub fn eraser(width: f32) -> Self {
        Self {
            color: Rgb::BLACK,
            width,
            composite: Composite::Erase,
        }
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(self.color.to_skia());
        paint.anti_alias = true;
        paint.blend_mode = self.composite.blend_mode();
        paint
    }

    fn stroke(&self) -> Stroke {
        Stroke {
            width: self.width.max(1.0),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        }
    }
}

/// A 2D raster canvas
pub struct Surface {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Surface {
    /// Create a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Raw premultiplied RGBA bytes
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pixmap: self.pixmap.clone(),
        }
    }

    /// Overwrite the canvas with a borrowed snapshot, keeping the allocation
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.pixmap.width() == self.width() && snapshot.pixmap.height() == self.height() {
            self.pixmap.data_mut().copy_from_slice(snapshot.pixmap.data());
        } else {
            self.pixmap = snapshot.pixmap.clone();
        }
    }

    /// Overwrite the canvas with an owned snapshot
    pub fn replace(&mut self, snapshot: Snapshot) {
        self.pixmap = snapshot.pixmap;
    }

    /// Make every pixel transparent
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Stroke a single round-capped segment
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, pen: &Pen) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        if let Some(path) = builder.finish() {
            self.stroke_path(&path, pen);
        }
    }

    /// Stroke a straight line; identical to a segment but named for the line tool
    pub fn stroke_line(&mut self, from: Pos2, to: Pos2, pen: &Pen) {
        self.stroke_segment(from, to, pen);
    }

    /// Fill the box spanned by `corner` and `corner + size`; either extent may be negative
    pub fn fill_rect(&mut self, corner: Pos2, size: egui::Vec2, pen: &Pen) {
        if let Some(rect) = normalized_rect(corner, size) {
            self.pixmap
                .fill_rect(rect, &pen.paint(), Transform::identity(), None);
        }
    }

    pub fn stroke_rect(&mut self, corner: Pos2, size: egui::Vec2, pen: &Pen) {
        if let Some(rect) = normalized_rect(corner, size) {
            let path = PathBuilder::from_rect(rect);
            self.stroke_path(&path, pen);
        }
    }

    pub fn fill_circle(&mut self, center: Pos2, radius: f32, pen: &Pen) {
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            self.fill_path(&path, pen);
        }
    }

    pub fn stroke_circle(&mut self, center: Pos2, radius: f32, pen: &Pen) {
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            self.stroke_path(&path, pen);
        }
    }

    pub fn fill_polygon(&mut self, points: &[Pos2], pen: &Pen) {
        if let Some(path) = closed_path(points) {
            self.fill_path(&path, pen);
        }
    }

    pub fn stroke_polygon(&mut self, points: &[Pos2], pen: &Pen) {
        if let Some(path) = closed_path(points) {
            self.stroke_path(&path, pen);
        }
    }

    /// Fill `value` with its alphabetic baseline starting at `anchor`
    pub fn draw_text(
        &mut self,
        value: &str,
        anchor: Pos2,
        font: FontChoice,
        px_size: f32,
        color: Rgb,
    ) {
        let Some(face) = font.face() else {
            return;
        };
        let Some(mask) =
            text::coverage_mask(&face, value, px_size, anchor, self.width(), self.height())
        else {
            return;
        };
        let full = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32);
        if let Some(full) = full {
            let pen = Pen::new(color, 1.0);
            self.pixmap
                .fill_rect(full, &pen.paint(), Transform::identity(), Some(&mask));
        }
    }

    /// Composite a decoded image at the canvas origin, unscaled.
    ///
    /// Parts outside the canvas are clipped, canvas pixels outside the image
    /// are untouched.
    pub fn draw_image(&mut self, image: &RgbaImage) {
        let Some(size) = IntSize::from_wh(image.width(), image.height()) else {
            return;
        };
        let data: Vec<u8> = image
            .pixels()
            .flat_map(|px| {
                let [r, g, b, a] = px.0;
                let premultiplied = ColorU8::from_rgba(r, g, b, a).premultiply();
                [
                    premultiplied.red(),
                    premultiplied.green(),
                    premultiplied.blue(),
                    premultiplied.alpha(),
                ]
            })
            .collect();
        let Some(source) = Pixmap::from_vec(data, size) else {
            return;
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn fill_path(&mut self, path: &Path, pen: &Pen) {
        self.pixmap
            .fill_path(path, &pen.paint(), FillRule::Winding, Transform::identity(), None);
    }

    fn stroke_path(&mut self, path: &Path, pen: &Pen) {
        self.pixmap
            .stroke_path(path, &pen.paint(), &pen.stroke(), Transform::identity(), None);
    }

    // ------------------------------------------------------------------
    // Reading back
    // ------------------------------------------------------------------

    /// Straight-alpha RGBA of a single pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Copy the canvas out as a straight-alpha image
    pub fn to_rgba_image(&self) -> RgbaImage {
        let data: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let color = px.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect();
        RgbaImage::from_raw(self.width(), self.height(), data)
            .unwrap_or_else(|| RgbaImage::new(self.width(), self.height()))
    }

    /// Encode the canvas as a PNG payload
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(self.to_rgba_image())
            .write_to(&mut bytes, image::ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Canvas contents ready for upload as an egui texture
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_premultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixmap.data(),
        )
    }
}

fn normalized_rect(corner: Pos2, size: egui::Vec2) -> Option<Rect> {
    let other = corner + size;
    Rect::from_ltrb(
        corner.x.min(other.x),
        corner.y.min(other.y),
        corner.x.max(other.x),
        corner.y.max(other.y),
    )
}

fn closed_path(points: &[Pos2]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for point in rest {
        builder.line_to(point.x, point.y);
    }
    builder.close();
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    const RED: Rgb = Rgb::new(255, 0, 0);

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = Surface::new(8, 8).unwrap();
        assert_eq!(surface.pixel(3, 3), Some([0, 0, 0, 0]));
        assert!(surface.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(SurfaceError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_negative_rect_is_normalized() {
        let mut surface = Surface::new(20, 20).unwrap();
        surface.fill_rect(pos2(15.0, 15.0), vec2(-10.0, -10.0), &Pen::new(RED, 1.0));
        assert_eq!(surface.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(2, 2), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(17, 17), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_eraser_removes_paint() {
        let mut surface = Surface::new(20, 20).unwrap();
        surface.fill_rect(pos2(0.0, 0.0), vec2(20.0, 20.0), &Pen::new(RED, 1.0));
        surface.stroke_segment(pos2(2.0, 10.0), pos2(18.0, 10.0), &Pen::eraser(4.0));
        assert_eq!(surface.pixel(10, 10), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(10, 2), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_restore_is_lossless() {
        let mut surface = Surface::new(16, 16).unwrap();
        surface.fill_circle(pos2(8.0, 8.0), 5.0, &Pen::new(RED, 1.0));
        let snapshot = surface.snapshot();
        surface.clear();
        assert_ne!(surface.data(), snapshot.data());
        surface.restore(&snapshot);
        assert_eq!(surface.data(), snapshot.data());
    }

    #[test]
    fn test_image_drawn_at_origin_and_clipped() {
        let mut surface = Surface::new(10, 10).unwrap();
        let image = RgbaImage::from_pixel(30, 4, image::Rgba([0, 0, 255, 255]));
        surface.draw_image(&image);
        assert_eq!(surface.pixel(9, 3), Some([0, 0, 255, 255]));
        assert_eq!(surface.pixel(0, 4), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_png_round_trip_dimensions() {
        let mut surface = Surface::new(12, 7).unwrap();
        surface.fill_rect(pos2(0.0, 0.0), vec2(6.0, 7.0), &Pen::new(RED, 1.0));
        let png = surface.encode_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (12, 7));
        assert_eq!(decoded.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(decoded.get_pixel(10, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_text_marks_canvas() {
        let mut surface = Surface::new(80, 40).unwrap();
        surface.draw_text("Hi", pos2(4.0, 30.0), FontChoice::Sans, 20.0, RED);
        assert!(surface.data().chunks_exact(4).any(|px| px[3] > 0));
    }
}
