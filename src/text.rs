//! Text tool support: font faces, the pending text entry, and glyph
//! rasterisation into a coverage mask the surface can paint through.

use ab_glyph::{Font, FontRef, GlyphId, PxScale, ScaleFont, point};
use egui::Pos2;

/// Font families offered by the font selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontChoice {
    #[default]
    Sans,
    Monospace,
}

impl FontChoice {
    pub const ALL: [FontChoice; 2] = [FontChoice::Sans, FontChoice::Monospace];

    pub fn label(self) -> &'static str {
        match self {
            FontChoice::Sans => "Sans",
            FontChoice::Monospace => "Monospace",
        }
    }

    /// egui family used to preview the text inside the overlay
    pub fn egui_family(self) -> egui::FontFamily {
        match self {
            FontChoice::Sans => egui::FontFamily::Proportional,
            FontChoice::Monospace => egui::FontFamily::Monospace,
        }
    }

    fn bytes(self) -> &'static [u8] {
        match self {
            FontChoice::Sans => epaint_default_fonts::UBUNTU_LIGHT,
            FontChoice::Monospace => epaint_default_fonts::HACK_REGULAR,
        }
    }

    /// Parse the bundled face
    pub fn face(self) -> Option<FontRef<'static>> {
        match FontRef::try_from_slice(self.bytes()) {
            Ok(font) => Some(font),
            Err(err) => {
                log::error!("Bundled font {} failed to parse: {}", self.label(), err);
                None
            }
        }
    }
}

/// Text size used for a given brush size, in canvas pixels
pub fn text_px_size(brush_size: u32) -> f32 {
    (brush_size * 2) as f32
}

/// Text being typed into the overlay, anchored at a canvas point
#[derive(Debug, Clone, PartialEq)]
pub struct PendingText {
    /// Baseline start of the text on the canvas
    pub anchor: Pos2,
    /// Live contents of the overlay input
    pub value: String,
}

impl PendingText {
    pub fn new(anchor: Pos2) -> Self {
        Self {
            anchor,
            value: String::new(),
        }
    }
}

/// Rasterise `text` into a canvas-sized coverage mask.
///
/// `px_size` is the em size in pixels and `anchor` the start of the
/// alphabetic baseline, like a 2D canvas `fillText`.
pub fn coverage_mask(
    font: &FontRef<'_>,
    text: &str,
    px_size: f32,
    anchor: Pos2,
    width: u32,
    height: u32,
) -> Option<tiny_skia::Mask> {
    let mut mask = tiny_skia::Mask::new(width, height)?;
    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    let scale = PxScale::from(px_size * font.height_unscaled() / units_per_em);
    let scaled = font.as_scaled(scale);

    let data = mask.data_mut();
    let mut caret = anchor.x;
    let mut previous: Option<GlyphId> = None;
    for ch in text.chars().filter(|ch| !ch.is_control()) {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, anchor.y));
        caret += scaled.h_advance(id);
        previous = Some(id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue; // whitespace
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let x = bounds.min.x as i64 + gx as i64;
            let y = bounds.min.y as i64 + gy as i64;
            if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                return;
            }
            let index = y as usize * width as usize + x as usize;
            let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
            data[index] = data[index].max(value);
        });
    }

    Some(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_faces_parse() {
        for choice in FontChoice::ALL {
            assert!(choice.face().is_some(), "{} should parse", choice.label());
        }
    }

    #[test]
    fn test_glyphs_sit_above_baseline() {
        let font = FontChoice::Sans.face().unwrap();
        let mask = coverage_mask(&font, "H", 20.0, egui::pos2(10.0, 40.0), 64, 64).unwrap();
        let covered_row = |y: usize| mask.data()[y * 64..(y + 1) * 64].iter().any(|&c| c > 0);

        assert!((25..40).any(covered_row));
        assert!(!(42..64).any(covered_row));
    }

    #[test]
    fn test_whitespace_draws_nothing() {
        let font = FontChoice::Monospace.face().unwrap();
        let mask = coverage_mask(&font, "   ", 20.0, egui::pos2(10.0, 40.0), 64, 64).unwrap();
        assert!(mask.data().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_text_size_doubles_brush() {
        assert_eq!(text_px_size(5), 10.0);
    }
}
