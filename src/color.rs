use egui::Color32;

/// An opaque brush colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully saturated, half-lightness colour at `hue` degrees,
    /// i.e. CSS `hsl(hue, 100%, 50%)`
    pub fn from_hue(hue: f32) -> Self {
        hsl_to_rgb(hue, 1.0, 0.5)
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.r, self.g, self.b)
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, 255)
    }
}

impl From<Rgb> for Color32 {
    fn from(color: Rgb) -> Self {
        color.to_color32()
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in 0..=1) to RGB
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Rgb {
    let hue = hue.rem_euclid(360.0);
    let saturation = saturation.clamp(0.0, 1.0);
    let lightness = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(r), channel(g), channel(b))
}

/// Colour stops of the hue bar, top to bottom
pub const HUE_STOPS: [(f32, Rgb); 8] = [
    (0.0, Rgb::new(255, 0, 0)),      // red
    (0.15, Rgb::new(255, 165, 0)),   // orange
    (0.3, Rgb::new(255, 255, 0)),    // yellow
    (0.45, Rgb::new(0, 128, 0)),     // green
    (0.6, Rgb::new(0, 0, 255)),      // blue
    (0.75, Rgb::new(75, 0, 130)),    // indigo
    (0.9, Rgb::new(238, 130, 238)),  // violet
    (1.0, Rgb::new(255, 192, 203)),  // pink
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(Rgb::from_hue(0.0), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hue(120.0), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hue(240.0), Rgb::new(0, 0, 255));
        assert_eq!(Rgb::from_hue(360.0), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_secondary_hues() {
        assert_eq!(Rgb::from_hue(60.0), Rgb::new(255, 255, 0));
        assert_eq!(Rgb::from_hue(180.0), Rgb::new(0, 255, 255));
        assert_eq!(Rgb::from_hue(300.0), Rgb::new(255, 0, 255));
    }

    #[test]
    fn test_lightness_extremes() {
        assert_eq!(hsl_to_rgb(200.0, 1.0, 0.0), Rgb::BLACK);
        assert_eq!(hsl_to_rgb(200.0, 1.0, 1.0), Rgb::WHITE);
        assert_eq!(hsl_to_rgb(200.0, 0.0, 0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_display_matches_css() {
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "rgb(1, 2, 3)");
    }
}
