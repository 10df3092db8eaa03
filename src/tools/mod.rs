use egui::CursorIcon;

use crate::color::Rgb;
use crate::text::FontChoice;

mod shapes;
pub use shapes::Shape;

/// Enum representing all available tool types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    RainbowBrush,
    Rectangle,
    Circle,
    Triangle,
    Line,
    Text,
}

impl ToolKind {
    /// Every tool, in toolbar order
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::RainbowBrush,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
        ToolKind::Line,
        ToolKind::Text,
    ];

    /// Return the name of the tool
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Eraser => "Eraser",
            ToolKind::RainbowBrush => "Rainbow",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Triangle => "Triangle",
            ToolKind::Line => "Line",
            ToolKind::Text => "Text",
        }
    }

    /// Toolbar button caption
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Brush => "🖌 Brush",
            ToolKind::Eraser => "⌫ Eraser",
            ToolKind::RainbowBrush => "🌈 Rainbow",
            ToolKind::Rectangle => "▭ Rectangle",
            ToolKind::Circle => "○ Circle",
            ToolKind::Triangle => "△ Triangle",
            ToolKind::Line => "╱ Line",
            ToolKind::Text => "T Text",
        }
    }

    /// Pointer cursor shown over the canvas while this tool is active
    pub fn cursor(self) -> CursorIcon {
        match self {
            ToolKind::Brush | ToolKind::Eraser => CursorIcon::Cell,
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Triangle => CursorIcon::Default,
            ToolKind::Line | ToolKind::RainbowBrush => CursorIcon::Crosshair,
            ToolKind::Text => CursorIcon::Text,
        }
    }

    /// Tools that paint straight onto the canvas as the pointer moves
    pub fn is_freehand(self) -> bool {
        matches!(self, ToolKind::Brush | ToolKind::Eraser | ToolKind::RainbowBrush)
    }

    /// Tools that redraw a preview over a base snapshot on every move
    pub fn is_shape(self) -> bool {
        matches!(
            self,
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Triangle | ToolKind::Line
        )
    }
}

/// Brush settings shared by every tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    pub tool: ToolKind,
    pub color: Rgb,
    /// Line width in pixels, also drives the text size
    pub size: u32,
    /// Shapes are filled when true, outlined when false
    pub fill_mode: bool,
    pub font: FontChoice,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: ToolKind::Brush,
            color: Rgb::BLACK,
            size: 5,
            fill_mode: true,
            font: FontChoice::Sans,
        }
    }
}

impl ToolState {
    pub fn with_size(size: u32) -> Self {
        Self {
            size: size.max(1),
            ..Self::default()
        }
    }

    pub fn line_width(&self) -> f32 {
        self.size as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_groups_are_disjoint() {
        for tool in ToolKind::ALL {
            assert!(!(tool.is_freehand() && tool.is_shape()), "{}", tool.name());
        }
        assert!(!ToolKind::Text.is_freehand());
        assert!(!ToolKind::Text.is_shape());
    }

    #[test]
    fn test_size_never_zero() {
        assert_eq!(ToolState::with_size(0).size, 1);
    }
}
