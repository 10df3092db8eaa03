use egui::{Pos2, Vec2};

use super::{ToolKind, ToolState};
use crate::surface::{Pen, Surface};

/// Geometry of a parametric shape dragged out from `origin` to the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box; `size` may be negative on either axis
    Rectangle { corner: Pos2, size: Vec2 },
    Circle { center: Pos2, radius: f32 },
    /// Apex at the pointer, base mirrored across the vertical through the origin
    Triangle { vertices: [Pos2; 3] },
    Line { from: Pos2, to: Pos2 },
}

impl Shape {
    /// Build the shape for a drag, or `None` for tools that do not draw shapes
    pub fn from_drag(tool: ToolKind, origin: Pos2, current: Pos2) -> Option<Self> {
        let shape = match tool {
            ToolKind::Rectangle => Shape::Rectangle {
                corner: origin,
                size: current - origin,
            },
            ToolKind::Circle => Shape::Circle {
                center: origin,
                radius: origin.distance(current),
            },
            ToolKind::Triangle => Shape::Triangle {
                vertices: [
                    origin,
                    current,
                    Pos2::new(2.0 * origin.x - current.x, current.y),
                ],
            },
            ToolKind::Line => Shape::Line {
                from: origin,
                to: current,
            },
            _ => return None,
        };
        Some(shape)
    }

    /// Draw onto the surface, filled or outlined per `style.fill_mode`.
    /// Lines are always stroked.
    pub fn render(&self, surface: &mut Surface, style: &ToolState) {
        let pen = Pen::new(style.color, style.line_width());
        match *self {
            Shape::Rectangle { corner, size } if style.fill_mode => {
                surface.fill_rect(corner, size, &pen)
            }
            Shape::Rectangle { corner, size } => surface.stroke_rect(corner, size, &pen),
            Shape::Circle { center, radius } if style.fill_mode => {
                surface.fill_circle(center, radius, &pen)
            }
            Shape::Circle { center, radius } => surface.stroke_circle(center, radius, &pen),
            Shape::Triangle { vertices } if style.fill_mode => {
                surface.fill_polygon(&vertices, &pen)
            }
            Shape::Triangle { vertices } => surface.stroke_polygon(&vertices, &pen),
            Shape::Line { from, to } => surface.stroke_line(from, to, &pen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use egui::pos2;

    #[test]
    fn test_triangle_vertices() {
        let shape = Shape::from_drag(ToolKind::Triangle, pos2(50.0, 20.0), pos2(70.0, 60.0));
        assert_eq!(
            shape,
            Some(Shape::Triangle {
                vertices: [pos2(50.0, 20.0), pos2(70.0, 60.0), pos2(30.0, 60.0)]
            })
        );
    }

    #[test]
    fn test_circle_radius_is_distance() {
        let Some(Shape::Circle { center, radius }) =
            Shape::from_drag(ToolKind::Circle, pos2(10.0, 10.0), pos2(13.0, 14.0))
        else {
            panic!("expected a circle");
        };
        assert_eq!(center, pos2(10.0, 10.0));
        assert!((radius - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_rectangle_keeps_sign() {
        let shape = Shape::from_drag(ToolKind::Rectangle, pos2(10.0, 10.0), pos2(4.0, 2.0));
        assert_eq!(
            shape,
            Some(Shape::Rectangle {
                corner: pos2(10.0, 10.0),
                size: egui::vec2(-6.0, -8.0)
            })
        );
    }

    #[test]
    fn test_freehand_tools_have_no_shape() {
        for tool in [ToolKind::Brush, ToolKind::Eraser, ToolKind::RainbowBrush, ToolKind::Text] {
            assert!(Shape::from_drag(tool, pos2(0.0, 0.0), pos2(5.0, 5.0)).is_none());
        }
    }

    #[test]
    fn test_stroked_rectangle_leaves_interior() {
        let mut surface = Surface::new(40, 40).unwrap();
        let style = ToolState {
            color: Rgb::new(255, 0, 0),
            size: 2,
            fill_mode: false,
            ..ToolState::default()
        };
        Shape::from_drag(ToolKind::Rectangle, pos2(5.0, 5.0), pos2(35.0, 35.0))
            .unwrap()
            .render(&mut surface, &style);
        assert_eq!(surface.pixel(20, 20), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(20, 5), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_line_ignores_fill_mode() {
        let mut filled = Surface::new(30, 30).unwrap();
        let mut stroked = Surface::new(30, 30).unwrap();
        let shape = Shape::from_drag(ToolKind::Line, pos2(2.0, 2.0), pos2(28.0, 20.0)).unwrap();
        let style = ToolState::default();
        shape.render(&mut filled, &style);
        shape.render(&mut stroked, &ToolState { fill_mode: false, ..style });
        assert_eq!(filled.data(), stroked.data());
    }
}
