use egui::{PointerButton, Pos2, Rect, Vec2};

/// Pointer events in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { pos: Pos2 },
    /// Pointer moved over the canvas, with or without a button held
    PointerMove { pos: Pos2 },
    /// Primary button released over the canvas
    PointerUp { pos: Pos2 },
    /// Pointer left the canvas
    PointerLeave,
    /// Press and release both landed on the canvas
    Click { pos: Pos2 },
}

/// Where the canvas sits on screen this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    /// Full canvas rect, possibly scrolled partly out of view
    pub rect: Rect,
    /// Part of `rect` that is actually visible
    pub visible: Rect,
    /// Canvas size in pixels
    pub size: Vec2,
    /// Whether egui routed this frame's pointer to the canvas widget
    pub accepts_presses: bool,
    /// Something floating above the canvas; presses inside it are not ours
    pub covered: Option<Rect>,
}

impl CanvasView {
    /// A fully visible canvas with nothing on top of it
    pub fn unobstructed(rect: Rect, size: Vec2) -> Self {
        Self {
            rect,
            visible: rect,
            size,
            accepts_presses: true,
            covered: None,
        }
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        let offset = pos - self.rect.min;
        let shown = self.rect.size();
        let scale_x = if shown.x > 0.0 { self.size.x / shown.x } else { 1.0 };
        let scale_y = if shown.y > 0.0 { self.size.y / shown.y } else { 1.0 };
        Pos2::new(offset.x * scale_x, offset.y * scale_y)
    }

    fn receives(&self, pos: Pos2) -> bool {
        self.visible.contains(pos) && !self.covered.is_some_and(|rect| rect.contains(pos))
    }
}

/// Handles converting raw egui input into canvas `InputEvent`s
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Whether the last known pointer position was over the canvas
    inside: bool,
    /// Whether the current press started over the canvas
    pressed_inside: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's raw egui events
    pub fn process_input(&mut self, ctx: &egui::Context, view: &CanvasView) -> Vec<InputEvent> {
        ctx.input(|input| self.translate(&input.events, view))
    }

    /// Translate raw events; split out from `process_input` so it can run without a context
    pub fn translate(&mut self, events: &[egui::Event], view: &CanvasView) -> Vec<InputEvent> {
        let mut out = Vec::new();
        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    let inside = view.visible.contains(*pos);
                    if inside {
                        out.push(InputEvent::PointerMove {
                            pos: view.to_canvas(*pos),
                        });
                    } else if self.inside {
                        out.push(InputEvent::PointerLeave);
                    }
                    self.inside = inside;
                }
                egui::Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    // presses must land on the canvas itself; releases only
                    // need to land somewhere visible
                    let ours = if *pressed {
                        view.receives(*pos) && view.accepts_presses
                    } else {
                        view.visible.contains(*pos)
                    };
                    if !ours {
                        self.pressed_inside = false;
                        continue;
                    }
                    let canvas_pos = view.to_canvas(*pos);
                    if *pressed {
                        out.push(InputEvent::PointerDown { pos: canvas_pos });
                        self.pressed_inside = true;
                    } else {
                        out.push(InputEvent::PointerUp { pos: canvas_pos });
                        if self.pressed_inside {
                            out.push(InputEvent::Click { pos: canvas_pos });
                        }
                        self.pressed_inside = false;
                    }
                }
                egui::Event::PointerGone => {
                    if self.inside {
                        out.push(InputEvent::PointerLeave);
                    }
                    self.inside = false;
                }
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, pos2, vec2};

    fn canvas() -> CanvasView {
        CanvasView::unobstructed(
            Rect::from_min_size(pos2(100.0, 50.0), vec2(200.0, 100.0)),
            vec2(400.0, 200.0),
        )
    }

    fn button(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn test_positions_are_scaled_to_canvas_pixels() {
        let mut handler = InputHandler::new();
        let events = handler.translate(&[egui::Event::PointerMoved(pos2(150.0, 100.0))], &canvas());
        assert_eq!(events, vec![InputEvent::PointerMove { pos: pos2(100.0, 100.0) }]);
    }

    #[test]
    fn test_click_follows_release() {
        let mut handler = InputHandler::new();
        let events = handler.translate(
            &[button(pos2(110.0, 60.0), true), button(pos2(110.0, 60.0), false)],
            &canvas(),
        );
        assert_eq!(
            events,
            vec![
                InputEvent::PointerDown { pos: pos2(20.0, 20.0) },
                InputEvent::PointerUp { pos: pos2(20.0, 20.0) },
                InputEvent::Click { pos: pos2(20.0, 20.0) },
            ]
        );
    }

    #[test]
    fn test_leaving_canvas_emits_leave_once() {
        let mut handler = InputHandler::new();
        let events = handler.translate(
            &[
                egui::Event::PointerMoved(pos2(150.0, 100.0)),
                egui::Event::PointerMoved(pos2(10.0, 10.0)),
                egui::Event::PointerMoved(pos2(5.0, 5.0)),
                egui::Event::PointerGone,
            ],
            &canvas(),
        );
        assert_eq!(events.iter().filter(|e| **e == InputEvent::PointerLeave).count(), 1);
    }

    #[test]
    fn test_presses_outside_canvas_are_ignored() {
        let mut handler = InputHandler::new();
        let events = handler.translate(&[button(pos2(5.0, 5.0), true)], &canvas());
        assert!(events.is_empty());
    }

    #[test]
    fn test_scrolled_away_part_of_canvas_is_inert() {
        // canvas scrolled 60px left, its left edge hidden under a 240px side panel
        let rect = Rect::from_min_size(pos2(-60.0, 0.0), vec2(800.0, 600.0));
        let view = CanvasView {
            visible: rect.intersect(Rect::from_min_max(pos2(240.0, 0.0), pos2(800.0, 600.0))),
            ..CanvasView::unobstructed(rect, vec2(800.0, 600.0))
        };
        let mut handler = InputHandler::new();
        let events = handler.translate(
            &[
                button(pos2(100.0, 100.0), true),
                egui::Event::PointerMoved(pos2(200.0, 100.0)),
                button(pos2(200.0, 100.0), false),
            ],
            &view,
        );
        assert!(events.is_empty());

        // the visible part still works
        let events = handler.translate(&[button(pos2(300.0, 100.0), true)], &view);
        assert_eq!(events, vec![InputEvent::PointerDown { pos: pos2(360.0, 100.0) }]);
    }

    #[test]
    fn test_presses_routed_elsewhere_are_ignored() {
        // e.g. a floating scroll bar drawn over the canvas
        let view = CanvasView {
            accepts_presses: false,
            ..canvas()
        };
        let mut handler = InputHandler::new();
        let events = handler.translate(
            &[button(pos2(290.0, 60.0), true), button(pos2(290.0, 60.0), false)],
            &view,
        );
        assert_eq!(events, vec![InputEvent::PointerUp { pos: pos2(380.0, 20.0) }]);
    }

    #[test]
    fn test_presses_under_overlay_are_ignored() {
        let view = CanvasView {
            covered: Some(Rect::from_min_size(pos2(100.0, 50.0), vec2(50.0, 20.0))),
            ..canvas()
        };
        let mut handler = InputHandler::new();
        let events = handler.translate(&[button(pos2(110.0, 60.0), true)], &view);
        assert!(events.is_empty());
    }
}
