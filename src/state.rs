use egui::Pos2;

use crate::surface::Snapshot;
use crate::tools::{ToolKind, ToolState};

/// Transient state of a pointer drag, alive while the button is held
#[derive(Debug)]
pub struct DragSession {
    /// Tool settings frozen when the drag began
    pub style: ToolState,
    pub origin: Pos2,
    /// Last point a freehand stroke reached
    pub last: Pos2,
    /// Canvas before the drag, present only for shape tools
    pub base: Option<Snapshot>,
}

impl DragSession {
    pub fn tool(&self) -> ToolKind {
        self.style.tool
    }
}

/// Pointer interaction state machine
#[derive(Debug, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl EditorState {
    pub fn drag_mut(&mut self) -> Option<&mut DragSession> {
        match self {
            Self::Dragging(session) => Some(session),
            Self::Idle => None,
        }
    }

    /// End any drag, handing back its session
    pub fn take_drag(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            Self::Dragging(session) => Some(session),
            Self::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Name of the current state, for logging and the status line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Dragging(_) => "Dragging",
        }
    }
}
