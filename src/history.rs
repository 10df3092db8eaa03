use std::collections::VecDeque;

use crate::surface::{Snapshot, Surface};

/// Linear undo/redo over whole-canvas snapshots.
///
/// Both stacks are bounded by `capacity`; recording past the bound evicts the
/// oldest undo snapshot.
pub struct History {
    /// Snapshots that can be restored by undo, most recent at the back
    undo_stack: VecDeque<Snapshot>,
    /// Snapshots that can be restored by redo, most recent at the back
    redo_stack: Vec<Snapshot>,
    capacity: usize,
}

impl History {
    /// Creates an empty history holding at most `capacity` snapshots per stack
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Push the current canvas onto the undo stack and forget the redo stack
    pub fn record(&mut self, surface: &Surface) {
        self.push_undo(surface.snapshot());
        if !self.redo_stack.is_empty() {
            log::debug!("Discarding {} redo snapshots", self.redo_stack.len());
            self.redo_stack.clear();
        }
    }

    /// Restore the most recent undo snapshot, keeping the current canvas for redo.
    ///
    /// Returns false, leaving everything untouched, when there is nothing to undo.
    pub fn undo(&mut self, surface: &mut Surface) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            log::debug!("Nothing to undo");
            return false;
        };
        self.redo_stack.push(surface.snapshot());
        if self.redo_stack.len() > self.capacity {
            self.redo_stack.remove(0);
        }
        surface.replace(previous);
        true
    }

    /// Restore the most recent redo snapshot, keeping the current canvas for undo.
    ///
    /// Returns false, leaving everything untouched, when there is nothing to redo.
    pub fn redo(&mut self, surface: &mut Surface) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            log::debug!("Nothing to redo");
            return false;
        };
        self.push_undo(surface.snapshot());
        surface.replace(next);
        true
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
            log::debug!("History full, evicted oldest snapshot");
        }
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::surface::Pen;
    use egui::{pos2, vec2};

    fn paint_square(surface: &mut Surface, at: f32) {
        surface.fill_rect(pos2(at, at), vec2(2.0, 2.0), &Pen::new(Rgb::new(0, 0, 255), 1.0));
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut surface = Surface::new(8, 8).unwrap();
        paint_square(&mut surface, 1.0);
        let before = surface.snapshot();
        let mut history = History::new(10);

        assert!(!history.undo(&mut surface));
        assert!(!history.redo(&mut surface));
        assert_eq!(surface.snapshot(), before);
        assert_eq!((history.undo_len(), history.redo_len()), (0, 0));
    }

    #[test]
    fn test_record_clears_redo() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut history = History::new(10);
        history.record(&surface);
        paint_square(&mut surface, 1.0);
        history.record(&surface);
        assert!(history.undo(&mut surface));
        assert!(history.can_redo());

        history.record(&surface);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut history = History::new(2);
        let first = surface.snapshot();
        history.record(&surface);
        paint_square(&mut surface, 1.0);
        history.record(&surface);
        paint_square(&mut surface, 4.0);
        history.record(&surface);
        assert_eq!(history.undo_len(), 2);

        // The blank canvas was evicted, so two undos never reach it
        assert!(history.undo(&mut surface));
        assert!(history.undo(&mut surface));
        assert!(!history.undo(&mut surface));
        assert_ne!(surface.snapshot(), first);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        assert_eq!(History::new(0).capacity(), 1);
    }
}
