use super::EditAction;
use crate::buffer::PixelBuffer;
use std::collections::VecDeque;

/// Default number of actions kept on the undo stack.
pub const DEFAULT_UNDO_CAPACITY: usize = 50;

/// Manages the history of recorded edits for undo/redo functionality
#[derive(Debug, Clone)]
pub struct UndoEngine {
    /// Actions that can be undone; the back is the most recent
    undo_stack: VecDeque<EditAction>,
    /// Actions that can be redone; the back is the most recently undone
    redo_stack: Vec<EditAction>,
    capacity: usize,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_CAPACITY)
    }
}

impl UndoEngine {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Records an already-applied action. Invalidates all redo entries and
    /// evicts the oldest entry once the capacity is exceeded.
    pub fn push(&mut self, action: EditAction) {
        log::debug!("history push: {}", action.description());
        self.undo_stack.push_back(action);
        self.redo_stack.clear();
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
    }

    /// Reverses the most recent action. Returns false if there was nothing to undo.
    pub fn undo(&mut self, buffer: &mut PixelBuffer) -> bool {
        let Some(action) = self.undo_stack.pop_back() else {
            return false;
        };
        action.undo(buffer);
        self.redo_stack.push(action);
        true
    }

    /// Re-applies the most recently undone action. Returns false if there was nothing to redo.
    pub fn redo(&mut self, buffer: &mut PixelBuffer) -> bool {
        let Some(action) = self.redo_stack.pop() else {
            return false;
        };
        action.redo(buffer);
        self.undo_stack.push_back(action);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(EditAction::description)
    }

    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(EditAction::description)
    }

    /// Empties both stacks (new or opened document).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
