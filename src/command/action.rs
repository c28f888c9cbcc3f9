use crate::buffer::PixelBuffer;
use crate::color::Rgba;

/// One recorded cell write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelChange {
    pub x: i32,
    pub y: i32,
    pub old: Rgba,
    pub new: Rgba,
}

/// Ordered log of cell writes made during one gesture.
///
/// Entries stay in paint order and repeated writes to the same cell are all
/// kept, so undoing in reverse and redoing forward restores overlapping
/// strokes exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelEdit {
    changes: Vec<PixelChange>,
}

impl PixelEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, x: i32, y: i32, old: Rgba, new: Rgba) {
        self.changes.push(PixelChange { x, y, old, new });
    }

    /// Writes `color` at (x, y) if the cell is in bounds and differs,
    /// recording the change. Returns whether the buffer changed.
    pub fn paint(&mut self, buffer: &mut PixelBuffer, x: i32, y: i32, color: Rgba) -> bool {
        match buffer.get(x, y) {
            Some(old) if old != color => {
                buffer.set(x, y, color);
                self.record(x, y, old, color);
                true
            }
            _ => false,
        }
    }

    pub fn changes(&self) -> &[PixelChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Wraps the edit as an undoable action, or `None` if nothing was written.
    pub fn finish(self) -> Option<EditAction> {
        (!self.is_empty()).then_some(EditAction::PixelEdit(self))
    }
}

/// An undoable change to the canvas. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Cell-level deltas from one gesture
    PixelEdit(PixelEdit),

    /// Whole-grid size change, holding a deep copy of the prior grid
    CanvasResize {
        old_width: usize,
        old_height: usize,
        old_pixels: PixelBuffer,
        new_width: usize,
        new_height: usize,
    },
}

impl EditAction {
    /// Restores the state before the action.
    pub fn undo(&self, buffer: &mut PixelBuffer) {
        match self {
            EditAction::PixelEdit(edit) => {
                for change in edit.changes.iter().rev() {
                    write_recorded(buffer, change.x, change.y, change.old);
                }
            }
            EditAction::CanvasResize { old_pixels, .. } => {
                *buffer = old_pixels.clone();
            }
        }
    }

    /// Re-applies the action after an undo.
    pub fn redo(&self, buffer: &mut PixelBuffer) {
        match self {
            EditAction::PixelEdit(edit) => {
                for change in &edit.changes {
                    write_recorded(buffer, change.x, change.y, change.new);
                }
            }
            EditAction::CanvasResize {
                new_width,
                new_height,
                ..
            } => {
                if let Err(err) = buffer.resize(*new_width, *new_height) {
                    log::warn!("Failed to redo canvas resize: {err}");
                }
            }
        }
    }

    pub fn description(&self) -> String {
        match self {
            EditAction::PixelEdit(edit) => format!("Edit {} pixels", edit.len()),
            EditAction::CanvasResize {
                old_width,
                old_height,
                new_width,
                new_height,
                ..
            } => format!("Resize {old_width}x{old_height} -> {new_width}x{new_height}"),
        }
    }
}

/// Replays a recorded write. A history entry can only point outside the grid
/// if the grid shrank without going through the undo engine.
fn write_recorded(buffer: &mut PixelBuffer, x: i32, y: i32, color: Rgba) {
    if buffer.try_set(x, y, color).is_err() {
        log::warn!("Skipping recorded pixel ({x}, {y}) outside current canvas");
    }
}
