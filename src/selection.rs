use crate::geometry::{GridPos, GridRect};
use eframe::egui::Modifiers;
use serde::{Deserialize, Serialize};

/// Modifier interpretation for shape and selection drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DragModifiers {
    /// Force |dx| == |dy| (Shift)
    pub proportional: bool,
    /// Treat the anchor as the centre; only honoured together with `proportional` (Shift+Alt)
    pub centered: bool,
}

impl DragModifiers {
    pub fn from_egui(modifiers: Modifiers) -> Self {
        Self {
            proportional: modifiers.shift,
            centered: modifiers.alt,
        }
    }
}

/// Applies the proportional/centered drag rules to a raw `start`..`end` pair.
///
/// Without the proportional modifier the points come back untouched. With it,
/// the end is pushed out so both deltas equal the larger one (keeping their
/// signs); adding the centered modifier mirrors the box around `start`.
/// Adjusted points are clamped into the `width` x `height` grid.
pub fn adjust_points(
    start: GridPos,
    end: GridPos,
    modifiers: DragModifiers,
    width: usize,
    height: usize,
) -> (GridPos, GridPos) {
    if !modifiers.proportional {
        return (start, end);
    }

    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let size = dx.abs().max(dy.abs());
    let sign_x = if dx >= 0 { 1 } else { -1 };
    let sign_y = if dy >= 0 { 1 } else { -1 };

    let new_end = GridPos::new(start.x + size * sign_x, start.y + size * sign_y);
    if modifiers.centered {
        let new_start = GridPos::new(start.x - size * sign_x, start.y - size * sign_y);
        (new_start.clamp_to(width, height), new_end.clamp_to(width, height))
    } else {
        (start, new_end.clamp_to(width, height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Dragging,
    Committed,
}

/// Rectangle selection plus the live drag preview shared by the shape tools.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    start: Option<GridPos>,
    end: Option<GridPos>,
    modifiers: DragModifiers,
    dragging: bool,
    has_selection: bool,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        if self.has_selection {
            SelectionState::Committed
        } else if self.dragging {
            SelectionState::Dragging
        } else {
            SelectionState::Idle
        }
    }

    pub fn has_selection(&self) -> bool {
        self.has_selection
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Starts (or restarts) a drag anchored at `anchor`, dropping any
    /// committed selection.
    pub fn begin_drag(&mut self, anchor: GridPos) {
        self.start = Some(anchor);
        self.end = Some(anchor);
        self.modifiers = DragModifiers::default();
        self.dragging = true;
        self.has_selection = false;
    }

    /// Moves the live end point. Ignored when no drag is in progress.
    pub fn update_drag(&mut self, end: GridPos, modifiers: DragModifiers) {
        if self.dragging {
            self.end = Some(end);
            self.modifiers = modifiers;
        }
    }

    /// Re-reads the modifier state without moving the end point.
    pub fn set_drag_modifiers(&mut self, modifiers: DragModifiers) {
        if self.dragging {
            self.modifiers = modifiers;
        }
    }

    /// Freezes the current drag as the active selection, storing the
    /// adjusted corners. Returns the committed, clamped rectangle.
    pub fn commit(&mut self, width: usize, height: usize) -> Option<GridRect> {
        if !self.dragging {
            return None;
        }
        let (start, end) = self.adjusted_points(width, height)?;
        self.start = Some(start);
        self.end = Some(end);
        self.modifiers = DragModifiers::default();
        self.dragging = false;
        self.has_selection = true;
        self.rect(width, height)
    }

    /// Commits an explicit rectangle, bypassing the drag.
    pub fn select(&mut self, rect: GridRect) {
        self.start = Some(rect.min);
        self.end = Some(rect.max);
        self.modifiers = DragModifiers::default();
        self.dragging = false;
        self.has_selection = true;
    }

    /// Back to Idle from any state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Live corners after modifier adjustment, while dragging or committed.
    pub fn adjusted_points(&self, width: usize, height: usize) -> Option<(GridPos, GridPos)> {
        let (start, end) = self.start.zip(self.end)?;
        Some(adjust_points(start, end, self.modifiers, width, height))
    }

    /// The committed selection as a closed box clamped to the grid.
    pub fn rect(&self, width: usize, height: usize) -> Option<GridRect> {
        if !self.has_selection {
            return None;
        }
        let (start, end) = self.adjusted_points(width, height)?;
        Some(GridRect::from_corners(start, end).clamp_to(width, height))
    }

    pub fn contains(&self, pos: GridPos, width: usize, height: usize) -> bool {
        self.rect(width, height).is_some_and(|rect| rect.contains(pos))
    }
}
