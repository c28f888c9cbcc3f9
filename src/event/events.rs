use crate::color::Rgba;
use crate::geometry::{GridRect, ScreenPos};
use crate::tool::ToolKind;

/// Notifications the editor core sends to its host after a state change.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The eyedropper picked a colour; it is already the active colour
    ColorSampled(Rgba),
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
    },
    CanvasResized {
        width: usize,
        height: usize,
    },
    SelectionChanged(Option<GridRect>),
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    ViewChanged {
        cell_size: i32,
        pan: ScreenPos,
    },
    ImageImported {
        width: usize,
        height: usize,
    },
}
