use crate::command::EditAction;
use crate::selection::DragModifiers;
use crate::tool::trait_def::{CanvasContext, PointerInput, Tool};

/// Rectangle selection. Never writes to the buffer.
#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    dragging: bool,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for SelectTool {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn on_pointer_down(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        canvas.selection.begin_drag(input.pos);
        self.dragging = true;
        None
    }

    fn on_pointer_move(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        if self.dragging && input.primary_held {
            canvas
                .selection
                .update_drag(input.pos, DragModifiers::from_egui(input.modifiers));
        }
        None
    }

    fn on_pointer_up(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        // Modifiers are read at release, like the shape tools
        canvas
            .selection
            .set_drag_modifiers(DragModifiers::from_egui(input.modifiers));
        let (width, height) = canvas.buffer.size();
        let rect = canvas.selection.commit(width, height);
        log::debug!("selection committed: {rect:?}");
        None
    }

    fn deactivate(&mut self, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        if self.dragging {
            self.dragging = false;
            canvas.selection.clear();
        }
        None
    }

    fn is_busy(&self) -> bool {
        self.dragging
    }
}
