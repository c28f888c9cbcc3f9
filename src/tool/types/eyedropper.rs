use crate::command::EditAction;
use crate::event::EditorEvent;
use crate::tool::trait_def::{CanvasContext, PointerInput, Tool};

/// Picks the active colour from the canvas. Transparent cells are ignored.
#[derive(Debug, Clone, Default)]
pub struct EyedropperTool;

impl EyedropperTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for EyedropperTool {
    fn name(&self) -> &'static str {
        "Eyedropper"
    }

    fn on_pointer_down(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        let sampled = canvas.buffer.get(input.pos.x, input.pos.y)?;
        if sampled.a > 0 {
            *canvas.active_color = sampled;
            canvas.events.emit(EditorEvent::ColorSampled(sampled));
        }
        None
    }

    fn on_pointer_move(&mut self, _input: &PointerInput, _canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        None
    }

    fn on_pointer_up(&mut self, _input: &PointerInput, _canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        None
    }

    fn deactivate(&mut self, _canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        None
    }
}
