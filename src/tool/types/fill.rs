use crate::command::{EditAction, PixelEdit};
use crate::raster;
use crate::tool::trait_def::{CanvasContext, PointerInput, Tool};

/// Bucket fill over the 4-connected region sharing the clicked cell's colour.
#[derive(Debug, Clone, Default)]
pub struct FillTool;

impl FillTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for FillTool {
    fn name(&self) -> &'static str {
        "Fill"
    }

    fn on_pointer_down(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        let target = canvas.buffer.get(input.pos.x, input.pos.y)?;
        let replacement = *canvas.active_color;
        if target == replacement {
            return None;
        }

        let mut edit = PixelEdit::new();
        raster::flood_fill(canvas.buffer, input.pos, replacement, &mut edit);
        log::debug!("fill at {:?}: {} cells", input.pos, edit.len());
        edit.finish()
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
