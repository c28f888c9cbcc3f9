use crate::color::Rgba;
use crate::command::{EditAction, PixelEdit};
use crate::tool::trait_def::{CanvasContext, PointerInput, Tool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenMode {
    /// Write the active colour
    Paint,
    /// Write fully transparent
    Erase,
}

/// Freehand single-cell pen, also used as the eraser.
#[derive(Debug, Clone)]
pub struct PenTool {
    mode: PenMode,
    /// Writes made by the current stroke
    stroke: Option<PixelEdit>,
}

impl PenTool {
    pub fn new(mode: PenMode) -> Self {
        Self { mode, stroke: None }
    }

    fn stroke_color(&self, canvas: &CanvasContext<'_>) -> Rgba {
        match self.mode {
            PenMode::Paint => *canvas.active_color,
            PenMode::Erase => Rgba::TRANSPARENT,
        }
    }

    fn paint(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) {
        let color = self.stroke_color(canvas);
        let stroke = self.stroke.get_or_insert_with(PixelEdit::new);
        stroke.paint(canvas.buffer, input.pos.x, input.pos.y, color);
    }

    fn finish_stroke(&mut self) -> Option<EditAction> {
        let stroke = self.stroke.take()?;
        log::debug!("pen stroke finished: {} cells", stroke.len());
        stroke.finish()
    }
}

impl Tool for PenTool {
    fn name(&self) -> &'static str {
        match self.mode {
            PenMode::Paint => "Pen",
            PenMode::Erase => "Eraser",
        }
    }

    fn on_pointer_down(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        // A down without a matching up ends the previous stroke first
        let dangling = self.finish_stroke();
        self.stroke = Some(PixelEdit::new());
        self.paint(input, canvas);
        dangling
    }

    fn on_pointer_move(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        // Only a stroke started on this canvas paints
        if input.primary_held && self.stroke.is_some() {
            self.paint(input, canvas);
        }
        None
    }

    fn on_pointer_up(&mut self, _input: &PointerInput, _canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        self.finish_stroke()
    }

    fn deactivate(&mut self, _canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        // Commit whatever the interrupted stroke already wrote
        self.finish_stroke()
    }

    fn is_busy(&self) -> bool {
        self.stroke.is_some()
    }
}
