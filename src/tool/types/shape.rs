use crate::command::{EditAction, PixelEdit};
use crate::geometry::{GridPos, GridRect};
use crate::raster;
use crate::selection::{DragModifiers, adjust_points};
use crate::tool::trait_def::{CanvasContext, PointerInput, Tool};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Ellipse,
}

/// In-bounds cells a shape drag from `start` to `end` would write, in paint
/// order (duplicates possible). Empty for degenerate rectangles and ellipses.
///
/// Shared by the committing tool and the live preview so both agree cell
/// for cell.
pub fn shape_cells(
    shape: ShapeKind,
    start: GridPos,
    end: GridPos,
    modifiers: DragModifiers,
    width: usize,
    height: usize,
) -> Vec<GridPos> {
    let (start, end) = adjust_points(start, end, modifiers, width, height);
    match shape {
        ShapeKind::Line => raster::collect_clipped(width, height, |plot| raster::line(start, end, plot)),
        ShapeKind::Rectangle => {
            let rect = GridRect::from_corners(start, end).clamp_to(width, height);
            if rect.min.x == rect.max.x || rect.min.y == rect.max.y {
                return Vec::new();
            }
            raster::collect_clipped(width, height, |plot| raster::rectangle_outline(rect, plot))
        }
        ShapeKind::Ellipse => {
            let bounds = GridRect::from_corners(start, end);
            raster::collect_clipped(width, height, |plot| raster::ellipse_outline(bounds, plot))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ShapeDrag {
    start: GridPos,
    end: GridPos,
}

/// Drag-to-draw tool for lines, rectangle outlines and ellipse outlines.
///
/// Nothing is written until release; during the drag the selection model
/// carries the preview.
#[derive(Debug, Clone)]
pub struct ShapeTool {
    shape: ShapeKind,
    drag: Option<ShapeDrag>,
}

impl ShapeTool {
    pub fn new(shape: ShapeKind) -> Self {
        Self { shape, drag: None }
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        match self.shape {
            ShapeKind::Line => "Line",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
        }
    }

    fn on_pointer_down(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        self.drag = Some(ShapeDrag {
            start: input.pos,
            end: input.pos,
        });
        canvas.selection.begin_drag(input.pos);
        None
    }

    fn on_pointer_move(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        if !input.primary_held {
            return None;
        }
        if let Some(drag) = &mut self.drag {
            drag.end = input.pos;
            canvas
                .selection
                .update_drag(input.pos, DragModifiers::from_egui(input.modifiers));
        }
        None
    }

    fn on_pointer_up(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        let drag = self.drag.take()?;
        canvas.selection.clear();

        let (width, height) = canvas.buffer.size();
        let modifiers = DragModifiers::from_egui(input.modifiers);
        let cells = shape_cells(self.shape, drag.start, drag.end, modifiers, width, height);
        if cells.is_empty() {
            log::debug!("{} drag {:?} -> {:?} is degenerate", self.name(), drag.start, drag.end);
            return None;
        }

        let color = *canvas.active_color;
        let mut edit = PixelEdit::new();
        for cell in cells {
            edit.paint(canvas.buffer, cell.x, cell.y, color);
        }
        edit.finish()
    }

    fn deactivate(&mut self, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        if self.drag.take().is_some() {
            canvas.selection.clear();
        }
        None
    }

    fn is_busy(&self) -> bool {
        self.drag.is_some()
    }
}
