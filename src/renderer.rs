use eframe::egui::{self, Color32, Painter, Rect, Stroke, Vec2};

use crate::geometry::{GridPos, GridRect};
use crate::selection::DragModifiers;
use crate::state::EditorSession;
use crate::tool::{ToolKind, shape_cells};

const CHECKER_LIGHT: Color32 = Color32::from_gray(204);
const CHECKER_DARK: Color32 = Color32::from_gray(153);
const GRID_LINE: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 90);
const SELECTION_TINT: Color32 = Color32::from_rgba_premultiplied(0, 48, 86, 60);
const SELECTION_BORDER: Color32 = Color32::from_rgb(0, 120, 215);

/// Draws a session's canvas into an egui painter. Never mutates the session.
#[derive(Debug, Clone)]
pub struct CanvasRenderer {
    /// Below this cell size grid lines are skipped
    min_grid_cell: i32,
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self { min_grid_cell: 4 }
    }

    /// Renders the current frame
    ///
    /// Args:
    ///     painter (egui::Painter): The painter to draw with
    ///     rect (egui::Rect): The canvas widget area; screen positions are relative to its top-left
    ///     session (EditorSession): The editor state to draw
    pub fn paint(&self, painter: &Painter, rect: Rect, session: &EditorSession) {
        let painter = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
        let Some(visible) = self.visible_cells(rect, session) else {
            return;
        };

        for pos in visible.cells() {
            self.paint_cell(&painter, rect, session, pos);
        }
        self.paint_preview(&painter, rect, session);
        self.paint_selection(&painter, rect, session);
        if session.show_grid() && session.view().cell_size() >= self.min_grid_cell {
            self.paint_grid(&painter, rect, session, visible);
        }

        let border = self.region_rect(rect, session, session.buffer().bounds());
        painter.rect_stroke(border, 0.0, Stroke::new(1.0, Color32::DARK_GRAY));
    }

    /// Grid cells overlapping the widget, clamped to the buffer
    fn visible_cells(&self, rect: Rect, session: &EditorSession) -> Option<GridRect> {
        let view = session.view();
        let cell = view.cell_size();
        let (width, height) = session.buffer().size();
        let pan = view.pan();

        // Floor division so cells partly left of / above the widget still count
        let first = GridPos::new((-pan.x).div_euclid(cell), (-pan.y).div_euclid(cell));
        let last = GridPos::new(
            (rect.width() as i32 - pan.x).div_euclid(cell),
            (rect.height() as i32 - pan.y).div_euclid(cell),
        );
        if last.x < 0 || last.y < 0 || first.x >= width as i32 || first.y >= height as i32 {
            return None;
        }
        Some(GridRect { min: first, max: last }.clamp_to(width, height))
    }

    fn cell_rect(&self, rect: Rect, session: &EditorSession, pos: GridPos) -> Rect {
        let view = session.view();
        let top_left = rect.min + view.grid_to_screen(pos).to_pos2().to_vec2();
        Rect::from_min_size(top_left, Vec2::splat(view.cell_size() as f32))
    }

    fn region_rect(&self, rect: Rect, session: &EditorSession, region: GridRect) -> Rect {
        self.cell_rect(rect, session, region.min)
            .union(self.cell_rect(rect, session, region.max))
    }

    fn paint_cell(&self, painter: &Painter, rect: Rect, session: &EditorSession, pos: GridPos) {
        let Some(color) = session.buffer().get(pos.x, pos.y) else {
            return;
        };
        let cell_rect = self.cell_rect(rect, session, pos);
        if color.a < u8::MAX {
            let checker = if (pos.x + pos.y) % 2 == 0 {
                CHECKER_LIGHT
            } else {
                CHECKER_DARK
            };
            painter.rect_filled(cell_rect, 0.0, checker);
        }
        if !color.is_transparent() {
            painter.rect_filled(cell_rect, 0.0, Color32::from(color));
        }
    }

    /// Live shape preview, cell for cell what the tool will commit
    fn paint_preview(&self, painter: &Painter, rect: Rect, session: &EditorSession) {
        let selection = session.selection();
        if !selection.is_dragging() {
            return;
        }
        let Some(shape) = session.active_tool().shape() else {
            return;
        };
        let (width, height) = session.buffer().size();
        let Some((start, end)) = selection.adjusted_points(width, height) else {
            return;
        };

        let color = Color32::from(session.active_color());
        for pos in shape_cells(shape, start, end, DragModifiers::default(), width, height) {
            painter.rect_filled(self.cell_rect(rect, session, pos), 0.0, color);
        }
    }

    fn paint_selection(&self, painter: &Painter, rect: Rect, session: &EditorSession) {
        let (width, height) = session.buffer().size();
        let selection = session.selection();

        if let Some(committed) = selection.rect(width, height) {
            let area = self.region_rect(rect, session, committed);
            painter.rect_filled(area, 0.0, SELECTION_TINT);
            painter.rect_stroke(area, 0.0, Stroke::new(1.5, SELECTION_BORDER));
        } else if session.active_tool() == ToolKind::Select && selection.is_dragging() {
            if let Some((start, end)) = selection.adjusted_points(width, height) {
                let live = GridRect::from_corners(start, end).clamp_to(width, height);
                let area = self.region_rect(rect, session, live);
                painter.rect_stroke(area, 0.0, Stroke::new(1.0, SELECTION_BORDER));
            }
        }
    }

    fn paint_grid(&self, painter: &Painter, rect: Rect, session: &EditorSession, visible: GridRect) {
        let stroke = Stroke::new(1.0, GRID_LINE);
        let area = self.region_rect(rect, session, visible);
        let cell = session.view().cell_size() as f32;

        for i in 0..=visible.width() {
            let x = area.min.x + i as f32 * cell;
            painter.line_segment([egui::pos2(x, area.min.y), egui::pos2(x, area.max.y)], stroke);
        }
        for i in 0..=visible.height() {
            let y = area.min.y + i as f32 * cell;
            painter.line_segment([egui::pos2(area.min.x, y), egui::pos2(area.max.x, y)], stroke);
        }
    }
}
