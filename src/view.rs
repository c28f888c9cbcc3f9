use crate::geometry::{GridPos, ScreenPos};
use crate::state::EditorConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Maps a wheel delta to a direction; zero means no zoom.
    pub fn from_wheel(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::In)
        } else if delta < 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }
}

/// Maps between screen pixels and grid cells. Knows nothing about the
/// buffer's contents or size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewTransform {
    cell_size: i32,
    pan: ScreenPos,
    min_cell_size: i32,
    max_cell_size: i32,
    zoom_step: i32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl ViewTransform {
    pub fn from_config(config: &EditorConfig) -> Self {
        let min_cell_size = config.min_cell_size.max(1) as i32;
        let max_cell_size = (config.max_cell_size as i32).max(min_cell_size);
        Self {
            cell_size: (config.cell_size as i32).clamp(min_cell_size, max_cell_size),
            pan: ScreenPos::default(),
            min_cell_size,
            max_cell_size,
            zoom_step: config.zoom_step.max(1) as i32,
        }
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn pan(&self) -> ScreenPos {
        self.pan
    }

    /// Integer division truncating toward zero, so points up to one cell
    /// left of / above the origin still map to index 0. Results can be
    /// negative once panned past the origin.
    pub fn screen_to_grid(&self, p: ScreenPos) -> GridPos {
        GridPos::new(
            p.x.saturating_sub(self.pan.x) / self.cell_size,
            p.y.saturating_sub(self.pan.y) / self.cell_size,
        )
    }

    /// Top-left screen pixel of a grid cell.
    pub fn grid_to_screen(&self, g: GridPos) -> ScreenPos {
        ScreenPos::new(
            g.x.saturating_mul(self.cell_size).saturating_add(self.pan.x),
            g.y.saturating_mul(self.cell_size).saturating_add(self.pan.y),
        )
    }

    /// Steps the cell size and re-anchors the pan offset so the grid
    /// coordinate under `anchor` does not move. Returns false when the
    /// zoom is already at its limit.
    pub fn zoom_at(&mut self, anchor: ScreenPos, direction: ZoomDirection) -> bool {
        let old = self.cell_size;
        let new = match direction {
            ZoomDirection::In => (old + self.zoom_step).min(self.max_cell_size),
            ZoomDirection::Out => (old - self.zoom_step).max(self.min_cell_size),
        };
        if new == old {
            return false;
        }
        self.pan = ScreenPos::new(
            rescale_axis(anchor.x, self.pan.x, old, new),
            rescale_axis(anchor.y, self.pan.y, old, new),
        );
        self.cell_size = new;
        true
    }

    /// Moves the grid by a screen delta, saturating at the `i32` range.
    /// Returns whether the offset changed.
    pub fn pan_by(&mut self, dx: i32, dy: i32) -> bool {
        let before = self.pan;
        self.pan.x = self.pan.x.saturating_add(dx);
        self.pan.y = self.pan.y.saturating_add(dy);
        self.pan != before
    }
}

/// pan' = anchor - trunc(logical * new), with logical = (anchor - pan) / old
/// kept as an exact rational.
fn rescale_axis(anchor: i32, pan: i32, old: i32, new: i32) -> i32 {
    let scaled = (anchor as i64 - pan as i64) * new as i64 / old as i64;
    let rescaled = anchor as i64 - scaled;
    i32::try_from(rescaled).unwrap_or(if rescaled < 0 { i32::MIN } else { i32::MAX })
}
