use eframe::egui::Pos2;
use serde::{Deserialize, Serialize};

/// Integer index into the pixel grid. May lie outside the buffer; callers
/// range-check against the buffer before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, width-1] x [0, height-1]`.
    pub fn clamp_to(self, width: usize, height: usize) -> Self {
        Self {
            x: clamp_axis(self.x, width),
            y: clamp_axis(self.y, height),
        }
    }
}

fn clamp_axis(value: i32, len: usize) -> i32 {
    let max = i32::try_from(len).unwrap_or(i32::MAX).saturating_sub(1).max(0);
    value.clamp(0, max)
}

/// A point in screen pixels, relative to the canvas widget origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScreenPos {
    pub x: i32,
    pub y: i32,
}

impl ScreenPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Truncates the fractional part, matching how the host reports mouse pixels.
    pub fn from_pos2(pos: Pos2) -> Self {
        Self::new(pos.x as i32, pos.y as i32)
    }

    pub fn to_pos2(self) -> Pos2 {
        Pos2::new(self.x as f32, self.y as f32)
    }
}

/// Closed, axis-aligned box of grid cells: both corners are inside the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    pub min: GridPos,
    pub max: GridPos,
}

impl GridRect {
    /// Normalises two arbitrary corners into a min/max box.
    pub fn from_corners(a: GridPos, b: GridPos) -> Self {
        Self {
            min: GridPos::new(a.x.min(b.x), a.y.min(b.y)),
            max: GridPos::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }

    pub fn clamp_to(self, width: usize, height: usize) -> Self {
        Self {
            min: self.min.clamp_to(width, height),
            max: self.max.clamp_to(width, height),
        }
    }

    /// Every cell of the box in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + use<> {
        let GridRect { min, max } = *self;
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| GridPos::new(x, y)))
    }
}
