//! Integer rasterizers shared by the committing tools and the preview renderer.
//!
//! The shape functions only emit candidate cells through `plot`; clipping to
//! the buffer is the caller's job. Flood fill works on the buffer directly.

use crate::buffer::PixelBuffer;
use crate::color::Rgba;
use crate::command::PixelEdit;
use crate::geometry::{GridPos, GridRect};
use std::collections::VecDeque;

/// Bresenham line from `start` to `end`, inclusive of both endpoints.
///
/// Steep lines are walked along y by swapping axes, and the walk always runs
/// toward increasing major axis, so cells come out in that order.
pub fn line(start: GridPos, end: GridPos, mut plot: impl FnMut(i32, i32)) {
    let (mut x0, mut y0, mut x1, mut y1) = (start.x, start.y, end.x, end.y);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let mut error = dx / 2;
    let y_step = if y0 < y1 { 1 } else { -1 };
    let mut y = y0;

    for x in x0..=x1 {
        if steep {
            plot(y, x);
        } else {
            plot(x, y);
        }
        error -= dy;
        if error < 0 {
            y += y_step;
            error += dx;
        }
    }
}

/// The four border edges of `rect`, interior untouched. Corner cells are
/// emitted more than once.
pub fn rectangle_outline(rect: GridRect, mut plot: impl FnMut(i32, i32)) {
    let GridRect { min, max } = rect;
    for x in min.x..=max.x {
        plot(x, min.y);
        plot(x, max.y);
    }
    for y in min.y..=max.y {
        plot(min.x, y);
        plot(max.x, y);
    }
}

/// Whether an ellipse spanning `bounds` has a zero semi-axis and would draw nothing.
pub fn ellipse_is_degenerate(bounds: GridRect) -> bool {
    (bounds.max.x - bounds.min.x) / 2 == 0 || (bounds.max.y - bounds.min.y) / 2 == 0
}

/// Midpoint ellipse outline inscribed in `bounds`.
///
/// Semi-axes are half the box extents (rounded down) and the centre sits at
/// `min + semi-axis`. Region 1 steps x while the slope is shallow, region 2
/// steps y from the other end; each computed point is reflected into all
/// four quadrants.
pub fn ellipse_outline(bounds: GridRect, mut plot: impl FnMut(i32, i32)) {
    if ellipse_is_degenerate(bounds) {
        return;
    }
    let a = ((bounds.max.x - bounds.min.x) / 2) as i64;
    let b = ((bounds.max.y - bounds.min.y) / 2) as i64;
    let cx = bounds.min.x as i64 + a;
    let cy = bounds.min.y as i64 + b;

    let a2 = a * a;
    let b2 = b * b;
    let fa2 = 4 * a2;
    let fb2 = 4 * b2;

    let mut reflect = |x: i64, y: i64| {
        plot((cx + x) as i32, (cy + y) as i32);
        plot((cx - x) as i32, (cy + y) as i32);
        plot((cx + x) as i32, (cy - y) as i32);
        plot((cx - x) as i32, (cy - y) as i32);
    };

    let (mut x, mut y) = (0, b);
    let mut sigma = 2 * b2 + a2 * (1 - 2 * b);
    while b2 * x <= a2 * y {
        reflect(x, y);
        if sigma >= 0 {
            sigma += fa2 * (1 - y);
            y -= 1;
        }
        sigma += b2 * (4 * x + 6);
        x += 1;
    }

    let (mut x, mut y) = (a, 0);
    let mut sigma = 2 * a2 + b2 * (1 - 2 * a);
    while a2 * y <= b2 * x {
        reflect(x, y);
        if sigma >= 0 {
            sigma += fb2 * (1 - x);
            x -= 1;
        }
        sigma += a2 * (4 * y + 6);
        y += 1;
    }
}

/// Breadth-first 4-connected flood fill from `seed`, recording every write
/// into `edit`.
///
/// Neighbours are enqueued without a visited set; cells already converted
/// are skipped by the colour check when dequeued. Does nothing when the seed
/// is out of bounds or already has the replacement colour.
pub fn flood_fill(buffer: &mut PixelBuffer, seed: GridPos, replacement: Rgba, edit: &mut PixelEdit) {
    let Some(target) = buffer.get(seed.x, seed.y) else {
        return;
    };
    if target == replacement {
        return;
    }

    let mut queue = VecDeque::from([seed]);
    while let Some(p) = queue.pop_front() {
        if buffer.get(p.x, p.y) != Some(target) {
            continue;
        }
        edit.paint(buffer, p.x, p.y, replacement);

        queue.push_back(GridPos::new(p.x + 1, p.y));
        queue.push_back(GridPos::new(p.x - 1, p.y));
        queue.push_back(GridPos::new(p.x, p.y + 1));
        queue.push_back(GridPos::new(p.x, p.y - 1));
    }
}

/// Collects the cells `raster` emits, in emission order, skipping any outside
/// the `width` x `height` grid.
pub fn collect_clipped(width: usize, height: usize, raster: impl FnOnce(&mut dyn FnMut(i32, i32))) -> Vec<GridPos> {
    let bounds = GridRect {
        min: GridPos::new(0, 0),
        max: GridPos::new(width as i32 - 1, height as i32 - 1),
    };
    let mut cells = Vec::new();
    raster(&mut |x, y| {
        let pos = GridPos::new(x, y);
        if bounds.contains(pos) {
            cells.push(pos);
        }
    });
    cells
}
