use crate::color::Rgba;
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{GridPos, GridRect};
use image::RgbaImage;

/// Default grid size of a fresh editor session.
pub const DEFAULT_SIZE: usize = 64;

/// Dense, row-major grid of colours. Every in-range cell always holds a
/// defined colour; new cells start fully transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::transparent(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}

impl PixelBuffer {
    /// Creates a `width` x `height` grid, rejecting empty or unaddressable
    /// dimensions.
    pub fn new(width: usize, height: usize) -> CanvasResult<Self> {
        Self::check_size(width, height)?;
        Ok(Self::transparent(width, height))
    }

    /// Both sides must be non-zero, fit an `i32` cell coordinate, and the
    /// cell count must fit a `usize`.
    pub fn check_size(width: usize, height: usize) -> CanvasResult<()> {
        let addressable = |side: usize| side > 0 && i32::try_from(side).is_ok();
        if addressable(width) && addressable(height) && width.checked_mul(height).is_some() {
            Ok(())
        } else {
            Err(CanvasError::InvalidSize { width, height })
        }
    }

    fn transparent(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn bounds(&self) -> GridRect {
        GridRect {
            min: GridPos::new(0, 0),
            max: GridPos::new(self.width as i32 - 1, self.height as i32 - 1),
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn try_get(&self, x: i32, y: i32) -> CanvasResult<Rgba> {
        self.get(x, y).ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Writes one cell. Callers are expected to range-check first; a stray
    /// write trips an assertion in debug builds and is ignored in release.
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) {
        debug_assert!(
            self.contains(x, y),
            "write to ({x}, {y}) outside {}x{} canvas",
            self.width,
            self.height
        );
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn try_set(&mut self, x: i32, y: i32, color: Rgba) -> CanvasResult<()> {
        let i = self.index(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.pixels[i] = color;
        Ok(())
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> CanvasError {
        CanvasError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Replaces the grid with a `new_width` x `new_height` one, keeping the
    /// overlapping top-left region. Returns the previous grid for undo.
    pub fn resize(&mut self, new_width: usize, new_height: usize) -> CanvasResult<PixelBuffer> {
        let mut resized = PixelBuffer::new(new_width, new_height)?;
        let keep_w = self.width.min(new_width);
        let keep_h = self.height.min(new_height);
        for y in 0..keep_h {
            let src = y * self.width;
            let dst = y * new_width;
            resized.pixels[dst..dst + keep_w].copy_from_slice(&self.pixels[src..src + keep_w]);
        }
        log::debug!(
            "resized canvas {}x{} -> {}x{}",
            self.width,
            self.height,
            new_width,
            new_height
        );
        Ok(std::mem::replace(self, resized))
    }

    /// Copies the cells of `rect` (clamped to the grid) into a new buffer.
    pub fn crop(&self, rect: GridRect) -> PixelBuffer {
        let rect = rect.clamp_to(self.width, self.height);
        let mut out = PixelBuffer::transparent(rect.width() as usize, rect.height() as usize);
        for pos in rect.cells() {
            let color = self.pixels[pos.y as usize * self.width + pos.x as usize];
            out.set(pos.x - rect.min.x, pos.y - rect.min.y, color);
        }
        out
    }

    /// Read-only full scan in row-major order, for caller-supplied encoders.
    pub fn scan(&self, mut visit: impl FnMut(i32, i32, Rgba)) {
        for (i, color) in self.pixels.iter().enumerate() {
            visit((i % self.width) as i32, (i / self.width) as i32, *color);
        }
    }

    pub fn from_rgba_image(image: &RgbaImage) -> CanvasResult<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let mut buffer = PixelBuffer::new(width, height)?;
        for (dst, src) in buffer.pixels.iter_mut().zip(image.pixels()) {
            *dst = Rgba::from(*src);
        }
        Ok(buffer)
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width as u32, self.height as u32);
        self.scan(|x, y, color| image.put_pixel(x as u32, y as u32, color.into()));
        image
    }
}
