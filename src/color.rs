use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

/// A straight (non-premultiplied) RGBA colour as stored in the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<image::Rgba<u8>> for Rgba {
    fn from(pixel: image::Rgba<u8>) -> Self {
        Self::from(pixel.0)
    }
}

impl From<Rgba> for image::Rgba<u8> {
    fn from(color: Rgba) -> Self {
        image::Rgba(color.to_array())
    }
}

impl From<Rgba> for Color32 {
    fn from(color: Rgba) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

impl From<Color32> for Rgba {
    fn from(color: Color32) -> Self {
        Self::from(color.to_srgba_unmultiplied())
    }
}
