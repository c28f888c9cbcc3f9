use thiserror::Error;

/// Errors returned by the explicit, fallible canvas entry points.
///
/// Interactive tool paths never produce these: a stray pointer outside the
/// grid or an empty undo stack is a no-op there, not a failure.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("invalid canvas size {width}x{height}")]
    InvalidSize { width: usize, height: usize },

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

pub type CanvasResult<T> = Result<T, CanvasError>;
