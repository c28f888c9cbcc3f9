mod action;
mod history;

pub use action::{EditAction, PixelChange, PixelEdit};
pub use history::{DEFAULT_UNDO_CAPACITY, UndoEngine};
