#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod buffer;
pub mod color;
pub mod command;
mod components;
pub mod error;
pub mod event;
mod file_handler;
pub mod geometry;
pub mod input;
mod panels;
pub mod raster;
pub mod renderer;
pub mod selection;
pub mod state;
pub mod tool;
pub mod view;

pub use app::PaintApp;
pub use buffer::PixelBuffer;
pub use color::Rgba;
pub use command::{EditAction, PixelEdit, UndoEngine};
pub use error::{CanvasError, CanvasResult};
pub use event::{EditorEvent, EventBus, EventHandler};
pub use geometry::{GridPos, GridRect, ScreenPos};
pub use input::{InputEvent, InputHandler, InputRouter};
pub use renderer::CanvasRenderer;
pub use selection::{DragModifiers, SelectionModel, SelectionState};
pub use state::{EditorConfig, EditorSession};
pub use tool::{Tool, ToolKind};
pub use view::{ViewTransform, ZoomDirection};
