pub mod types;
mod trait_def;

pub use trait_def::{CanvasContext, PointerInput, Tool};
pub use types::{ToolKind, ToolType, new_tool};

// Re-export specific tool implementations
pub use types::eyedropper::EyedropperTool;
pub use types::fill::FillTool;
pub use types::pen::{PenMode, PenTool};
pub use types::selection::SelectTool;
pub use types::shape::{ShapeKind, ShapeTool, shape_cells};
