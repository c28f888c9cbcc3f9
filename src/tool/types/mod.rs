pub mod eyedropper;
pub mod fill;
pub mod pen;
pub mod selection;
pub mod shape;

use super::trait_def::{CanvasContext, PointerInput, Tool};
use crate::command::EditAction;
use eframe::egui::{Key, Modifiers};
use serde::{Deserialize, Serialize};

use eyedropper::EyedropperTool;
use fill::FillTool;
use pen::{PenMode, PenTool};
use selection::SelectTool;
use shape::{ShapeKind, ShapeTool};

/// The tool kinds offered on the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Fill,
    Line,
    Rectangle,
    Ellipse,
    Select,
    Eyedropper,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Pen,
        ToolKind::Eraser,
        ToolKind::Fill,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Select,
        ToolKind::Eyedropper,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Eraser => "Eraser",
            ToolKind::Fill => "Fill",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
            ToolKind::Select => "Select",
            ToolKind::Eyedropper => "Eyedropper",
        }
    }

    /// The shape a drag with this tool previews, if any
    pub fn shape(&self) -> Option<ShapeKind> {
        match self {
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Ellipse => Some(ShapeKind::Ellipse),
            _ => None,
        }
    }
}

/// Enum representing all available tool implementations
/// This allows us to avoid using Box<dyn Tool> and simplifies memory management
#[derive(Debug, Clone)]
pub enum ToolType {
    Pen(PenTool),
    Fill(FillTool),
    Shape(ShapeTool),
    Select(SelectTool),
    Eyedropper(EyedropperTool),
}

/// Factory function to create a new tool of the specified kind
pub fn new_tool(kind: ToolKind) -> ToolType {
    match kind {
        ToolKind::Pen => ToolType::Pen(PenTool::new(PenMode::Paint)),
        ToolKind::Eraser => ToolType::Pen(PenTool::new(PenMode::Erase)),
        ToolKind::Fill => ToolType::Fill(FillTool::new()),
        ToolKind::Line => ToolType::Shape(ShapeTool::new(ShapeKind::Line)),
        ToolKind::Rectangle => ToolType::Shape(ShapeTool::new(ShapeKind::Rectangle)),
        ToolKind::Ellipse => ToolType::Shape(ShapeTool::new(ShapeKind::Ellipse)),
        ToolKind::Select => ToolType::Select(SelectTool::new()),
        ToolKind::Eyedropper => ToolType::Eyedropper(EyedropperTool::new()),
    }
}

impl ToolType {
    fn as_tool(&self) -> &dyn Tool {
        match self {
            Self::Pen(tool) => tool,
            Self::Fill(tool) => tool,
            Self::Shape(tool) => tool,
            Self::Select(tool) => tool,
            Self::Eyedropper(tool) => tool,
        }
    }

    fn as_tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            Self::Pen(tool) => tool,
            Self::Fill(tool) => tool,
            Self::Shape(tool) => tool,
            Self::Select(tool) => tool,
            Self::Eyedropper(tool) => tool,
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        self.as_tool().name()
    }

    fn on_pointer_down(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        self.as_tool_mut().on_pointer_down(input, canvas)
    }

    fn on_pointer_move(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        self.as_tool_mut().on_pointer_move(input, canvas)
    }

    fn on_pointer_up(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        self.as_tool_mut().on_pointer_up(input, canvas)
    }

    fn on_key_down(&mut self, key: Key, modifiers: Modifiers, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        self.as_tool_mut().on_key_down(key, modifiers, canvas)
    }

    fn deactivate(&mut self, canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        self.as_tool_mut().deactivate(canvas)
    }

    fn is_busy(&self) -> bool {
        self.as_tool().is_busy()
    }
}
