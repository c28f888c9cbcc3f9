use crate::buffer::PixelBuffer;
use crate::color::Rgba;
use crate::command::EditAction;
use crate::event::EventBus;
use crate::geometry::GridPos;
use crate::selection::SelectionModel;
use eframe::egui::{Key, Modifiers, PointerButton};

/// A pointer event already translated into grid space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pos: GridPos,
    /// The button that was pressed or released; `None` for moves
    pub button: Option<PointerButton>,
    /// Whether the primary button is currently held
    pub primary_held: bool,
    pub modifiers: Modifiers,
}

impl PointerInput {
    pub fn new(pos: GridPos) -> Self {
        Self {
            pos,
            button: None,
            primary_held: false,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn with_primary_held(mut self, held: bool) -> Self {
        self.primary_held = held;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// What a tool may touch while handling an event. The buffer is borrowed,
/// never owned.
pub struct CanvasContext<'a> {
    pub buffer: &'a mut PixelBuffer,
    pub active_color: &'a mut Rgba,
    pub selection: &'a mut SelectionModel,
    pub events: &'a EventBus,
}

/// Tool trait defines the interface for all drawing tools.
///
/// Handlers return the gesture's undo action when the gesture completes;
/// the session pushes it. A tool returns at most one action per gesture.
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Handle pointer press on the canvas
    fn on_pointer_down(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction>;

    /// Handle pointer movement, with or without a button held
    fn on_pointer_move(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction>;

    /// Handle pointer release
    fn on_pointer_up(&mut self, input: &PointerInput, canvas: &mut CanvasContext<'_>) -> Option<EditAction>;

    fn on_key_down(&mut self, _key: Key, _modifiers: Modifiers, _canvas: &mut CanvasContext<'_>) -> Option<EditAction> {
        None
    }

    /// Called when the tool is switched away from. Drops any live preview
    /// without touching the buffer; writes already made are handed back as
    /// the gesture's action.
    fn deactivate(&mut self, canvas: &mut CanvasContext<'_>) -> Option<EditAction>;

    /// Whether a gesture is in progress
    fn is_busy(&self) -> bool {
        false
    }
}
