use std::collections::HashMap;
use std::io::Cursor;

use eframe::egui::{Key, Modifiers};
use image::{ImageFormat, RgbaImage};

use super::config::{ConfigResult, EditorConfig};
use crate::buffer::PixelBuffer;
use crate::color::Rgba;
use crate::command::{EditAction, PixelEdit, UndoEngine};
use crate::error::{CanvasError, CanvasResult};
use crate::event::{EditorEvent, EventBus, EventHandler};
use crate::geometry::{GridPos, GridRect, ScreenPos};
use crate::selection::SelectionModel;
use crate::tool::{CanvasContext, PointerInput, Tool, ToolKind, ToolType, new_tool};
use crate::view::{ViewTransform, ZoomDirection};

/// One open canvas: the pixel buffer plus everything that edits or views it.
///
/// All mutation happens synchronously on the caller's thread. Tools get a
/// borrowed [`CanvasContext`] for the duration of one event and hand back
/// at most one undo action per gesture.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    buffer: PixelBuffer,
    view: ViewTransform,
    selection: SelectionModel,
    history: UndoEngine,
    active_color: Rgba,
    /// One long-lived handler instance per tool kind
    tools: HashMap<ToolKind, ToolType>,
    active_tool: ToolKind,
    clipboard: Option<PixelBuffer>,
    events: EventBus,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::build(EditorConfig::default(), PixelBuffer::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> ConfigResult<Self> {
        config.validate()?;
        let buffer = PixelBuffer::new(config.canvas_width, config.canvas_height)
            .map_err(|err| super::config::ConfigError::Invalid(err.to_string()))?;
        Ok(Self::build(config, buffer))
    }

    fn build(config: EditorConfig, buffer: PixelBuffer) -> Self {
        let tools = ToolKind::ALL
            .into_iter()
            .map(|kind| (kind, new_tool(kind)))
            .collect();
        Self {
            view: ViewTransform::from_config(&config),
            history: UndoEngine::new(config.undo_capacity),
            active_color: config.primary_color,
            buffer,
            selection: SelectionModel::new(),
            tools,
            active_tool: ToolKind::default(),
            clipboard: None,
            events: EventBus::new(),
            config,
        }
    }

    // --- accessors -------------------------------------------------------

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn history(&self) -> &UndoEngine {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn active_color(&self) -> Rgba {
        self.active_color
    }

    pub fn set_active_color(&mut self, color: Rgba) {
        self.active_color = color;
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn show_grid(&self) -> bool {
        self.config.show_grid
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.config.show_grid = show;
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Current settings, ready to hand back to the host for persistence.
    pub fn config(&self) -> EditorConfig {
        EditorConfig {
            canvas_width: self.buffer.width(),
            canvas_height: self.buffer.height(),
            cell_size: self.view.cell_size() as u32,
            primary_color: self.active_color,
            ..self.config.clone()
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    /// Committed selection clamped to the current grid.
    pub fn selection_rect(&self) -> Option<GridRect> {
        let (width, height) = self.buffer.size();
        self.selection.rect(width, height)
    }

    // --- view ------------------------------------------------------------

    pub fn screen_to_grid(&self, p: ScreenPos) -> GridPos {
        self.view.screen_to_grid(p)
    }

    pub fn zoom_at(&mut self, anchor: ScreenPos, direction: ZoomDirection) -> bool {
        let zoomed = self.view.zoom_at(anchor, direction);
        if zoomed {
            self.emit_view_changed();
        }
        zoomed
    }

    pub fn pan_by(&mut self, dx: i32, dy: i32) {
        if self.view.pan_by(dx, dy) {
            self.emit_view_changed();
        }
    }

    fn emit_view_changed(&self) {
        self.events.emit(EditorEvent::ViewChanged {
            cell_size: self.view.cell_size(),
            pan: self.view.pan(),
        });
    }

    // --- tools -----------------------------------------------------------

    /// Switches the active tool. An in-progress gesture is cancelled first
    /// and any selection is dropped.
    pub fn set_tool(&mut self, kind: ToolKind) {
        if kind == self.active_tool {
            return;
        }
        self.finish_gesture();
        let before = self.selection_rect();
        self.selection.clear();
        self.notify_selection(before);

        let old = std::mem::replace(&mut self.active_tool, kind);
        log::info!("Active tool: {} -> {}", old.label(), kind.label());
        self.events.emit(EditorEvent::ToolChanged { old, new: kind });
    }

    pub fn is_gesture_active(&self) -> bool {
        self.tools
            .get(&self.active_tool)
            .is_some_and(|tool| tool.is_busy())
    }

    pub fn pointer_down(&mut self, input: PointerInput) {
        if self.active_tool != ToolKind::Select && self.selection.has_selection() {
            let before = self.selection_rect();
            self.selection.clear();
            self.notify_selection(before);
        }
        self.dispatch(|tool, canvas| tool.on_pointer_down(&input, canvas));
    }

    pub fn pointer_move(&mut self, input: PointerInput) {
        self.dispatch(|tool, canvas| tool.on_pointer_move(&input, canvas));
    }

    pub fn pointer_up(&mut self, input: PointerInput) {
        self.dispatch(|tool, canvas| tool.on_pointer_up(&input, canvas));
    }

    /// Delete clears the committed selection; every other key goes to the
    /// active tool.
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) {
        if key == Key::Delete && self.delete_selection() {
            return;
        }
        self.dispatch(|tool, canvas| tool.on_key_down(key, modifiers, canvas));
    }

    /// Cancels the active tool's gesture. Shape previews vanish without
    /// touching the buffer; a partial pen stroke is kept as one action.
    pub fn finish_gesture(&mut self) {
        self.dispatch(|tool, canvas| tool.deactivate(canvas));
    }

    fn dispatch(
        &mut self,
        handle: impl FnOnce(&mut ToolType, &mut CanvasContext<'_>) -> Option<EditAction>,
    ) {
        let before = self.selection_rect();
        let Some(tool) = self.tools.get_mut(&self.active_tool) else {
            log::warn!("No handler registered for {:?}", self.active_tool);
            return;
        };
        let mut canvas = CanvasContext {
            buffer: &mut self.buffer,
            active_color: &mut self.active_color,
            selection: &mut self.selection,
            events: &self.events,
        };
        if let Some(action) = handle(tool, &mut canvas) {
            self.record(action);
        }
        self.notify_selection(before);
    }

    fn notify_selection(&self, before: Option<GridRect>) {
        let after = self.selection_rect();
        if after != before {
            self.events.emit(EditorEvent::SelectionChanged(after));
        }
    }

    // --- history ---------------------------------------------------------

    fn record(&mut self, action: EditAction) {
        self.history.push(action);
        self.emit_history_changed();
    }

    fn emit_history_changed(&self) {
        self.events.emit(EditorEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }

    pub fn undo(&mut self) -> bool {
        self.finish_gesture();
        let size = self.buffer.size();
        let undone = self.history.undo(&mut self.buffer);
        if undone {
            self.after_history_step(size);
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.finish_gesture();
        let size = self.buffer.size();
        let redone = self.history.redo(&mut self.buffer);
        if redone {
            self.after_history_step(size);
        }
        redone
    }

    fn after_history_step(&mut self, size_before: (usize, usize)) {
        if self.buffer.size() != size_before {
            let before = self.selection_rect();
            self.selection.clear();
            self.notify_selection(before);
            self.emit_resized();
        }
        self.emit_history_changed();
    }

    fn emit_resized(&self) {
        let (width, height) = self.buffer.size();
        self.events.emit(EditorEvent::CanvasResized { width, height });
    }

    // --- canvas-level commands -------------------------------------------

    /// Changes the grid size, keeping the top-left overlap. Undoable.
    /// Returns `Ok(false)` when the size is unchanged.
    pub fn resize_canvas(&mut self, width: usize, height: usize) -> CanvasResult<bool> {
        if (width, height) == self.buffer.size() {
            return Ok(false);
        }
        if let Err(err) = PixelBuffer::check_size(width, height) {
            log::warn!("Rejected canvas resize to {width}x{height}");
            return Err(err);
        }
        self.finish_gesture();
        let (old_width, old_height) = self.buffer.size();
        let old_pixels = self.buffer.resize(width, height)?;
        log::info!("Canvas resized {old_width}x{old_height} -> {width}x{height}");

        let before = self.selection_rect();
        self.selection.clear();
        self.notify_selection(before);
        self.record(EditAction::CanvasResize {
            old_width,
            old_height,
            old_pixels,
            new_width: width,
            new_height: height,
        });
        self.emit_resized();
        Ok(true)
    }

    /// Starts over with a blank grid and empty history.
    pub fn new_canvas(&mut self, width: usize, height: usize) -> CanvasResult<()> {
        let buffer = PixelBuffer::new(width, height)?;
        self.replace_document(buffer);
        Ok(())
    }

    /// Copies a decoded image in wholesale. Clears history like opening a
    /// document does.
    pub fn import_image(&mut self, image: &RgbaImage) -> CanvasResult<()> {
        let buffer = PixelBuffer::from_rgba_image(image)?;
        let (width, height) = buffer.size();
        self.replace_document(buffer);
        log::info!("Imported {width}x{height} image");
        self.events.emit(EditorEvent::ImageImported { width, height });
        Ok(())
    }

    /// Decodes any format the `image` crate understands and imports it.
    pub fn import_encoded(&mut self, bytes: &[u8]) -> CanvasResult<()> {
        let image = image::load_from_memory(bytes).map_err(CanvasError::Decode)?;
        self.import_image(&image.to_rgba8())
    }

    fn replace_document(&mut self, buffer: PixelBuffer) {
        self.finish_gesture();
        let resized = buffer.size() != self.buffer.size();
        self.buffer = buffer;
        self.history.clear();

        let before = self.selection_rect();
        self.selection.clear();
        self.notify_selection(before);
        if resized {
            self.emit_resized();
        }
        self.emit_history_changed();
    }

    pub fn export_image(&self) -> RgbaImage {
        self.buffer.to_rgba_image()
    }

    pub fn export_png(&self) -> CanvasResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.export_image()
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(CanvasError::Encode)?;
        Ok(bytes)
    }

    // --- selection commands ----------------------------------------------

    /// Clears the committed selection to transparent as one undo action and
    /// returns to Idle. Returns false when nothing is selected.
    pub fn delete_selection(&mut self) -> bool {
        let Some(rect) = self.selection_rect() else {
            return false;
        };
        let mut edit = PixelEdit::new();
        for cell in rect.cells() {
            edit.paint(&mut self.buffer, cell.x, cell.y, Rgba::TRANSPARENT);
        }
        if let Some(action) = edit.finish() {
            self.record(action);
        }
        self.selection.clear();
        self.notify_selection(Some(rect));
        true
    }

    pub fn copy_selection(&mut self) -> bool {
        let Some(rect) = self.selection_rect() else {
            return false;
        };
        let copied = self.buffer.crop(rect);
        log::debug!("Copied {}x{} region", copied.width(), copied.height());
        self.clipboard = Some(copied);
        true
    }

    pub fn cut_selection(&mut self) -> bool {
        self.copy_selection() && self.delete_selection()
    }

    /// Writes the clipboard at the selection's top-left (or the origin),
    /// clipped to the grid, and selects the pasted region.
    pub fn paste(&mut self) -> bool {
        let Some(clip) = self.clipboard.clone() else {
            return false;
        };
        self.finish_gesture();
        let origin = self
            .selection_rect()
            .map_or(GridPos::new(0, 0), |rect| rect.min);

        let mut edit = PixelEdit::new();
        clip.scan(|x, y, color| {
            edit.paint(&mut self.buffer, origin.x + x, origin.y + y, color);
        });
        let pasted = GridRect {
            min: origin,
            max: GridPos::new(
                origin.x + clip.width() as i32 - 1,
                origin.y + clip.height() as i32 - 1,
            ),
        };
        if let Some(action) = edit.finish() {
            self.record(action);
        }

        let before = self.selection_rect();
        let (width, height) = self.buffer.size();
        self.selection.select(pasted.clamp_to(width, height));
        self.notify_selection(before);
        true
    }
}
