use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;

use crate::event::EditorEvent;
use crate::file_handler::FileHandler;
use crate::input::{InputHandler, InputRouter};
use crate::panels::{central_panel, tools_panel};
use crate::renderer::CanvasRenderer;
use crate::state::{EditorConfig, EditorSession};
use crate::view::ZoomDirection;
use crate::geometry::ScreenPos;

/// Storage key for the persisted editor settings
const CONFIG_KEY: &str = "texel_config";

/// Pending values of the canvas size dialog
#[derive(Debug, Clone, Copy)]
struct ResizeDialog {
    width: usize,
    height: usize,
}

pub struct PaintApp {
    session: EditorSession,
    router: InputRouter,
    input_handler: InputHandler,
    renderer: CanvasRenderer,
    file_handler: FileHandler,
    /// Last notification worth showing in the status line, fed by the event bus
    notice: Rc<RefCell<Option<String>>>,
    resize_dialog: Option<ResizeDialog>,
    canvas_rect: egui::Rect,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_session(EditorSession::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = cc
            .storage
            .and_then(|storage| eframe::get_value::<EditorConfig>(storage, CONFIG_KEY))
            .unwrap_or_default();

        let session = match EditorSession::new(config) {
            Ok(session) => session,
            Err(err) => {
                log::warn!("Ignoring stored config: {err}");
                EditorSession::default()
            }
        };
        Self::with_session(session)
    }

    fn with_session(session: EditorSession) -> Self {
        let notice = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&notice);
        session.subscribe(Box::new(move |event: &EditorEvent| {
            if let Some(text) = describe(event) {
                *sink.borrow_mut() = Some(text);
            }
        }));

        Self {
            session,
            router: InputRouter::new(),
            input_handler: InputHandler::new(),
            renderer: CanvasRenderer::new(),
            file_handler: FileHandler::new(),
            notice,
            resize_dialog: None,
            canvas_rect: egui::Rect::NOTHING,
        }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn renderer(&self) -> &CanvasRenderer {
        &self.renderer
    }

    /// Feeds this frame's canvas input through the router. Returns whether
    /// the canvas changed.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) -> bool {
        self.canvas_rect = canvas_rect;
        self.input_handler.set_canvas_rect(canvas_rect);
        let mut repaint = false;
        for event in self.input_handler.process_input(ctx) {
            repaint |= self.router.route(&event, &mut self.session);
        }
        repaint
    }

    fn set_notice(&self, text: impl Into<String>) {
        *self.notice.borrow_mut() = Some(text.into());
    }

    fn import_dropped_files(&mut self, ctx: &egui::Context) {
        if !self.file_handler.check_for_dropped_files(ctx) {
            return;
        }
        // Only the last image survives; each import replaces the canvas
        if let Some(image) = self.file_handler.take_images().pop() {
            if let Err(err) = self.session.import_encoded(&image.bytes) {
                log::error!("Failed to import {}: {err}", image.name);
                self.set_notice(format!("Could not open {}: {err}", image.name));
            }
        }
    }

    fn zoom_center(&mut self, direction: ZoomDirection) {
        let center = self.canvas_rect.size() / 2.0;
        self.session
            .zoom_at(ScreenPos::new(center.x as i32, center.y as i32), direction);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn export_png(&mut self) {
        const EXPORT_PATH: &str = "texture.png";
        let written = self
            .session
            .export_png()
            .map_err(|err| err.to_string())
            .and_then(|bytes| std::fs::write(EXPORT_PATH, bytes).map_err(|err| err.to_string()));
        match written {
            Ok(()) => {
                log::info!("Exported canvas to {EXPORT_PATH}");
                self.set_notice(format!("Saved {EXPORT_PATH}"));
            }
            Err(err) => {
                log::error!("Export failed: {err}");
                self.set_notice(format!("Export failed: {err}"));
            }
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New canvas").clicked() {
                        let (width, height) = self.session.buffer().size();
                        if let Err(err) = self.session.new_canvas(width, height) {
                            log::error!("{err}");
                        }
                        ui.close_menu();
                    }
                    #[cfg(not(target_arch = "wasm32"))]
                    if ui.button("Export PNG").clicked() {
                        self.export_png();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let has_selection = self.session.selection().has_selection();
                    if ui.add_enabled(self.session.can_undo(), egui::Button::new("Undo")).clicked() {
                        self.session.undo();
                        ui.close_menu();
                    }
                    if ui.add_enabled(self.session.can_redo(), egui::Button::new("Redo")).clicked() {
                        self.session.redo();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.add_enabled(has_selection, egui::Button::new("Cut")).clicked() {
                        self.session.cut_selection();
                        ui.close_menu();
                    }
                    if ui.add_enabled(has_selection, egui::Button::new("Copy")).clicked() {
                        self.session.copy_selection();
                        ui.close_menu();
                    }
                    if ui.add_enabled(self.session.has_clipboard(), egui::Button::new("Paste")).clicked() {
                        self.session.paste();
                        ui.close_menu();
                    }
                    if ui.add_enabled(has_selection, egui::Button::new("Delete")).clicked() {
                        self.session.delete_selection();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Canvas size…").clicked() {
                        let (width, height) = self.session.buffer().size();
                        self.resize_dialog = Some(ResizeDialog { width, height });
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    let mut show_grid = self.session.show_grid();
                    if ui.checkbox(&mut show_grid, "Grid").changed() {
                        self.session.set_show_grid(show_grid);
                    }
                    if ui.button("Zoom in").clicked() {
                        self.zoom_center(ZoomDirection::In);
                    }
                    if ui.button("Zoom out").clicked() {
                        self.zoom_center(ZoomDirection::Out);
                    }
                });
            });
        });
    }

    fn status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (width, height) = self.session.buffer().size();
                ui.label(format!("{width}×{height}"));
                ui.separator();
                ui.label(format!("{} px/cell", self.session.view().cell_size()));
                ui.separator();
                ui.label(self.session.active_tool().label());
                if let Some(rect) = self.session.selection_rect() {
                    ui.separator();
                    ui.label(format!("Selection {}×{}", rect.width(), rect.height()));
                }
                if let Some(notice) = self.notice.borrow().as_deref() {
                    ui.separator();
                    ui.label(notice);
                }
            });
        });
    }

    fn resize_window(&mut self, ctx: &egui::Context) {
        let Some(mut dialog) = self.resize_dialog else {
            return;
        };
        let mut open = true;
        let mut apply = false;
        egui::Window::new("Canvas size")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Width");
                    ui.add(egui::DragValue::new(&mut dialog.width).range(1..=1024));
                });
                ui.horizontal(|ui| {
                    ui.label("Height");
                    ui.add(egui::DragValue::new(&mut dialog.height).range(1..=1024));
                });
                apply = ui.button("Apply").clicked();
            });

        if apply {
            if let Err(err) = self.session.resize_canvas(dialog.width, dialog.height) {
                self.set_notice(err.to_string());
            }
            self.resize_dialog = None;
        } else if open {
            self.resize_dialog = Some(dialog);
        } else {
            self.resize_dialog = None;
        }
    }
}

/// Status line text for the events the user should notice
fn describe(event: &EditorEvent) -> Option<String> {
    match event {
        EditorEvent::ColorSampled(color) => Some(format!(
            "Picked #{:02X}{:02X}{:02X}",
            color.r, color.g, color.b
        )),
        EditorEvent::CanvasResized { width, height } => Some(format!("Canvas is now {width}×{height}")),
        EditorEvent::ImageImported { width, height } => Some(format!("Imported {width}×{height} image")),
        _ => None,
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CONFIG_KEY, &self.session.config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.import_dropped_files(ctx);

        self.menu_bar(ctx);
        self.status_bar(ctx);
        tools_panel(self, ctx);
        self.resize_window(ctx);
        central_panel(self, ctx);
    }
}
