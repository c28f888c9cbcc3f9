use crate::PaintApp;
use crate::color::Rgba;
use crate::components::ToolButton;
use crate::tool::ToolKind;
use eframe::egui;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(96.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.session().active_tool();
            egui::Grid::new("tool_grid").spacing([4.0, 4.0]).show(ui, |ui| {
                for (i, kind) in ToolKind::ALL.into_iter().enumerate() {
                    if ToolButton::new(kind, kind == active).show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", kind.label());
                        app.session_mut().set_tool(kind);
                    }
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
            ui.separator();

            ui.label("Colour");
            let mut rgba = app.session().active_color().to_array();
            if ui.color_edit_button_srgba_unmultiplied(&mut rgba).changed() {
                app.session_mut().set_active_color(Rgba::from(rgba));
            }
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.session().can_undo();
                let can_redo = app.session().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("⟲")).on_hover_text("Undo").clicked() {
                    app.session_mut().undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("⟳")).on_hover_text("Redo").clicked() {
                    app.session_mut().redo();
                }
            });

            let history = app.session().history();
            ui.small(format!("{} / {} undo", history.undo_count(), history.capacity()));
            if let Some(next) = history.undo_description() {
                ui.small(format!("Next: {next}"));
            }
        });
}
