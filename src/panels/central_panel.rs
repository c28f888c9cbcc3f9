use crate::PaintApp;
use eframe::egui;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::canvas(&ctx.style()))
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            if app.handle_input(ctx, canvas_rect) {
                ctx.request_repaint();
            }
            if app.router().is_pan_armed() && response.hovered() {
                ctx.set_cursor_icon(if app.router().is_panning() {
                    egui::CursorIcon::Grabbing
                } else {
                    egui::CursorIcon::Grab
                });
            }

            app.renderer().paint(&painter, canvas_rect, app.session());
        });
}
