use bevy_egui::egui::{self, vec2};

use crate::rendering::preview::{self, PreviewAssets};

pub fn show(ctx: &egui::Context, previews: &PreviewAssets) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Plan voxel circles and domes");
        ui.label(
            "Generate block-accurate circles and dome shells, scrub dome layers, \
             and mark cells off as you build.",
        );
        ui.add_space(10.0);

        let t = ui.input(|i| i.time);
        ui.columns(2, |columns| {
            columns[0].group(|ui| {
                ui.label("Circle blueprint");
                let size = vec2(ui.available_width(), 320.0);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
                preview::blueprint_frame(&painter, response.rect, t);
            });
            columns[1].group(|ui| {
                ui.label("Dome preview");
                let size = vec2(ui.available_width(), 320.0);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
                preview::dome_frame(&painter, response.rect, t, previews);
            });
        });

        // Both previews animate forever; ask for the next frame.
        ui.ctx().request_repaint();
    });
}
