use bevy_egui::egui::{self, vec2};

use super::UiBuffers;
use super::widgets;
use crate::rendering::fit::GridFit;
use crate::rendering::grid2d::{self, GridStyle};
use crate::state::{
    DOME_RADIUS_MAX, DOME_RADIUS_MIN, PlannerState, ShapeKind, THICKNESS_MAX, THICKNESS_MIN,
};

pub fn show(ctx: &egui::Context, state: &mut PlannerState, buffers: &mut UiBuffers) {
    let mut commit = false;

    egui::SidePanel::left("dome_controls")
        .resizable(false)
        .default_width(230.0)
        .show(ctx, |ui| {
            ui.heading("Dome planner");
            ui.add_space(6.0);

            commit |= widgets::paired_input(
                ui,
                "Radius",
                &mut state.dome_params.radius,
                &mut buffers.dome_radius,
                DOME_RADIUS_MIN,
                DOME_RADIUS_MAX,
            );
            commit |= widgets::mode_chips(ui, &mut state.dome_params.filled);
            if !state.dome_params.filled {
                commit |= widgets::paired_input(
                    ui,
                    "Thickness",
                    &mut state.dome_params.thickness,
                    &mut buffers.dome_thickness,
                    THICKNESS_MIN,
                    THICKNESS_MAX,
                );
            }

            ui.add_space(6.0);
            let label = if state.busy { "Generating…" } else { "Generate" };
            if ui.add_enabled(!state.busy, egui::Button::new(label)).clicked() {
                commit = true;
            }
            if let Some(status) = &state.status {
                ui.colored_label(egui::Color32::from_rgb(255, 107, 107), status);
            }

            ui.add_space(8.0);
            if let Some(data) = &state.dome {
                ui.label(format!("Radius {}", data.radius));
                ui.label(format!("{} blocks total", data.total_blocks));
            }
            ui.add_space(8.0);
            ui.label("Drag to orbit • Scroll to zoom");
        });

    egui::SidePanel::right("dome_layers")
        .resizable(false)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading("Layer view");
            let count = state.layer_count();
            if count == 0 {
                ui.label("Generate a dome to scrub its layers.");
                return;
            }

            let max = count - 1;
            ui.horizontal(|ui| {
                if ui.button("Prev").clicked() {
                    state.step_layer(-1);
                }
                let mut layer = state.layer;
                if ui.add(egui::Slider::new(&mut layer, 0..=max)).changed() {
                    state.set_layer(layer);
                }
                if ui.button("Next").clicked() {
                    state.step_layer(1);
                }
            });

            // Layer changes only repaint this panel; the 3D scene is
            // untouched.
            if let Some(dome) = &state.dome {
                let layer = &dome.layers[state.layer];
                ui.label(format!("Layer {} • {} blocks", layer.y, layer.block_count));
                ui.add_space(4.0);

                let width = ui.available_width();
                let height = ui.available_height().max(160.0);
                let (response, painter) =
                    ui.allocate_painter(vec2(width, height.min(width)), egui::Sense::hover());
                grid2d::paint_background(&painter, response.rect);
                let fit = GridFit::compute(response.rect, layer.size, 0.0, None);
                grid2d::paint_blocks(&painter, &fit, &layer.grid, &GridStyle::layer());
            }
        });

    // Keep the center transparent so the 3D viewer underneath shows
    // through.
    egui::CentralPanel::default()
        .frame(egui::Frame {
            fill: egui::Color32::TRANSPARENT,
            ..Default::default()
        })
        .show(ctx, |_ui| {});

    if commit {
        state.queue_generate(ShapeKind::Dome);
    }
}
