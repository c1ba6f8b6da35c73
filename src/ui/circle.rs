use bevy_egui::egui;

use super::UiBuffers;
use super::widgets;
use crate::rendering::fit::GridFit;
use crate::rendering::grid2d::{self, GridStyle};
use crate::state::{
    CIRCLE_RADIUS_MAX, CIRCLE_RADIUS_MIN, HoverCell, PlannerState, ShapeKind, THICKNESS_MAX,
    THICKNESS_MIN,
};

pub fn show(ctx: &egui::Context, state: &mut PlannerState, buffers: &mut UiBuffers) {
    let mut commit = false;

    egui::SidePanel::left("circle_controls")
        .resizable(false)
        .default_width(230.0)
        .show(ctx, |ui| {
            ui.heading("Circle planner");
            ui.add_space(6.0);

            commit |= widgets::paired_input(
                ui,
                "Radius",
                &mut state.circle_params.radius,
                &mut buffers.circle_radius,
                CIRCLE_RADIUS_MIN,
                CIRCLE_RADIUS_MAX,
            );
            commit |= widgets::mode_chips(ui, &mut state.circle_params.filled);
            if !state.circle_params.filled {
                commit |= widgets::paired_input(
                    ui,
                    "Thickness",
                    &mut state.circle_params.thickness,
                    &mut buffers.circle_thickness,
                    THICKNESS_MIN,
                    THICKNESS_MAX,
                );
            }

            ui.add_space(6.0);
            ui.checkbox(&mut state.show_grid, "Grid lines");
            ui.checkbox(&mut state.show_axes, "Axes");

            ui.add_space(6.0);
            let label = if state.busy { "Generating…" } else { "Generate" };
            if ui.add_enabled(!state.busy, egui::Button::new(label)).clicked() {
                commit = true;
            }
            if let Some(status) = &state.status {
                ui.colored_label(egui::Color32::from_rgb(255, 107, 107), status);
            }

            ui.add_space(8.0);
            if let Some(data) = &state.circle {
                ui.label(format!("Radius {} • Map {}×{}", data.radius, data.size, data.size));
                ui.label(format!("{} blocks", data.block_count));
            }
            match state.hover {
                Some(cell) => ui.label(format!(
                    "x={}, z={} • {}",
                    cell.x,
                    cell.z,
                    if cell.filled { "Block" } else { "Empty" }
                )),
                None => ui.label("Hover to see coordinates"),
            };
            if !state.marked.is_empty() {
                ui.label(format!("{} cells marked done", state.marked.len()));
            }
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let rect = response.rect;
        grid2d::paint_background(&painter, rect);

        let mut hover = None;
        let mut clicked_cell = None;
        if let Some(data) = &state.circle {
            let fit = GridFit::compute(rect, data.size, 14.0, Some(24));
            grid2d::paint_blocks(&painter, &fit, &data.grid, &GridStyle::circle());
            if state.show_grid {
                grid2d::paint_gridlines(&painter, &fit);
            }
            if state.show_axes {
                grid2d::paint_axes(&painter, &fit);
            }
            grid2d::paint_marks(&painter, &fit, &state.marked);

            if let Some(pos) = response.hover_pos()
                && let Some((x, z)) = fit.cell_at(pos)
            {
                let (cx, cz) = fit.centered(x, z);
                hover = Some(HoverCell {
                    x: cx,
                    z: cz,
                    filled: data.grid[z as usize][x as usize],
                });
            }
            if response.clicked()
                && let Some(pos) = response.interact_pointer_pos()
                && let Some((x, z)) = fit.cell_at(pos)
            {
                clicked_cell = Some(fit.centered(x, z));
            }
        }
        state.hover = hover;
        if let Some((x, z)) = clicked_cell {
            state.toggle_mark(x, z);
        }
    });

    if commit {
        state.queue_generate(ShapeKind::Circle);
    }
}
