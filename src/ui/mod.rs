//! egui panels and controls: navigation, paired inputs, the circle and
//! dome planner views, and the animated home page.

mod circle;
mod dome;
mod home;
mod widgets;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::AppView;
use crate::rendering::preview::PreviewAssets;
use crate::state::{PlannerState, ShapeKind};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PreviewAssets>()
            .init_resource::<UiBuffers>()
            .add_systems(Update, ui_system)
            .add_systems(OnEnter(AppView::Circle), autoload_circle)
            .add_systems(OnEnter(AppView::Dome), autoload_dome);
    }
}

/// Text buffers backing the number fields, seeded from the initial
/// parameter values.
#[derive(Resource)]
pub struct UiBuffers {
    circle_radius: String,
    circle_thickness: String,
    dome_radius: String,
    dome_thickness: String,
}

impl FromWorld for UiBuffers {
    fn from_world(world: &mut World) -> Self {
        let state = world.get_resource_or_insert_with(PlannerState::default);
        Self {
            circle_radius: state.circle_params.radius.to_string(),
            circle_thickness: state.circle_params.thickness.to_string(),
            dome_radius: state.dome_params.radius.to_string(),
            dome_thickness: state.dome_params.thickness.to_string(),
        }
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    mut state: ResMut<PlannerState>,
    mut buffers: ResMut<UiBuffers>,
    previews: Res<PreviewAssets>,
    view: Res<State<AppView>>,
    mut next_view: ResMut<NextState<AppView>>,
) {
    let ctx = contexts.ctx_mut();
    top_bar(ctx, *view.get(), &mut next_view);

    match view.get() {
        AppView::Home => home::show(ctx, &previews),
        AppView::Circle => circle::show(ctx, &mut state, &mut buffers),
        AppView::Dome => dome::show(ctx, &mut state, &mut buffers),
    }
}

fn top_bar(ctx: &egui::Context, current: AppView, next_view: &mut NextState<AppView>) {
    egui::TopBottomPanel::top("nav").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Domeforge");
            ui.separator();
            for (view, label) in [
                (AppView::Home, "Home"),
                (AppView::Circle, "Circle"),
                (AppView::Dome, "Dome"),
            ] {
                if ui.selectable_label(current == view, label).clicked() && current != view {
                    next_view.set(view);
                }
            }
        });
    });
}

/// The original tool generates immediately on page load; mirror that the
/// first time each view opens.
fn autoload_circle(mut state: ResMut<PlannerState>) {
    if state.circle.is_none() && !state.busy {
        state.queue_generate(ShapeKind::Circle);
    }
}

fn autoload_dome(mut state: ResMut<PlannerState>) {
    if state.dome.is_none() && !state.busy {
        state.queue_generate(ShapeKind::Dome);
    }
}
