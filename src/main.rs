use bevy::prelude::*;
use bevy_egui::EguiPlugin;

mod api;
mod config;
mod geometry;
mod net;
mod rendering;
mod state;
mod ui;

use config::AppConfig;
use rendering::viewer3d::Viewer3dPlugin;

/// The three planner views, one per page of the tool.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppView {
    #[default]
    Home,
    Circle,
    Dome,
}

fn main() {
    App::new()
        .insert_resource(AppConfig::from_env())
        .insert_resource(ClearColor(Color::srgb_u8(15, 18, 23)))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Domeforge — voxel circle & dome planner".into(),
                        resolution: (1280.0, 820.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    filter: "info,wgpu_core=warn,wgpu_hal=warn,naga=warn".into(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: false,
        })
        .init_state::<AppView>()
        .init_resource::<state::PlannerState>()
        .add_plugins((ui::UiPlugin, net::FetchPlugin, Viewer3dPlugin))
        .add_systems(Startup, setup_scene)
        .run();
}

/// Camera and lighting shared by every view; the orbit controller only
/// drives the camera while the dome view is active.
fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(60.0, 45.0, 60.0).looking_at(Vec3::new(0.0, 5.0, 0.0), Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 150.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(2.0, 3.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
