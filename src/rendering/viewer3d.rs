use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::AppView;
use crate::state::PlannerState;

/// Renders the dome voxel list as one instanced cube mesh with an orbit
/// camera. Active only on the dome view; leaving the view tears the scene
/// down so re-entry always rebuilds from current data.
pub struct Viewer3dPlugin;

impl Plugin for Viewer3dPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitController>()
            .init_resource::<ViewerScene>()
            .add_systems(Startup, setup_viewer_assets)
            .add_systems(
                Update,
                (sync_voxel_scene, orbit_camera).run_if(in_state(AppView::Dome)),
            )
            .add_systems(OnExit(AppView::Dome), teardown_voxel_scene);
    }
}

/// Marker for spawned voxel instances.
#[derive(Component)]
struct DomeVoxel;

/// Shared cube mesh and material. Every voxel entity reuses these handles,
/// so the renderer batches them into a single instanced draw.
#[derive(Resource)]
struct VoxelSceneAssets {
    cube: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

/// Which dome data generation the spawned instances were built from.
#[derive(Resource, Default)]
struct ViewerScene {
    built_generation: Option<u64>,
}

/// Orbit camera state: drag to orbit, scroll to zoom, inertial damping.
#[derive(Resource)]
pub struct OrbitController {
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
    pub target: Vec3,
    yaw_vel: f32,
    pitch_vel: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            yaw: std::f32::consts::FRAC_PI_4,
            pitch: 0.5,
            radius: 96.0,
            target: Vec3::new(0.0, 5.0, 0.0),
            yaw_vel: 0.0,
            pitch_vel: 0.0,
        }
    }
}

fn setup_viewer_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let cube = meshes.add(Cuboid::from_length(1.0));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(255, 122, 24),
        perceptual_roughness: 0.85,
        ..default()
    });
    commands.insert_resource(VoxelSceneAssets { cube, material });
}

/// Rebuild the instance set whenever newer dome data exists. Old instances
/// are despawned first so stale geometry never lingers alongside a new
/// build. Skips (and retries next frame) while the window reports zero
/// size, so the viewer never renders into an unlaid-out surface.
fn sync_voxel_scene(
    mut commands: Commands,
    state: Res<PlannerState>,
    assets: Res<VoxelSceneAssets>,
    mut scene: ResMut<ViewerScene>,
    mut orbit: ResMut<OrbitController>,
    existing: Query<Entity, With<DomeVoxel>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(dome) = state.dome.as_ref() else {
        return;
    };
    if scene.built_generation == Some(state.dome_generation) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    if window.width() < 1.0 || window.height() < 1.0 {
        return;
    }

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }
    for &[x, y, z] in &dome.voxels {
        commands.spawn((
            Mesh3d(assets.cube.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::from_xyz(x as f32, y as f32, z as f32),
            DomeVoxel,
        ));
    }

    orbit.target = Vec3::new(0.0, dome.radius as f32 * 0.5, 0.0);
    scene.built_generation = Some(state.dome_generation);
    info!(voxels = dome.voxels.len(), "rebuilt dome instance set");
}

fn teardown_voxel_scene(
    mut commands: Commands,
    mut scene: ResMut<ViewerScene>,
    existing: Query<Entity, With<DomeVoxel>>,
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }
    scene.built_generation = None;
}

fn orbit_camera(
    mut orbit: ResMut<OrbitController>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut scroll: EventReader<MouseWheel>,
    mut egui_ctxs: EguiContexts,
    time: Res<Time>,
) {
    let ctx = egui_ctxs.ctx_mut();
    let pointer_captured = ctx.is_pointer_over_area() || ctx.wants_pointer_input();

    let mut delta = Vec2::ZERO;
    for ev in motion.read() {
        delta += ev.delta;
    }

    if !pointer_captured {
        for ev in scroll.read() {
            orbit.radius = (orbit.radius * (1.0 - ev.y * 0.1)).clamp(4.0, 600.0);
        }
    } else {
        scroll.clear();
    }

    const SENSITIVITY: f32 = 0.012;
    if buttons.pressed(MouseButton::Left) && !pointer_captured {
        orbit.yaw_vel = -delta.x * SENSITIVITY;
        orbit.pitch_vel = -delta.y * SENSITIVITY;
    } else {
        // Inertia: velocities decay instead of stopping dead.
        let damping = 0.05f32.powf(time.delta_secs());
        orbit.yaw_vel *= damping;
        orbit.pitch_vel *= damping;
    }

    orbit.yaw += orbit.yaw_vel;
    orbit.pitch = (orbit.pitch + orbit.pitch_vel).clamp(-0.2, 1.45);

    let (yaw, pitch, radius, target) = (orbit.yaw, orbit.pitch, orbit.radius, orbit.target);
    let position = target
        + Vec3::new(
            radius * yaw.cos() * pitch.cos(),
            radius * pitch.sin(),
            radius * yaw.sin() * pitch.cos(),
        );
    for mut transform in cameras.iter_mut() {
        transform.translation = position;
        transform.look_at(target, Vec3::Y);
    }
}
