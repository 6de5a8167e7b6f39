use bevy::prelude::*;

pub mod camera;
pub mod department_meshes;
pub mod egui_input_guard;
pub mod gesture;
pub mod gesture_bridge;

use camera::{CameraDrag, CameraOrbitDrag, CameraTargetRequest, CameraTargets, OrbitRotationInput};
use departments::scene::ExplorerScene;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraDrag>()
            .init_resource::<CameraOrbitDrag>()
            .init_resource::<OrbitRotationInput>()
            .init_resource::<CameraTargets>()
            .add_event::<CameraTargetRequest>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    gesture_bridge::init_gesture_classifier,
                    setup_lighting,
                    department_meshes::setup_department_assets,
                    department_meshes::spawn_building_shell,
                )
                    .chain(),
            )
            .add_systems(
                PostStartup,
                gesture_bridge::verify_gesture_bindings.pipe(gesture_bridge::report_binding_errors),
            )
            // Gesture classification first so rotation gating is current
            // before the orbit rig reads it.
            .add_systems(
                Update,
                (
                    gesture_bridge::drive_gesture_classifier,
                    camera::camera_orbit_drag,
                    camera::camera_pan_drag,
                    camera::camera_pan_keyboard,
                    camera::handle_camera_target_requests,
                    camera::apply_orbit_camera,
                )
                    .chain(),
            )
            .add_systems(Update, department_meshes::attach_department_meshes)
            .add_systems(
                OnEnter(ExplorerScene::Department),
                camera::focus_camera_on_department,
            )
            .add_systems(OnEnter(ExplorerScene::Project), camera::reset_camera_to_overview);
    }
}

fn setup_lighting(mut commands: Commands) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    // Directional light (sun) angled from above
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4, // 45 degrees down
            std::f32::consts::FRAC_PI_6,  // slight rotation
            0.0,
        )),
    ));
}
