use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use departments::config::GestureConfig;
use departments::layout::BuildingLayout;
use departments::scene::FocusedDepartment;

use crate::gesture::PointerId;

const PAN_SPEED: f32 = 30.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
const MIN_PITCH: f32 = 5.0 * std::f32::consts::PI / 180.0;
const MAX_PITCH: f32 = 80.0 * std::f32::consts::PI / 180.0;
/// Orbit radius for the overview target.
pub const OVERVIEW_DISTANCE: f32 = 60.0;
/// Orbit radius for every other target.
pub const CLOSE_DISTANCE: f32 = 10.0;
const FOCUS_MARGIN: f32 = 40.0;

/// Orbital camera model: camera orbits around a focus point.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians (clamped between MIN_PITCH and MAX_PITCH)
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
    /// Vertical field-of-view in degrees, driven by zoom
    pub fov_degrees: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::new(0.0, 10.0, 0.0),
            yaw: 0.6,
            pitch: 30.0_f32.to_radians(),
            distance: OVERVIEW_DISTANCE,
            fov_degrees: 40.0,
        }
    }
}

/// Whether drag input currently rotates the camera, and which pointer drives
/// it. Written only by the gesture classifier.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrbitRotationInput {
    pub enabled: bool,
    /// Owner of the live press; other fingers never rotate the rig.
    pub pointer: Option<PointerId>,
}

/// The camera gestures and zoom act on.
#[derive(Component, Debug, Default)]
pub struct ExplorerCamera;

#[derive(Resource, Default)]
pub struct CameraDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

/// Touch position of the previous rotation frame; mouse rotation uses
/// `MouseMotion` deltas instead.
#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub last_touch: Option<Vec2>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraTarget {
    pub name: String,
    pub focus: Vec3,
}

/// Named focus points. Index 0 is the building overview.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CameraTargets(pub Vec<CameraTarget>);

impl CameraTargets {
    pub fn from_layout(layout: &BuildingLayout) -> Self {
        let extents = layout.extents();
        let half_w = extents.x / 2.0;
        let half_d = extents.z / 2.0;
        let target = |name: &str, focus: Vec3| CameraTarget {
            name: name.to_string(),
            focus,
        };
        Self(vec![
            target("Building", Vec3::new(0.0, extents.y / 2.0, 0.0)),
            target("Lobby", Vec3::new(0.0, 1.5, half_d + 4.0)),
            target("Pool", Vec3::new(half_w + 10.0, 0.5, 0.0)),
            target("Gym", Vec3::new(-half_w - 8.0, 1.5, half_d)),
            target("Rooftop", Vec3::new(0.0, extents.y + 1.0, 0.0)),
        ])
    }

    pub fn amenities(&self) -> impl Iterator<Item = (usize, &CameraTarget)> {
        self.0.iter().enumerate().skip(1)
    }
}

impl FromWorld for CameraTargets {
    fn from_world(world: &mut World) -> Self {
        let layout = world
            .get_resource::<BuildingLayout>()
            .cloned()
            .unwrap_or_default();
        Self::from_layout(&layout)
    }
}

/// Retarget the camera to `CameraTargets[index]`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraTargetRequest(pub usize);

pub fn setup_camera(mut commands: Commands, gestures: Res<GestureConfig>) {
    let mut orbit = OrbitCamera::default();
    orbit.fov_degrees = gestures.zoom.clamp_fov(orbit.fov_degrees);
    let (pos, look_at) = orbit_to_transform(&orbit);

    commands.spawn((
        Camera3d::default(),
        ExplorerCamera,
        Projection::Perspective(PerspectiveProjection {
            fov: orbit.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_translation(pos).looking_at(look_at, Vec3::Y),
    ));
    commands.insert_resource(orbit);
}

fn clamp_focus(focus: &mut Vec3, layout: &BuildingLayout) {
    let half = layout.extents() / 2.0 + Vec3::splat(FOCUS_MARGIN);
    focus.x = focus.x.clamp(-half.x, half.x);
    focus.z = focus.z.clamp(-half.z, half.z);
}

fn orbit_to_transform(orbit: &OrbitCamera) -> (Vec3, Vec3) {
    // Spherical to cartesian offset from focus
    let x = orbit.distance * orbit.pitch.cos() * orbit.yaw.sin();
    let y = orbit.distance * orbit.pitch.sin();
    let z = orbit.distance * orbit.pitch.cos() * orbit.yaw.cos();
    let pos = orbit.focus + Vec3::new(x, y, z);
    (pos, orbit.focus)
}

/// Apply yaw/pitch from a screen-space drag delta.
pub fn orbit_by(orbit: &mut OrbitCamera, delta: Vec2) {
    orbit.yaw -= delta.x * ORBIT_SENSITIVITY;
    orbit.pitch = (orbit.pitch + delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
}

/// System: apply OrbitCamera state to the camera Transform and lens each frame.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<(&mut Transform, &mut Projection), With<ExplorerCamera>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let (pos, look_at) = orbit_to_transform(&orbit);
    let Ok((mut transform, mut projection)) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(pos).looking_at(look_at, Vec3::Y);
    if let Projection::Perspective(ref mut perspective) = *projection {
        perspective.fov = orbit.fov_degrees.to_radians();
    }
}

/// WASD/Arrow keys: pan focus along ground plane (direction relative to current yaw).
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    layout: Res<BuildingLayout>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }

    if dir != Vec2::ZERO {
        let dir = dir.normalize();
        let delta = PAN_SPEED * time.delta_secs();
        // Rotate movement direction by current yaw
        let cos_yaw = orbit.yaw.cos();
        let sin_yaw = orbit.yaw.sin();
        let world_x = dir.x * cos_yaw + dir.y * sin_yaw;
        let world_z = -dir.x * sin_yaw + dir.y * cos_yaw;
        orbit.focus.x += world_x * delta;
        orbit.focus.z += world_z * delta;
        clamp_focus(&mut orbit.focus, &layout);
    }
}

/// Middle-mouse drag: pan focus.
pub fn camera_pan_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    layout: Res<BuildingLayout>,
    mut drag: ResMut<CameraDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let scale = orbit.distance / 500.0;

    if buttons.just_pressed(MouseButton::Middle) {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }

    if buttons.just_released(MouseButton::Middle) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            // Rotate pan direction by current yaw
            let cos_yaw = orbit.yaw.cos();
            let sin_yaw = orbit.yaw.sin();
            let world_x = -delta.x * cos_yaw - delta.y * sin_yaw;
            let world_z = delta.x * sin_yaw - delta.y * cos_yaw;
            orbit.focus.x += world_x * scale;
            orbit.focus.z += world_z * scale;
            clamp_focus(&mut orbit.focus, &layout);
            drag.last_pos = pos;
        }
    }
}

/// Drag rotation for the pointer that owns the press, gated by
/// `OrbitRotationInput`.
pub fn camera_orbit_drag(
    rotation: Res<OrbitRotationInput>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    mut motion: EventReader<MouseMotion>,
    mut drag: ResMut<CameraOrbitDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let mouse_delta: Vec2 = motion.read().map(|m| m.delta).sum();

    if !rotation.enabled {
        drag.last_touch = None;
        return;
    }

    match rotation.pointer {
        Some(PointerId::Mouse) => {
            drag.last_touch = None;
            let held = buttons.is_some_and(|b| b.pressed(MouseButton::Left));
            if held && mouse_delta != Vec2::ZERO {
                orbit_by(&mut orbit, mouse_delta);
            }
        }
        Some(PointerId::Touch(id)) => {
            let Some(touch) = touches.as_deref().and_then(|t| t.get_pressed(id)) else {
                drag.last_touch = None;
                return;
            };
            let pos = touch.position();
            if let Some(last) = drag.last_touch {
                let delta = pos - last;
                if delta != Vec2::ZERO {
                    orbit_by(&mut orbit, delta);
                }
            }
            drag.last_touch = Some(pos);
        }
        None => drag.last_touch = None,
    }
}

/// Move the camera to a requested target: the overview keeps a wide radius,
/// amenities are viewed up close.
pub fn handle_camera_target_requests(
    mut requests: EventReader<CameraTargetRequest>,
    targets: Res<CameraTargets>,
    mut orbit: ResMut<OrbitCamera>,
) {
    for &CameraTargetRequest(index) in requests.read() {
        let Some(target) = targets.0.get(index) else {
            warn!(
                "Camera target {} out of range ({} targets)",
                index,
                targets.0.len()
            );
            continue;
        };
        orbit.focus = target.focus;
        orbit.distance = if index == 0 {
            OVERVIEW_DISTANCE
        } else {
            CLOSE_DISTANCE
        };
    }
}

/// OnEnter(Department): frame the focused department up close.
pub fn focus_camera_on_department(
    focused: Res<FocusedDepartment>,
    transforms: Query<&GlobalTransform>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Some(entity) = focused.0 else {
        return;
    };
    let Ok(transform) = transforms.get(entity) else {
        return;
    };
    orbit.focus = transform.translation();
    orbit.distance = CLOSE_DISTANCE;
}

/// OnEnter(Project): back to the overview target.
pub fn reset_camera_to_overview(mut requests: EventWriter<CameraTargetRequest>) {
    requests.send(CameraTargetRequest(0));
}
