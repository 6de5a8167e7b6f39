//! ECS side of the gesture classifier.
//!
//! `drive_gesture_classifier` collects one [`GestureFrame`] per frame from
//! Bevy input and runs the classifier against [`EcsGestureHost`], which binds
//! each collaborator trait to the world: egui for UI occlusion, the orbit rig
//! for rotation and lens, mesh ray casting for hit tests, and
//! [`DepartmentTapped`] events for selection.
//!
//! Missing bindings are a startup fault: `verify_gesture_bindings` checks them
//! once and `report_binding_errors` exits the app if any are absent.

use std::fmt;

use bevy::ecs::system::SystemParam;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::input::touch::{Touch, Touches};
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, RayCastSettings};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use departments::config::{GestureConfig, GestureConfigError};
use departments::department::{Department, DepartmentTapped};

use crate::camera::{ExplorerCamera, OrbitCamera, OrbitRotationInput};
use crate::egui_input_guard::pointer_over_egui;
use crate::gesture::{
    GestureClassifier, GestureFrame, LensSink, MouseInput, PointerId, RotationSink, SceneRaycast,
    SelectionSink, TouchContact, TouchPhase, UiOcclusion,
};

// =============================================================================
// Host
// =============================================================================

/// Collaborators of the classifier, borrowed from the world for one frame.
#[derive(SystemParam)]
pub struct EcsGestureHost<'w, 's> {
    egui: EguiContexts<'w, 's>,
    rotation: ResMut<'w, OrbitRotationInput>,
    orbit: ResMut<'w, OrbitCamera>,
    cameras: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<ExplorerCamera>>,
    ray_cast: MeshRayCast<'w, 's>,
    departments: Query<'w, 's, &'static Department>,
    tapped: EventWriter<'w, DepartmentTapped>,
}

impl EcsGestureHost<'_, '_> {
    /// Hand the orbit rig the pointer that owns the press slot.
    fn follow_press(&mut self, pointer: Option<PointerId>) {
        if self.rotation.pointer != pointer {
            self.rotation.pointer = pointer;
        }
    }
}

impl UiOcclusion for EcsGestureHost<'_, '_> {
    fn is_over_ui(&mut self, pointer: PointerId, position: Vec2) -> bool {
        pointer_over_egui(&mut self.egui, pointer, position)
    }
}

impl RotationSink for EcsGestureHost<'_, '_> {
    fn set_rotation_enabled(&mut self, enabled: bool) {
        if self.rotation.enabled != enabled {
            self.rotation.enabled = enabled;
        }
    }
}

impl SceneRaycast for EcsGestureHost<'_, '_> {
    fn nearest_hit(&mut self, screen_pos: Vec2) -> Option<Entity> {
        let (camera, camera_transform) = self.cameras.get_single().ok()?;
        let ray = camera.viewport_to_world(camera_transform, screen_pos).ok()?;
        let hits = self.ray_cast.cast_ray(ray, &RayCastSettings::default());
        hits.first().map(|(entity, _)| *entity)
    }

    fn is_department(&self, entity: Entity) -> bool {
        self.departments.contains(entity)
    }
}

impl SelectionSink for EcsGestureHost<'_, '_> {
    fn department_tapped(&mut self, department: Entity) {
        if let Ok(d) = self.departments.get(department) {
            info!("Tapped on department: {}", d.name);
        }
        self.tapped.send(DepartmentTapped(department));
    }
}

impl LensSink for EcsGestureHost<'_, '_> {
    fn field_of_view(&self) -> Option<f32> {
        if self.cameras.is_empty() {
            return None;
        }
        Some(self.orbit.fov_degrees)
    }

    fn set_field_of_view(&mut self, fov: f32) {
        self.orbit.fov_degrees = fov;
    }
}

// =============================================================================
// Frame collection
// =============================================================================

/// Wheel events summed into lines, the way the orbit camera reads them.
pub fn scroll_lines(events: impl IntoIterator<Item = MouseWheel>) -> f32 {
    events
        .into_iter()
        .map(|evt| match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        })
        .sum()
}

/// Active and just-ended touches, ordered by id so the oldest finger is the
/// primary one. A finger that touched down and lifted within this frame is
/// reported once, as [`TouchPhase::BeganAndEnded`].
pub fn touch_contacts(touches: &Touches) -> Vec<TouchContact> {
    let mut contacts: Vec<TouchContact> = touches
        .iter()
        .map(|touch| {
            let phase = if touches.just_pressed(touch.id()) {
                TouchPhase::Began
            } else if touch.delta() != Vec2::ZERO {
                TouchPhase::Moved
            } else {
                TouchPhase::Stationary
            };
            TouchContact {
                id: touch.id(),
                position: touch.position(),
                phase,
            }
        })
        .collect();

    let ending = |touch: &Touch, phase: TouchPhase| TouchContact {
        id: touch.id(),
        position: touch.position(),
        phase: if touches.just_pressed(touch.id()) {
            TouchPhase::BeganAndEnded
        } else {
            phase
        },
    };
    contacts.extend(
        touches
            .iter_just_released()
            .map(|touch| ending(touch, TouchPhase::Ended)),
    );
    contacts.extend(
        touches
            .iter_just_canceled()
            .map(|touch| ending(touch, TouchPhase::Canceled)),
    );

    contacts.sort_by_key(|c| c.id);
    contacts
}

pub fn mouse_input(buttons: &ButtonInput<MouseButton>, window: Option<&Window>) -> MouseInput {
    MouseInput {
        position: window.and_then(|w| w.cursor_position()),
        just_pressed: buttons.just_pressed(MouseButton::Left),
        pressed: buttons.pressed(MouseButton::Left),
        just_released: buttons.just_released(MouseButton::Left),
    }
}

// =============================================================================
// Systems
// =============================================================================

/// Runs the classifier once per frame: mouse, then touch, then zoom.
pub fn drive_gesture_classifier(
    time: Res<Time>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut wheel: EventReader<MouseWheel>,
    mut classifier: ResMut<GestureClassifier>,
    mut host: EcsGestureHost,
) {
    let frame = GestureFrame {
        time: time.elapsed_secs(),
        mouse: buttons
            .as_deref()
            .map(|b| mouse_input(b, windows.get_single().ok())),
        touches: touches.as_deref().map(touch_contacts).unwrap_or_default(),
        scroll: scroll_lines(wheel.read().cloned()),
    };
    classifier.tick(&frame, &mut host);
    host.follow_press(classifier.press().map(|p| p.pointer));
}

/// A collaborator the classifier cannot run without.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingError {
    NoCamera,
    MultipleCameras(usize),
    MissingResource(&'static str),
    InvalidConfig(GestureConfigError),
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::NoCamera => write!(f, "no ExplorerCamera in the scene"),
            BindingError::MultipleCameras(n) => {
                write!(f, "expected one ExplorerCamera, found {n}")
            }
            BindingError::MissingResource(name) => {
                write!(f, "missing required resource: {name}")
            }
            BindingError::InvalidConfig(e) => write!(f, "invalid gesture config: {e}"),
        }
    }
}

impl std::error::Error for BindingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindingError::InvalidConfig(e) => Some(e),
            _ => None,
        }
    }
}

/// Startup check that every collaborator of the classifier is bound.
pub fn verify_gesture_bindings(
    cameras: Query<(), With<ExplorerCamera>>,
    orbit: Option<Res<OrbitCamera>>,
    rotation: Option<Res<OrbitRotationInput>>,
    classifier: Option<Res<GestureClassifier>>,
) -> Result<(), BindingError> {
    match cameras.iter().count() {
        0 => return Err(BindingError::NoCamera),
        1 => {}
        n => return Err(BindingError::MultipleCameras(n)),
    }
    if orbit.is_none() {
        return Err(BindingError::MissingResource("OrbitCamera"));
    }
    if rotation.is_none() {
        return Err(BindingError::MissingResource("OrbitRotationInput"));
    }
    let Some(classifier) = classifier else {
        return Err(BindingError::MissingResource("GestureClassifier"));
    };
    classifier
        .config()
        .validate()
        .map_err(BindingError::InvalidConfig)
}

pub fn report_binding_errors(In(result): In<Result<(), BindingError>>, mut exit: EventWriter<AppExit>) {
    if let Err(e) = result {
        error!("Gesture input is not wired up: {}", e);
        exit.send(AppExit::error());
    }
}

/// Build the classifier from the configured thresholds.
pub fn init_gesture_classifier(mut commands: Commands, config: Res<GestureConfig>) {
    commands.insert_resource(GestureClassifier::new(*config));
}
