//! Collaborators the gesture classifier talks to.
//!
//! The classifier owns no references to the world. Each tick it is handed a
//! host implementing these traits: the ECS bridge in production, recording
//! fakes in tests.

use bevy::prelude::*;

use super::types::PointerId;

/// Answers whether a pointer currently overlaps interactive UI.
pub trait UiOcclusion {
    fn is_over_ui(&mut self, pointer: PointerId, position: Vec2) -> bool;
}

/// Toggles whether drag input feeds the orbit camera.
pub trait RotationSink {
    fn set_rotation_enabled(&mut self, enabled: bool);
}

/// Screen-space picking against the 3D scene.
pub trait SceneRaycast {
    /// Nearest interactive entity under `screen_pos`, if any.
    fn nearest_hit(&mut self, screen_pos: Vec2) -> Option<Entity>;
    /// Whether `entity` carries the department marker.
    fn is_department(&self, entity: Entity) -> bool;
}

pub trait SelectionSink {
    fn department_tapped(&mut self, department: Entity);
}

/// Camera lens the zoom acts on. Angles in degrees.
pub trait LensSink {
    /// `None` when no camera is bound; zoom is skipped for that tick.
    fn field_of_view(&self) -> Option<f32>;
    fn set_field_of_view(&mut self, fov: f32);
}

/// All collaborators of the classifier.
pub trait GestureHost: UiOcclusion + RotationSink + SceneRaycast + SelectionSink + LensSink {}

impl<T> GestureHost for T where T: UiOcclusion + RotationSink + SceneRaycast + SelectionSink + LensSink {}
