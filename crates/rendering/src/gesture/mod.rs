//! Pointer gesture classification.
//!
//! Every frame the bridge in [`crate::gesture_bridge`] turns mouse, touch and
//! wheel input into a [`GestureFrame`] and hands it to the
//! [`GestureClassifier`]. A press either ends as a tap, which hit-tests the
//! scene and selects a department, or moves past the tap threshold and turns
//! into a camera rotation drag until release. Presses that start over UI do
//! neither. Scroll and two-finger pinch zoom the camera lens independently.

pub mod classifier;
pub mod host;
pub mod types;
pub mod zoom;

#[cfg(test)]
mod tests;

pub use classifier::{classify_release, select_at, GestureClassifier};
pub use host::{GestureHost, LensSink, RotationSink, SceneRaycast, SelectionSink, UiOcclusion};
pub use types::{
    GestureFrame, MouseInput, PointerId, PointerSample, PressOutcome, PressState, TouchContact,
    TouchPhase,
};
pub use zoom::{apply_zoom, zoomed_fov, PinchState};
