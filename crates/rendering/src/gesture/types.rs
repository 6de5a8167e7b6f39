use bevy::prelude::*;

/// Which physical pointer produced a sample. The mouse is the pointer with no
/// touch id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

impl PointerId {
    pub fn touch_id(self) -> Option<u64> {
        match self {
            PointerId::Mouse => None,
            PointerId::Touch(id) => Some(id),
        }
    }
}

/// A pointer position at a point in time. Positions are logical window
/// pixels, top-left origin; times are seconds since app start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub time: f32,
    pub pointer: PointerId,
}

impl PointerSample {
    pub fn mouse(position: Vec2, time: f32) -> Self {
        Self {
            position,
            time,
            pointer: PointerId::Mouse,
        }
    }

    pub fn touch(id: u64, position: Vec2, time: f32) -> Self {
        Self {
            position,
            time,
            pointer: PointerId::Touch(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
    /// Touched down and lifted within the same frame.
    BeganAndEnded,
}

impl TouchPhase {
    pub fn is_begin(self) -> bool {
        matches!(self, TouchPhase::Began | TouchPhase::BeganAndEnded)
    }

    pub fn is_release(self) -> bool {
        matches!(
            self,
            TouchPhase::Ended | TouchPhase::Canceled | TouchPhase::BeganAndEnded
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchContact {
    pub id: u64,
    pub position: Vec2,
    pub phase: TouchPhase,
}

/// Left mouse button state for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseInput {
    /// `None` while the cursor is outside the window.
    pub position: Option<Vec2>,
    pub just_pressed: bool,
    pub pressed: bool,
    pub just_released: bool,
}

/// Everything the classifier sees in one tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureFrame {
    pub time: f32,
    /// Absent on platforms without a mouse.
    pub mouse: Option<MouseInput>,
    /// Contacts in slot order; index 0 is the primary finger.
    pub touches: Vec<TouchContact>,
    /// Vertical scroll this frame, in lines. Positive zooms in.
    pub scroll: f32,
}

/// The live press. At most one exists at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressState {
    pub origin: Vec2,
    pub origin_time: f32,
    pub pointer: PointerId,
    pub over_ui: bool,
    pub rotation_enabled: bool,
}

/// Why a release did or did not count as a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Short and still enough to select under the release position.
    Tap,
    /// The press started over UI; it never interacts with the scene.
    OverUi,
    /// Movement promoted the press to a camera rotation.
    Drag,
    /// Held longer than the tap time.
    TooLong,
    /// Released farther from the origin than the tap movement allows.
    TooFar,
}
