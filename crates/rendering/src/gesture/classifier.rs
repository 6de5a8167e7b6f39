use bevy::prelude::*;

use departments::config::{GestureConfig, TapConfig};

use super::host::{GestureHost, SceneRaycast, SelectionSink};
use super::types::{
    GestureFrame, MouseInput, PointerId, PointerSample, PressOutcome, PressState, TouchContact,
    TouchPhase,
};
use super::zoom::{apply_zoom, PinchState};

/// Tap-vs-drag classifier and zoom driver.
///
/// One press slot is shared by the mouse and the primary finger. While a press
/// is live, presses from any other pointer are ignored, and moves or releases
/// are only applied for the pointer that owns the slot.
#[derive(Resource, Debug, Clone)]
pub struct GestureClassifier {
    config: GestureConfig,
    press: Option<PressState>,
    pinch: PinchState,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            press: None,
            pinch: PinchState::default(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn press(&self) -> Option<&PressState> {
        self.press.as_ref()
    }

    pub fn is_pressing(&self) -> bool {
        self.press.is_some()
    }

    pub fn rotation_enabled(&self) -> bool {
        self.press.is_some_and(|p| p.rotation_enabled)
    }

    pub fn pinch(&self) -> &PinchState {
        &self.pinch
    }

    /// Run one frame: mouse, then touch, then zoom.
    pub fn tick(&mut self, frame: &GestureFrame, host: &mut impl GestureHost) {
        if let Some(mouse) = frame.mouse {
            self.handle_mouse(mouse, frame.time, host);
        }
        self.handle_touch(&frame.touches, frame.time, host);
        self.handle_zoom(frame, host);
    }

    fn handle_mouse(&mut self, mouse: MouseInput, time: f32, host: &mut impl GestureHost) {
        let Some(position) = mouse.position else {
            // Cursor left the window: a release there can never be a tap.
            if mouse.just_released && self.owns_press(PointerId::Mouse) {
                self.cancel_press(host);
            }
            return;
        };
        let sample = PointerSample::mouse(position, time);

        if mouse.just_pressed {
            self.begin_press(sample, host);
        }
        if mouse.pressed {
            self.continue_press(sample, host);
        }
        if mouse.just_released {
            self.end_press(sample, host);
        }
    }

    fn handle_touch(&mut self, touches: &[TouchContact], time: f32, host: &mut impl GestureHost) {
        let contact = match self.press.map(|p| p.pointer) {
            Some(PointerId::Mouse) => return,
            Some(PointerId::Touch(id)) => touches.iter().find(|c| c.id == id),
            None => touches.first(),
        };
        let Some(contact) = contact else {
            return;
        };
        let sample = PointerSample::touch(contact.id, contact.position, time);

        match contact.phase {
            TouchPhase::Began => {
                self.begin_press(sample, host);
            }
            TouchPhase::Moved | TouchPhase::Stationary => self.continue_press(sample, host),
            TouchPhase::Ended | TouchPhase::Canceled => {
                self.end_press(sample, host);
            }
            TouchPhase::BeganAndEnded => {
                if self.begin_press(sample, host) {
                    self.end_press(sample, host);
                }
            }
        }
    }

    fn handle_zoom(&mut self, frame: &GestureFrame, host: &mut impl GestureHost) {
        let zoom = self.config.zoom;

        if frame.mouse.is_some() && frame.scroll != 0.0 {
            apply_zoom(host, frame.scroll * zoom.scroll_speed, &zoom);
        }

        if let Some(delta) = self.pinch.update(&frame.touches) {
            apply_zoom(host, delta * zoom.pinch_speed, &zoom);
        }
    }

    /// Start a press. Returns `false` if another press already owns the slot.
    pub fn begin_press(&mut self, sample: PointerSample, host: &mut impl GestureHost) -> bool {
        if let Some(live) = self.press {
            debug!(
                "Ignoring press from {:?}: slot held by {:?}",
                sample.pointer, live.pointer
            );
            return false;
        }

        let over_ui = host.is_over_ui(sample.pointer, sample.position);
        host.set_rotation_enabled(false);
        self.press = Some(PressState {
            origin: sample.position,
            origin_time: sample.time,
            pointer: sample.pointer,
            over_ui,
            rotation_enabled: false,
        });
        debug!(
            "Press began at {:?} by {:?} (over UI: {})",
            sample.position, sample.pointer, over_ui
        );
        true
    }

    /// Promote the live press to a rotation drag once it travels past the
    /// tap movement threshold. Never demotes.
    pub fn continue_press(&mut self, sample: PointerSample, host: &mut impl GestureHost) {
        let max_movement = self.config.tap.max_tap_movement;
        let Some(press) = self.press.as_mut() else {
            return;
        };
        if press.pointer != sample.pointer || press.rotation_enabled || press.over_ui {
            return;
        }
        if sample.position.distance(press.origin) > max_movement {
            press.rotation_enabled = true;
            host.set_rotation_enabled(true);
            debug!("Press by {:?} became a drag", sample.pointer);
        }
    }

    /// Release the live press, selecting under the pointer if it was a tap.
    ///
    /// Returns `None` when `sample` does not belong to the live press.
    pub fn end_press(
        &mut self,
        sample: PointerSample,
        host: &mut impl GestureHost,
    ) -> Option<PressOutcome> {
        if !self.owns_press(sample.pointer) {
            return None;
        }
        let press = self.press.take()?;
        let outcome = classify_release(&press, sample, &self.config.tap);
        debug!("Press by {:?} released: {:?}", sample.pointer, outcome);

        if outcome == PressOutcome::Tap {
            select_at(sample.position, host);
        }
        host.set_rotation_enabled(false);
        Some(outcome)
    }

    fn cancel_press(&mut self, host: &mut impl GestureHost) {
        self.press = None;
        host.set_rotation_enabled(false);
    }

    fn owns_press(&self, pointer: PointerId) -> bool {
        self.press.is_some_and(|p| p.pointer == pointer)
    }
}

/// Decide how a release ends `press`. Only [`PressOutcome::Tap`] selects.
pub fn classify_release(press: &PressState, release: PointerSample, tap: &TapConfig) -> PressOutcome {
    let duration = release.time - press.origin_time;
    let distance = release.position.distance(press.origin);

    if press.over_ui {
        PressOutcome::OverUi
    } else if press.rotation_enabled {
        PressOutcome::Drag
    } else if duration > tap.max_tap_time {
        PressOutcome::TooLong
    } else if distance > tap.max_tap_movement {
        PressOutcome::TooFar
    } else {
        PressOutcome::Tap
    }
}

/// Hit-test `screen_pos` and report the nearest hit if it is a department.
pub fn select_at<H>(screen_pos: Vec2, host: &mut H) -> Option<Entity>
where
    H: SceneRaycast + SelectionSink + ?Sized,
{
    let hit = host.nearest_hit(screen_pos)?;
    if !host.is_department(hit) {
        return None;
    }
    host.department_tapped(hit);
    Some(hit)
}
