//! Scroll and pinch zoom acting on the camera field-of-view.

use departments::config::ZoomConfig;

use super::host::LensSink;
use super::types::TouchContact;

/// Inter-finger distance carried between ticks of a two-finger pinch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PinchState {
    previous_distance: Option<f32>,
}

impl PinchState {
    pub fn previous_distance(&self) -> Option<f32> {
        self.previous_distance
    }

    /// Raw distance change since the last tick, in pixels.
    ///
    /// Returns `None` unless exactly two contacts are down. The tick either
    /// contact begins (or the first tick after the pinch was interrupted)
    /// only records the baseline and returns `Some(0.0)`.
    pub fn update(&mut self, contacts: &[TouchContact]) -> Option<f32> {
        let [a, b] = contacts else {
            self.previous_distance = None;
            return None;
        };
        let current = a.position.distance(b.position);
        let began = a.phase.is_begin() || b.phase.is_begin();

        let delta = match self.previous_distance {
            Some(previous) if !began => current - previous,
            _ => 0.0,
        };
        self.previous_distance = Some(current);
        Some(delta)
    }
}

/// New field-of-view after zooming by `delta` degrees (positive zooms in).
#[inline]
pub fn zoomed_fov(current: f32, delta: f32, zoom: &ZoomConfig) -> f32 {
    zoom.clamp_fov(current - delta)
}

/// Apply a zoom delta to the lens. A zero delta, or no bound camera, leaves
/// the lens untouched.
pub fn apply_zoom(lens: &mut impl LensSink, delta: f32, zoom: &ZoomConfig) {
    if delta == 0.0 {
        return;
    }
    let Some(current) = lens.field_of_view() else {
        return;
    };
    lens.set_field_of_view(zoomed_fov(current, delta, zoom));
}
