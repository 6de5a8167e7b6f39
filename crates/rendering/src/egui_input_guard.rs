//! Egui input guard: keeps presses on UI panels from reaching the 3D scene.
//!
//! A press that begins over an egui panel, the loading overlay or a
//! department card is inert for the gesture classifier: it neither rotates
//! the camera nor selects a department.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::gesture::PointerId;

/// Returns `true` when egui wants the mouse, i.e. the cursor is over an egui
/// panel or egui is actively handling a drag/click.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return false;
    };
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

/// Whether `pointer` at `position` (logical pixels) is over egui.
///
/// The mouse uses egui's own pointer state. Touches are checked by position,
/// since egui only tracks a single pointer: a touch is over UI when it lands
/// on a window or area, or outside the space left over by panels.
pub fn pointer_over_egui(contexts: &mut EguiContexts, pointer: PointerId, position: Vec2) -> bool {
    match pointer {
        PointerId::Mouse => egui_wants_pointer(contexts),
        PointerId::Touch(_) => {
            let Some(ctx) = contexts.try_ctx_mut() else {
                return false;
            };
            let pos = egui::pos2(position.x, position.y);
            let over_area = ctx
                .layer_id_at(pos)
                .is_some_and(|layer| layer.order != egui::Order::Background);
            over_area || !ctx.available_rect().contains(pos)
        }
    }
}
