use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::camera::{CameraTargetRequest, CameraTargets};

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AmenitiesPanel {
    pub open: bool,
}

impl AmenitiesPanel {
    /// Flip the panel. Closing it sends the camera back to the overview.
    pub fn toggle(&mut self) -> Option<CameraTargetRequest> {
        self.open = !self.open;
        (!self.open).then_some(CameraTargetRequest(0))
    }
}

pub fn amenities_panel_ui(
    mut contexts: EguiContexts,
    panel: Res<AmenitiesPanel>,
    targets: Res<CameraTargets>,
    mut requests: EventWriter<CameraTargetRequest>,
) {
    if !panel.open {
        return;
    }
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    egui::Window::new("Amenities")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 48.0))
        .default_width(160.0)
        .show(ctx, |ui| {
            for (index, target) in targets.amenities() {
                if ui.button(target.name.as_str()).clicked() {
                    requests.send(CameraTargetRequest(index));
                }
            }
        });
}
