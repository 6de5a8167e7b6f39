use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use departments::filters::FilterRequest;
use departments::scene::{ExplorerScene, SceneRequest};
use rendering::camera::CameraTargetRequest;

use crate::amenities_panel::AmenitiesPanel;
use crate::filters_panel::FiltersPanel;
use crate::theme;

/// Top bar with the panel toggles. In the department scene it only offers
/// the way back.
pub fn navbar_ui(
    mut contexts: EguiContexts,
    scene: Res<State<ExplorerScene>>,
    mut filters: ResMut<FiltersPanel>,
    mut amenities: ResMut<AmenitiesPanel>,
    mut filter_requests: EventWriter<FilterRequest>,
    mut camera_requests: EventWriter<CameraTargetRequest>,
    mut scene_requests: EventWriter<SceneRequest>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("Department Explorer")
                    .size(theme::FONT_HEADING)
                    .color(theme::TEXT_HEADING),
            );
            ui.separator();

            match scene.get() {
                ExplorerScene::Project => {
                    if ui.selectable_label(filters.open, "Filters").clicked() {
                        filter_requests.send(FilterRequest(filters.toggle()));
                    }
                    if ui.selectable_label(amenities.open, "Amenities").clicked() {
                        if let Some(request) = amenities.toggle() {
                            camera_requests.send(request);
                        }
                    }
                }
                ExplorerScene::Department => {
                    if ui.button("Back to project").clicked() {
                        scene_requests.send(SceneRequest::BackToProject);
                    }
                }
            }
        });
    });
}
