//! Department visibility filters.
//!
//! Opening the panel shows every department, closing it hides them all again.
//! While open, buttons narrow the building down by state, side or at random.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use departments::department::{DepartmentSide, DepartmentState};
use departments::filters::{ActiveFilter, DepartmentFilter, FilterRequest};
use rendering::department_meshes::state_color;

use crate::theme;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FiltersPanel {
    pub open: bool,
}

impl FiltersPanel {
    /// Flip the panel and return the filter that goes with the new state.
    pub fn toggle(&mut self) -> DepartmentFilter {
        self.open = !self.open;
        if self.open {
            DepartmentFilter::ShowAll
        } else {
            DepartmentFilter::HideAll
        }
    }
}

pub fn filters_panel_ui(
    mut contexts: EguiContexts,
    panel: Res<FiltersPanel>,
    active: Res<ActiveFilter>,
    mut requests: EventWriter<FilterRequest>,
) {
    if !panel.open {
        return;
    }
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    egui::Window::new("Filters")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 48.0))
        .default_width(180.0)
        .show(ctx, |ui| {
            let mut pick = |ui: &mut egui::Ui, filter: DepartmentFilter, text: egui::RichText| {
                if ui
                    .selectable_label(active.0 == filter, text)
                    .clicked()
                {
                    requests.send(FilterRequest(filter));
                }
            };

            pick(ui, DepartmentFilter::ShowAll, egui::RichText::new("All"));

            ui.separator();
            ui.label(egui::RichText::new("State").color(theme::TEXT_MUTED));
            for state in DepartmentState::ALL {
                let text = egui::RichText::new(state.label())
                    .color(theme::to_egui_color(state_color(state)));
                pick(ui, DepartmentFilter::State(state), text);
            }

            ui.separator();
            ui.label(egui::RichText::new("Side").color(theme::TEXT_MUTED));
            for side in DepartmentSide::ALL {
                pick(ui, DepartmentFilter::Side(side), egui::RichText::new(side.label()));
            }

            ui.separator();
            pick(ui, DepartmentFilter::Random, egui::RichText::new("Random"));
        });
}
