//! Cards for tapped departments.
//!
//! Each [`DepartmentTapped`] adds a card to the playground. Cards stack as
//! small egui windows until closed; "Enter department" switches the explorer
//! into the single-department scene.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use departments::department::{Department, DepartmentSide, DepartmentState, DepartmentTapped};
use departments::scene::SceneRequest;
use rendering::department_meshes::state_color;

use crate::theme;

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentCard {
    pub id: u64,
    pub department: Entity,
    pub name: String,
    pub side: DepartmentSide,
    pub state: DepartmentState,
    pub floor: u32,
}

/// Open cards, oldest first. Starts empty.
#[derive(Resource, Debug, Default)]
pub struct CardPlayground {
    cards: Vec<DepartmentCard>,
    next_id: u64,
}

impl CardPlayground {
    pub fn cards(&self) -> &[DepartmentCard] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn spawn(&mut self, entity: Entity, department: &Department) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.cards.push(DepartmentCard {
            id,
            department: entity,
            name: department.name.clone(),
            side: department.side,
            state: department.state,
            floor: department.floor,
        });
        id
    }

    /// Returns whether a card was removed.
    pub fn close(&mut self, id: u64) -> bool {
        let before = self.cards.len();
        self.cards.retain(|card| card.id != id);
        self.cards.len() != before
    }
}

pub fn spawn_department_cards(
    mut tapped: EventReader<DepartmentTapped>,
    departments: Query<&Department>,
    mut playground: ResMut<CardPlayground>,
) {
    for DepartmentTapped(entity) in tapped.read() {
        match departments.get(*entity) {
            Ok(department) => {
                playground.spawn(*entity, department);
            }
            Err(_) => warn!("Tapped entity {:?} has no department data", entity),
        }
    }
}

pub fn department_cards_ui(
    mut contexts: EguiContexts,
    mut playground: ResMut<CardPlayground>,
    mut scene: EventWriter<SceneRequest>,
) {
    if playground.is_empty() {
        return;
    }
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    let mut closed = Vec::new();
    for (slot, card) in playground.cards().iter().enumerate() {
        let mut open = true;
        let offset = egui::vec2(-12.0 - slot as f32 * 16.0, -12.0 - slot as f32 * 16.0);
        egui::Window::new(card.name.as_str())
            .id(egui::Id::new(("department_card", card.id)))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::RIGHT_BOTTOM, offset)
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(card.state.label())
                        .size(theme::FONT_BODY)
                        .color(theme::to_egui_color(state_color(card.state))),
                );
                ui.label(format!("{} side, floor {}", card.side.label(), card.floor + 1));
                ui.add_space(6.0);
                if ui.button("Enter department").clicked() {
                    scene.send(SceneRequest::EnterDepartment(card.department));
                    closed.push(card.id);
                }
            });
        if !open {
            closed.push(card.id);
        }
    }
    for id in closed {
        playground.close(id);
    }
}
