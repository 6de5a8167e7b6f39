use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod amenities_panel;
pub mod department_cards;
pub mod filters_panel;
pub mod loading_screen;
pub mod navbar;
pub mod theme;

use departments::scene::ExplorerScene;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<filters_panel::FiltersPanel>()
            .init_resource::<amenities_panel::AmenitiesPanel>()
            .init_resource::<department_cards::CardPlayground>()
            .init_resource::<loading_screen::LoadingScreenConfig>()
            .init_resource::<loading_screen::LoadingScreen>()
            .add_systems(Startup, theme::apply_explorer_theme)
            .add_systems(
                Update,
                (
                    loading_screen::advance_loading_screen,
                    department_cards::spawn_department_cards,
                    navbar::navbar_ui,
                    filters_panel::filters_panel_ui.run_if(in_state(ExplorerScene::Project)),
                    amenities_panel::amenities_panel_ui.run_if(in_state(ExplorerScene::Project)),
                    department_cards::department_cards_ui,
                    loading_screen::loading_screen_ui,
                )
                    .chain()
                    // Panels must be laid out before touches are tested against them.
                    .before(rendering::gesture_bridge::drive_gesture_classifier),
            );
    }
}
