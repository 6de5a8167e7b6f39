use bevy::prelude::*;

pub mod config;
pub mod department;
pub mod filters;
pub mod layout;
pub mod scene;

use config::ExplorerSettings;
use department::DepartmentTapped;
use filters::{ActiveFilter, FilterRequest, FilterRng};
use layout::BuildingLayout;
use scene::{ExplorerScene, FocusedDepartment, SceneRequest};

/// Domain state of the explorer: departments, filters and the active scene.
///
/// Settings are read once when the plugin is built; insert an
/// [`ExplorerSettings`] resource beforehand to skip loading from the
/// environment (tests do this).
pub struct DepartmentsPlugin;

impl Plugin for DepartmentsPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ExplorerSettings>() {
            app.insert_resource(ExplorerSettings::load_from_env());
        }
        let gesture = app.world().resource::<ExplorerSettings>().gesture;

        app.insert_resource(gesture)
            .init_resource::<BuildingLayout>()
            .init_resource::<FilterRng>()
            .init_resource::<ActiveFilter>()
            .init_resource::<FocusedDepartment>()
            .init_state::<ExplorerScene>()
            .add_event::<FilterRequest>()
            .add_event::<SceneRequest>()
            .add_event::<DepartmentTapped>()
            .add_systems(Startup, layout::spawn_departments)
            .add_systems(
                Update,
                (
                    filters::apply_filter_requests,
                    scene::handle_scene_requests,
                ),
            );
    }
}
