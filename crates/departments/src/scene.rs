//! Project overview vs. single-department view.

use bevy::prelude::*;

use crate::department::Department;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExplorerScene {
    /// Whole building seen from the orbit rig.
    #[default]
    Project,
    /// Camera focused on a single department.
    Department,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    EnterDepartment(Entity),
    BackToProject,
}

/// Department shown while in [`ExplorerScene::Department`].
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FocusedDepartment(pub Option<Entity>);

pub fn handle_scene_requests(
    mut requests: EventReader<SceneRequest>,
    departments: Query<&Department>,
    mut focused: ResMut<FocusedDepartment>,
    mut next: ResMut<NextState<ExplorerScene>>,
) {
    for request in requests.read() {
        match *request {
            SceneRequest::EnterDepartment(entity) => {
                let Ok(department) = departments.get(entity) else {
                    warn!("Cannot enter {:?}: not a department", entity);
                    continue;
                };
                info!("Entering department {}", department.name);
                focused.0 = Some(entity);
                next.set(ExplorerScene::Department);
            }
            SceneRequest::BackToProject => {
                focused.0 = None;
                next.set(ExplorerScene::Project);
            }
        }
    }
}
