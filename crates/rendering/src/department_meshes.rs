//! Department boxes, colour-coded by sales state, plus the static building
//! shell (ground, corridor floor slabs, amenity markers).

use bevy::prelude::*;

use departments::department::{Department, DepartmentState};
use departments::layout::BuildingLayout;

use crate::camera::CameraTargets;

pub const AVAILABLE_COLOR: Color = Color::srgb(0.35, 0.75, 0.45);
pub const CHECKED_COLOR: Color = Color::srgb(0.95, 0.75, 0.25);
pub const SOLD_COLOR: Color = Color::srgb(0.85, 0.3, 0.3);

/// Shared mesh and one material per department state.
#[derive(Resource)]
pub struct DepartmentMaterials {
    pub mesh: Handle<Mesh>,
    pub available: Handle<StandardMaterial>,
    pub checked: Handle<StandardMaterial>,
    pub sold: Handle<StandardMaterial>,
}

impl DepartmentMaterials {
    pub fn for_state(&self, state: DepartmentState) -> Handle<StandardMaterial> {
        match state {
            DepartmentState::Available => self.available.clone(),
            DepartmentState::Checked => self.checked.clone(),
            DepartmentState::Sold => self.sold.clone(),
        }
    }
}

pub fn state_color(state: DepartmentState) -> Color {
    match state {
        DepartmentState::Available => AVAILABLE_COLOR,
        DepartmentState::Checked => CHECKED_COLOR,
        DepartmentState::Sold => SOLD_COLOR,
    }
}

fn translucent(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(0.85),
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.6,
        ..default()
    }
}

pub fn setup_department_assets(
    mut commands: Commands,
    layout: Res<BuildingLayout>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let size = layout.unit_size;
    commands.insert_resource(DepartmentMaterials {
        mesh: meshes.add(Cuboid::new(size.x, size.y, size.z)),
        available: materials.add(translucent(AVAILABLE_COLOR)),
        checked: materials.add(translucent(CHECKED_COLOR)),
        sold: materials.add(translucent(SOLD_COLOR)),
    });
}

/// Give every newly spawned department its box mesh.
pub fn attach_department_meshes(
    mut commands: Commands,
    assets: Option<Res<DepartmentMaterials>>,
    departments: Query<(Entity, &Department), Without<Mesh3d>>,
) {
    let Some(assets) = assets else {
        return;
    };
    for (entity, department) in &departments {
        commands.entity(entity).insert((
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.for_state(department.state)),
        ));
    }
}

/// Ground plane, floor slabs and a marker per amenity target.
pub fn spawn_building_shell(
    mut commands: Commands,
    layout: Res<BuildingLayout>,
    targets: Res<CameraTargets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let extents = layout.extents();

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(400.0, 400.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.32, 0.42, 0.3))),
        Transform::IDENTITY,
        Name::new("Ground"),
    ));

    let slab_mesh = meshes.add(Cuboid::new(extents.x, 0.15, extents.z));
    let slab_material = materials.add(Color::srgb(0.8, 0.8, 0.82));
    let storey = layout.unit_size.y + layout.gap;
    for floor in 0..=layout.floors {
        commands.spawn((
            Mesh3d(slab_mesh.clone()),
            MeshMaterial3d(slab_material.clone()),
            Transform::from_xyz(0.0, floor as f32 * storey, 0.0),
            Name::new(format!("Slab {floor}")),
        ));
    }

    let marker_mesh = meshes.add(Cylinder::new(1.5, 0.3));
    let marker_material = materials.add(Color::srgb(0.3, 0.55, 0.9));
    for (_, target) in targets.amenities() {
        commands.spawn((
            Mesh3d(marker_mesh.clone()),
            MeshMaterial3d(marker_material.clone()),
            Transform::from_translation(target.focus),
            Name::new(target.name.clone()),
        ));
    }
}
