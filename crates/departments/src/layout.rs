//! Procedural building layout: floors of department units on a north and a
//! south wing, facing each other across a central corridor.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::ExplorerSettings;
use crate::department::{Department, DepartmentSide, DepartmentState};

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BuildingLayout {
    pub floors: u32,
    pub units_per_side: u32,
    /// Size of one department box (x = width, y = height, z = depth).
    pub unit_size: Vec3,
    /// Gap between neighbouring boxes.
    pub gap: f32,
    /// Width of the corridor separating the two wings.
    pub corridor: f32,
}

impl Default for BuildingLayout {
    fn default() -> Self {
        Self {
            floors: 8,
            units_per_side: 4,
            unit_size: Vec3::new(4.0, 3.0, 5.0),
            gap: 0.2,
            corridor: 2.0,
        }
    }
}

/// One department to spawn, with its local position (box centre).
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentPlacement {
    pub department: Department,
    pub position: Vec3,
}

impl BuildingLayout {
    /// Footprint extents `(width, height, depth)` of the whole building.
    pub fn extents(&self) -> Vec3 {
        let width = self.units_per_side as f32 * (self.unit_size.x + self.gap);
        let height = self.floors as f32 * (self.unit_size.y + self.gap);
        let depth = 2.0 * (self.unit_size.z + self.gap) + self.corridor;
        Vec3::new(width, height, depth)
    }

    /// Ground-level centre of the building.
    pub fn center(&self) -> Vec3 {
        Vec3::ZERO
    }

    pub fn position_of(&self, side: DepartmentSide, floor: u32, unit: u32) -> Vec3 {
        let extents = self.extents();
        let x = -extents.x / 2.0 + (unit as f32 + 0.5) * (self.unit_size.x + self.gap);
        let y = (floor as f32 + 0.5) * (self.unit_size.y + self.gap);
        let z_offset = self.corridor / 2.0 + self.gap + self.unit_size.z / 2.0;
        let z = match side {
            DepartmentSide::North => -z_offset,
            DepartmentSide::South => z_offset,
        };
        Vec3::new(x, y, z)
    }

    /// Generate every department of the building. States are drawn from `seed`
    /// so the same seed always produces the same building.
    pub fn placements(&self, seed: u64) -> Vec<DepartmentPlacement> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut placements =
            Vec::with_capacity((self.floors * self.units_per_side * 2) as usize);

        for side in DepartmentSide::ALL {
            for floor in 0..self.floors {
                for unit in 0..self.units_per_side {
                    let state = random_state(&mut rng);
                    let prefix = match side {
                        DepartmentSide::North => 'N',
                        DepartmentSide::South => 'S',
                    };
                    placements.push(DepartmentPlacement {
                        department: Department {
                            name: format!("{prefix}-{}{:02}", floor + 1, unit + 1),
                            side,
                            state,
                            floor,
                            unit,
                        },
                        position: self.position_of(side, floor, unit),
                    });
                }
            }
        }
        placements
    }
}

/// Half available, a fifth checked, the rest sold.
fn random_state(rng: &mut impl Rng) -> DepartmentState {
    let roll: f32 = rng.gen();
    if roll < 0.5 {
        DepartmentState::Available
    } else if roll < 0.7 {
        DepartmentState::Checked
    } else {
        DepartmentState::Sold
    }
}

/// Startup system: spawn all departments hidden. Filters reveal them.
pub fn spawn_departments(
    mut commands: Commands,
    layout: Res<BuildingLayout>,
    settings: Res<ExplorerSettings>,
) {
    let placements = layout.placements(settings.filters.layout_seed);
    let count = placements.len();
    for placement in placements {
        let name = Name::new(placement.department.name.clone());
        commands.spawn((
            placement.department,
            name,
            Transform::from_translation(placement.position),
            Visibility::Hidden,
        ));
    }
    info!("Spawned {} departments", count);
}
