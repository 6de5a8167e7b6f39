use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which wing of the building a department belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepartmentSide {
    North,
    South,
}

impl DepartmentSide {
    pub const ALL: [DepartmentSide; 2] = [DepartmentSide::North, DepartmentSide::South];

    pub fn label(self) -> &'static str {
        match self {
            DepartmentSide::North => "North",
            DepartmentSide::South => "South",
        }
    }
}

/// Sales state of a department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepartmentState {
    Available,
    Checked,
    Sold,
}

impl DepartmentState {
    pub const ALL: [DepartmentState; 3] = [
        DepartmentState::Available,
        DepartmentState::Checked,
        DepartmentState::Sold,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DepartmentState::Available => "Available",
            DepartmentState::Checked => "Checked",
            DepartmentState::Sold => "Sold",
        }
    }
}

/// Marks an entity as a selectable department. Taps that hit an entity
/// without this component select nothing.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub name: String,
    pub side: DepartmentSide,
    pub state: DepartmentState,
    pub floor: u32,
    pub unit: u32,
}

/// Sent when a tap lands on a department.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentTapped(pub Entity);
