//! Department visibility filters.
//!
//! UI panels send a [`FilterRequest`]; `apply_filter_requests` rewrites the
//! `Visibility` of every department. Hidden departments cannot be tapped.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::ExplorerSettings;
use crate::department::{Department, DepartmentSide, DepartmentState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepartmentFilter {
    ShowAll,
    #[default]
    HideAll,
    Side(DepartmentSide),
    State(DepartmentState),
    /// Each department shown independently with the configured probability.
    Random,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterRequest(pub DepartmentFilter);

/// The filter applied most recently.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveFilter(pub DepartmentFilter);

/// Seeded RNG driving [`DepartmentFilter::Random`].
#[derive(Resource)]
pub struct FilterRng(pub ChaCha8Rng);

impl FilterRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl FromWorld for FilterRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world
            .get_resource::<ExplorerSettings>()
            .map(|s| s.filters.random_seed)
            .unwrap_or_default();
        Self::from_seed(seed)
    }
}

/// Whether `department` is visible under `filter`.
pub fn is_shown(
    filter: DepartmentFilter,
    department: &Department,
    rng: &mut impl Rng,
    show_probability: f64,
) -> bool {
    match filter {
        DepartmentFilter::ShowAll => true,
        DepartmentFilter::HideAll => false,
        DepartmentFilter::Side(side) => department.side == side,
        DepartmentFilter::State(state) => department.state == state,
        DepartmentFilter::Random => rng.gen_bool(show_probability),
    }
}

pub fn apply_filter_requests(
    mut requests: EventReader<FilterRequest>,
    settings: Res<ExplorerSettings>,
    mut rng: ResMut<FilterRng>,
    mut active: ResMut<ActiveFilter>,
    mut departments: Query<(&Department, &mut Visibility)>,
) {
    let Some(FilterRequest(filter)) = requests.read().last().copied() else {
        return;
    };
    let probability = settings.filters.random_show_probability;
    let mut shown = 0usize;
    for (department, mut visibility) in &mut departments {
        let target = if is_shown(filter, department, &mut rng.0, probability) {
            shown += 1;
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(target);
    }
    active.0 = filter;
    debug!("Applied filter {:?}: {} departments shown", filter, shown);
}
