//! Tower module: здания-башни (aggro-сфера, выбор ближайшего монстра, стрельба)

use bevy::prelude::*;

use crate::SimSet;

pub mod components;
pub mod systems;

pub use components::{calculate_closest_enemy, Tower, TowerAggro};
pub use systems::{spawn_tower, tower_acquire_target, tower_bundle, tower_fire};

/// Tower Plugin: SimSet::Tower — tower_acquire_target → tower_fire
pub struct TowerPlugin;

impl Plugin for TowerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (tower_acquire_target, tower_fire).chain().in_set(SimSet::Tower),
        );
    }
}
