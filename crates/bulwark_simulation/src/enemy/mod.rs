//! Enemy module: монстры (spawn-анимация, преследование игрока, melee атака)

use bevy::prelude::*;

use crate::SimSet;

pub mod components;
pub mod spawn;
pub mod systems;

pub use components::{AnimationTriggered, Enemy, EnemyAnimator, SpawnAnimation, ATTACK_TRIGGERS, HIT_TRIGGER};
pub use spawn::spawn_enemy;
pub use systems::{enemy_behaviour, enemy_hit_reactions, enemy_navigation, tick_spawn_animations};

/// Enemy Plugin
///
/// - SimSet::Timers: tick_spawn_animations
/// - SimSet::Enemy: enemy_behaviour → enemy_navigation
/// - SimSet::Present: enemy_hit_reactions
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationTriggered>();

        app.add_systems(
            FixedUpdate,
            tick_spawn_animations
                .in_set(SimSet::Timers)
                .after(crate::combat::systems::tick_reloads),
        );
        app.add_systems(
            FixedUpdate,
            (enemy_behaviour, enemy_navigation).chain().in_set(SimSet::Enemy),
        );
        app.add_systems(FixedUpdate, enemy_hit_reactions.in_set(SimSet::Present));
    }
}
