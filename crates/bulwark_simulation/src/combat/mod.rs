//! Combat system module
//!
//! ECS ответственность:
//! - GunControl: экипировка, hitscan стрельба, перезарядка
//! - Damage: ShotHit → Health, смерть, GameOver
//! - Трассеры выстрелов (ShotTrace, живут 1.5 секунды)
//!
//! Стреляют сами контроллеры (player/enemy/tower) в своих фазах,
//! здесь только таймеры и применение результатов.

use bevy::prelude::*;

use crate::SimSet;

pub mod aim;
pub mod damage;
pub mod gun;
pub mod systems;
pub mod weapon;

// Re-export основных типов
pub use aim::{compute_linear_equation, compute_shot_point_for_player};
pub use damage::{DamageDealt, EntityDied, ShotHit, ShotTrace, ShotTraced, SHOT_TRACE_LIFETIME};
pub use gun::{
    classify_hit, GunControl, HitTarget, KillableQuery, ReloadFinished, ReloadStarted, ShotOutcome, ShotWriters,
    PLAYER_SHOT_RANGE,
};
pub use weapon::{Weapon, DEFAULT_MELEE_RANGE};

/// Combat Plugin
///
/// Порядок выполнения:
/// 1. tick_reloads (SimSet::Timers) — EndReload по таймерам
/// 2. apply_shot_hits → handle_deaths (SimSet::Resolve)
/// 3. spawn_shot_traces → despawn_after_timeout (SimSet::Cleanup)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<ShotHit>()
            .add_event::<ShotTraced>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<ReloadStarted>()
            .add_event::<ReloadFinished>();

        app.add_systems(FixedUpdate, systems::tick_reloads.in_set(SimSet::Timers));
        app.add_systems(
            FixedUpdate,
            (systems::apply_shot_hits, systems::handle_deaths)
                .chain()
                .in_set(SimSet::Resolve),
        );
        app.add_systems(
            FixedUpdate,
            (systems::spawn_shot_traces, systems::despawn_after_timeout)
                .chain()
                .in_set(SimSet::Cleanup),
        );
    }
}
