//! Спавн монстра

use bevy::prelude::*;

use crate::combat::GunControl;
use crate::components::{Health, NavAgent, PrefabPath};
use crate::config::EnemyConfig;
use crate::registry::GameRegistry;
use crate::spatial::{Collider, LAYER_ENEMY, MASK_ENEMY_SHOT};
use crate::ui::HpLabel;

use super::components::{Enemy, EnemyAnimator, SpawnAnimation};

/// Спавн монстра в `position`
///
/// Монстр появляется без `Spawned` (spawn-анимация), оружие из конфига
/// с дальностью = attack range.
pub fn spawn_enemy(
    commands: &mut Commands,
    config: &EnemyConfig,
    registry: &GameRegistry,
    position: Vec3,
    name: String,
    prefab: PrefabPath,
) -> Entity {
    let mut gun = GunControl::new(MASK_ENEMY_SHOT);
    match gun.equip(registry, &config.weapon) {
        Ok(()) => gun.set_range(config.attack_range),
        Err(err) => crate::log_error(&format!("{} spawned unarmed: {}", name, err)),
    }

    commands
        .spawn((
            Enemy::new(config.attack_range),
            HpLabel::new(&name, Vec3::from_array(config.hp_bar_offset)),
            Name::new(name),
            Transform::from_translation(position),
            Health::new(config.max_hp),
            NavAgent::new(config.speed, config.attack_range),
            Collider::cuboid(Vec3::from_array(config.half_extents), LAYER_ENEMY),
            gun,
            SpawnAnimation {
                remaining: config.spawn_duration,
            },
            EnemyAnimator::default(),
            prefab,
        ))
        .id()
}
