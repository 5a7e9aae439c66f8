//! Player control marker component + spawn
//!
//! Отмечает entity которым управляет игрок через `PlayerInput`.

use bevy::prelude::*;

use crate::combat::GunControl;
use crate::components::{Health, MovementSpeed, PrefabPath, Spawned};
use crate::config::PlayerConfig;
use crate::registry::GameRegistry;
use crate::spatial::{Collider, LAYER_PLAYER, MASK_PLAYER_SHOT};

/// Marker component для player-controlled entity
///
/// В single-player режиме только один entity имеет этот компонент.
/// Монстры ищут цель через `With<Player>`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Спавн игрока: HP = max, сразу заспавнен, экипирован оружием из конфига
pub fn spawn_player(commands: &mut Commands, config: &PlayerConfig, registry: &GameRegistry) -> Entity {
    let mut gun = GunControl::new(MASK_PLAYER_SHOT);
    if let Err(err) = gun.equip(registry, &config.weapon) {
        crate::log_error(&format!("Player spawned unarmed: {}", err));
    }

    let entity = commands
        .spawn((
            Player,
            Name::new("Player"),
            Transform::from_translation(Vec3::from_array(config.spawn_position)),
            Health::new(config.max_hp),
            Spawned,
            MovementSpeed { speed: config.speed },
            Collider::cuboid(Vec3::from_array(config.half_extents), LAYER_PLAYER),
            gun,
            PrefabPath::new("prefabs/Player"),
        ))
        .id();

    crate::log(&format!("🎮 Player spawned: {:?}", entity));
    entity
}
