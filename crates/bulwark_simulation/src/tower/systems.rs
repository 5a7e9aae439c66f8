//! Tower systems: выбор цели + стрельба

use bevy::prelude::*;

use crate::combat::{GunControl, KillableQuery, ShotWriters};
use crate::components::{Dead, Health, Spawned};
use crate::registry::{Building, GameRegistry};
use crate::spatial::{Collider, PhysicsWorld, LAYER_BUILDING, MASK_TOWER_AGGRO, MASK_TOWER_SHOT};
use crate::ui::HpLabel;

use super::components::{calculate_closest_enemy, Tower, TowerAggro};

/// Спавн здания-башни
pub fn spawn_tower(
    commands: &mut Commands,
    building: &Building,
    registry: &GameRegistry,
    position: Vec3,
    name: String,
) -> Entity {
    commands.spawn(tower_bundle(building, registry, position, name)).id()
}

/// Компоненты башни (для спавна в уже зарезервированный entity)
pub fn tower_bundle(building: &Building, registry: &GameRegistry, position: Vec3, name: String) -> impl Bundle {
    let mut gun = GunControl::new(MASK_TOWER_SHOT);
    if let Err(err) = gun.equip(registry, &building.weapon) {
        crate::log_error(&format!("Tower {} built unarmed: {}", name, err));
    }

    (
        Tower::default(),
        TowerAggro {
            radius: building.aggro_radius,
            center_offset: Vec3::ZERO,
            mask: MASK_TOWER_AGGRO,
        },
        HpLabel::new(&name, building.hp_bar_offset),
        Name::new(name),
        Transform::from_translation(position),
        Health::new(building.max_hp),
        Spawned,
        Collider::cuboid(building.half_extents, LAYER_BUILDING),
        gun,
        building.prefab.clone(),
    )
}

/// Система: валидация цели + FindTargetsInsideSphere → CalculateClosestEnemy
///
/// Цель сбрасывается, если умерла, исчезла или вышла из aggro-сферы.
pub fn tower_acquire_target(
    mut towers: Query<(Entity, &Transform, &TowerAggro, &mut Tower), Without<Dead>>,
    candidates: Query<(&Transform, &Health), With<Spawned>>,
    physics: PhysicsWorld,
) {
    for (entity, transform, aggro, mut tower) in towers.iter_mut() {
        let tower_position = transform.translation;
        let inside = physics.overlap_sphere(aggro.center(tower_position), aggro.radius, aggro.mask);

        let is_valid = |target: Entity| {
            inside.contains(&target)
                && candidates
                    .get(target)
                    .map(|(_, health)| health.is_alive())
                    .unwrap_or(false)
        };

        if let Some(target) = tower.target {
            if is_valid(target) {
                continue;
            }
            tower.target = None;
        }

        let closest = calculate_closest_enemy(
            tower_position,
            inside.iter().filter(|e| is_valid(**e)).filter_map(|e| {
                candidates
                    .get(*e)
                    .ok()
                    .map(|(candidate_transform, _)| (*e, candidate_transform.translation))
            }),
        );

        if let Some(target) = closest {
            crate::log(&format!("🗼 Tower {:?} targets {:?}", entity, target));
            tower.target = Some(target);
        }
    }
}

/// Система: башня с целью стреляет (Shoot от позиции башни к цели)
pub fn tower_fire(
    mut towers: Query<(Entity, &Transform, &Tower, &mut GunControl), Without<Dead>>,
    targets: Query<&Transform, With<Collider>>,
    physics: PhysicsWorld,
    killables: KillableQuery,
    mut writers: ShotWriters,
) {
    for (entity, transform, tower, mut gun) in towers.iter_mut() {
        let Some(target) = tower.target else {
            continue;
        };
        let Ok(target_transform) = targets.get(target) else {
            continue;
        };

        gun.shoot(
            entity,
            transform.translation,
            target_transform.translation,
            &physics,
            &killables,
            &mut writers,
        );
    }
}
