//! Enemy systems: spawn-анимация, преследование/атака, навигация

use bevy::ecs::system::SystemParam;
use bevy::math::Ray3d;
use bevy::prelude::*;
use rand::Rng;

use crate::combat::{DamageDealt, GunControl, KillableQuery, ShotWriters};
use crate::components::{Dead, Health, NavAgent, Spawned};
use crate::player::Player;
use crate::spatial::{Collider, PhysicsWorld};
use crate::DeterministicRng;

use super::components::{AnimationTriggered, Enemy, EnemyAnimator, SpawnAnimation, ATTACK_TRIGGERS, HIT_TRIGGER};

/// Система: тик spawn-анимаций → SpawnComplete
pub fn tick_spawn_animations(
    mut commands: Commands,
    mut enemies: Query<(Entity, &mut SpawnAnimation, Option<&Name>)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, mut animation, name) in enemies.iter_mut() {
        animation.remaining -= delta;
        if animation.remaining > 0.0 {
            continue;
        }

        commands.entity(entity).remove::<SpawnAnimation>().insert(Spawned);
        crate::log(&format!(
            "✨ {} spawn complete",
            name.map(|n| n.as_str()).unwrap_or("?")
        ));
    }
}

/// Цель в радиусе атаки?
///
/// Луч от монстра к цели (+ половина высоты монстра), длина = attack range,
/// маска = слой цели.
fn target_in_range(
    physics: &PhysicsWorld,
    origin: Vec3,
    aim_point: Vec3,
    range: f32,
    target_layer: u32,
) -> bool {
    let Ok(direction) = Dir3::new(aim_point - origin) else {
        return true;
    };
    physics
        .raycast(Ray3d::new(origin, direction), range, target_layer)
        .is_some()
}

/// Всё, что нужно монстру для удара: классификация цели, эффекты выстрела,
/// RNG для выбора анимации атаки
#[derive(SystemParam)]
pub struct EnemyAttack<'w, 's> {
    killables: KillableQuery<'w, 's>,
    writers: ShotWriters<'w>,
    animations: EventWriter<'w, AnimationTriggered>,
    rng: ResMut<'w, DeterministicRng>,
}

/// Система: поведение монстра
///
/// - нет цели → идём к игроку, он становится целью
/// - цель в радиусе → стоп, атака (Attack1..3 на каждый удар)
/// - цель далеко → идём к цели
pub fn enemy_behaviour(
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &Collider,
            &mut Enemy,
            &mut NavAgent,
            &mut GunControl,
            &mut EnemyAnimator,
        ),
        (With<Spawned>, Without<Dead>),
    >,
    targets: Query<(&Transform, &Collider, &Health)>,
    players: Query<Entity, (With<Player>, Without<Dead>)>,
    physics: PhysicsWorld,
    mut attack: EnemyAttack,
) {
    let player = players.iter().next();

    for (entity, transform, collider, mut enemy, mut agent, mut gun, mut animator) in enemies.iter_mut() {
        let position = transform.translation;

        let target = enemy.target.and_then(|target| {
            targets
                .get(target)
                .ok()
                .filter(|(_, _, health)| health.is_alive())
                .map(|(target_transform, target_collider, _)| {
                    (target, target_transform.translation, target_collider.layer)
                })
        });

        let Some((target, target_position, target_layer)) = target else {
            enemy.target = None;
            let player_position = player.and_then(|p| targets.get(p).ok().map(|(t, _, _)| (p, t.translation)));
            match player_position {
                Some((player, player_position)) => {
                    agent.resume();
                    agent.set_destination(player_position);
                    enemy.target = Some(player);
                }
                None => {
                    agent.stop();
                    animator.walking = false;
                }
            }
            continue;
        };

        let aim_point = target_position + Vec3::Y * collider.half_height();
        if target_in_range(&physics, position, aim_point, enemy.attack_range, target_layer) {
            agent.stop();
            animator.walking = false;

            let outcome = gun.shoot(
                entity,
                position,
                aim_point,
                &physics,
                &attack.killables,
                &mut attack.writers,
            );
            if outcome.is_fired() {
                let trigger = ATTACK_TRIGGERS[attack.rng.rng.gen_range(0..ATTACK_TRIGGERS.len())];
                attack.animations.write(AnimationTriggered { entity, trigger });
                crate::log(&format!("👹 {:?} attacks {:?} ({})", entity, target, trigger));
            }
        } else {
            agent.resume();
            agent.set_destination(target_position);
            animator.walking = true;
        }
    }
}

/// Система: движение NavAgent'ов (прямая по XZ)
pub fn enemy_navigation(
    mut agents: Query<(&mut Transform, &NavAgent), (With<Spawned>, Without<Dead>)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut transform, agent) in agents.iter_mut() {
        transform.translation = agent.step(transform.translation, delta);
    }
}

/// Система: попадание по монстру → GotHit
pub fn enemy_hit_reactions(
    mut damage_events: EventReader<DamageDealt>,
    enemies: Query<(), With<Enemy>>,
    mut animations: EventWriter<AnimationTriggered>,
) {
    for event in damage_events.read() {
        if enemies.contains(event.target) {
            animations.write(AnimationTriggered {
                entity: event.target,
                trigger: HIT_TRIGGER,
            });
        }
    }
}
