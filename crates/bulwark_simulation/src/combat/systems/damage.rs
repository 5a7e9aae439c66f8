//! Damage application, death handling, cleanup.

use bevy::prelude::*;

use crate::combat::damage::{DamageDealt, EntityDied, ShotHit, ShotTrace, ShotTraced, SHOT_TRACE_LIFETIME};
use crate::components::{Dead, DespawnAfter, Health, Spawned};
use crate::enemy::Enemy;
use crate::player::Player;
use crate::registry::GameOver;
use crate::tower::Tower;

/// Система: ShotHit → Health
///
/// OnReceiveDamage: не заспавненные цели урон игнорируют, HP не уходит
/// ниже 0, EntityDied пишется один раз (на ударе, который убил).
pub fn apply_shot_hits(
    mut hits: EventReader<ShotHit>,
    mut targets: Query<(&mut Health, Has<Spawned>, Option<&Name>, Has<Player>, Has<Tower>)>,
    mut damage_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<EntityDied>,
) {
    for hit in hits.read() {
        if hit.shooter == hit.target {
            continue;
        }
        let Ok((mut health, spawned, name, is_player, is_tower)) = targets.get_mut(hit.target) else {
            continue;
        };
        if !spawned || !health.is_alive() {
            continue;
        }

        let died = health.take_damage(hit.damage);
        let name = name.map(|n| n.as_str()).unwrap_or("?");

        if is_player {
            crate::log(&format!("Player {} got hit for {} damage!", name, hit.damage));
        } else if is_tower {
            crate::log(&format!("Tower {} hit for {} damage.", name, hit.damage));
        }

        damage_events.write(DamageDealt {
            attacker: hit.shooter,
            target: hit.target,
            damage: hit.damage,
            remaining_hp: health.current,
        });

        if died {
            died_events.write(EntityDied {
                entity: hit.target,
                killer: Some(hit.shooter),
            });
        }
    }
}

/// Система: Dead() для умерших
///
/// Игрок остаётся в мире с маркером Dead (стрелять больше не может) + GameOver.
/// Монстры и башни деспавнятся вместе с HP лейблом, "<name> died!" только у монстров.
pub fn handle_deaths(
    mut commands: Commands,
    mut died_events: EventReader<EntityDied>,
    kinds: Query<(Option<&Name>, Has<Player>, Has<Enemy>)>,
    mut game_over: EventWriter<GameOver>,
) {
    for event in died_events.read() {
        let Ok((name, is_player, is_enemy)) = kinds.get(event.entity) else {
            continue;
        };
        let Ok(mut entity_commands) = commands.get_entity(event.entity) else {
            continue;
        };

        if is_player {
            entity_commands.insert(Dead);
            game_over.write(GameOver { player: event.entity });
        } else {
            if is_enemy {
                let name = name.map(|n| n.as_str()).unwrap_or("?");
                crate::log(&format!("{} died!", name));
            }
            entity_commands.despawn();
        }
    }
}

/// Система: ShotTraced → ShotTrace entity (живёт SHOT_TRACE_LIFETIME)
pub fn spawn_shot_traces(mut commands: Commands, mut traces: EventReader<ShotTraced>, time: Res<Time>) {
    for trace in traces.read() {
        commands.spawn((
            ShotTrace {
                from: trace.from,
                to: trace.to,
            },
            DespawnAfter {
                despawn_time: time.elapsed_secs() + SHOT_TRACE_LIFETIME,
            },
            Name::new("ShotTrace"),
        ));
    }
}

/// Система: деспавн entity по таймеру DespawnAfter
pub fn despawn_after_timeout(mut commands: Commands, query: Query<(Entity, &DespawnAfter)>, time: Res<Time>) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            commands.entity(entity).despawn();
        }
    }
}
