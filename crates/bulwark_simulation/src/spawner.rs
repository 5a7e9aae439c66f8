//! MonsterSpawner — периодический спавн монстров
//!
//! Каждые `interval` секунд спавн ставится в очередь. Пока очередь не пуста,
//! каждый тик проверяем бокс над спавнером: занят → ждём следующего тика,
//! свободен → монстр `<template>_<tick>` под корнем "Monsters".

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::{MonstersRoot, PrefabPath};
use crate::config::{GameConfig, SpawnerConfig};
use crate::enemy::spawn_enemy;
use crate::registry::GameRegistry;
use crate::spatial::{PhysicsWorld, MASK_SPAWN_CHECK};
use crate::{SimSet, SimulationTick};

#[derive(Component, Debug, Clone)]
pub struct MonsterSpawner {
    pub interval: f32,
    /// Время последней постановки в очередь (секунды симуляции)
    pub last_spawn_time: f32,
    pub queued: bool,
    /// Смещение центра бокса проверки от спавнера
    pub check_offset: Vec3,
    pub check_half_extents: Vec3,
    pub collision_mask: u32,
    pub template: String,
}

impl MonsterSpawner {
    pub fn from_config(config: &SpawnerConfig) -> Self {
        Self {
            interval: config.interval,
            last_spawn_time: 0.0,
            queued: false,
            check_offset: Vec3::ZERO,
            check_half_extents: Vec3::from_array(config.check_half_extents),
            collision_mask: MASK_SPAWN_CHECK,
            template: config.template.clone(),
        }
    }

    /// Поставить спавн в очередь, если прошёл интервал
    pub fn tick(&mut self, elapsed: f32) {
        if elapsed - self.last_spawn_time >= self.interval {
            self.queued = true;
            self.last_spawn_time = elapsed;
        }
    }

    pub fn monster_name(&self, tick: u64) -> String {
        format!("{}_{}", self.template, tick)
    }
}

pub fn spawn_spawner(commands: &mut Commands, config: &SpawnerConfig) -> Entity {
    commands
        .spawn((
            MonsterSpawner::from_config(config),
            Name::new(format!("{}Spawner", config.template)),
            Transform::from_translation(Vec3::from_array(config.position)),
        ))
        .id()
}

/// Шаблон монстра и часы симуляции для спавна
#[derive(SystemParam)]
pub struct SpawnContext<'w> {
    config: Res<'w, GameConfig>,
    registry: Res<'w, GameRegistry>,
    tick: Res<'w, SimulationTick>,
    time: Res<'w, Time>,
}

/// Система: очередь спавна + SpawnMonster
pub fn spawner_tick(
    mut commands: Commands,
    mut spawners: Query<(&Transform, &mut MonsterSpawner)>,
    roots: Query<Entity, With<MonstersRoot>>,
    physics: PhysicsWorld,
    context: SpawnContext,
) {
    let elapsed = context.time.elapsed_secs();
    let root = roots.iter().next();

    for (transform, mut spawner) in spawners.iter_mut() {
        spawner.tick(elapsed);
        if !spawner.queued {
            continue;
        }

        let position = transform.translation;
        let occupied = physics.overlap_box(
            position + spawner.check_offset,
            spawner.check_half_extents,
            spawner.collision_mask,
            None,
        );
        if !occupied.is_empty() {
            continue;
        }

        let name = spawner.monster_name(context.tick.0);
        let prefab = PrefabPath::new(format!("prefabs/{}", spawner.template));
        let monster = spawn_enemy(
            &mut commands,
            &context.config.enemy,
            &context.registry,
            position,
            name.clone(),
            prefab,
        );
        if let Some(root) = root {
            commands.entity(root).add_child(monster);
        }
        spawner.queued = false;

        crate::log(&format!("👾 Spawned {} at {:?}", name, position));
    }
}

/// Spawner Plugin: SimSet::Spawner — spawner_tick
pub struct SpawnerPlugin;

impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, spawner_tick.in_set(SimSet::Spawner));
    }
}
