//! Тесты детерминизма
//!
//! Симуляция с одинаковым seed даёт идентичные результаты

use bevy::prelude::*;
use bulwark_simulation::enemy::AnimationTriggered;
use bulwark_simulation::*;

/// Тестовый компонент для симуляции движения
#[derive(Component, Debug)]
struct TestEntity {
    x: f32,
    y: f32,
}

fn move_entities(mut query: Query<&mut TestEntity>) {
    for mut entity in query.iter_mut() {
        entity.x += 0.1;
        entity.y += 0.05;
    }
}

/// Собираем все триггеры анимаций (выбор атаки идёт через RNG)
#[derive(Resource, Default)]
struct TriggerLog(Vec<(u32, &'static str)>);

fn record_triggers(mut events: EventReader<AnimationTriggered>, mut log: ResMut<TriggerLog>) {
    for event in events.read() {
        log.0.push((event.entity.index(), event.trigger));
    }
}

#[derive(Debug, PartialEq)]
struct RunResult {
    transforms: Vec<u8>,
    health: Vec<u8>,
    triggers: Vec<(u32, &'static str)>,
}

/// Полная партия: частый спавн, башня у игрока, игрок ничего не делает
fn run_game(seed: u64, tick_count: u32) -> RunResult {
    let mut config = GameConfig {
        seed,
        ..GameConfig::default()
    };
    for spawner in config.spawners.iter_mut() {
        spawner.interval = 0.5;
    }
    config.enemy.spawn_duration = 0.2;

    let mut app = create_headless_app_with_config(config);
    app.init_resource::<TriggerLog>()
        .add_systems(FixedUpdate, record_triggers.after(SimSet::Cleanup));
    app.update();

    run_ticks(&mut app, tick_count);

    let triggers = std::mem::take(&mut app.world_mut().resource_mut::<TriggerLog>().0);
    RunResult {
        transforms: world_snapshot::<Transform>(app.world_mut()),
        health: world_snapshot::<Health>(app.world_mut()),
        triggers,
    }
}

#[test]
fn test_full_game_same_seed() {
    const SEED: u64 = 12345;

    let first = run_game(SEED, 600);
    let second = run_game(SEED, 600);

    assert!(!first.triggers.is_empty(), "monsters reached the player");
    assert_eq!(first, second, "Симуляция с одинаковым seed ({}) дала разные результаты!", SEED);
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    let runs: Vec<_> = (0..3).map(|_| run_game(SEED, 300)).collect();

    for (i, run) in runs.iter().enumerate().skip(1) {
        assert_eq!(runs[0], *run, "Прогон {} дал результат отличный от прогона 0", i);
    }
}

#[test]
fn test_custom_system_is_deterministic() {
    let run = || {
        let mut app = create_headless_app(7);
        app.add_systems(FixedUpdate, move_entities);
        for i in 0..100 {
            app.world_mut().spawn(TestEntity {
                x: i as f32,
                y: i as f32 * 0.5,
            });
        }
        run_ticks(&mut app, 200);
        world_snapshot::<TestEntity>(app.world_mut())
    };

    assert_eq!(run(), run());
}
