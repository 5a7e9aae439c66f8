//! Bulwark Simulation Core
//!
//! ECS-симуляция tower-defense / shooter на Bevy 0.16 (headless)
//!
//! - ECS = вся игровая логика (стрельба, монстры, башни, build mode)
//! - Хост = рендер, анимации, UI layout; пишет `PlayerInput`, читает
//!   компоненты/ресурсы (Hud, HpLabel, ShotTrace, AnimationTriggered)

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod build;
pub mod camera;
pub mod combat;
pub mod components;
pub mod config;
pub mod enemy;
pub mod error;
pub mod level;
pub mod logger;
pub mod player;
pub mod registry;
pub mod spatial;
pub mod spawner;
pub mod tower;
pub mod ui;

// Re-export базовых типов для удобства
pub use build::{BuildController, BuildPlugin, BuildState};
pub use camera::{CameraMode, CameraRig};
pub use combat::{CombatPlugin, DamageDealt, EntityDied, GunControl, ShotOutcome, Weapon};
pub use components::*;
pub use config::GameConfig;
pub use enemy::{Enemy, EnemyPlugin};
pub use error::SimError;
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel};
pub use player::{Player, PlayerInput, PlayerPlugin};
pub use registry::{GameOver, GameRegistry, GameState};
pub use spatial::{Collider, PhysicsWorld};
pub use spawner::{MonsterSpawner, SpawnerPlugin};
pub use tower::{Tower, TowerPlugin};
pub use ui::{HpLabel, Hud, UiPlugin};

/// Фазы FixedUpdate тика (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Счётчик тиков, перезарядки, spawn-анимации
    Timers,
    /// Нажатия: выход, build mode toggle/choose
    Input,
    /// HighlightFloor, preview, Build
    Build,
    /// Стрельба и движение игрока
    Player,
    /// Поведение и навигация монстров
    Enemy,
    /// Выбор цели и стрельба башен
    Tower,
    /// Спавн монстров
    Spawner,
    /// Урон → смерть
    Resolve,
    /// HUD, HP лейблы, реакции, GameOver
    Present,
    /// Трассеры, деспавн по таймеру, сброс ввода
    Cleanup,
}

/// Номер текущего simulation tick (1 на первом FixedUpdate)
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimulationTick(pub u64);

fn advance_tick(mut tick: ResMut<SimulationTick>) {
    tick.0 += 1;
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Берёт `GameConfig` из world (или default), регистрирует оружие и здания,
/// на Startup спавнит уровень.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app.world().get_resource::<GameConfig>().cloned().unwrap_or_default();

        app
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_duration(tick_duration(&config)))
            // Детерминистичный RNG
            .insert_resource(DeterministicRng::new(config.seed))
            .insert_resource(GameRegistry::from_config(&config))
            .insert_resource(CameraRig::from_config(&config.camera))
            .init_resource::<GameState>()
            .init_resource::<SimulationTick>()
            .insert_resource(config)
            .add_event::<GameOver>();

        app.configure_sets(
            FixedUpdate,
            (
                SimSet::Timers,
                SimSet::Input,
                SimSet::Build,
                SimSet::Player,
                SimSet::Enemy,
                SimSet::Tower,
                SimSet::Spawner,
                SimSet::Resolve,
                SimSet::Present,
                SimSet::Cleanup,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            advance_tick
                .in_set(SimSet::Timers)
                .before(combat::systems::tick_reloads),
        );
        app.add_systems(FixedUpdate, registry::on_game_over.in_set(SimSet::Present));
        app.add_systems(Startup, (level::spawn_level, ui::init_player_hud).chain());

        // Подсистемы
        app.add_plugins((
            CombatPlugin,
            PlayerPlugin,
            BuildPlugin,
            EnemyPlugin,
            TowerPlugin,
            SpawnerPlugin,
            UiPlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Длительность одного тика
pub fn tick_duration(config: &GameConfig) -> Duration {
    Duration::from_secs_f64(config.tick_seconds())
}

/// Создаёт headless App с конфигом по умолчанию и заданным seed
pub fn create_headless_app(seed: u64) -> App {
    let config = GameConfig {
        seed,
        ..GameConfig::default()
    };
    create_headless_app_with_config(config)
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время ручное: каждый `app.update()` продвигает ровно один fixed tick.
/// Первый `update()` только запускает Startup (delta = 0, FixedUpdate не идёт).
pub fn create_headless_app_with_config(config: GameConfig) -> App {
    let mut app = App::new();
    init_logger();

    let step = tick_duration(&config);
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(step))
        // Медленный tick rate не должен упираться в max_delta (250ms)
        .insert_resource(Time::<Virtual>::from_max_delta(step.max(Duration::from_millis(250))))
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app
}

/// Прогнать `ticks` simulation tick'ов
pub fn run_ticks(app: &mut App, ticks: u32) {
    for _ in 0..ticks {
        app.update();
    }
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
