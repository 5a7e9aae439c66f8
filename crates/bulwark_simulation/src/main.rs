//! Headless симуляция Bulwark
//!
//! Запускает Bevy App без рендера: уровень, спавнеры, монстры, башни.
//! `--demo` — скриптованный игрок: строит башню и отстреливается.

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use bulwark_simulation::logger::set_log_level;
use bulwark_simulation::{
    create_headless_app_with_config, log_error, BuildController, BuildState, CameraRig, Enemy, GameConfig,
    GameState, Health, LogLevel, Player, PlayerInput, Spawned, Tower,
};

#[derive(Parser, Debug)]
#[command(name = "bulwark_simulation", about = "Headless tower-defense simulation")]
struct Cli {
    /// JSON конфиг (по умолчанию встроенные значения)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Переопределить seed из конфига
    #[arg(long)]
    seed: Option<u64>,

    /// Количество simulation tick'ов
    #[arg(long, default_value_t = 1000)]
    ticks: u32,

    /// debug | info | warning | error
    #[arg(long, default_value = "info")]
    log_level: LogLevel,

    /// Скриптованный игрок (постройка башни + стрельба)
    #[arg(long)]
    demo: bool,
}

/// Точка постройки башни в demo (тайл рядом со спавнером по умолчанию)
const DEMO_TOWER_POINT: Vec3 = Vec3::new(5.5, 0.0, 5.5);

/// Интервал стрельбы скриптованного игрока (тики)
const DEMO_SHOT_INTERVAL: u32 = 20;

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_log_level(cli.log_level);

    let mut config = match cli.config.as_ref() {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("{}", err));
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    println!(
        "Starting Bulwark headless simulation (seed: {}, {} Hz)",
        config.seed, config.tick_hz
    );

    let mut app = create_headless_app_with_config(config);
    // Startup: уровень + игрок
    app.update();

    for tick in 0..cli.ticks {
        if cli.demo {
            drive_demo_player(&mut app, tick);
        }
        app.update();

        if tick % 100 == 0 {
            print_stats(&mut app, tick);
        }

        if app.world().resource::<GameState>().over {
            println!("Game over at tick {}", tick);
            break;
        }
    }

    print_stats(&mut app, cli.ticks);
    println!("Simulation complete!");
    ExitCode::SUCCESS
}

/// Скрипт: Tab → выбор башни → клик → Tab, дальше стрельба по ближайшему монстру
fn drive_demo_player(app: &mut App, tick: u32) {
    let state = app.world().resource::<BuildController>().state;
    let camera = app.world().resource::<CameraRig>().clone();

    let target = match tick {
        0..=3 => Some(DEMO_TOWER_POINT),
        _ if tick % DEMO_SHOT_INTERVAL == 0 => closest_monster(app),
        _ => None,
    };

    let mut input = app.world_mut().resource_mut::<PlayerInput>();
    match (tick, state) {
        (0, BuildState::Closed) => input.press_toggle_build(),
        (1, BuildState::Open) => input.choose_building(0),
        (3, BuildState::BuildingSelected) => input.press_toggle_build(),
        _ => {}
    }

    if let Some(ray) = target.and_then(|point| camera.ray_through(point)) {
        match (tick, state) {
            (2, BuildState::BuildingSelected) => input.click(ray),
            (0..=3, _) => input.set_cursor_ray(ray),
            (_, BuildState::Closed) => input.click(ray),
            _ => {}
        }
    }
}

fn closest_monster(app: &mut App) -> Option<Vec3> {
    let world = app.world_mut();
    let player = world
        .query_filtered::<&Transform, With<Player>>()
        .iter(world)
        .next()
        .map(|t| t.translation)?;

    world
        .query_filtered::<&Transform, (With<Enemy>, With<Spawned>)>()
        .iter(world)
        .map(|t| t.translation)
        .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))
}

fn print_stats(app: &mut App, tick: u32) {
    let world = app.world_mut();
    let entity_count = world.entities().len();
    let monsters = world.query_filtered::<(), With<Enemy>>().iter(world).count();
    let towers = world.query_filtered::<(), With<Tower>>().iter(world).count();
    let player_hp = world
        .query_filtered::<&Health, With<Player>>()
        .iter(world)
        .next()
        .map(|h| h.label())
        .unwrap_or_else(|| "-".to_string());

    println!(
        "Tick {}: {} entities, {} monsters, {} towers, player HP {}",
        tick, entity_count, monsters, towers, player_hp
    );
}
