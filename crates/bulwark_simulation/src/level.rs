//! Level: пол из тайлов, корень монстров, игрок, спавнеры

use bevy::prelude::*;

use crate::components::{FloorTile, MonstersRoot};
use crate::config::{GameConfig, LevelConfig};
use crate::player::spawn_player;
use crate::registry::GameRegistry;
use crate::spatial::{Collider, LAYER_FLOOR};
use crate::spawner::spawn_spawner;

/// Полутолщина тайла пола
pub const TILE_HALF_THICKNESS: f32 = 0.05;

/// Центр тайла (grid x, z) — сетка центрирована в начале координат, Y = 0
pub fn tile_center(level: &LevelConfig, x: u32, z: u32) -> Vec3 {
    let offset_x = (level.floor_width as f32 - 1.0) * 0.5;
    let offset_z = (level.floor_depth as f32 - 1.0) * 0.5;
    Vec3::new(
        (x as f32 - offset_x) * level.tile_size,
        0.0,
        (z as f32 - offset_z) * level.tile_size,
    )
}

/// Startup система: спавн уровня
pub fn spawn_level(mut commands: Commands, config: Res<GameConfig>, registry: Res<GameRegistry>) {
    let level = &config.level;
    let half_tile = level.tile_size * 0.5;

    for x in 0..level.floor_width {
        for z in 0..level.floor_depth {
            commands.spawn((
                FloorTile { grid: UVec2::new(x, z) },
                Name::new(format!("Tile_{}_{}", x, z)),
                Transform::from_translation(tile_center(level, x, z)),
                Collider::cuboid(Vec3::new(half_tile, TILE_HALF_THICKNESS, half_tile), LAYER_FLOOR),
            ));
        }
    }

    commands.spawn((MonstersRoot, Name::new("Monsters"), Transform::IDENTITY));

    spawn_player(&mut commands, &config.player, &registry);

    for spawner in &config.spawners {
        spawn_spawner(&mut commands, spawner);
    }

    crate::log_info(&format!(
        "🌍 Level spawned: {}x{} tiles, {} spawners",
        level.floor_width,
        level.floor_depth,
        config.spawners.len()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_grid_is_centered() {
        let level = LevelConfig::default();
        assert_eq!(tile_center(&level, 0, 0), Vec3::new(-9.5, 0.0, -9.5));
        assert_eq!(tile_center(&level, 19, 19), Vec3::new(9.5, 0.0, 9.5));
        // Спавнер по умолчанию стоит ровно над тайлом
        assert_eq!(tile_center(&level, 18, 18), Vec3::new(8.5, 0.0, 8.5));
    }
}
