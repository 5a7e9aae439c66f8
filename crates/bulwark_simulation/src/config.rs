//! GameConfig — параметры уровня, оружия, зданий и спавнеров
//!
//! Загружается из JSON (`GameConfig::load`), любое поле можно опустить —
//! подставятся значения по умолчанию. Позиции хранятся как `[f32; 3]`
//! (bevy собран без `serialize` feature).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::combat::Weapon;
use crate::SimError;

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed для DeterministicRng
    pub seed: u64,
    /// Частота simulation tick (FixedUpdate)
    pub tick_hz: f64,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub weapons: Vec<WeaponConfig>,
    pub buildings: Vec<BuildingConfig>,
    pub spawners: Vec<SpawnerConfig>,
    pub level: LevelConfig,
    pub camera: CameraConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_hz: 60.0,
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            weapons: vec![
                WeaponConfig::melee(0, "Claw", 5, 2.0),
                WeaponConfig::ranged(1, "Pistol", 15, 10, 2.0, 10.0),
                WeaponConfig::ranged(2, "TowerArrow", 10, 1, 2.0, 50.0),
            ],
            buildings: vec![BuildingConfig::default()],
            spawners: vec![SpawnerConfig::default()],
            level: LevelConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl GameConfig {
    /// Прочитать и провалидировать конфиг из JSON файла
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SimError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "tick_hz must be positive, got {}",
                self.tick_hz
            )));
        }

        let mut names = HashSet::new();
        for weapon in &self.weapons {
            if !names.insert(weapon.name.as_str()) {
                return Err(SimError::InvalidConfig(format!(
                    "duplicate weapon name `{}`",
                    weapon.name
                )));
            }
        }

        let referenced = std::iter::once(self.player.weapon.as_str())
            .chain(std::iter::once(self.enemy.weapon.as_str()))
            .chain(self.buildings.iter().map(|b| b.weapon.as_str()));
        for name in referenced {
            if !names.contains(name) {
                return Err(SimError::UnknownWeapon(name.to_string()));
            }
        }

        if let Some(spawner) = self.spawners.iter().find(|s| s.interval <= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "spawner interval must be positive, got {}",
                spawner.interval
            )));
        }

        if self.level.tile_size <= 0.0 {
            return Err(SimError::InvalidConfig("level.tile_size must be positive".into()));
        }

        Ok(())
    }

    /// Fixed timestep одного тика (секунды)
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.tick_hz
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_hp: u32,
    /// Скорость перемещения (м/с)
    pub speed: f32,
    pub weapon: String,
    pub spawn_position: [f32; 3],
    pub half_extents: [f32; 3],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_hp: 100,
            speed: 5.0,
            weapon: "Pistol".to_string(),
            spawn_position: [0.0, 0.9, 0.0],
            half_extents: [0.4, 0.9, 0.4],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_hp: u32,
    /// Дистанция атаки, она же stopping distance NavAgent
    pub attack_range: f32,
    pub speed: f32,
    /// Длина spawn-анимации (неуязвимость до SpawnComplete)
    pub spawn_duration: f32,
    pub weapon: String,
    pub half_extents: [f32; 3],
    pub hp_bar_offset: [f32; 3],
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_hp: 50,
            attack_range: 2.0,
            speed: 3.5,
            spawn_duration: 1.0,
            weapon: "Claw".to_string(),
            half_extents: [0.4, 0.9, 0.4],
            hp_bar_offset: [0.0, 2.2, 0.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub id: u32,
    pub name: String,
    pub damage: u32,
    #[serde(flatten)]
    pub kind: WeaponKindConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeaponKindConfig {
    Ranged {
        max_ammo: u32,
        reload_time: f32,
        range: f32,
    },
    Melee {
        reload_time: f32,
    },
}

impl WeaponConfig {
    pub fn ranged(id: u32, name: &str, damage: u32, max_ammo: u32, reload_time: f32, range: f32) -> Self {
        Self {
            id,
            name: name.to_string(),
            damage,
            kind: WeaponKindConfig::Ranged {
                max_ammo,
                reload_time,
                range,
            },
        }
    }

    pub fn melee(id: u32, name: &str, damage: u32, reload_time: f32) -> Self {
        Self {
            id,
            name: name.to_string(),
            damage,
            kind: WeaponKindConfig::Melee { reload_time },
        }
    }

    pub fn to_weapon(&self) -> Weapon {
        match self.kind {
            WeaponKindConfig::Ranged {
                max_ammo,
                reload_time,
                range,
            } => Weapon::ranged(self.id, &self.name, self.damage, max_ammo, reload_time, range),
            WeaponKindConfig::Melee { reload_time } => {
                Weapon::melee(self.id, &self.name, self.damage, reload_time)
            }
        }
    }
}

/// Описание здания. `prefab`/`silhouette` = None ломает регистрацию списка зданий.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    pub name: String,
    pub prefab: Option<String>,
    pub silhouette: Option<String>,
    pub cost: u32,
    pub max_hp: u32,
    pub weapon: String,
    pub aggro_radius: f32,
    pub half_extents: [f32; 3],
    pub hp_bar_offset: [f32; 3],
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            name: "Tower".to_string(),
            prefab: Some("prefabs/Tower".to_string()),
            silhouette: Some("prefabs/Tower_Silhouette".to_string()),
            cost: 10,
            max_hp: 200,
            weapon: "TowerArrow".to_string(),
            aggro_radius: 8.0,
            half_extents: [0.45, 1.5, 0.45],
            hp_bar_offset: [0.0, 3.5, 0.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub position: [f32; 3],
    /// Интервал между спавнами (секунды)
    pub interval: f32,
    /// Half extents бокса проверки свободного места
    pub check_half_extents: [f32; 3],
    /// Имя шаблона монстра (префикс имени заспавненного entity)
    pub template: String,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            position: [8.5, 0.9, 8.5],
            interval: 5.0,
            check_half_extents: [0.4, 0.45, 0.4],
            template: "Monster".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Количество тайлов пола по X
    pub floor_width: u32,
    /// Количество тайлов пола по Z
    pub floor_depth: u32,
    pub tile_size: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            floor_width: 20,
            floor_depth: 20,
            tile_size: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub shooter_position: [f32; 3],
    /// Euler углы в градусах
    pub shooter_rotation: [f32; 3],
    pub builder_position: [f32; 3],
    pub builder_rotation: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            shooter_position: [0.0, 10.0, -8.0],
            shooter_rotation: [50.0, 0.0, 0.0],
            builder_position: [0.0, 20.0, -2.0],
            builder_rotation: [80.0, 0.0, 0.0],
        }
    }
}
