//! GameRegistry — реестр оружия, зданий и построенных зданий
//!
//! Заполняется на старте из `GameConfig`. Индексы = порядок регистрации.
//! Здесь же GameOver / GameState.

use bevy::prelude::*;

use crate::combat::Weapon;
use crate::components::PrefabPath;
use crate::config::{BuildingConfig, GameConfig};
use crate::SimError;

/// Здание, доступное для постройки
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub id: usize,
    pub name: String,
    pub cost: u32,
    pub prefab: PrefabPath,
    pub silhouette: PrefabPath,
    pub max_hp: u32,
    /// Имя оружия в реестре
    pub weapon: String,
    pub aggro_radius: f32,
    pub half_extents: Vec3,
    pub hp_bar_offset: Vec3,
}

impl Building {
    /// None если у конфига нет prefab или silhouette
    pub fn from_config(id: usize, config: &BuildingConfig) -> Option<Self> {
        let prefab = config.prefab.as_ref()?;
        let silhouette = config.silhouette.as_ref()?;
        Some(Self {
            id,
            name: config.name.clone(),
            cost: config.cost,
            prefab: PrefabPath::new(prefab.clone()),
            silhouette: PrefabPath::new(silhouette.clone()),
            max_hp: config.max_hp,
            weapon: config.weapon.clone(),
            aggro_radius: config.aggro_radius,
            half_extents: Vec3::from_array(config.half_extents),
            hp_bar_offset: Vec3::from_array(config.hp_bar_offset),
        })
    }
}

/// Построенное здание (BuildingInScene)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBuilding {
    /// Позиция в списке построенных зданий
    pub index: usize,
    /// Тип здания: индекс в `GameRegistry::buildings`
    pub building: usize,
    /// Владелец (0 = игрок)
    pub owner: u32,
    pub entity: Entity,
    pub position: Vec3,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct GameRegistry {
    weapons: Vec<Weapon>,
    buildings: Vec<Building>,
    placed_buildings: Vec<PlacedBuilding>,
}

impl GameRegistry {
    pub fn from_config(config: &GameConfig) -> Self {
        let mut registry = Self::default();

        for weapon in &config.weapons {
            registry.register_weapon(weapon.to_weapon());
        }

        for building in &config.buildings {
            let id = registry.buildings.len();
            let Some(building) = Building::from_config(id, building) else {
                crate::log_error(
                    "Error when populating buildings list! Check Buildings Prefabs and Buildings Silhouettes in Game Manager script!",
                );
                break;
            };
            registry.register_building(building);
        }

        crate::log(&format!(
            "📋 Registry: {} weapons, {} buildings",
            registry.weapons.len(),
            registry.buildings.len()
        ));
        registry
    }

    /// Возвращает индекс зарегистрированного оружия
    pub fn register_weapon(&mut self, weapon: Weapon) -> usize {
        self.weapons.push(weapon);
        self.weapons.len() - 1
    }

    pub fn register_building(&mut self, building: Building) -> usize {
        self.buildings.push(building);
        self.buildings.len() - 1
    }

    /// Возвращает индекс в сцене (= число зданий, построенных до этого)
    pub fn register_building_in_scene(&mut self, building: usize, owner: u32, entity: Entity, position: Vec3) -> usize {
        let index = self.placed_buildings.len();
        self.placed_buildings.push(PlacedBuilding {
            index,
            building,
            owner,
            entity,
            position,
        });
        index
    }

    /// Линейный поиск оружия по имени
    pub fn find_weapon(&self, name: &str) -> Result<&Weapon, SimError> {
        self.weapons
            .iter()
            .find(|weapon| weapon.name == name)
            .ok_or_else(|| SimError::UnknownWeapon(name.to_string()))
    }

    pub fn building(&self, index: usize) -> Result<&Building, SimError> {
        self.buildings.get(index).ok_or(SimError::UnknownBuilding(index))
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn placed_buildings(&self) -> &[PlacedBuilding] {
        &self.placed_buildings
    }
}

/// Event: игрок умер
#[derive(Event, Debug, Clone, Copy)]
pub struct GameOver {
    pub player: Entity,
}

/// Состояние партии
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct GameState {
    pub over: bool,
}

impl GameState {
    pub fn game_over(&mut self) {
        crate::log_error("Game over!");
        self.over = true;
    }
}

/// Система: GameOver event → GameState
pub fn on_game_over(mut events: EventReader<GameOver>, mut state: ResMut<GameState>) {
    for _ in events.read() {
        if !state.over {
            state.game_over();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_from_default_config() {
        let registry = GameRegistry::from_config(&GameConfig::default());

        assert_eq!(registry.weapons().len(), 3);
        assert_eq!(registry.buildings().len(), 1);

        let tower = registry.building(0).expect("tower registered");
        assert_eq!(tower.id, 0);
        assert_eq!(tower.cost, 10);
        assert_eq!(tower.prefab.short_name(), "Tower");
    }

    #[test]
    fn test_building_without_silhouette_stops_registration() {
        let mut config = GameConfig::default();
        let mut broken = BuildingConfig::default();
        broken.name = "Broken".into();
        broken.silhouette = None;
        let mut later = BuildingConfig::default();
        later.name = "Later".into();
        config.buildings = vec![BuildingConfig::default(), broken, later];

        let registry = GameRegistry::from_config(&config);

        // Всё после сломанной записи пропущено
        assert_eq!(registry.buildings().len(), 1);
        assert!(matches!(registry.building(1), Err(SimError::UnknownBuilding(1))));
    }

    #[test]
    fn test_register_returns_previous_count() {
        let mut registry = GameRegistry::default();
        assert_eq!(registry.register_weapon(Weapon::melee(0, "Claw", 5, 2.0)), 0);
        assert_eq!(registry.register_weapon(Weapon::ranged(1, "Pistol", 15, 10, 2.0, 10.0)), 1);

        let entity = Entity::from_raw(3);
        assert_eq!(registry.register_building_in_scene(0, 0, entity, Vec3::ZERO), 0);
        assert_eq!(registry.register_building_in_scene(0, 0, entity, Vec3::X), 1);
        assert_eq!(registry.placed_buildings()[1].position, Vec3::X);
        assert_eq!(registry.placed_buildings()[1].index, 1);
        assert_eq!(registry.placed_buildings()[1].building, 0);
    }

    #[test]
    fn test_find_weapon_by_name() {
        let registry = GameRegistry::from_config(&GameConfig::default());
        assert_eq!(registry.find_weapon("TowerArrow").map(|w| w.id).ok(), Some(2));
        assert!(matches!(registry.find_weapon("Bazooka"), Err(SimError::UnknownWeapon(_))));
    }

    #[test]
    fn test_game_over_sets_state() {
        let mut state = GameState::default();
        state.game_over();
        assert!(state.over);
    }
}
