//! World компоненты: PrefabPath, FloorTile, MonstersRoot

use bevy::prelude::*;

/// Prefab path визуального представления (data-driven)
///
/// Хост по этому пути подбирает модель для entity.
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct PrefabPath {
    pub path: String,
}

impl PrefabPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Последний сегмент пути ("prefabs/Tower" → "Tower")
    pub fn short_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Тайл пола (цель raycast'а курсора в build mode)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FloorTile {
    /// Координаты в сетке уровня
    pub grid: UVec2,
}

/// Корень иерархии всех заспавненных монстров ("Monsters")
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MonstersRoot;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefab_short_name() {
        assert_eq!(PrefabPath::new("prefabs/Tower").short_name(), "Tower");
        assert_eq!(PrefabPath::new("Tower").short_name(), "Tower");
    }
}
