//! Tower компоненты

use bevy::prelude::*;

/// Башня: стреляет по ближайшему монстру в радиусе aggro
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Tower {
    pub target: Option<Entity>,
}

/// Aggro-сфера башни (FindTargetsInsideSphere)
#[derive(Component, Debug, Clone, Copy)]
pub struct TowerAggro {
    pub radius: f32,
    /// Смещение центра сферы от позиции башни
    pub center_offset: Vec3,
    /// Слои целей
    pub mask: u32,
}

impl TowerAggro {
    pub fn center(&self, tower_position: Vec3) -> Vec3 {
        tower_position + self.center_offset
    }
}

/// CalculateClosestEnemy: ближайший кандидат к башне
///
/// Кандидаты заранее отфильтрованы (заспавнены, живы). При равной дистанции
/// выигрывает первый.
pub fn calculate_closest_enemy(
    tower_position: Vec3,
    candidates: impl IntoIterator<Item = (Entity, Vec3)>,
) -> Option<Entity> {
    let mut closest: Option<(Entity, f32)> = None;

    for (entity, position) in candidates {
        let distance = tower_position.distance_squared(position);
        match closest {
            Some((_, best)) if best <= distance => {}
            _ => closest = Some((entity, distance)),
        }
    }

    closest.map(|(entity, _)| entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_enemy_picks_minimum_distance() {
        let far = Entity::from_raw(1);
        let near = Entity::from_raw(2);
        let candidates = vec![(far, Vec3::new(6.0, 0.0, 0.0)), (near, Vec3::new(0.0, 0.0, 2.0))];

        assert_eq!(calculate_closest_enemy(Vec3::ZERO, candidates), Some(near));
    }

    #[test]
    fn test_closest_enemy_tie_keeps_first() {
        let first = Entity::from_raw(1);
        let second = Entity::from_raw(2);
        let candidates = vec![(first, Vec3::X * 3.0), (second, Vec3::Z * 3.0)];

        assert_eq!(calculate_closest_enemy(Vec3::ZERO, candidates), Some(first));
    }

    #[test]
    fn test_closest_enemy_empty() {
        assert_eq!(calculate_closest_enemy(Vec3::ZERO, Vec::new()), None);
    }
}
