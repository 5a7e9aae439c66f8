//! Spatial queries поверх всех Collider в мире
//!
//! Правила (как у физики хоста):
//! - trigger-коллайдеры не ловят лучи и не участвуют в overlap
//! - луч, стартующий внутри коллайдера, этот коллайдер не видит
//! - mask фильтрует по `Collider::layer`

use bevy::ecs::system::SystemParam;
use bevy::math::Ray3d;
use bevy::prelude::*;

use super::geometry::{box_overlaps_shape, ray_shape, sphere_overlaps_shape, ColliderShape};
use super::layers::LAYER_FLOOR;

/// Коллайдер entity (центр = Transform.translation)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Ровно один бит из `spatial::layers`
    pub layer: u32,
    pub is_trigger: bool,
}

impl Collider {
    pub fn cuboid(half_extents: Vec3, layer: u32) -> Self {
        Self {
            shape: ColliderShape::Cuboid { half_extents },
            layer,
            is_trigger: false,
        }
    }

    pub fn sphere(radius: f32, layer: u32) -> Self {
        Self {
            shape: ColliderShape::Sphere { radius },
            layer,
            is_trigger: false,
        }
    }

    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Половина высоты (bounds.extents.y)
    pub fn half_height(&self) -> f32 {
        self.shape.extents().y
    }

    fn matches(&self, mask: u32) -> bool {
        !self.is_trigger && (self.layer & mask) != 0
    }
}

/// Результат raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    pub distance: f32,
}

/// Все попадания луча, отсортированные по дистанции
pub fn cast_ray_all<'a>(
    colliders: impl Iterator<Item = (Entity, Vec3, &'a Collider)>,
    ray: Ray3d,
    max_distance: f32,
    mask: u32,
) -> Vec<RayHit> {
    let dir = *ray.direction;
    let mut hits: Vec<RayHit> = colliders
        .filter(|(_, _, collider)| collider.matches(mask))
        .filter_map(|(entity, center, collider)| {
            let (t_enter, _) = ray_shape(ray.origin, dir, center, &collider.shape)?;
            // t_enter < 0 → origin внутри коллайдера
            if t_enter < 0.0 || t_enter > max_distance {
                return None;
            }
            Some(RayHit {
                entity,
                point: ray.get_point(t_enter),
                distance: t_enter,
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.entity.index().cmp(&b.entity.index()))
    });
    hits
}

/// Ближайшее попадание луча
pub fn cast_ray<'a>(
    colliders: impl Iterator<Item = (Entity, Vec3, &'a Collider)>,
    ray: Ray3d,
    max_distance: f32,
    mask: u32,
) -> Option<RayHit> {
    cast_ray_all(colliders, ray, max_distance, mask).into_iter().next()
}

/// SystemParam: доступ к коллайдерам для raycast/overlap в системах
#[derive(SystemParam)]
pub struct PhysicsWorld<'w, 's> {
    colliders: Query<'w, 's, (Entity, &'static Transform, &'static Collider)>,
}

impl<'w, 's> PhysicsWorld<'w, 's> {
    fn entries(&self) -> impl Iterator<Item = (Entity, Vec3, &Collider)> + '_ {
        self.colliders
            .iter()
            .map(|(entity, transform, collider)| (entity, transform.translation, collider))
    }

    pub fn collider(&self, entity: Entity) -> Option<(Vec3, Collider)> {
        self.colliders
            .get(entity)
            .ok()
            .map(|(_, transform, collider)| (transform.translation, *collider))
    }

    pub fn raycast(&self, ray: Ray3d, max_distance: f32, mask: u32) -> Option<RayHit> {
        cast_ray(self.entries(), ray, max_distance, mask)
    }

    pub fn raycast_all(&self, ray: Ray3d, max_distance: f32, mask: u32) -> Vec<RayHit> {
        cast_ray_all(self.entries(), ray, max_distance, mask)
    }

    /// Ближайший тайл пола под лучом (слой коллайдера == LAYER_FLOOR)
    pub fn raycast_floor_tile(&self, ray: Ray3d) -> Option<RayHit> {
        self.raycast_all(ray, f32::INFINITY, LAYER_FLOOR)
            .into_iter()
            .find(|hit| {
                self.collider(hit.entity)
                    .map(|(_, collider)| collider.layer == LAYER_FLOOR)
                    .unwrap_or(false)
            })
    }

    /// Все коллайдеры, пересекающие сферу (OverlapSphere)
    pub fn overlap_sphere(&self, center: Vec3, radius: f32, mask: u32) -> Vec<Entity> {
        self.entries()
            .filter(|(_, _, collider)| collider.matches(mask))
            .filter(|(_, pos, collider)| sphere_overlaps_shape(center, radius, *pos, &collider.shape))
            .map(|(entity, _, _)| entity)
            .collect()
    }

    /// Все коллайдеры, пересекающие бокс (OverlapBox)
    pub fn overlap_box(&self, center: Vec3, half_extents: Vec3, mask: u32, exclude: Option<Entity>) -> Vec<Entity> {
        self.entries()
            .filter(|(entity, _, _)| Some(*entity) != exclude)
            .filter(|(_, _, collider)| collider.matches(mask))
            .filter(|(_, pos, collider)| box_overlaps_shape(center, half_extents, *pos, &collider.shape))
            .map(|(entity, _, _)| entity)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::layers::*;
    use bevy::math::Dir3;

    fn ray(origin: Vec3, dir: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::new(dir).expect("non-zero direction"))
    }

    #[test]
    fn test_cast_ray_respects_mask_and_distance() {
        let enemy = Collider::cuboid(Vec3::splat(0.5), LAYER_ENEMY);
        let wall = Collider::cuboid(Vec3::splat(0.5), LAYER_ENVIRONMENT);
        let colliders = vec![
            (Entity::from_raw(1), Vec3::new(0.0, 0.0, 5.0), &enemy),
            (Entity::from_raw(2), Vec3::new(0.0, 0.0, 3.0), &wall),
        ];

        let hit = cast_ray(colliders.clone().into_iter(), ray(Vec3::ZERO, Vec3::Z), 100.0, LAYER_ENEMY)
            .expect("enemy on the ray");
        assert_eq!(hit.entity, Entity::from_raw(1));
        assert!((hit.distance - 4.5).abs() < 1e-5);

        // Стена ближе, если она в маске
        let hit = cast_ray(
            colliders.clone().into_iter(),
            ray(Vec3::ZERO, Vec3::Z),
            100.0,
            LAYER_ENEMY | LAYER_ENVIRONMENT,
        )
        .expect("wall on the ray");
        assert_eq!(hit.entity, Entity::from_raw(2));

        // Дальность меньше дистанции
        assert!(cast_ray(colliders.into_iter(), ray(Vec3::ZERO, Vec3::Z), 4.0, LAYER_ENEMY).is_none());
    }

    #[test]
    fn test_cast_ray_ignores_triggers_and_origin_inside() {
        let trigger = Collider::cuboid(Vec3::splat(0.5), LAYER_ENEMY).as_trigger();
        let own_body = Collider::cuboid(Vec3::splat(0.5), LAYER_ENEMY);
        let colliders = vec![
            (Entity::from_raw(1), Vec3::new(0.0, 0.0, 5.0), &trigger),
            (Entity::from_raw(2), Vec3::ZERO, &own_body),
        ];

        assert!(cast_ray(colliders.into_iter(), ray(Vec3::ZERO, Vec3::Z), 100.0, LAYER_ENEMY).is_none());
    }

    #[test]
    fn test_cast_ray_all_sorted() {
        let a = Collider::sphere(0.5, LAYER_ENEMY);
        let b = Collider::sphere(0.5, LAYER_ENEMY);
        let colliders = vec![
            (Entity::from_raw(1), Vec3::new(8.0, 0.0, 0.0), &a),
            (Entity::from_raw(2), Vec3::new(3.0, 0.0, 0.0), &b),
        ];

        let hits = cast_ray_all(colliders.into_iter(), ray(Vec3::ZERO, Vec3::X), 100.0, LAYER_ENEMY);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, Entity::from_raw(2));
        assert_eq!(hits[1].entity, Entity::from_raw(1));
    }
}
