//! Геометрия коллайдеров: ray casts и overlap тесты
//!
//! Все боксы axis-aligned (вращение entity на коллайдер не влияет).
//! Направление луча должно быть нормализовано — t возвращается в метрах.

use bevy::prelude::*;

/// Форма коллайдера (центр = Transform.translation)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ColliderShape {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

impl ColliderShape {
    /// Половина размеров bounding box (аналог bounds.extents)
    pub fn extents(&self) -> Vec3 {
        match *self {
            ColliderShape::Sphere { radius } => Vec3::splat(radius),
            ColliderShape::Cuboid { half_extents } => half_extents,
        }
    }

    pub fn contains_point(&self, center: Vec3, point: Vec3) -> bool {
        match *self {
            ColliderShape::Sphere { radius } => center.distance_squared(point) < radius * radius,
            ColliderShape::Cuboid { half_extents } => {
                let d = (point - center).abs();
                d.x < half_extents.x && d.y < half_extents.y && d.z < half_extents.z
            }
        }
    }
}

/// Пересечение луча со сферой → (t_enter, t_exit)
///
/// None если луч проходит мимо или сфера целиком позади origin.
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<(f32, f32)> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sq = discriminant.sqrt();
    let t_exit = -b + sq;
    if t_exit < 0.0 {
        return None;
    }
    Some((-b - sq, t_exit))
}

/// Пересечение луча с AABB (slab method) → (t_enter, t_exit)
pub fn ray_aabb(origin: Vec3, dir: Vec3, center: Vec3, half_extents: Vec3) -> Option<(f32, f32)> {
    let min = center - half_extents;
    let max = center + half_extents;

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];

        if d.abs() < f32::EPSILON {
            // Луч параллелен slab'у: либо внутри, либо промах
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (min[axis] - o) * inv;
        let mut t2 = (max[axis] - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_enter = t_enter.max(t1);
        t_exit = t_exit.min(t2);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    Some((t_enter, t_exit))
}

pub fn ray_shape(origin: Vec3, dir: Vec3, center: Vec3, shape: &ColliderShape) -> Option<(f32, f32)> {
    match *shape {
        ColliderShape::Sphere { radius } => ray_sphere(origin, dir, center, radius),
        ColliderShape::Cuboid { half_extents } => ray_aabb(origin, dir, center, half_extents),
    }
}

/// Пересекается ли сфера запроса с коллайдером
pub fn sphere_overlaps_shape(center: Vec3, radius: f32, shape_center: Vec3, shape: &ColliderShape) -> bool {
    match *shape {
        ColliderShape::Sphere { radius: other } => {
            let reach = radius + other;
            center.distance_squared(shape_center) <= reach * reach
        }
        ColliderShape::Cuboid { half_extents } => {
            let closest = center.clamp(shape_center - half_extents, shape_center + half_extents);
            center.distance_squared(closest) <= radius * radius
        }
    }
}

/// Пересекается ли бокс запроса с коллайдером (касание не считается)
pub fn box_overlaps_shape(center: Vec3, half_extents: Vec3, shape_center: Vec3, shape: &ColliderShape) -> bool {
    match *shape {
        ColliderShape::Sphere { radius } => {
            let closest = shape_center.clamp(center - half_extents, center + half_extents);
            shape_center.distance_squared(closest) < radius * radius
        }
        ColliderShape::Cuboid { half_extents: other } => {
            let d = (center - shape_center).abs();
            let reach = half_extents + other;
            d.x < reach.x && d.y < reach.y && d.z < reach.z
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_sphere_hit_and_miss() {
        let hit = ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(5.0, 0.0, 0.0), 1.0);
        let (t_enter, t_exit) = hit.expect("ray along X should hit");
        assert!((t_enter - 4.0).abs() < 1e-5);
        assert!((t_exit - 6.0).abs() < 1e-5);

        assert!(ray_sphere(Vec3::ZERO, Vec3::Y, Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
        // Сфера позади
        assert!(ray_sphere(Vec3::ZERO, Vec3::NEG_X, Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_ray_aabb_slab() {
        let hit = ray_aabb(Vec3::new(0.0, 0.5, 0.0), Vec3::Z, Vec3::new(0.0, 0.0, 10.0), Vec3::ONE);
        let (t_enter, _) = hit.expect("ray should enter the box");
        assert!((t_enter - 9.0).abs() < 1e-5);

        // Параллельно и вне slab'а
        assert!(ray_aabb(Vec3::new(0.0, 2.0, 0.0), Vec3::Z, Vec3::new(0.0, 0.0, 10.0), Vec3::ONE).is_none());
    }

    #[test]
    fn test_ray_aabb_origin_inside() {
        let (t_enter, t_exit) = ray_aabb(Vec3::ZERO, Vec3::X, Vec3::ZERO, Vec3::ONE).expect("inside");
        assert!(t_enter < 0.0);
        assert!((t_exit - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_box_overlap() {
        let shape = ColliderShape::Cuboid { half_extents: Vec3::splat(0.5) };
        assert!(sphere_overlaps_shape(Vec3::new(1.0, 0.0, 0.0), 0.6, Vec3::ZERO, &shape));
        assert!(!sphere_overlaps_shape(Vec3::new(2.0, 0.0, 0.0), 0.6, Vec3::ZERO, &shape));
    }

    #[test]
    fn test_box_overlap_touching_is_not_overlap() {
        let shape = ColliderShape::Cuboid { half_extents: Vec3::splat(0.5) };
        assert!(!box_overlaps_shape(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5), Vec3::ZERO, &shape));
        assert!(box_overlaps_shape(Vec3::new(0.9, 0.0, 0.0), Vec3::splat(0.5), Vec3::ZERO, &shape));
    }

    #[test]
    fn test_contains_point() {
        let shape = ColliderShape::Sphere { radius: 1.0 };
        assert!(shape.contains_point(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)));
        assert!(!shape.contains_point(Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0)));
    }
}
