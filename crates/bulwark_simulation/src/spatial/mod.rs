//! Spatial domain — коллайдеры, слои, raycast и overlap запросы
//!
//! Заменяет физику хоста для gameplay-логики: лучи выстрелов, проверка
//! дистанции атаки, aggro сфера башни, проверка места под спавн/строительство.

pub mod geometry;
pub mod layers;
pub mod query;

pub use geometry::ColliderShape;
pub use layers::*;
pub use query::{cast_ray, cast_ray_all, Collider, PhysicsWorld, RayHit};
