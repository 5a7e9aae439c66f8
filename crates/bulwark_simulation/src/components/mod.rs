//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: killable-объекты (Health, Spawned, Dead, DespawnAfter)
//! - movement: навигация монстров и скорость игрока (NavAgent, MovementSpeed)
//! - world: позиционирование и визуалы (PrefabPath, FloorTile, MonstersRoot)

pub mod actor;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use world::*;
