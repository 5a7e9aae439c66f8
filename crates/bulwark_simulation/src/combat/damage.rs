//! Damage events: попадания, урон, смерть, трассеры

use bevy::prelude::*;

/// Время жизни трассера выстрела (секунды)
pub const SHOT_TRACE_LIFETIME: f32 = 1.5;

/// Event: выстрел попал в killable entity (ещё не применён к Health)
#[derive(Event, Debug, Clone, Copy)]
pub struct ShotHit {
    pub shooter: Entity,
    pub target: Entity,
    pub damage: u32,
    pub point: Vec3,
}

/// Event: урон применён к Health
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    /// HP цели после урона
    pub remaining_hp: u32,
}

/// Event: entity умерла (HP дошло до 0). Пишется ровно один раз.
#[derive(Event, Debug, Clone, Copy)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Event: трассер выстрела
#[derive(Event, Debug, Clone, Copy)]
pub struct ShotTraced {
    pub from: Vec3,
    pub to: Vec3,
}

/// Трассер выстрела в мире (линия from → to)
#[derive(Component, Debug, Clone, Copy)]
pub struct ShotTrace {
    pub from: Vec3,
    pub to: Vec3,
}
