//! Enemy компоненты и events

use bevy::prelude::*;

/// Триггеры атаки (выбирается случайно на каждый удар)
pub const ATTACK_TRIGGERS: [&str; 3] = ["Attack1", "Attack2", "Attack3"];

/// Триггер реакции на попадание
pub const HIT_TRIGGER: &str = "GotHit";

/// Монстр: преследует игрока и атакует в ближнем бою
#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub attack_range: f32,
    /// Текущая цель (игрок)
    pub target: Option<Entity>,
}

impl Enemy {
    pub fn new(attack_range: f32) -> Self {
        Self {
            attack_range,
            target: None,
        }
    }
}

/// Spawn-анимация: пока идёт, монстр неуязвим и бездействует
///
/// По окончании (SpawnComplete) компонент снимается, добавляется `Spawned`.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpawnAnimation {
    pub remaining: f32,
}

/// Параметры аниматора монстра (хост проигрывает анимации)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct EnemyAnimator {
    pub walking: bool,
}

/// Event: animation trigger для хоста
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTriggered {
    pub entity: Entity,
    pub trigger: &'static str,
}
