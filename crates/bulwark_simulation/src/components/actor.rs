//! Базовые компоненты killable-объектов: Health, Spawned, Dead

use bevy::prelude::*;

/// Здоровье (игрок, монстр, башня)
///
/// Инвариант: 0 ≤ current ≤ max. Падение до 0 = смерть (обрабатывает combat).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Применить урон. Возвращает true если этот удар убил (HP стало 0).
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.current = self.current.saturating_sub(amount);
        was_alive && !self.is_alive()
    }

    /// "current/max" для HP бара
    pub fn label(&self) -> String {
        format!("{}/{}", self.current, self.max)
    }
}

/// Маркер: entity полностью заспавнен
///
/// Без него killable-объект неуязвим и не выбирается целью
/// (монстр во время spawn-анимации).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Spawned;

/// Маркер: entity мертв (Health == 0), но не деспавнен (игрок)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Деспавн entity после указанного времени (секунды от старта симуляции)
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnAfter {
    pub despawn_time: f32,
}
