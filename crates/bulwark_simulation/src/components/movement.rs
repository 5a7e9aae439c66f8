//! Movement компоненты: NavAgent, MovementSpeed

use bevy::prelude::*;

/// Навигационный агент монстра
///
/// Движение по прямой к `destination` в плоскости XZ, остановка на
/// `stopping_distance`. Высота (Y) агентом не меняется.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct NavAgent {
    pub destination: Option<Vec3>,
    pub stopping_distance: f32,
    /// Скорость (м/с)
    pub speed: f32,
    /// Stop() — агент стоит до Resume()
    pub stopped: bool,
}

impl NavAgent {
    pub fn new(speed: f32, stopping_distance: f32) -> Self {
        Self {
            destination: None,
            stopping_distance,
            speed,
            stopped: false,
        }
    }

    pub fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn resume(&mut self) {
        self.stopped = false;
    }

    /// Шаг движения за `delta` секунд из `position`
    ///
    /// Возвращает новую позицию (не ближе stopping_distance к цели).
    pub fn step(&self, position: Vec3, delta: f32) -> Vec3 {
        if self.stopped {
            return position;
        }
        let Some(destination) = self.destination else {
            return position;
        };

        let to_target = Vec3::new(destination.x - position.x, 0.0, destination.z - position.z);
        let distance = to_target.length();
        let remaining = distance - self.stopping_distance;
        if remaining <= 0.0 {
            return position;
        }

        let step = (self.speed * delta).min(remaining);
        position + to_target / distance * step
    }
}

/// Скорость перемещения игрока (м/с)
#[derive(Component, Clone, Copy, Debug)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 5.0 }
    }
}
