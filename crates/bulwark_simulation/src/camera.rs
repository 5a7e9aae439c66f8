//! Camera rig: режимы камеры shooter / builder
//!
//! Камеру рендерит хост, здесь только активный preset (позиция + поворот).
//! Луч курсора хост строит от этой позиции.

use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::config::CameraConfig;

/// Режим камеры
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Обзор за игроком (стрельба)
    #[default]
    Shooter,
    /// Вид сверху (build mode)
    Builder,
}

/// Позиция + поворот камеры
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPreset {
    pub position: Vec3,
    pub rotation: Quat,
}

impl CameraPreset {
    /// Euler углы в градусах (X, Y, Z)
    pub fn from_degrees(position: [f32; 3], rotation: [f32; 3]) -> Self {
        Self {
            position: Vec3::from_array(position),
            rotation: Quat::from_euler(
                EulerRot::YXZ,
                rotation[1].to_radians(),
                rotation[0].to_radians(),
                rotation[2].to_radians(),
            ),
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    pub mode: CameraMode,
    pub shooter: CameraPreset,
    pub builder: CameraPreset,
}

impl CameraRig {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            mode: CameraMode::Shooter,
            shooter: CameraPreset::from_degrees(config.shooter_position, config.shooter_rotation),
            builder: CameraPreset::from_degrees(config.builder_position, config.builder_rotation),
        }
    }

    pub fn change_to_shooter(&mut self) {
        crate::log("Change to shooter mode");
        self.mode = CameraMode::Shooter;
    }

    pub fn change_to_builder(&mut self) {
        crate::log("Change to builder mode");
        self.mode = CameraMode::Builder;
    }

    pub fn active(&self) -> CameraPreset {
        match self.mode {
            CameraMode::Shooter => self.shooter,
            CameraMode::Builder => self.builder,
        }
    }

    /// Луч от активной камеры через мировую точку (курсор над `point`)
    pub fn ray_through(&self, point: Vec3) -> Option<Ray3d> {
        let origin = self.active().position;
        Dir3::new(point - origin).ok().map(|direction| Ray3d::new(origin, direction))
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
