//! Build mode: состояние контроллера + preview entity

use bevy::prelude::*;

/// Подсветка стоит над тайлом на этой высоте
pub const HIGHLIGHT_HEIGHT: f32 = 0.1;

/// Полувысота бокса проверки под подсветкой
pub const HIGHLIGHT_HALF_HEIGHT: f32 = 1.0;

/// Доля тайла, которую занимает footprint подсветки (по X/Z)
pub const HIGHLIGHT_FOOTPRINT: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildState {
    #[default]
    Closed,
    /// Панель открыта, здание не выбрано
    Open,
    /// Здание выбрано, силуэт следует за подсветкой
    BuildingSelected,
}

/// BuildController
#[derive(Resource, Debug, Clone, Default)]
pub struct BuildController {
    pub state: BuildState,
    /// Индекс выбранного здания в реестре
    pub selected: Option<usize>,
    pub highlight: Option<Entity>,
    pub silhouette: Option<Entity>,
    /// Текущая позиция подсветки (тайл + HIGHLIGHT_HEIGHT)
    pub highlight_position: Vec3,
    /// Под подсветкой что-то стоит
    pub blocked: bool,
}

impl BuildController {
    pub fn is_open(&self) -> bool {
        self.state != BuildState::Closed
    }
}

/// Материал подсветки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightMaterial {
    /// Зелёный: можно строить
    #[default]
    Free,
    /// Красный: занято
    Blocked,
}

/// Подсветка тайла под курсором
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FloorHighlight {
    pub material: HighlightMaterial,
}

/// Полупрозрачный силуэт выбранного здания
#[derive(Component, Debug, Clone, Copy)]
pub struct BuildingSilhouette {
    pub building: usize,
}
