//! PlayerInput — ввод игрока за текущий tick
//!
//! Хост (или тест) заполняет ресурс перед `app.update()`. "Нажатия"
//! (toggle_build, primary_click, choose_building, quit) сбрасываются в конце
//! тика, оси движения и луч курсора держатся пока хост их не сменит.

use bevy::math::Ray3d;
use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Оси движения: x = Horizontal, y = Vertical (→ мировые X/Z)
    pub movement: Vec2,
    /// Луч камеры через курсор
    pub cursor_ray: Option<Ray3d>,
    /// Tab
    pub toggle_build: bool,
    /// Левая кнопка мыши
    pub primary_click: bool,
    /// Кнопка здания в build панели (индекс в реестре)
    pub choose_building: Option<usize>,
    /// Escape
    pub quit: bool,
}

impl PlayerInput {
    pub fn set_cursor_ray(&mut self, ray: Ray3d) {
        self.cursor_ray = Some(ray);
    }

    /// Клик по точке: луч курсора + нажатие
    pub fn click(&mut self, ray: Ray3d) {
        self.cursor_ray = Some(ray);
        self.primary_click = true;
    }

    pub fn press_toggle_build(&mut self) {
        self.toggle_build = true;
    }

    pub fn choose_building(&mut self, index: usize) {
        self.choose_building = Some(index);
    }

    pub fn press_quit(&mut self) {
        self.quit = true;
    }

    /// Сброс одноразовых нажатий
    pub fn end_frame(&mut self) {
        self.toggle_build = false;
        self.primary_click = false;
        self.choose_building = None;
        self.quit = false;
    }
}
