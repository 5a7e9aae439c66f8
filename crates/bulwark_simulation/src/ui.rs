//! UI state: HUD игрока + HP лейблы над монстрами и башнями
//!
//! Только тексты и якоря, раскладку и рендер делает хост.

use bevy::prelude::*;

use crate::combat::{DamageDealt, GunControl, ReloadFinished, ReloadStarted};
use crate::components::Health;
use crate::player::Player;
use crate::SimSet;

/// HUD игрока
#[derive(Resource, Debug, Clone, Default)]
pub struct Hud {
    /// "HP: c/m"
    pub hp_text: String,
    /// "Ammo: c/m" или "Ammo: Reloading..."
    pub ammo_text: String,
    pub build_panel_visible: bool,
}

impl Hud {
    pub fn set_hp(&mut self, health: &Health) {
        self.hp_text = format!("HP: {}", health.label());
    }

    pub fn set_ammo(&mut self, gun: &GunControl) {
        self.ammo_text = format!("Ammo: {}", gun.ammo_label());
    }

    pub fn set_reloading(&mut self) {
        self.ammo_text = "Ammo: Reloading...".to_string();
    }
}

/// HP лейбл над entity ("c/m")
#[derive(Component, Debug, Clone)]
pub struct HpLabel {
    /// "ID_<name>_HP"
    pub id: String,
    pub text: String,
    /// Смещение от позиции владельца
    pub offset: Vec3,
    /// Мировая позиция лейбла (обновляется каждый тик)
    pub anchor: Vec3,
}

impl HpLabel {
    pub fn new(owner_name: &str, offset: Vec3) -> Self {
        Self {
            id: format!("ID_{}_HP", owner_name),
            text: String::new(),
            offset,
            anchor: offset,
        }
    }
}

/// Система: HUD игрока по событиям урона и перезарядки
pub fn update_player_hud(
    mut hud: ResMut<Hud>,
    mut damage_events: EventReader<DamageDealt>,
    mut reload_started: EventReader<ReloadStarted>,
    mut reload_finished: EventReader<ReloadFinished>,
    players: Query<(&Health, &GunControl), With<Player>>,
) {
    for event in damage_events.read() {
        if let Ok((health, _)) = players.get(event.target) {
            hud.set_hp(health);
        }
    }

    for event in reload_started.read() {
        if players.contains(event.entity) {
            crate::log("Reloading!");
            hud.set_reloading();
        }
    }

    for event in reload_finished.read() {
        if let Ok((_, gun)) = players.get(event.entity) {
            hud.set_ammo(gun);
        }
    }
}

/// Система: текст и якорь HP лейблов
pub fn update_hp_labels(mut labels: Query<(&mut HpLabel, &Health, &Transform)>) {
    for (mut label, health, transform) in labels.iter_mut() {
        let text = health.label();
        if label.text != text {
            label.text = text;
        }
        label.anchor = transform.translation + label.offset;
    }
}

/// Стартовые тексты HUD для заспавненного игрока
pub fn init_player_hud(mut hud: ResMut<Hud>, players: Query<(&Health, &GunControl), With<Player>>) {
    if let Ok((health, gun)) = players.single() {
        hud.set_hp(health);
        hud.set_ammo(gun);
    }
}

/// UI Plugin: SimSet::Present — update_player_hud, update_hp_labels
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Hud>();
        app.add_systems(
            FixedUpdate,
            (update_player_hud, update_hp_labels).chain().in_set(SimSet::Present),
        );
    }
}
