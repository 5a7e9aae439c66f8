//! Weapon — данные оружия (шаблон в реестре + экипированная копия)

use bevy::prelude::*;

/// Дальность melee оружия по умолчанию (метры)
pub const DEFAULT_MELEE_RANGE: f32 = 2.0;

/// Оружие
///
/// Шаблоны живут в `GameRegistry`, `GunControl` держит копию (`equip()`),
/// поэтому патроны у каждого владельца свои.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Weapon {
    pub id: u32,
    pub name: String,
    pub damage: u32,
    pub max_ammo: u32,
    pub current_ammo: u32,
    /// Время перезарядки (секунды). Для melee = cooldown между ударами.
    pub reload_time: f32,
    pub attack_range: f32,
    /// Melee: магазин на 1 удар, перезарядка после каждого
    pub is_melee: bool,
}

impl Weapon {
    /// Ranged оружие с полным магазином
    pub fn ranged(id: u32, name: &str, damage: u32, max_ammo: u32, reload_time: f32, attack_range: f32) -> Self {
        Self {
            id,
            name: name.to_string(),
            damage,
            max_ammo,
            current_ammo: max_ammo,
            reload_time,
            attack_range,
            is_melee: false,
        }
    }

    /// Melee оружие (max_ammo = 1, range = 2)
    pub fn melee(id: u32, name: &str, damage: u32, reload_time: f32) -> Self {
        Self {
            id,
            name: name.to_string(),
            damage,
            max_ammo: 1,
            current_ammo: 1,
            reload_time,
            attack_range: DEFAULT_MELEE_RANGE,
            is_melee: true,
        }
    }

    /// Экипировать: независимая копия шаблона
    pub fn equip(&self) -> Weapon {
        self.clone()
    }

    pub fn is_full(&self) -> bool {
        self.current_ammo == self.max_ammo
    }
}
