//! GunControl — экипированное оружие, стрельба, перезарядка
//!
//! Стрельба = hitscan через `PhysicsWorld`. Результат выстрела — `ShotOutcome`,
//! побочные эффекты (урон, трассер, старт перезарядки) уходят events'ами
//! через `ShotWriters` и применяются в Resolve фазе.

use bevy::ecs::system::SystemParam;
use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::combat::aim::compute_shot_point_for_player;
use crate::combat::damage::{ShotHit, ShotTraced};
use crate::combat::weapon::Weapon;
use crate::components::{Health, Spawned};
use crate::registry::GameRegistry;
use crate::spatial::{PhysicsWorld, RayHit};
use crate::SimError;

/// Дальность прицельного выстрела игрока (метры)
pub const PLAYER_SHOT_RANGE: f32 = 100.0;

/// Остаток таймера перезарядки, который считается нулём (ошибка накопления f32 тиков)
const RELOAD_EPSILON: f32 = 1e-4;

/// Event: началась перезарядка
#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadStarted {
    pub entity: Entity,
}

/// Event: перезарядка закончилась, магазин полный
#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadFinished {
    pub entity: Entity,
}

/// Результат одного вызова Shoot/PlayerShoot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    /// Выстрел состоялся (патрон потрачен)
    Fired {
        /// Killable entity, получившая урон
        hit: Option<Entity>,
        /// Конец трассера
        point: Vec3,
        reload_started: bool,
    },
    /// Идёт перезарядка
    Reloading,
    /// Луч попал в killable, который ещё не заспавнен
    TargetNotSpawned,
    /// Луч ничего не задел в пределах дальности
    OutOfRange,
    /// Луч курсора не попал в пол
    NoAimPoint,
    /// Оружие не экипировано
    Unarmed,
}

impl ShotOutcome {
    pub fn is_fired(&self) -> bool {
        matches!(self, ShotOutcome::Fired { .. })
    }
}

/// Во что попал луч выстрела
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Killable и заспавнен
    Spawned,
    /// Killable, spawn-анимация не закончена
    NotSpawned,
    /// Не killable (стена, пол)
    Solid,
}

/// Query для классификации попаданий: Has<Spawned> у всех killable
pub type KillableQuery<'w, 's> = Query<'w, 's, Has<Spawned>, With<Health>>;

pub fn classify_hit(killables: &KillableQuery, entity: Entity) -> HitTarget {
    match killables.get(entity) {
        Ok(true) => HitTarget::Spawned,
        Ok(false) => HitTarget::NotSpawned,
        Err(_) => HitTarget::Solid,
    }
}

/// Event writers для эффектов выстрела
#[derive(SystemParam)]
pub struct ShotWriters<'w> {
    hits: EventWriter<'w, ShotHit>,
    traces: EventWriter<'w, ShotTraced>,
    reloads: EventWriter<'w, ReloadStarted>,
}

impl<'w> ShotWriters<'w> {
    /// Записать эффекты выстрела (только для `Fired`)
    pub fn record(&mut self, shooter: Entity, origin: Vec3, damage: u32, outcome: &ShotOutcome) {
        let ShotOutcome::Fired {
            hit,
            point,
            reload_started,
        } = *outcome
        else {
            return;
        };

        if let Some(target) = hit {
            self.hits.write(ShotHit {
                shooter,
                target,
                damage,
                point,
            });
        }
        self.traces.write(ShotTraced { from: origin, to: point });
        if reload_started {
            self.reloads.write(ReloadStarted { entity: shooter });
        }
    }
}

/// Контроллер оружия (игрок, монстр, башня)
#[derive(Component, Debug, Clone)]
pub struct GunControl {
    weapon: Option<Weapon>,
    /// Слои, которые ловит луч выстрела
    pub shot_mask: u32,
    /// Some(оставшееся время) пока идёт перезарядка
    reload_remaining: Option<f32>,
}

impl GunControl {
    pub fn new(shot_mask: u32) -> Self {
        Self {
            weapon: None,
            shot_mask,
            reload_remaining: None,
        }
    }

    pub fn with_weapon(weapon: Weapon, shot_mask: u32) -> Self {
        Self {
            weapon: Some(weapon),
            shot_mask,
            reload_remaining: None,
        }
    }

    /// Экипировать копию оружия из реестра (поиск по имени)
    ///
    /// Неизвестное имя → ошибка, текущее оружие не меняется.
    pub fn equip(&mut self, registry: &GameRegistry, name: &str) -> Result<(), SimError> {
        let template = registry.find_weapon(name)?;
        self.weapon = Some(template.equip());
        self.reload_remaining = None;
        Ok(())
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    pub fn current_gun(&self) -> Option<&str> {
        self.weapon.as_ref().map(|w| w.name.as_str())
    }

    pub fn gun_id(&self) -> Option<u32> {
        self.weapon.as_ref().map(|w| w.id)
    }

    pub fn damage(&self) -> u32 {
        self.weapon.as_ref().map_or(0, |w| w.damage)
    }

    pub fn range(&self) -> f32 {
        self.weapon.as_ref().map_or(0.0, |w| w.attack_range)
    }

    /// Переопределить дальность экипированного оружия (монстры: = attack range)
    pub fn set_range(&mut self, range: f32) {
        if let Some(weapon) = self.weapon.as_mut() {
            weapon.attack_range = range;
        }
    }

    pub fn current_ammo(&self) -> u32 {
        self.weapon.as_ref().map_or(0, |w| w.current_ammo)
    }

    pub fn max_ammo(&self) -> u32 {
        self.weapon.as_ref().map_or(0, |w| w.max_ammo)
    }

    pub fn reload_time(&self) -> f32 {
        self.weapon.as_ref().map_or(0.0, |w| w.reload_time)
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_remaining.is_some()
    }

    /// "c/m" для HUD
    pub fn ammo_label(&self) -> String {
        format!("{}/{}", self.current_ammo(), self.max_ammo())
    }

    /// Начать перезарядку на `time` секунд
    ///
    /// No-op (false) если уже перезаряжается, магазин полный или нет оружия.
    pub fn reload(&mut self, time: f32) -> bool {
        if self.is_reloading() {
            return false;
        }
        match self.weapon.as_ref() {
            Some(weapon) if !weapon.is_full() => {
                self.reload_remaining = Some(time.max(0.0));
                true
            }
            _ => false,
        }
    }

    /// Тик таймера перезарядки. true если перезарядка закончилась (EndReload).
    pub fn tick_reload(&mut self, delta: f32) -> bool {
        let Some(remaining) = self.reload_remaining else {
            return false;
        };

        let remaining = remaining - delta;
        if remaining > RELOAD_EPSILON {
            self.reload_remaining = Some(remaining);
            return false;
        }

        self.reload_remaining = None;
        if let Some(weapon) = self.weapon.as_mut() {
            weapon.current_ammo = weapon.max_ammo;
        }
        true
    }

    /// Потратить патрон. true если магазин опустел и началась перезарядка.
    fn consume_round(&mut self) -> bool {
        let Some(weapon) = self.weapon.as_mut() else {
            return false;
        };
        weapon.current_ammo = weapon.current_ammo.saturating_sub(1);
        if weapon.current_ammo == 0 {
            let time = weapon.reload_time;
            return self.reload(time);
        }
        false
    }

    /// Предусловия выстрела (оружие есть, не перезаряжается)
    fn ready(&self) -> Result<(), ShotOutcome> {
        if self.weapon.is_none() {
            return Err(ShotOutcome::Unarmed);
        }
        if self.is_reloading() {
            return Err(ShotOutcome::Reloading);
        }
        Ok(())
    }

    /// Shoot: решение по результату raycast'а к цели
    ///
    /// `hit` = ближайшее попадание луча (в пределах дальности, по shot_mask).
    pub fn resolve_shot(&mut self, hit: Option<(RayHit, HitTarget)>) -> ShotOutcome {
        if let Err(outcome) = self.ready() {
            return outcome;
        }
        let Some((hit, target)) = hit else {
            return ShotOutcome::OutOfRange;
        };
        if target == HitTarget::NotSpawned {
            return ShotOutcome::TargetNotSpawned;
        }

        let reload_started = self.consume_round();
        ShotOutcome::Fired {
            hit: (target == HitTarget::Spawned).then_some(hit.entity),
            point: hit.point,
            reload_started,
        }
    }

    /// Shoot из `origin` в направлении `target` (монстры, башни)
    pub fn shoot(
        &mut self,
        shooter: Entity,
        origin: Vec3,
        target: Vec3,
        physics: &PhysicsWorld,
        killables: &KillableQuery,
        writers: &mut ShotWriters,
    ) -> ShotOutcome {
        if let Err(outcome) = self.ready() {
            return outcome;
        }
        let Ok(direction) = Dir3::new(target - origin) else {
            return ShotOutcome::OutOfRange;
        };

        let ray = Ray3d::new(origin, direction);
        let hit = physics
            .raycast(ray, self.range(), self.shot_mask)
            .map(|hit| (hit, classify_hit(killables, hit.entity)));

        let outcome = self.resolve_shot(hit);
        writers.record(shooter, origin, self.damage(), &outcome);
        outcome
    }

    /// PlayerShoot: выстрел игрока по лучу курсора
    ///
    /// Точка прицеливания = пересечение луча курсора с высотой `origin.y`.
    /// Урон получают все killable (не заспавненные урон игнорируют сами).
    pub fn player_shoot(
        &mut self,
        shooter: Entity,
        origin: Vec3,
        cursor_ray: Ray3d,
        physics: &PhysicsWorld,
        killables: &KillableQuery,
        writers: &mut ShotWriters,
    ) -> ShotOutcome {
        if let Err(outcome) = self.ready() {
            return outcome;
        }

        // Ближайший пол под курсором
        let Some(floor_hit) = physics.raycast_floor_tile(cursor_ray) else {
            return ShotOutcome::NoAimPoint;
        };
        let Some(aim_point) = compute_shot_point_for_player(origin.y, cursor_ray.origin, floor_hit.point) else {
            return ShotOutcome::NoAimPoint;
        };
        let Ok(direction) = Dir3::new(aim_point - origin) else {
            return ShotOutcome::NoAimPoint;
        };

        let ray = Ray3d::new(origin, direction);
        let (hit, point) = match physics.raycast(ray, PLAYER_SHOT_RANGE, self.shot_mask) {
            Some(hit) => {
                let target = match classify_hit(killables, hit.entity) {
                    HitTarget::Solid => None,
                    HitTarget::Spawned | HitTarget::NotSpawned => Some(hit.entity),
                };
                (target, hit.point)
            }
            None => {
                // Промах: трассер по горизонтали на 100 метров
                let flat = Vec3::new(direction.x, 0.0, direction.z) * PLAYER_SHOT_RANGE;
                (None, origin + flat)
            }
        };

        let reload_started = self.consume_round();
        let outcome = ShotOutcome::Fired {
            hit,
            point,
            reload_started,
        };
        writers.record(shooter, origin, self.damage(), &outcome);
        outcome
    }
}
