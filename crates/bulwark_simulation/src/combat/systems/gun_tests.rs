//! Tests for GunControl (shoot decisions, reload, equip).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::{GunControl, HitTarget, ShotOutcome, Weapon};
    use crate::registry::GameRegistry;
    use crate::spatial::{RayHit, MASK_PLAYER_SHOT};
    use crate::SimError;

    fn pistol() -> Weapon {
        Weapon::ranged(1, "Pistol", 15, 10, 2.0, 10.0)
    }

    fn hit_on(entity: Entity) -> RayHit {
        RayHit {
            entity,
            point: Vec3::new(0.0, 0.9, 4.5),
            distance: 4.5,
        }
    }

    #[test]
    fn test_fired_shot_consumes_one_round() {
        let mut gun = GunControl::with_weapon(pistol(), MASK_PLAYER_SHOT);
        let target = Entity::from_raw(7);

        let outcome = gun.resolve_shot(Some((hit_on(target), HitTarget::Spawned)));

        assert_eq!(
            outcome,
            ShotOutcome::Fired {
                hit: Some(target),
                point: Vec3::new(0.0, 0.9, 4.5),
                reload_started: false,
            }
        );
        assert_eq!(gun.current_ammo(), 9);
    }

    #[test]
    fn test_rejected_shots_consume_no_ammo() {
        let mut gun = GunControl::with_weapon(pistol(), MASK_PLAYER_SHOT);

        assert_eq!(gun.resolve_shot(None), ShotOutcome::OutOfRange);
        assert_eq!(
            gun.resolve_shot(Some((hit_on(Entity::from_raw(3)), HitTarget::NotSpawned))),
            ShotOutcome::TargetNotSpawned
        );
        assert_eq!(gun.current_ammo(), 10);
    }

    #[test]
    fn test_solid_hit_fires_without_damage_target() {
        let mut gun = GunControl::with_weapon(pistol(), MASK_PLAYER_SHOT);

        let outcome = gun.resolve_shot(Some((hit_on(Entity::from_raw(3)), HitTarget::Solid)));
        match outcome {
            ShotOutcome::Fired { hit, .. } => assert!(hit.is_none()),
            other => panic!("expected Fired, got {:?}", other),
        }
        assert_eq!(gun.current_ammo(), 9);
    }

    #[test]
    fn test_last_round_starts_reload_and_blocks_shooting() {
        let mut gun = GunControl::with_weapon(Weapon::ranged(2, "TowerArrow", 10, 1, 2.0, 50.0), MASK_PLAYER_SHOT);
        let target = Entity::from_raw(5);

        let outcome = gun.resolve_shot(Some((hit_on(target), HitTarget::Spawned)));
        assert!(matches!(outcome, ShotOutcome::Fired { reload_started: true, .. }));
        assert!(gun.is_reloading());
        assert_eq!(gun.current_ammo(), 0);

        assert_eq!(
            gun.resolve_shot(Some((hit_on(target), HitTarget::Spawned))),
            ShotOutcome::Reloading
        );
    }

    #[test]
    fn test_reload_refills_after_reload_time() {
        let mut gun = GunControl::with_weapon(pistol(), MASK_PLAYER_SHOT);
        gun.resolve_shot(Some((hit_on(Entity::from_raw(1)), HitTarget::Spawned)));

        assert!(gun.reload(2.0));
        // Повторный Reload во время перезарядки игнорируется
        assert!(!gun.reload(2.0));

        assert!(!gun.tick_reload(1.5));
        assert!(gun.is_reloading());
        assert!(gun.tick_reload(0.5));
        assert!(!gun.is_reloading());
        assert_eq!(gun.current_ammo(), 10);
    }

    #[test]
    fn test_reload_finishes_on_exact_tick() {
        let mut gun = GunControl::with_weapon(pistol(), MASK_PLAYER_SHOT);
        gun.resolve_shot(Some((hit_on(Entity::from_raw(1)), HitTarget::Spawned)));
        assert!(gun.reload(2.0));

        // 2 секунды при 60 Hz = ровно 120 тиков, без лишнего тика
        let delta = 1.0 / 60.0;
        let finished_at = (1..=121).find(|_| gun.tick_reload(delta));
        assert_eq!(finished_at, Some(120));
        assert_eq!(gun.current_ammo(), 10);
    }

    #[test]
    fn test_reload_with_full_magazine_is_noop() {
        let mut gun = GunControl::with_weapon(pistol(), MASK_PLAYER_SHOT);
        assert!(!gun.reload(2.0));
        assert!(!gun.is_reloading());
    }

    #[test]
    fn test_unarmed_gun_never_fires() {
        let mut gun = GunControl::new(MASK_PLAYER_SHOT);
        assert_eq!(
            gun.resolve_shot(Some((hit_on(Entity::from_raw(1)), HitTarget::Spawned))),
            ShotOutcome::Unarmed
        );
        assert!(!gun.reload(1.0));
    }

    #[test]
    fn test_equip_copies_registry_weapon() {
        let mut registry = GameRegistry::default();
        registry.register_weapon(pistol());

        let mut gun = GunControl::new(MASK_PLAYER_SHOT);
        gun.equip(&registry, "Pistol").expect("Pistol registered");
        assert_eq!(gun.current_gun(), Some("Pistol"));
        assert_eq!(gun.gun_id(), Some(1));

        gun.resolve_shot(Some((hit_on(Entity::from_raw(1)), HitTarget::Spawned)));
        assert_eq!(gun.current_ammo(), 9);
        // Шаблон в реестре не тронут
        assert_eq!(registry.find_weapon("Pistol").map(|w| w.current_ammo).ok(), Some(10));
    }

    #[test]
    fn test_equip_unknown_weapon_keeps_current() {
        let mut registry = GameRegistry::default();
        registry.register_weapon(pistol());

        let mut gun = GunControl::new(MASK_PLAYER_SHOT);
        gun.equip(&registry, "Pistol").expect("Pistol registered");

        let result = gun.equip(&registry, "Railgun");
        assert!(matches!(result, Err(SimError::UnknownWeapon(ref name)) if name == "Railgun"));
        assert_eq!(gun.current_gun(), Some("Pistol"));
    }

    #[test]
    fn test_set_range_overrides_weapon_range() {
        let mut gun = GunControl::with_weapon(Weapon::melee(0, "Claw", 5, 2.0), MASK_PLAYER_SHOT);
        gun.set_range(1.5);
        assert_eq!(gun.range(), 1.5);
    }
}
