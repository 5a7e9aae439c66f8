//! Player systems: стрельба, движение, выход

use bevy::prelude::*;

use crate::build::{BuildController, BuildState};
use crate::combat::{GunControl, KillableQuery, ShotOutcome, ShotWriters};
use crate::components::{Dead, MovementSpeed};
use crate::spatial::PhysicsWorld;
use crate::ui::Hud;

use super::input::PlayerInput;
use super::player::Player;

/// Система: Escape → выход из приложения
pub fn player_quit(input: Res<PlayerInput>, mut exit: EventWriter<AppExit>) {
    if input.quit {
        crate::log_info("Quit requested");
        exit.write(AppExit::Success);
    }
}

/// Система: клик ЛКМ вне build mode → PlayerShoot
pub fn player_shoot(
    input: Res<PlayerInput>,
    build: Res<BuildController>,
    mut players: Query<(Entity, &Transform, &mut GunControl), (With<Player>, Without<Dead>)>,
    physics: PhysicsWorld,
    killables: KillableQuery,
    mut writers: ShotWriters,
    mut hud: ResMut<Hud>,
) {
    if !input.primary_click || build.state != BuildState::Closed {
        return;
    }
    let Some(cursor_ray) = input.cursor_ray else {
        return;
    };

    for (entity, transform, mut gun) in players.iter_mut() {
        let outcome = gun.player_shoot(
            entity,
            transform.translation,
            cursor_ray,
            &physics,
            &killables,
            &mut writers,
        );

        if let ShotOutcome::Fired { hit, .. } = outcome {
            hud.set_ammo(&gun);
            if let Some(target) = hit {
                crate::log(&format!("🔫 Player hit {:?}", target));
            }
        }
    }
}

/// Система: движение игрока по осям ввода (normalized × speed × dt)
pub fn player_movement(
    input: Res<PlayerInput>,
    mut players: Query<(&mut Transform, &MovementSpeed), (With<Player>, Without<Dead>)>,
    time: Res<Time>,
) {
    let direction = Vec3::new(input.movement.x, 0.0, input.movement.y).normalize_or_zero();
    if direction == Vec3::ZERO {
        return;
    }

    let delta = time.delta_secs();
    for (mut transform, speed) in players.iter_mut() {
        transform.translation += direction * speed.speed * delta;
    }
}

/// Система: сброс одноразовых нажатий в конце тика
pub fn clear_frame_input(mut input: ResMut<PlayerInput>) {
    input.end_frame();
}
