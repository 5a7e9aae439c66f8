//! Reload timers.

use bevy::prelude::*;

use crate::combat::gun::{GunControl, ReloadFinished};

/// Система: тик перезарядки всех GunControl (EndReload по таймеру)
pub fn tick_reloads(
    mut guns: Query<(Entity, &mut GunControl)>,
    time: Res<Time>,
    mut finished: EventWriter<ReloadFinished>,
) {
    let delta = time.delta_secs();

    for (entity, mut gun) in guns.iter_mut() {
        if !gun.is_reloading() {
            continue;
        }
        if gun.tick_reload(delta) {
            finished.write(ReloadFinished { entity });
        }
    }
}
