//! Player module: маркер, ввод, стрельба и движение игрока

use bevy::prelude::*;

use crate::SimSet;

pub mod input;
pub mod player;
pub mod systems;

pub use input::PlayerInput;
pub use player::{spawn_player, Player};
pub use systems::{clear_frame_input, player_movement, player_quit, player_shoot};

/// Player Plugin
///
/// - SimSet::Input: player_quit
/// - SimSet::Player: player_shoot → player_movement
/// - SimSet::Cleanup: clear_frame_input (последней)
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>();

        app.add_systems(FixedUpdate, player_quit.in_set(SimSet::Input));
        app.add_systems(
            FixedUpdate,
            (player_shoot, player_movement).chain().in_set(SimSet::Player),
        );
        app.add_systems(
            FixedUpdate,
            clear_frame_input
                .in_set(SimSet::Cleanup)
                .after(crate::combat::systems::despawn_after_timeout),
        );
    }
}
