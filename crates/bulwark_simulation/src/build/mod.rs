//! Build module: build mode (панель, подсветка тайла, силуэт, постройка башен)

use bevy::prelude::*;

use crate::SimSet;

pub mod components;
pub mod systems;

pub use components::{
    BuildController, BuildState, BuildingSilhouette, FloorHighlight, HighlightMaterial, HIGHLIGHT_HEIGHT,
};
pub use systems::{
    build_choose, build_locate_highlight, build_place, build_sync_preview, build_toggle, PLAYER_OWNER_ID,
};

/// Build Plugin
///
/// - SimSet::Input: build_toggle → build_choose
/// - SimSet::Build: build_locate_highlight → build_sync_preview → build_place
pub struct BuildPlugin;

impl Plugin for BuildPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BuildController>();

        app.add_systems(
            FixedUpdate,
            (build_toggle, build_choose)
                .chain()
                .in_set(SimSet::Input)
                .after(crate::player::player_quit),
        );
        app.add_systems(
            FixedUpdate,
            (build_locate_highlight, build_sync_preview, build_place)
                .chain()
                .in_set(SimSet::Build),
        );
    }
}
