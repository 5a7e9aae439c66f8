//! Build mode systems
//!
//! Порядок внутри тика:
//! 1. build_toggle — Tab: StartBuilding / StopBuilding
//! 2. build_choose — кнопка здания: ChooseBuilding
//! 3. build_locate_highlight — HighlightFloor (позиция + blocked)
//! 4. build_sync_preview — подсветка и силуэт следуют за позицией
//! 5. build_place — ЛКМ при выбранном здании: Build

use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::components::{Dead, PrefabPath};
use crate::config::GameConfig;
use crate::player::{Player, PlayerInput};
use crate::registry::GameRegistry;
use crate::spatial::{Collider, PhysicsWorld, LAYER_PREVIEW, MASK_BUILD_CHECK};
use crate::tower::tower_bundle;
use crate::ui::Hud;

use super::components::*;

/// Владелец зданий игрока
pub const PLAYER_OWNER_ID: u32 = 0;

/// Система: Tab → ToggleBuilding
///
/// Мертвый игрок build mode не переключает.
pub fn build_toggle(
    mut commands: Commands,
    input: Res<PlayerInput>,
    mut controller: ResMut<BuildController>,
    mut camera: ResMut<CameraRig>,
    mut hud: ResMut<Hud>,
    config: Res<GameConfig>,
    players: Query<(), (With<Player>, Without<Dead>)>,
) {
    if !input.toggle_build || players.is_empty() {
        return;
    }

    if controller.state == BuildState::Closed {
        start_building(&mut commands, &mut controller, &mut camera, &mut hud, config.level.tile_size);
    } else {
        stop_building(&mut commands, &mut controller, &mut camera, &mut hud);
    }
}

fn start_building(
    commands: &mut Commands,
    controller: &mut BuildController,
    camera: &mut CameraRig,
    hud: &mut Hud,
    tile_size: f32,
) {
    controller.state = BuildState::Open;
    controller.highlight_position = Vec3::Y * HIGHLIGHT_HEIGHT;
    controller.blocked = false;
    camera.change_to_builder();
    hud.build_panel_visible = true;

    let half = tile_size * HIGHLIGHT_FOOTPRINT * 0.5;
    let highlight = commands
        .spawn((
            FloorHighlight::default(),
            Name::new("FloorHighlight"),
            Transform::from_translation(controller.highlight_position),
            Collider::cuboid(Vec3::new(half, HIGHLIGHT_HALF_HEIGHT, half), LAYER_PREVIEW).as_trigger(),
            PrefabPath::new("prefabs/FloorHighlight"),
        ))
        .id();
    controller.highlight = Some(highlight);

    crate::log_info("Build mode started.");
}

fn stop_building(commands: &mut Commands, controller: &mut BuildController, camera: &mut CameraRig, hud: &mut Hud) {
    controller.state = BuildState::Closed;
    controller.selected = None;
    camera.change_to_shooter();
    hud.build_panel_visible = false;

    for entity in [controller.highlight.take(), controller.silhouette.take()].into_iter().flatten() {
        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.despawn();
        }
    }

    crate::log_info("Build mode stopped.");
}

/// Система: ChooseBuilding(index)
pub fn build_choose(
    mut commands: Commands,
    input: Res<PlayerInput>,
    mut controller: ResMut<BuildController>,
    registry: Res<GameRegistry>,
) {
    let Some(index) = input.choose_building else {
        return;
    };

    match controller.state {
        BuildState::Closed => {
            crate::log_warning(&format!("ChooseBuilding({}) ignored: build mode is closed", index));
        }
        BuildState::BuildingSelected => {}
        BuildState::Open => {
            let building = match registry.building(index) {
                Ok(building) => building,
                Err(err) => {
                    crate::log_error(&format!("ChooseBuilding failed: {}", err));
                    return;
                }
            };

            let silhouette = commands
                .spawn((
                    BuildingSilhouette { building: index },
                    Name::new(format!("{}_Silhouette", building.name)),
                    Transform::from_translation(controller.highlight_position),
                    building.silhouette.clone(),
                ))
                .id();

            controller.silhouette = Some(silhouette);
            controller.selected = Some(index);
            controller.state = BuildState::BuildingSelected;
            crate::log(&format!("🏗️ Selected building {} ({})", index, building.name));
        }
    }
}

/// Система: HighlightFloor(cursor)
///
/// Подсветка прыгает на тайл под курсором. blocked = любой не-trigger
/// коллайдер (игрок, монстр, здание, окружение) в footprint'е подсветки.
pub fn build_locate_highlight(
    input: Res<PlayerInput>,
    mut controller: ResMut<BuildController>,
    physics: PhysicsWorld,
    config: Res<GameConfig>,
) {
    if !controller.is_open() {
        return;
    }
    let Some(cursor_ray) = input.cursor_ray else {
        return;
    };
    let Some(tile_hit) = physics.raycast_floor_tile(cursor_ray) else {
        return;
    };
    let Some((tile_position, _)) = physics.collider(tile_hit.entity) else {
        return;
    };

    let position = tile_position + Vec3::Y * HIGHLIGHT_HEIGHT;
    let half = config.level.tile_size * HIGHLIGHT_FOOTPRINT * 0.5;
    let overlapping = physics.overlap_box(
        position,
        Vec3::new(half, HIGHLIGHT_HALF_HEIGHT, half),
        MASK_BUILD_CHECK,
        controller.highlight,
    );

    controller.highlight_position = position;
    controller.blocked = !overlapping.is_empty();
}

/// Система: preview entity следуют за позицией подсветки
pub fn build_sync_preview(
    controller: Res<BuildController>,
    mut highlights: Query<(&mut Transform, &mut FloorHighlight)>,
    mut silhouettes: Query<&mut Transform, (With<BuildingSilhouette>, Without<FloorHighlight>)>,
) {
    if !controller.is_open() {
        return;
    }

    let material = if controller.blocked {
        HighlightMaterial::Blocked
    } else {
        HighlightMaterial::Free
    };

    for (mut transform, mut highlight) in highlights.iter_mut() {
        transform.translation = controller.highlight_position;
        if highlight.material != material {
            highlight.material = material;
        }
    }

    if controller.state == BuildState::BuildingSelected {
        for mut transform in silhouettes.iter_mut() {
            transform.translation = controller.highlight_position;
        }
    }
}

/// Система: ЛКМ в BuildingSelected → Build
pub fn build_place(
    mut commands: Commands,
    input: Res<PlayerInput>,
    controller: Res<BuildController>,
    mut registry: ResMut<GameRegistry>,
) {
    if !input.primary_click || controller.state != BuildState::BuildingSelected {
        return;
    }
    let Some(index) = controller.selected else {
        return;
    };

    if controller.blocked {
        crate::log_warning("CAN'T BUILD THERE!");
        return;
    }

    let building = match registry.building(index) {
        Ok(building) => building.clone(),
        Err(err) => {
            crate::log_error(&format!("Build failed: {}", err));
            return;
        }
    };

    // Имя башни = индекс в сцене (BuildingInScene)
    let position = controller.highlight_position;
    let entity = commands.spawn_empty().id();
    let scene_index = registry.register_building_in_scene(index, PLAYER_OWNER_ID, entity, position);
    let name = format!("{}_{}", scene_index, building.prefab.short_name());
    commands
        .entity(entity)
        .insert(tower_bundle(&building, &registry, position, name.clone()));

    crate::log(&format!("🏗️ Built {} at {:?}", name, position));
}
