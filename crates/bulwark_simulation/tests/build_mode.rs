//! Build mode integration test
//!
//! Tab → выбор башни → подсветка тайла → постройка, занятый тайл, выход.

use bevy::prelude::*;
use bulwark_simulation::build::{BuildingSilhouette, FloorHighlight, HighlightMaterial};
use bulwark_simulation::*;

fn create_build_app() -> App {
    let mut config = GameConfig::default();
    config.spawners.clear();

    let mut app = create_headless_app_with_config(config);
    app.update();
    app
}

fn press(app: &mut App, action: impl FnOnce(&mut PlayerInput)) {
    action(&mut app.world_mut().resource_mut::<PlayerInput>());
}

fn aim_at(app: &mut App, point: Vec3) -> bevy::math::Ray3d {
    app.world()
        .resource::<CameraRig>()
        .ray_through(point)
        .expect("camera above floor")
}

fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query_filtered::<(), F>().iter(world).count()
}

fn controller(app: &App) -> BuildController {
    app.world().resource::<BuildController>().clone()
}

#[test]
fn test_toggle_opens_and_closes_build_mode() {
    let mut app = create_build_app();

    press(&mut app, |input| input.press_toggle_build());
    app.update();

    assert_eq!(controller(&app).state, BuildState::Open);
    assert_eq!(app.world().resource::<CameraRig>().mode, CameraMode::Builder);
    assert!(app.world().resource::<Hud>().build_panel_visible);
    assert_eq!(count::<With<FloorHighlight>>(&mut app), 1);

    press(&mut app, |input| input.press_toggle_build());
    app.update();

    assert_eq!(controller(&app).state, BuildState::Closed);
    assert_eq!(app.world().resource::<CameraRig>().mode, CameraMode::Shooter);
    assert!(!app.world().resource::<Hud>().build_panel_visible);
    assert_eq!(count::<With<FloorHighlight>>(&mut app), 0);
}

#[test]
fn test_build_tower_on_free_tile() {
    let mut app = create_build_app();
    let target = Vec3::new(3.5, 0.0, 3.5);

    press(&mut app, |input| input.press_toggle_build());
    app.update();

    let ray = aim_at(&mut app, target);
    press(&mut app, |input| {
        input.set_cursor_ray(ray);
        input.choose_building(0);
    });
    app.update();

    let state = controller(&app);
    assert_eq!(state.state, BuildState::BuildingSelected);
    assert_eq!(state.selected, Some(0));
    assert!(!state.blocked);
    assert!((state.highlight_position - Vec3::new(3.5, 0.1, 3.5)).length() < 1e-4);
    assert_eq!(count::<With<BuildingSilhouette>>(&mut app), 1);

    press(&mut app, |input| input.click(ray));
    app.update();

    let world = app.world_mut();
    let towers: Vec<(String, Vec3)> = world
        .query_filtered::<(&Name, &Transform), With<Tower>>()
        .iter(world)
        .map(|(name, transform)| (name.as_str().to_string(), transform.translation))
        .collect();
    assert_eq!(towers.len(), 1);
    assert_eq!(towers[0].0, "0_Tower");
    assert!((towers[0].1 - Vec3::new(3.5, 0.1, 3.5)).length() < 1e-4);

    let registry = app.world().resource::<GameRegistry>();
    assert_eq!(registry.placed_buildings().len(), 1);
    assert_eq!(registry.placed_buildings()[0].owner, 0);
    assert_eq!(registry.placed_buildings()[0].index, 0);
    assert_eq!(registry.placed_buildings()[0].building, 0);

    // Клик в build mode не стреляет
    let world = app.world_mut();
    let ammo = world
        .query_filtered::<&GunControl, With<Player>>()
        .single(world)
        .map(|gun| gun.current_ammo())
        .ok();
    assert_eq!(ammo, Some(10));
}

#[test]
fn test_cannot_build_on_occupied_tile() {
    let mut app = create_build_app();
    let target = Vec3::new(3.5, 0.0, 3.5);

    press(&mut app, |input| input.press_toggle_build());
    app.update();
    let ray = aim_at(&mut app, target);
    press(&mut app, |input| {
        input.set_cursor_ray(ray);
        input.choose_building(0);
    });
    app.update();
    press(&mut app, |input| input.click(ray));
    app.update();

    // Тот же тайл: теперь там башня
    press(&mut app, |input| input.click(ray));
    app.update();

    assert!(controller(&app).blocked);
    assert_eq!(count::<With<Tower>>(&mut app), 1);

    let world = app.world_mut();
    let material = world
        .query::<&FloorHighlight>()
        .single(world)
        .map(|highlight| highlight.material)
        .ok();
    assert_eq!(material, Some(HighlightMaterial::Blocked));
}

#[test]
fn test_tile_under_player_is_blocked() {
    let mut app = create_build_app();

    press(&mut app, |input| input.press_toggle_build());
    app.update();

    let ray = aim_at(&mut app, Vec3::new(0.5, 0.0, 0.5));
    press(&mut app, |input| input.set_cursor_ray(ray));
    app.update();

    assert!(controller(&app).blocked);
}

#[test]
fn test_choose_building_requires_open_panel() {
    let mut app = create_build_app();

    press(&mut app, |input| input.choose_building(0));
    app.update();

    assert_eq!(controller(&app).state, BuildState::Closed);
    assert_eq!(count::<With<BuildingSilhouette>>(&mut app), 0);
}

#[test]
fn test_choose_unknown_building_keeps_panel_open() {
    let mut app = create_build_app();

    press(&mut app, |input| input.press_toggle_build());
    app.update();
    press(&mut app, |input| input.choose_building(7));
    app.update();

    let state = controller(&app);
    assert_eq!(state.state, BuildState::Open);
    assert_eq!(state.selected, None);
}

#[test]
fn test_stop_building_clears_selection_and_preview() {
    let mut app = create_build_app();

    press(&mut app, |input| input.press_toggle_build());
    app.update();
    press(&mut app, |input| input.choose_building(0));
    app.update();
    assert_eq!(count::<With<BuildingSilhouette>>(&mut app), 1);

    press(&mut app, |input| input.press_toggle_build());
    app.update();

    let state = controller(&app);
    assert_eq!(state.state, BuildState::Closed);
    assert_eq!(state.selected, None);
    assert_eq!(count::<With<BuildingSilhouette>>(&mut app), 0);
    assert_eq!(count::<With<FloorHighlight>>(&mut app), 0);
}

/// Выбрать башню и кликнуть по тайлу (build mode уже открыт)
fn build_at(app: &mut App, point: Vec3) {
    let ray = aim_at(app, point);
    press(app, |input| {
        input.set_cursor_ray(ray);
        input.choose_building(0);
    });
    app.update();
    press(app, |input| input.click(ray));
    app.update();
}

#[test]
fn test_towers_named_by_scene_index() {
    let mut app = create_build_app();

    press(&mut app, |input| input.press_toggle_build());
    app.update();
    build_at(&mut app, Vec3::new(3.5, 0.0, 3.5));
    build_at(&mut app, Vec3::new(-3.5, 0.0, 3.5));

    let world = app.world_mut();
    let mut towers: Vec<(String, String)> = world
        .query_filtered::<(&Name, &HpLabel), With<Tower>>()
        .iter(world)
        .map(|(name, label)| (name.as_str().to_string(), label.id.clone()))
        .collect();
    towers.sort();
    assert_eq!(
        towers,
        vec![
            ("0_Tower".to_string(), "ID_0_Tower_HP".to_string()),
            ("1_Tower".to_string(), "ID_1_Tower_HP".to_string()),
        ]
    );

    let registry = app.world().resource::<GameRegistry>();
    let placed: Vec<(usize, usize)> = registry
        .placed_buildings()
        .iter()
        .map(|placed| (placed.index, placed.building))
        .collect();
    assert_eq!(placed, vec![(0, 0), (1, 0)]);
}

#[test]
fn test_choose_building_while_selected_is_noop() {
    let mut app = create_build_app();

    press(&mut app, |input| input.press_toggle_build());
    app.update();
    press(&mut app, |input| input.choose_building(0));
    app.update();
    let silhouette = controller(&app).silhouette;

    press(&mut app, |input| input.choose_building(0));
    app.update();

    let state = controller(&app);
    assert_eq!(state.state, BuildState::BuildingSelected);
    assert_eq!(state.selected, Some(0));
    assert_eq!(state.silhouette, silhouette);
    assert_eq!(count::<With<BuildingSilhouette>>(&mut app), 1);
}
