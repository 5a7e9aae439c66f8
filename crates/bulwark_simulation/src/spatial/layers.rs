//! Collision Layers Constants
//!
//! ## Архитектура:
//! - **Layer (битовая маска):** на каком слое находится collider (ровно один бит)
//! - **Mask (битовая маска):** какие слои видит raycast / overlap
//!
//! ## Layers:
//! - Layer 1 (0b1 = 1): Floor tiles
//! - Layer 2 (0b10 = 2): Player
//! - Layer 3 (0b100 = 4): Enemies (монстры)
//! - Layer 4 (0b1000 = 8): Buildings (башни)
//! - Layer 5 (0b10000 = 16): Environment (стены, препятствия)
//! - Layer 6 (0b100000 = 32): Preview (floor highlight, силуэт здания)

// ============================================================================
// Layer Битовые Маски
// ============================================================================

pub const LAYER_FLOOR: u32 = 0b1;

pub const LAYER_PLAYER: u32 = 0b10;

pub const LAYER_ENEMY: u32 = 0b100;

pub const LAYER_BUILDING: u32 = 0b1000;

pub const LAYER_ENVIRONMENT: u32 = 0b10000;

pub const LAYER_PREVIEW: u32 = 0b100000;

// ============================================================================
// Mask Битовые Маски
// ============================================================================

/// Выстрел игрока: монстры + препятствия
pub const MASK_PLAYER_SHOT: u32 = LAYER_ENEMY | LAYER_ENVIRONMENT;

/// Удар монстра: игрок + здания
pub const MASK_ENEMY_SHOT: u32 = LAYER_PLAYER | LAYER_BUILDING;

/// Выстрел башни: только монстры
pub const MASK_TOWER_SHOT: u32 = LAYER_ENEMY;

/// Aggro сфера башни
pub const MASK_TOWER_AGGRO: u32 = LAYER_ENEMY;

/// Проверка свободного места под спавн монстра
pub const MASK_SPAWN_CHECK: u32 = LAYER_PLAYER | LAYER_ENEMY | LAYER_BUILDING | LAYER_ENVIRONMENT;

/// Проверка занятости тайла под строительство
pub const MASK_BUILD_CHECK: u32 = LAYER_PLAYER | LAYER_ENEMY | LAYER_BUILDING | LAYER_ENVIRONMENT;
