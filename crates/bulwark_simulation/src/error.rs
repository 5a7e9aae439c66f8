//! Ошибки симуляции
//!
//! Системы ECS не пробрасывают ошибки наружу: логируют и делают early return.
//! `SimError` возвращают library-функции (config, equip, выбор здания).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to read config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown weapon `{0}`")]
    UnknownWeapon(String),

    #[error("unknown building #{0}")]
    UnknownBuilding(usize),
}
