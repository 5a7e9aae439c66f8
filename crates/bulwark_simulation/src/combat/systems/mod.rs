//! Combat systems

pub mod damage;
pub mod reload;

#[cfg(test)]
mod gun_tests;

pub use damage::*;
pub use reload::*;
