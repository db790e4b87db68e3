//! Enemies module - walkers, flyers, archers, and the level boss.

mod ai;
mod boss;
mod components;

pub use ai::update_enemies;
pub use boss::*;
pub use components::*;
