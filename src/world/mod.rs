//! World module - realms, level generation, and pickups.

mod builder;
mod collectibles;
mod data;

pub use builder::{generate, LevelCounts};
pub use collectibles::{update_collectibles, COIN_SCORE, COLLECT_RADIUS, MAGNET_RADIUS, MAGNET_SPEED};
pub use data::*;
