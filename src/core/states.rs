//! Game state definitions that control the overall flow of a run.
//!
//! The simulation only steps in `Playing`. Deferred transitions keep
//! ticking in every state, so pausing delays nothing that was scheduled.

use bevy::prelude::*;

/// Main run states.
///
/// - Start in `Loading` to read data files and build the first level
/// - `Playing` steps the simulation once per frame
/// - `Paused` freezes every simulation timer and the frame counter
/// - `GameOver` when the last life is lost
/// - `Victory` when the final boss falls
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Reading data files and generating the first level
    #[default]
    Loading,
    /// Active gameplay
    Playing,
    /// Gameplay frozen, world still visible
    Paused,
    /// No lives left
    GameOver,
    /// Every realm cleared
    Victory,
}
