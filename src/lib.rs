//! Blade Quest - the simulation core of a side-scrolling action platformer in Bevy.
//!
//! Ten procedurally built realms, each ending in a boss. This crate owns the
//! gameplay: rendering and audio read `FrameSnapshot` and `SimEvent`s and
//! never touch simulation state.
//!
//! # Architecture
//!
//! - **Core**: Run states, events, configuration, deferred transitions
//! - **Player**: Hero data, input intents, the movement/action controller
//! - **Physics**: Boxes, integration, platform contact
//! - **Combat**: Attack profiles, damage rules, hit resolution
//! - **Enemies**: Enemy behavior and the boss state machine
//! - **World**: Realm themes, level generation, pickups
//! - **Effects**: Shake, hit-stop, slow motion, particles, camera
//! - **Simulation**: The frame aggregate and the per-frame pipeline

pub mod combat;
pub mod core;
pub mod effects;
pub mod enemies;
pub mod physics;
pub mod player;
pub mod simulation;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct BladeQuestPlugin;

impl Plugin for BladeQuestPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Hero data and keyboard intents
            .add_plugins(player::PlayerPlugin)

            // Level generation, stepping, and publishing
            .add_plugins(simulation::SimulationPlugin);
    }
}
