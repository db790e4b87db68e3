//! Core plugin that sets up run states, events, and frame ordering.

use bevy::prelude::*;

use super::config::RunConfig;
use super::deferred::DeferredTransitions;
use super::events::*;
use super::states::*;
use crate::player::InputIntents;

/// Frame phases, in order. Other plugins add their systems to these.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Gather intents and handle pause
    Input,
    /// Advance the simulation one frame (only while playing)
    Step,
    /// Republish events and refresh the snapshot
    Publish,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Run states (Loading, Playing, Paused, GameOver, Victory)
/// - Simulation events and run commands
/// - The Input -> Step -> Publish ordering
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize run states
            .init_state::<GameState>()

            // Register global events
            .add_event::<SimEvent>()
            .add_event::<RunCommand>()

            .init_resource::<RunConfig>()
            .init_resource::<DeferredTransitions>()
            .init_resource::<InputIntents>()

            .configure_sets(
                Update,
                (
                    SimSet::Input,
                    SimSet::Step.run_if(in_state(GameState::Playing)),
                    SimSet::Publish,
                )
                    .chain(),
            )

            // Pause/unpause from the pause intent
            .add_systems(Update, handle_pause_input.in_set(SimSet::Input))

            .add_systems(OnEnter(GameState::GameOver), announce_game_over)
            .add_systems(OnEnter(GameState::Victory), announce_victory);
    }
}

/// Toggle between Playing and Paused. Consumes the pause press.
pub fn handle_pause_input(
    mut intents: ResMut<InputIntents>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !intents.pause {
        return;
    }
    intents.pause = false;
    match current_state.get() {
        GameState::Playing => next_state.set(GameState::Paused),
        GameState::Paused => next_state.set(GameState::Playing),
        _ => {}
    }
}

fn announce_game_over() {
    info!("Game over");
}

fn announce_victory() {
    info!("Victory");
}
