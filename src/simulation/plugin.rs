//! Simulation plugin - builds the run and drives it once per frame.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::snapshot::FrameSnapshot;
use super::state::{RunOutcome, SimulationState};
use super::step::step_frame;
use crate::core::{load_run_config, DeferredTransitions, GameState, RunCommand, RunConfig, SimEvent, SimSet};
use crate::player::{load_hero_registry, HeroRegistry, HeroTemplate, InputIntents};

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationState>()
            .init_resource::<FrameSnapshot>()

            // Read data files, then build the first level
            .add_systems(
                OnEnter(GameState::Loading),
                (load_run_config, load_hero_registry, begin_run).chain(),
            )

            .add_systems(
                Update,
                (step_simulation, clear_intent_presses).chain().in_set(SimSet::Step),
            )

            // Run control keeps working while paused or on the end screens
            .add_systems(
                Update,
                (handle_run_commands, tick_deferred_transitions, publish_frame)
                    .chain()
                    .in_set(SimSet::Publish),
            );
    }
}

/// Build the simulation from the loaded config and hero data.
pub fn begin_run(
    config: Res<RunConfig>,
    registry: Res<HeroRegistry>,
    mut state: ResMut<SimulationState>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let hero = match registry.require(&config.hero) {
        Ok(hero) => hero.clone(),
        Err(e) => {
            error!("{}; starting as the knight", e);
            HeroTemplate::default()
        }
    };
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!("Starting run as {} on level {}", hero.name, config.level_index);
    *state = SimulationState::new(hero, config.level_index, config.lives, rng);
    next_state.set(GameState::Playing);
}

fn step_simulation(mut state: ResMut<SimulationState>, intents: Res<InputIntents>) {
    step_frame(&mut state, &intents);
}

fn clear_intent_presses(mut intents: ResMut<InputIntents>) {
    intents.clear_presses();
}

fn handle_run_commands(
    mut commands: EventReader<RunCommand>,
    mut state: ResMut<SimulationState>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for command in commands.read() {
        state.reset_run(*command);
        next_state.set(GameState::Playing);
    }
}

/// Fire deferred transitions that came due. Stale ones are dropped by the state.
fn tick_deferred_transitions(
    time: Res<Time>,
    mut deferred: ResMut<DeferredTransitions>,
    mut state: ResMut<SimulationState>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (transition, generation) in deferred.tick(time.delta()) {
        match state.apply_transition(transition, generation) {
            Some(RunOutcome::GameOver) => next_state.set(GameState::GameOver),
            Some(RunOutcome::Victory) => next_state.set(GameState::Victory),
            Some(RunOutcome::Continue) | None => {}
        }
    }
}

/// Schedule requested transitions, republish events, and refresh the snapshot.
fn publish_frame(
    mut state: ResMut<SimulationState>,
    mut deferred: ResMut<DeferredTransitions>,
    mut writer: EventWriter<SimEvent>,
    mut snapshot: ResMut<FrameSnapshot>,
) {
    let generation = state.run.generation;
    for transition in state.take_transition_requests() {
        debug!("Scheduling {:?} in {:?}", transition, transition.delay());
        deferred.schedule(transition, generation);
    }
    let events = state.drain_events();
    writer.send_batch(events.iter().copied());
    *snapshot = FrameSnapshot::capture(&state, events);
}
