//! Blade Quest - Headless entry point
//!
//! Runs the simulation at 60 Hz with a scripted pilot that walks right,
//! hops, and swings, logging every simulation event. Exits when the run
//! ends or after `BLADE_QUEST_FRAMES` frames (default 3600).

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use std::time::Duration;

use blade_quest::core::{GameState, SimEvent, SimSet};
use blade_quest::player::InputIntents;
use blade_quest::simulation::FrameSnapshot;
use blade_quest::BladeQuestPlugin;

const DEFAULT_FRAME_LIMIT: u64 = 3600;

#[derive(Resource)]
struct Autopilot {
    frames: u64,
    limit: u64,
}

fn main() {
    let limit = std::env::var("BLADE_QUEST_FRAMES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_FRAME_LIMIT);

    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))),
        )
        .add_plugins(LogPlugin::default())
        .add_plugins(StatesPlugin)

        // Our game plugin
        .add_plugins(BladeQuestPlugin)

        .insert_resource(Autopilot { frames: 0, limit })
        .add_systems(
            Update,
            drive_autopilot
                .in_set(SimSet::Input)
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(Update, (log_events, stop_when_done).after(SimSet::Publish))
        .run();
}

/// Walk right, jump every 45 frames, and tap attack every 20.
fn drive_autopilot(mut pilot: ResMut<Autopilot>, mut intents: ResMut<InputIntents>) {
    pilot.frames += 1;
    let f = pilot.frames;
    *intents = InputIntents {
        move_right: true,
        jump_pressed: f % 45 == 0,
        jump_held: f % 45 < 20,
        jump_released: f % 45 == 20,
        attack_held: f % 20 < 2,
        dodge: f % 300 == 150,
        ..default()
    };
}

fn log_events(mut events: EventReader<SimEvent>) {
    for event in events.read() {
        match event {
            SimEvent::PlayerLanded { .. } | SimEvent::PlayerJumped | SimEvent::AttackSwung { .. } => {
                debug!("{:?}", event)
            }
            _ => info!("{:?}", event),
        }
    }
}

fn stop_when_done(
    pilot: Res<Autopilot>,
    state: Res<State<GameState>>,
    snapshot: Res<FrameSnapshot>,
    mut exit: EventWriter<AppExit>,
) {
    let ended = matches!(state.get(), GameState::GameOver | GameState::Victory);
    if ended || pilot.frames >= pilot.limit {
        info!(
            "Stopping after {} frames: level {} ({}), score {}, lives {}",
            pilot.frames, snapshot.level_index, snapshot.level_name, snapshot.score, snapshot.lives
        );
        exit.send(AppExit::Success);
    }
}
