//! Simulation module - the frame aggregate, the per-frame pipeline, and its Bevy host.

mod plugin;
mod snapshot;
mod state;
mod step;

pub use plugin::{begin_run, SimulationPlugin};
pub use snapshot::FrameSnapshot;
pub use state::{RunOutcome, RunProgress, SimulationState};
pub use step::{step_frame, COMPACT_INTERVAL};
