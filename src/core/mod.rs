//! Core game module - states, events, configuration, and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod deferred;
mod error;
mod events;
mod plugin;
mod states;

pub use config::{load_run_config, RunConfig, RUN_CONFIG_PATH};
pub use deferred::{DeferredTransitions, Transition};
pub use error::{read_ron, DataLoadError};
pub use events::*;
pub use plugin::{handle_pause_input, CorePlugin, SimSet};
pub use states::*;
