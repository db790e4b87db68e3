//! Player module - hero templates, input intents, and the movement/action controller.

mod components;
mod data;
mod input;
mod movement;
mod plugin;

pub use components::*;
pub use data::{builtin_heroes, load_hero_registry, HeroRegistry, HeroTemplate, HEROES_PATH};
pub use input::{read_keyboard_intents, InputIntents};
pub use movement::{apply_intents, move_player, tick_timers};
pub use plugin::PlayerPlugin;
