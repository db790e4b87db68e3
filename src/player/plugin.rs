//! Player plugin - hero data and keyboard intents.

use bevy::prelude::*;

use super::data::HeroRegistry;
use super::input::{read_keyboard_intents, InputIntents};
use crate::core::{handle_pause_input, SimSet};

/// Player plugin - registers heroes and turns keys into intents.
///
/// The keyboard system only runs when an input plugin provides
/// `ButtonInput<KeyCode>`; headless hosts write `InputIntents` directly.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeroRegistry>()
            .init_resource::<InputIntents>()
            .add_systems(
                Update,
                read_keyboard_intents
                    .run_if(resource_exists::<ButtonInput<KeyCode>>)
                    .in_set(SimSet::Input)
                    .before(handle_pause_input),
            );
    }
}
