//! Discrete input intents consumed by the simulation each frame.

use bevy::prelude::*;

use crate::combat::AttackType;

/// What the player asked for this frame.
///
/// `jump_pressed` and `jump_released` are edges; everything else is level
/// state except `select_attack`, `dodge`, `dash`, `shield` and `pause`,
/// which are one-shot presses.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputIntents {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub jump_released: bool,
    pub attack_held: bool,
    pub select_attack: Option<AttackType>,
    pub dodge: bool,
    pub dash: bool,
    pub shield: bool,
    pub pause: bool,
}

impl InputIntents {
    /// Clear one-shot presses after they have been consumed.
    pub fn clear_presses(&mut self) {
        self.jump_pressed = false;
        self.jump_released = false;
        self.select_attack = None;
        self.dodge = false;
        self.dash = false;
        self.shield = false;
    }
}

const LEFT: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const JUMP: [KeyCode; 3] = [KeyCode::KeyW, KeyCode::ArrowUp, KeyCode::Space];
const ATTACK: [KeyCode; 2] = [KeyCode::KeyZ, KeyCode::KeyJ];
const DODGE: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::ShiftRight];
const DASH: [KeyCode; 2] = [KeyCode::KeyC, KeyCode::KeyL];
const SHIELD: [KeyCode; 2] = [KeyCode::KeyX, KeyCode::KeyK];

/// Translate keyboard state into intents.
pub fn read_keyboard_intents(keyboard: Res<ButtonInput<KeyCode>>, mut intents: ResMut<InputIntents>) {
    let selected = [
        (KeyCode::Digit1, AttackType::Fast),
        (KeyCode::Digit2, AttackType::Slow),
        (KeyCode::Digit3, AttackType::Special),
    ]
    .into_iter()
    .find(|(key, _)| keyboard.just_pressed(*key))
    .map(|(_, attack_type)| attack_type);

    *intents = InputIntents {
        move_left: keyboard.any_pressed(LEFT),
        move_right: keyboard.any_pressed(RIGHT),
        jump_pressed: keyboard.any_just_pressed(JUMP),
        jump_held: keyboard.any_pressed(JUMP),
        jump_released: keyboard.any_just_released(JUMP),
        attack_held: keyboard.any_pressed(ATTACK),
        select_attack: selected,
        dodge: keyboard.any_just_pressed(DODGE),
        dash: keyboard.any_just_pressed(DASH),
        shield: keyboard.any_just_pressed(SHIELD),
        pause: keyboard.just_pressed(KeyCode::Escape),
    };
}
