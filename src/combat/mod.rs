//! Combat module - attack profiles, damage rules, and hit resolution.

mod components;
mod resolver;

pub use components::*;
pub use resolver::{
    hurt_player, player_death_burst, resolve_player_contacts, resolve_sword_hits, sword_box, ContactOutcome,
    ENEMY_HIT_SCORE, ENEMY_KILL_SCORE, STOMP_BAND, STOMP_BOUNCE_VY,
};
