//! Events shared between the simulation and its collaborators.
//!
//! The simulation accumulates `SimEvent`s while stepping a frame, then the
//! host republishes them as Bevy events so audio and rendering can react
//! without reading simulation internals.

use bevy::prelude::*;

use crate::combat::AttackType;

/// Kinds of pickup a player can collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Coin,
    Heart,
    Scroll,
}

/// One-shot signals produced by a simulation frame.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    LevelStarted { level_index: usize },
    PlayerJumped,
    /// Landing faster than the squash threshold.
    PlayerLanded { impact: f32 },
    AttackSwung { attack_type: AttackType, charged: bool },
    HitLanded { crit: bool, charged: bool },
    EnemyKilled { stomp: bool },
    /// The last living non-boss enemy died.
    WaveCleared,
    PerfectDodge,
    ShieldRaised,
    PlayerHurt { damage: i32 },
    BossPhaseChanged,
    BossDefeated,
    PlayerDied,
    ItemCollected(ItemKind),
}

/// Player-initiated run control from menus.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCommand {
    /// Restart the current level with full lives.
    Retry,
    /// Abandon the run and return to the first level.
    Quit,
}
