//! Read-only view of a frame for rendering, audio, and the HUD.

use bevy::prelude::*;

use super::state::SimulationState;
use crate::core::SimEvent;
use crate::effects::{CameraFollow, Combo, DamageNumber, Flashes, Particle};
use crate::enemies::{Boss, Enemy};
use crate::player::{ActionState, MovementState, Player};
use crate::world::{Collectible, Hazard, Platform, LORE};

/// Copied out of `SimulationState` after every simulated frame.
#[derive(Resource, Clone, Debug, Default)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub player: Option<Player>,
    pub movement: Option<MovementState>,
    pub action: Option<ActionState>,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub platforms: Vec<Platform>,
    pub hazards: Vec<Hazard>,
    pub collectibles: Vec<Collectible>,
    pub particles: Vec<Particle>,
    pub damage_numbers: Vec<DamageNumber>,
    pub shake_offset: Vec2,
    pub camera: CameraFollow,
    pub time_scale: f32,
    pub hit_stop: bool,
    pub combo: Combo,
    pub flashes: Flashes,
    pub score: u64,
    pub lives: u32,
    pub level_index: usize,
    pub level_name: &'static str,
    pub boss_name: &'static str,
    pub lore: Option<&'static str>,
    /// Events produced by the frame this snapshot describes.
    pub events: Vec<SimEvent>,
}

impl FrameSnapshot {
    pub fn capture(state: &SimulationState, events: Vec<SimEvent>) -> Self {
        let fx = &state.effects;
        Self {
            frame: state.frame,
            player: Some(state.player.clone()),
            movement: Some(state.player.movement_state()),
            action: Some(state.player.action_state()),
            enemies: state.level.enemies.iter().filter(|e| e.alive).cloned().collect(),
            boss: state.level.boss.alive.then(|| state.level.boss.clone()),
            platforms: state.level.platforms.clone(),
            hazards: state.level.hazards.clone(),
            collectibles: state.level.collectibles.clone(),
            particles: fx.particles.iter().copied().collect(),
            damage_numbers: fx.damage_numbers.clone(),
            shake_offset: fx.shake.offset(),
            camera: fx.camera,
            time_scale: fx.time_scale.scale,
            hit_stop: fx.hit_stop.is_active(),
            combo: fx.combo,
            flashes: fx.flashes,
            score: state.run.score,
            lives: state.run.lives,
            level_index: state.run.level_index,
            level_name: state.level.theme.name,
            boss_name: state.level.boss.name,
            lore: state.last_scroll.and_then(|i| LORE.get(i).copied()),
            events,
        }
    }
}
