//! Player state: body, stats, frame timers, and derived controller states.

use bevy::math::Vec2;

use super::data::HeroTemplate;
use crate::combat::{AttackType, Health};
use crate::physics::Body;
use crate::world::GROUND_Y;

pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 36.0;
pub const SPAWN_X: f32 = 80.0;

pub const COYOTE_FRAMES: u32 = 8;
pub const JUMP_BUFFER_FRAMES: u32 = 6;
/// Per-frame vertical damping while rising with jump released.
pub const JUMP_CUT: f32 = 0.75;
pub const LAND_SQUASH_FRAMES: u32 = 8;
pub const JUMP_STRETCH_FRAMES: u32 = 3;

pub const DODGE_FRAMES: u32 = 12;
pub const DODGE_COOLDOWN: u32 = 90;
pub const DODGE_SPEED: f32 = 9.0;
pub const DASH_FRAMES: u32 = 8;
pub const DASH_COOLDOWN: u32 = 45;
pub const DASH_SPEED: f32 = 14.0;
pub const SHIELD_FRAMES: u32 = 90;
pub const SHIELD_COOLDOWN: u32 = 120;

pub const WALL_JUMP_VX: f32 = 6.0;
pub const WALL_JUMP_POWER: f32 = 0.9;

/// Level from which every hero can double jump.
pub const DOUBLE_JUMP_LEVEL: usize = 3;
/// Level from which every hero can dash.
pub const DASH_LEVEL: usize = 1;

/// Derived from the last collision pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementState {
    Grounded,
    Airborne,
    WallSliding { left: bool },
}

/// At most one action runs at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Charging(AttackType),
    AttackActive { attack_type: AttackType, charged: bool },
    DodgeRolling,
    Dashing,
    ShieldRaised,
}

/// Frame countdowns. All decrement by one per simulated frame and saturate at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerTimers {
    pub attack_active: u32,
    pub attack_cooldown: u32,
    pub special_cooldown: u32,
    pub hurt: u32,
    pub invincible: u32,
    pub coyote: u32,
    pub jump_buffer: u32,
    pub dodge_roll_active: u32,
    pub dodge_roll_cooldown: u32,
    pub dash_active: u32,
    pub dash_cooldown: u32,
    pub shield_active: u32,
    pub shield_cooldown: u32,
    pub land_squash: u32,
    pub jump_stretch: u32,
    /// Counts up while the attack button is held.
    pub attack_charge: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub hero: String,
    pub body: Body,
    pub facing: f32,
    pub health: Health,
    pub speed: f32,
    pub jump_power: f32,
    pub attack: i32,
    pub boss_bonus: i32,
    pub max_jumps: u32,
    pub jumps_left: u32,
    pub can_dash: bool,
    pub has_shield: bool,
    pub timers: PlayerTimers,
    pub grounded: bool,
    pub wall_slide_left: bool,
    pub wall_slide_right: bool,
    pub jump_held: bool,
    pub attack_type: AttackType,
    /// Type and charge of the swing in progress.
    pub swing: AttackType,
    pub charged_attack: bool,
    /// The running roll already produced its perfect dodge.
    pub perfect_dodge_spent: bool,
}

impl Player {
    /// Fresh player at the level start, with level-gated abilities resolved.
    pub fn new(hero: &HeroTemplate, level_index: usize) -> Self {
        let max_jumps = if level_index >= DOUBLE_JUMP_LEVEL {
            hero.max_jumps.max(2)
        } else {
            hero.max_jumps.max(1)
        };
        Self {
            hero: hero.id.clone(),
            body: Body::new(SPAWN_X, GROUND_Y - 40.0, PLAYER_WIDTH, PLAYER_HEIGHT),
            facing: 1.0,
            health: Health::new(hero.health),
            speed: hero.speed,
            jump_power: hero.jump,
            attack: hero.attack,
            boss_bonus: hero.boss_bonus,
            max_jumps,
            jumps_left: max_jumps,
            can_dash: hero.dash || level_index >= DASH_LEVEL,
            has_shield: hero.shield,
            timers: PlayerTimers::default(),
            grounded: false,
            wall_slide_left: false,
            wall_slide_right: false,
            jump_held: false,
            attack_type: AttackType::Fast,
            swing: AttackType::Fast,
            charged_attack: false,
            perfect_dodge_spent: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    pub fn is_dodging(&self) -> bool {
        self.timers.dodge_roll_active > 0
    }

    pub fn is_dashing(&self) -> bool {
        self.timers.dash_active > 0
    }

    /// Dodge and dash drive velocity directly and lock out other input.
    pub fn is_locked(&self) -> bool {
        self.is_dodging() || self.is_dashing()
    }

    pub fn shield_up(&self) -> bool {
        self.timers.shield_active > 0
    }

    pub fn movement_state(&self) -> MovementState {
        if self.grounded {
            MovementState::Grounded
        } else if self.wall_slide_left || self.wall_slide_right {
            MovementState::WallSliding { left: self.wall_slide_left }
        } else {
            MovementState::Airborne
        }
    }

    pub fn action_state(&self) -> ActionState {
        if self.is_dashing() {
            ActionState::Dashing
        } else if self.is_dodging() {
            ActionState::DodgeRolling
        } else if self.timers.attack_active > 0 {
            ActionState::AttackActive { attack_type: self.swing, charged: self.charged_attack }
        } else if self.timers.attack_charge > 0 {
            ActionState::Charging(self.attack_type)
        } else if self.shield_up() {
            ActionState::ShieldRaised
        } else {
            ActionState::Idle
        }
    }
}
