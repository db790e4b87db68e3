//! Combat data: health pools, attack profiles, and the damage formula.

use serde::{Deserialize, Serialize};

/// Probability that a sword hit is critical.
pub const CRIT_CHANCE: f64 = 0.15;
/// Frames an attack button must be held for a charged swing.
pub const CHARGE_THRESHOLD: u32 = 20;
/// Extra cooldown added after a charged swing.
pub const CHARGED_COOLDOWN_EXTRA: u32 = 15;
/// Frames the special gauge takes to refill.
pub const SPECIAL_GAUGE_FRAMES: u32 = 300;

pub const HITSTOP_ENEMY: u32 = 4;
pub const HITSTOP_BOSS: u32 = 6;
pub const HITSTOP_CRIT_EXTRA: u32 = 2;
pub const HITSTOP_CHARGED_EXTRA: u32 = 2;

/// Hit-stun applied to an enemy or boss struck by the sword.
pub const TARGET_HIT_STUN: u32 = 10;
/// Horizontal knockback given to a struck enemy.
pub const ENEMY_KNOCKBACK: f32 = 5.0;

pub const PLAYER_HURT_FRAMES: u32 = 20;
pub const PLAYER_INVINCIBLE_FRAMES: u32 = 60;

/// Frames the combo counter survives without a new hit.
pub const COMBO_WINDOW: u32 = 90;

/// Hit points with a fixed ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub maximum: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, maximum: max }
    }

    /// Subtract damage; dead pools are left untouched. Returns the amount applied.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if self.is_dead() || amount <= 0 {
            return 0;
        }
        self.current -= amount;
        amount
    }

    /// Dead entities stay dead; healing them does nothing.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.is_dead() {
            return 0;
        }
        let actual = amount.min(self.maximum - self.current).max(0);
        self.current += actual;
        actual
    }

    pub fn kill(&mut self) {
        self.current = self.current.min(0);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn fraction(&self) -> f32 {
        if self.maximum <= 0 {
            return 0.0;
        }
        self.current.max(0) as f32 / self.maximum as f32
    }
}

/// The three sword swings a player can select between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    #[default]
    Fast,
    Slow,
    Special,
}

/// Timing and reach of one attack type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackProfile {
    pub multiplier: f32,
    /// Frames the swing stays active.
    pub active_frames: u32,
    /// Value of the active countdown on which the hitbox is tested.
    pub hit_frame: u32,
    pub cooldown: u32,
    /// Width of the sword hitbox.
    pub reach: f32,
}

impl AttackType {
    pub fn profile(self) -> AttackProfile {
        match self {
            AttackType::Fast => AttackProfile {
                multiplier: 0.7,
                active_frames: 12,
                hit_frame: 11,
                cooldown: 14,
                reach: 28.0,
            },
            AttackType::Slow => AttackProfile {
                multiplier: 1.5,
                active_frames: 20,
                hit_frame: 14,
                cooldown: 30,
                reach: 40.0,
            },
            AttackType::Special => AttackProfile {
                multiplier: 2.5,
                active_frames: 24,
                hit_frame: 16,
                cooldown: 40,
                reach: 64.0,
            },
        }
    }

    pub fn can_charge(self) -> bool {
        !matches!(self, AttackType::Special)
    }

    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(AttackType::Fast),
            2 => Some(AttackType::Slow),
            3 => Some(AttackType::Special),
            _ => None,
        }
    }
}

/// Sword damage: `ceil(attack × multiplier) + bonus`, doubled if charged,
/// doubled again if critical.
pub fn sword_damage(attack: i32, attack_type: AttackType, bonus: i32, charged: bool, crit: bool) -> i32 {
    let base = (attack as f32 * attack_type.profile().multiplier).ceil() as i32 + bonus;
    let charged_dmg = if charged && attack_type.can_charge() { base * 2 } else { base };
    if crit {
        charged_dmg * 2
    } else {
        charged_dmg
    }
}

/// Hit-stop frames for a sword hit.
pub fn hit_stop_frames(boss: bool, crit: bool, charged: bool) -> u32 {
    let base = if boss { HITSTOP_BOSS } else { HITSTOP_ENEMY };
    base + if crit { HITSTOP_CRIT_EXTRA } else { 0 } + if charged { HITSTOP_CHARGED_EXTRA } else { 0 }
}

/// Where the player can be hurt from, with level-scaled damage and knockback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageSource {
    Hazard { damage: i32 },
    Enemy,
    Projectile,
    Boss,
}

impl DamageSource {
    pub fn damage(self, level_index: usize) -> i32 {
        let l = level_index as i32;
        match self {
            DamageSource::Hazard { damage } => damage,
            DamageSource::Enemy => 10 + 2 * l,
            DamageSource::Projectile => 15 + 3 * l,
            DamageSource::Boss => 20 + 3 * l,
        }
    }

    /// Horizontal push (applied away from the source) and vertical pop.
    pub fn knockback(self) -> (Option<f32>, f32) {
        match self {
            DamageSource::Hazard { .. } => (None, -8.0),
            DamageSource::Enemy => (Some(5.0), -6.0),
            DamageSource::Projectile => (None, -6.0),
            DamageSource::Boss => (Some(8.0), -10.0),
        }
    }

    pub fn shake(self) -> f32 {
        match self {
            DamageSource::Hazard { .. } => 10.0,
            DamageSource::Enemy | DamageSource::Projectile => 8.0,
            DamageSource::Boss => 12.0,
        }
    }
}
