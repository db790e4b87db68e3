//! The guardian at the end of every level and its projectiles.

use bevy::math::Vec2;

use crate::combat::Health;
use crate::physics::Body;

/// The boss wakes once the player is this close on its left.
pub const ENGAGE_DISTANCE: f32 = 400.0;
/// Horizontal band around the player inside which the boss stops steering.
pub const APPROACH_BAND: f32 = 50.0;
/// Warning window before each attack fires.
pub const TELEGRAPH_FRAMES: u32 = 20;
/// Frames a lunge overrides approach steering.
pub const LUNGE_FRAMES: u32 = 20;
pub const LUNGE_SPEED: f32 = 8.0;
pub const PROJECTILE_GRAVITY: f32 = 0.05;
/// Half-extent of the projectile-vs-player-center hit test.
pub const PROJECTILE_HIT_RADIUS: f32 = 20.0;

/// Attack patterns, cycled round-robin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BossPattern {
    #[default]
    Lunge,
    Ranged,
    Spread,
}

impl BossPattern {
    pub fn next(self) -> Self {
        match self {
            BossPattern::Lunge => BossPattern::Ranged,
            BossPattern::Ranged => BossPattern::Spread,
            BossPattern::Spread => BossPattern::Lunge,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            BossPattern::Lunge => 0,
            BossPattern::Ranged => 1,
            BossPattern::Spread => 2,
        }
    }
}

/// Movement mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BossMode {
    #[default]
    Approaching,
    Lunging { frames: u32 },
}

/// Ballistic shot fired by the boss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub alive: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, life: u32) -> Self {
        Self { pos, vel, life, alive: true }
    }

    /// Integrate one frame. Lifetime counts real frames; motion is time-scaled.
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel.y += PROJECTILE_GRAVITY * dt;
        self.life = self.life.saturating_sub(1);
        if self.life == 0 {
            self.alive = false;
        }
    }

    pub fn hits(&self, target_center: Vec2) -> bool {
        (self.pos.x - target_center.x).abs() < PROJECTILE_HIT_RADIUS
            && (self.pos.y - target_center.y).abs() < PROJECTILE_HIT_RADIUS
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub name: &'static str,
    pub body: Body,
    pub health: Health,
    pub alive: bool,
    /// Woken by the player's approach; never goes back to sleep.
    pub engaged: bool,
    pub phase: u8,
    pub phase_triggered: bool,
    pub attack_timer: u32,
    /// Last pattern fired.
    pub pattern: BossPattern,
    /// Frames left before the next attack fires, while the warning shows.
    pub telegraph: u32,
    pub mode: BossMode,
    pub hit_stun: u32,
    pub facing: f32,
    pub speed: f32,
    /// Base frames between attacks before the phase speed-up.
    pub interval: u32,
    pub projectiles: Vec<Projectile>,
}

impl Boss {
    pub fn new(name: &'static str, x: f32, ground_y: f32, level_index: usize) -> Self {
        let l = level_index as f32;
        let w = 64.0 + 4.0 * l;
        let h = 80.0 + 4.0 * l;
        Self {
            name,
            body: Body::new(x, ground_y - h, w, h),
            health: Health::new(150 + 50 * level_index as i32),
            alive: true,
            engaged: false,
            phase: 0,
            phase_triggered: false,
            attack_timer: 0,
            pattern: BossPattern::Lunge,
            telegraph: 0,
            mode: BossMode::Approaching,
            hit_stun: 0,
            facing: -1.0,
            speed: 1.5 + 0.2 * l,
            interval: 90u32.saturating_sub(5 * level_index as u32).max(TELEGRAPH_FRAMES + 1),
            projectiles: Vec::new(),
        }
    }

    /// Frames between attacks in the current phase.
    pub fn attack_interval(&self) -> u32 {
        if self.phase > 0 {
            self.interval * 3 / 4
        } else {
            self.interval
        }
    }

    /// Flip into the second phase once health first drops to half.
    /// Returns true only on the frame it flips.
    pub fn check_phase(&mut self) -> bool {
        if self.phase_triggered || self.health.current * 2 > self.health.maximum {
            return false;
        }
        self.phase_triggered = true;
        self.phase = 1;
        true
    }

    /// One frame of movement and attack scheduling. Returns the pattern fired, if any.
    pub fn update(&mut self, player_x: f32, level_width: f32, dt: f32) -> Option<BossPattern> {
        if !self.alive {
            return None;
        }
        if !self.engaged {
            if player_x > self.body.bounds.pos.x - ENGAGE_DISTANCE {
                self.engaged = true;
            } else {
                return None;
            }
        }

        self.attack_timer += 1;

        match self.mode {
            BossMode::Lunging { frames } if frames > 0 => {
                self.mode = BossMode::Lunging { frames: frames - 1 };
            }
            _ => {
                self.mode = BossMode::Approaching;
                let x = self.body.bounds.pos.x;
                if x > player_x + APPROACH_BAND {
                    self.body.vel.x = -self.speed;
                } else if x < player_x - APPROACH_BAND {
                    self.body.vel.x = self.speed;
                } else {
                    self.body.vel.x *= 0.9;
                }
            }
        }

        let max_x = (level_width - self.body.bounds.size.x).max(0.0);
        self.body.bounds.pos.x = (self.body.bounds.pos.x + self.body.vel.x * dt).clamp(0.0, max_x);
        self.facing = if player_x > self.body.bounds.pos.x { 1.0 } else { -1.0 };
        self.hit_stun = self.hit_stun.saturating_sub(1);

        let interval = self.attack_interval();
        self.telegraph = if self.attack_timer + TELEGRAPH_FRAMES > interval {
            interval.saturating_sub(self.attack_timer)
        } else {
            0
        };

        if self.attack_timer <= interval {
            return None;
        }
        self.attack_timer = 0;
        self.telegraph = 0;
        self.pattern = self.pattern.next();
        self.fire(self.pattern);
        Some(self.pattern)
    }

    fn fire(&mut self, pattern: BossPattern) {
        let b = self.body.bounds;
        let muzzle = Vec2::new(b.pos.x + b.size.x / 2.0, b.pos.y + b.size.y / 3.0);
        match pattern {
            BossPattern::Lunge => {
                self.body.vel.x = self.facing * LUNGE_SPEED;
                self.mode = BossMode::Lunging { frames: LUNGE_FRAMES };
            }
            BossPattern::Ranged => {
                self.projectiles
                    .push(Projectile::new(muzzle, Vec2::new(self.facing * 5.0, -1.0), 120));
            }
            BossPattern::Spread => {
                for i in -2i32..=2 {
                    let i = i as f32;
                    let vel = Vec2::new(self.facing * 4.0 + i * 0.5, -2.0 + i.abs() * 0.5);
                    self.projectiles.push(Projectile::new(muzzle, vel, 90));
                }
            }
        }
    }

    pub fn update_projectiles(&mut self, dt: f32) {
        for proj in self.projectiles.iter_mut().filter(|p| p.alive) {
            proj.advance(dt);
        }
    }

    pub fn compact(&mut self) {
        self.projectiles.retain(|p| p.alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engaged_boss(level: usize) -> Boss {
        let mut boss = Boss::new("Test", 1000.0, 500.0, level);
        boss.engaged = true;
        boss
    }

    #[test]
    fn sleeps_until_player_is_close() {
        let mut boss = Boss::new("Test", 1000.0, 500.0, 0);
        assert_eq!(boss.update(100.0, 5000.0, 1.0), None);
        assert!(!boss.engaged);
        assert_eq!(boss.attack_timer, 0);
        boss.update(700.0, 5000.0, 1.0);
        assert!(boss.engaged);
    }

    #[test]
    fn patterns_cycle_round_robin() {
        let mut boss = engaged_boss(0);
        let mut fired = Vec::new();
        for _ in 0..400 {
            if let Some(p) = boss.update(boss.body.bounds.pos.x, 5000.0, 1.0) {
                fired.push(p);
            }
        }
        assert!(fired.len() >= 4);
        assert_eq!(&fired[..4], &[BossPattern::Ranged, BossPattern::Spread, BossPattern::Lunge, BossPattern::Ranged]);
    }

    #[test]
    fn telegraph_precedes_fire() {
        let mut boss = engaged_boss(0);
        let interval = boss.attack_interval();
        for _ in 0..interval - 5 {
            boss.update(boss.body.bounds.pos.x, 5000.0, 1.0);
        }
        assert!(boss.telegraph > 0 && boss.telegraph <= TELEGRAPH_FRAMES);
    }

    #[test]
    fn spread_fires_five_projectiles() {
        let mut boss = engaged_boss(0);
        boss.pattern = BossPattern::Ranged;
        boss.attack_timer = boss.attack_interval();
        assert_eq!(boss.update(boss.body.bounds.pos.x, 5000.0, 1.0), Some(BossPattern::Spread));
        assert_eq!(boss.projectiles.len(), 5);
    }

    #[test]
    fn phase_triggers_once() {
        let mut boss = engaged_boss(0);
        boss.health.current = 76;
        assert!(!boss.check_phase());
        boss.health.current = 74;
        assert!(boss.check_phase());
        boss.health.current = 60;
        assert!(!boss.check_phase());
        assert_eq!(boss.phase, 1);
        assert!(boss.attack_interval() < boss.interval);
    }

    #[test]
    fn projectiles_expire() {
        let mut proj = Projectile::new(Vec2::ZERO, Vec2::new(5.0, -1.0), 3);
        for _ in 0..3 {
            proj.advance(1.0);
        }
        assert!(!proj.alive);
        assert!(proj.vel.y > -1.0);
    }
}
