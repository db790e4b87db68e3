//! Screen shake, hit-stop, slow motion, combo, flashes, and camera follow.

use bevy::math::Vec2;
use rand::Rng;

use super::particles::{update_damage_numbers, DamageNumber, ParticlePool};
use crate::combat::COMBO_WINDOW;
use crate::world::VIEW_WIDTH;

pub const SHAKE_DECAY: f32 = 0.92;
pub const SHAKE_MAX_OFFSET: f32 = 12.0;
const SHAKE_MIN_INTENSITY: f32 = 0.3;

/// Slow motion started by the boss entering its second phase.
pub const PHASE_SLOWMO: (f32, u32) = (0.4, 18);
/// Slow motion started by a perfect dodge.
pub const DODGE_SLOWMO: (f32, u32) = (0.35, 25);

const CAMERA_LOOKAHEAD: f32 = 50.0;
const CAMERA_LERP: f32 = 0.07;
pub const LEVEL_TITLE_FRAMES: u32 = 120;

#[derive(Clone, Copy, Debug, PartialEq)]
struct ShakeEntry {
    intensity: f32,
    remaining: u32,
    dir: Vec2,
}

/// Overlapping shakes that each decay on their own.
#[derive(Clone, Debug, Default)]
pub struct ScreenShake {
    entries: Vec<ShakeEntry>,
    offset: Vec2,
}

impl ScreenShake {
    /// Add a shake lasting `ceil(intensity)` frames in a random direction.
    pub fn add(&mut self, intensity: f32, rng: &mut impl Rng) {
        if intensity <= 0.0 {
            return;
        }
        let dir = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        self.entries.push(ShakeEntry {
            intensity,
            remaining: intensity.ceil() as u32,
            dir,
        });
    }

    /// Sum the entries into this frame's offset, then decay them.
    pub fn update(&mut self) {
        let mut total = Vec2::ZERO;
        self.entries.retain_mut(|e| {
            total += e.dir * (e.intensity / 10.0);
            e.intensity *= SHAKE_DECAY;
            e.remaining -= 1;
            e.remaining > 0 && e.intensity > SHAKE_MIN_INTENSITY
        });
        self.offset = total.clamp(Vec2::splat(-SHAKE_MAX_OFFSET), Vec2::splat(SHAKE_MAX_OFFSET));
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn is_active(&self) -> bool {
        !self.entries.is_empty()
    }
}

/// Full freeze of gameplay advancement for a few frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitStop {
    pub frames: u32,
}

impl HitStop {
    /// Replaces any running hit-stop.
    pub fn trigger(&mut self, frames: u32) {
        self.frames = frames;
    }

    pub fn is_active(&self) -> bool {
        self.frames > 0
    }

    /// Consume one frame. Returns true when this frame is frozen.
    pub fn tick(&mut self) -> bool {
        if self.frames == 0 {
            return false;
        }
        self.frames -= 1;
        true
    }
}

/// Motion multiplier. Eases back toward 1 while a slow-motion window runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub scale: f32,
    pub remaining: u32,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self { scale: 1.0, remaining: 0 }
    }
}

impl TimeScale {
    pub fn slow(&mut self, (scale, frames): (f32, u32)) {
        self.scale = scale;
        self.remaining = frames;
    }

    /// Advance the window and return the scale for this frame's motion.
    pub fn update(&mut self) -> f32 {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.scale += (1.0 - self.scale) * 0.15;
        } else {
            self.scale = 1.0;
        }
        self.scale
    }
}

/// Consecutive-hit counter that resets after a quiet window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Combo {
    pub count: u32,
    pub timer: u32,
}

impl Combo {
    /// Register a hit; returns the new count.
    pub fn hit(&mut self) -> u32 {
        self.count += 1;
        self.timer = COMBO_WINDOW;
        self.count
    }

    pub fn update(&mut self) {
        if self.timer > 0 {
            self.timer -= 1;
        } else {
            self.count = 0;
        }
    }
}

/// Screen flashes that count down one per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flashes {
    pub damage: u32,
    pub boss_phase: u32,
    pub victory: u32,
    pub level_title: u32,
}

impl Flashes {
    pub fn update(&mut self) {
        self.damage = self.damage.saturating_sub(1);
        self.boss_phase = self.boss_phase.saturating_sub(1);
        self.victory = self.victory.saturating_sub(1);
        self.level_title = self.level_title.saturating_sub(1);
    }
}

/// Smoothed camera with look-ahead in the facing direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraFollow {
    pub pos: Vec2,
}

impl CameraFollow {
    pub fn snap(&mut self, target_x: f32, level_width: f32) {
        self.pos = Vec2::new(Self::clamp_x(target_x - VIEW_WIDTH / 3.0, level_width), 0.0);
    }

    pub fn update(&mut self, player_x: f32, facing: f32, vy: f32, level_width: f32) {
        let target_x = player_x - VIEW_WIDTH / 3.0 + facing * CAMERA_LOOKAHEAD;
        let target_y = if vy > 2.0 { 8.0 } else { 0.0 };
        self.pos.x += (target_x - self.pos.x) * CAMERA_LERP;
        self.pos.y += (target_y - self.pos.y) * 0.05;
        self.pos.x = Self::clamp_x(self.pos.x, level_width);
    }

    fn clamp_x(x: f32, level_width: f32) -> f32 {
        x.min(level_width - VIEW_WIDTH).max(0.0)
    }
}

/// Everything the feel layer accumulates. Written by gameplay, read by
/// rendering; gameplay itself only reads `hit_stop` and `time_scale`.
#[derive(Clone, Debug, Default)]
pub struct EffectBus {
    pub shake: ScreenShake,
    pub hit_stop: HitStop,
    pub time_scale: TimeScale,
    pub particles: ParticlePool,
    pub damage_numbers: Vec<DamageNumber>,
    pub combo: Combo,
    pub flashes: Flashes,
    pub camera: CameraFollow,
}

impl EffectBus {
    /// Per-frame decay of the purely visual effects. Runs even during hit-stop.
    pub fn decay(&mut self) {
        self.particles.update();
        update_damage_numbers(&mut self.damage_numbers);
        self.flashes.update();
        self.shake.update();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shake_offset_is_clamped_and_decays() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut shake = ScreenShake::default();
        for _ in 0..20 {
            shake.add(30.0, &mut rng);
        }
        shake.update();
        assert!(shake.offset().x.abs() <= SHAKE_MAX_OFFSET);
        assert!(shake.offset().y.abs() <= SHAKE_MAX_OFFSET);
        for _ in 0..200 {
            shake.update();
        }
        assert!(!shake.is_active());
        assert_eq!(shake.offset(), Vec2::ZERO);
    }

    #[test]
    fn short_shake_expires_by_duration() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut shake = ScreenShake::default();
        shake.add(2.0, &mut rng);
        shake.update();
        assert!(shake.is_active());
        shake.update();
        assert!(!shake.is_active());
    }

    #[test]
    fn hit_stop_counts_down() {
        let mut stop = HitStop::default();
        stop.trigger(2);
        assert!(stop.tick());
        assert!(stop.tick());
        assert!(!stop.tick());
        assert!(!stop.is_active());
    }

    #[test]
    fn time_scale_eases_back_to_one() {
        let mut ts = TimeScale::default();
        ts.slow(PHASE_SLOWMO);
        let first = ts.update();
        assert!(first > 0.4 && first < 1.0);
        for _ in 0..PHASE_SLOWMO.1 {
            ts.update();
        }
        assert_eq!(ts.scale, 1.0);
        assert_eq!(ts.remaining, 0);
    }

    #[test]
    fn combo_resets_after_window() {
        let mut combo = Combo::default();
        combo.hit();
        assert_eq!(combo.hit(), 2);
        for _ in 0..=COMBO_WINDOW {
            combo.update();
        }
        assert_eq!(combo.count, 0);
    }

    #[test]
    fn camera_never_leaves_level() {
        let mut cam = CameraFollow::default();
        cam.snap(0.0, 4800.0);
        assert_eq!(cam.pos.x, 0.0);
        for _ in 0..500 {
            cam.update(10_000.0, 1.0, 0.0, 4800.0);
        }
        assert_eq!(cam.pos.x, 4800.0 - VIEW_WIDTH);
    }
}
