//! Pooled particles and floating damage numbers.

use bevy::math::Vec2;
use rand::Rng;

const PARTICLE_GRAVITY: f32 = 0.05;
const DAMAGE_NUMBER_GRAVITY: f32 = 0.08;

/// Packed 0xRRGGBB color.
pub type Rgb = u32;

pub const DUST: Rgb = 0x8B7355;
pub const WHITE: Rgb = 0xFFFFFF;
pub const GOLD: Rgb = 0xFFD700;
pub const BLOOD: Rgb = 0xFF0000;

/// Look of a particle burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleStyle {
    pub life: u32,
    pub size: f32,
    pub color: Rgb,
}

impl ParticleStyle {
    pub const fn new(life: u32, size: f32, color: Rgb) -> Self {
        Self { life, size, color }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    /// Opacity for rendering, proportional to remaining life.
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }
}

/// Fixed-slot particle storage. Dead slots are recycled through a free list.
#[derive(Clone, Debug, Default)]
pub struct ParticlePool {
    slots: Vec<Option<Particle>>,
    free: Vec<usize>,
    live: usize,
}

impl ParticlePool {
    pub fn spawn(&mut self, particle: Particle) {
        if particle.life == 0 {
            return;
        }
        self.live += 1;
        if let Some(i) = self.free.pop() {
            self.slots[i] = Some(particle);
        } else {
            self.slots.push(Some(particle));
        }
    }

    /// Spawn `count` particles at `origin` with velocities jittered by `spread`
    /// around `bias`.
    pub fn burst(
        &mut self,
        rng: &mut impl Rng,
        origin: Vec2,
        count: usize,
        spread: Vec2,
        bias: Vec2,
        style: ParticleStyle,
    ) {
        for _ in 0..count {
            let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * spread;
            self.spawn(Particle {
                pos: origin,
                vel: bias + jitter,
                life: style.life,
                max_life: style.life,
                size: style.size,
                color: style.color,
            });
        }
    }

    pub fn update(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let Some(p) = slot else { continue };
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.life -= 1;
            if p.life == 0 {
                *slot = None;
                self.free.push(i);
                self.live -= 1;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageNumber {
    pub pos: Vec2,
    pub vy: f32,
    pub value: i32,
    pub crit: bool,
    pub life: u32,
}

impl DamageNumber {
    pub fn over_enemy(pos: Vec2, value: i32, crit: bool) -> Self {
        Self { pos, vy: -1.5, value, crit, life: 45 }
    }

    pub fn over_boss(pos: Vec2, value: i32, crit: bool) -> Self {
        Self { pos, vy: -1.2, value, crit, life: 50 }
    }
}

pub fn update_damage_numbers(numbers: &mut Vec<DamageNumber>) {
    numbers.retain_mut(|n| {
        n.pos.y += n.vy;
        n.vy += DAMAGE_NUMBER_GRAVITY;
        n.life = n.life.saturating_sub(1);
        n.life > 0
    });
}
