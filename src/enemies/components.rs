//! Enemy data.

use bevy::math::Vec2;

use crate::combat::Health;
use crate::physics::Body;

pub const ENEMY_WIDTH: f32 = 32.0;
pub const ENEMY_HEIGHT: f32 = 36.0;
/// Walkers turn toward a player within this horizontal distance.
pub const DETECTION_RADIUS: f32 = 300.0;

/// Per-type behavior selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Patrols the ground and turns toward a nearby player.
    Walker,
    /// Drifts along a sinusoidal path above its spawn point.
    Flyer,
    /// Holds position and tracks the player.
    Archer,
}

impl EnemyKind {
    /// Kind assignment for the i-th generated enemy.
    pub fn for_index(i: usize) -> Self {
        if i % 4 == 0 {
            EnemyKind::Archer
        } else if i % 5 == 0 {
            EnemyKind::Flyer
        } else {
            EnemyKind::Walker
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Body,
    /// Spawn position; flyers orbit around it.
    pub origin: Vec2,
    /// Patrol speed magnitude.
    pub speed: f32,
    /// Decaying push from sword hits, kept apart from patrol velocity.
    pub knockback: f32,
    pub health: Health,
    pub alive: bool,
    pub hit_stun: u32,
    pub facing: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32, health: i32, speed: f32, direction: f32) -> Self {
        let mut body = Body::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT);
        if kind == EnemyKind::Walker {
            body.vel.x = direction * speed;
        }
        Self {
            kind,
            body,
            origin: Vec2::new(x, y),
            speed,
            knockback: 0.0,
            health: Health::new(health),
            alive: true,
            hit_stun: 0,
            facing: direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_pattern_prefers_archers() {
        assert_eq!(EnemyKind::for_index(0), EnemyKind::Archer);
        assert_eq!(EnemyKind::for_index(20), EnemyKind::Archer);
        assert_eq!(EnemyKind::for_index(5), EnemyKind::Flyer);
        assert_eq!(EnemyKind::for_index(7), EnemyKind::Walker);
    }

    #[test]
    fn only_walkers_start_moving() {
        let w = Enemy::new(EnemyKind::Walker, 0.0, 0.0, 20, 1.5, -1.0);
        let a = Enemy::new(EnemyKind::Archer, 0.0, 0.0, 20, 1.5, -1.0);
        assert_eq!(w.body.vel.x, -1.5);
        assert_eq!(a.body.vel.x, 0.0);
    }
}
