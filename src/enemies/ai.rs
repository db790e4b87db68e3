//! Per-type enemy behavior.

use bevy::math::Vec2;

use super::components::{Enemy, EnemyKind, DETECTION_RADIUS};
use crate::physics::FRICTION;

/// Advance every living enemy by one frame.
pub fn update_enemies(enemies: &mut [Enemy], player_pos: Vec2, frame: u64, level_width: f32, dt: f32) {
    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        match enemy.kind {
            EnemyKind::Walker => walker_patrol(enemy, player_pos, level_width, dt),
            EnemyKind::Flyer => flyer_drift(enemy, player_pos, frame, dt),
            EnemyKind::Archer => face_player(enemy, player_pos),
        }
        apply_knockback(enemy, level_width, dt);
        enemy.hit_stun = enemy.hit_stun.saturating_sub(1);
    }
}

/// Walk, then turn toward a player inside the detection radius.
fn walker_patrol(enemy: &mut Enemy, player_pos: Vec2, level_width: f32, dt: f32) {
    let max_x = (level_width - enemy.body.bounds.size.x).max(0.0);
    let x = enemy.body.bounds.pos.x + enemy.body.vel.x * dt;
    enemy.body.bounds.pos.x = x.clamp(0.0, max_x);
    if x <= 0.0 || x >= max_x {
        enemy.body.vel.x = -enemy.body.vel.x;
    }
    enemy.facing = if enemy.body.vel.x > 0.0 { 1.0 } else { -1.0 };

    let dx = player_pos.x - enemy.body.bounds.pos.x;
    if dx.abs() < DETECTION_RADIUS {
        enemy.body.vel.x = enemy.speed * dx.signum();
    }
}

/// Closed-form hover around the spawn point plus a slow horizontal drift.
fn flyer_drift(enemy: &mut Enemy, player_pos: Vec2, frame: u64, dt: f32) {
    let t = frame as f32;
    let phase = enemy.origin.x * 0.01;
    enemy.body.bounds.pos.x += (t * 0.03 + phase).sin() * 2.0 * dt;
    enemy.body.bounds.pos.y = enemy.origin.y - 60.0 + (t * 0.02 + phase).sin() * 30.0;
    face_player(enemy, player_pos);
}

fn face_player(enemy: &mut Enemy, player_pos: Vec2) {
    enemy.facing = if player_pos.x > enemy.body.bounds.pos.x { 1.0 } else { -1.0 };
}

fn apply_knockback(enemy: &mut Enemy, level_width: f32, dt: f32) {
    if enemy.knockback == 0.0 {
        return;
    }
    let max_x = (level_width - enemy.body.bounds.size.x).max(0.0);
    enemy.body.bounds.pos.x = (enemy.body.bounds.pos.x + enemy.knockback * dt).clamp(0.0, max_x);
    enemy.knockback *= FRICTION;
    if enemy.knockback.abs() < 0.1 {
        enemy.knockback = 0.0;
    }
}
