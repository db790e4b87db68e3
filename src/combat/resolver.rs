//! Hit resolution between the player, enemies, the boss, hazards, and projectiles.
//!
//! Each function walks every candidate pair once, so a pair resolves at most
//! once per frame. Dead targets are skipped before any overlap test.

use bevy::math::Vec2;
use rand::Rng;

use super::components::*;
use crate::core::{SimEvent, Transition};
use crate::effects::{DamageNumber, ParticleStyle, BLOOD, DODGE_SLOWMO, GOLD, PHASE_SLOWMO, WHITE};
use crate::physics::Aabb;
use crate::player::Player;
use crate::simulation::SimulationState;

/// Height of the band on top of an enemy that counts as a stomp.
pub const STOMP_BAND: f32 = 16.0;
pub const STOMP_BOUNCE_VY: f32 = -9.0;

pub const ENEMY_HIT_SCORE: u64 = 5;
pub const ENEMY_KILL_SCORE: u64 = 50;

const PHASE_FLASH_FRAMES: u32 = 5;
const VICTORY_FLASH_FRAMES: u32 = 12;

/// The area in front of the player that a swing covers.
pub fn sword_box(player: &Player, reach: f32) -> Aabb {
    let b = player.body.bounds;
    let x = if player.facing > 0.0 { b.right() } else { b.left() - reach };
    Aabb::new(x, b.top() - 5.0, reach, b.size.y + 10.0)
}

/// How a damaging overlap with the player played out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactOutcome {
    Damaged,
    PerfectDodge,
    Absorbed,
}

impl ContactOutcome {
    /// Projectiles are spent by anything except a silent absorb.
    pub fn consumes_projectile(self) -> bool {
        !matches!(self, ContactOutcome::Absorbed)
    }
}

/// Test the active swing against every living target on its hit frame.
pub fn resolve_sword_hits(state: &mut SimulationState) {
    let player = &state.player;
    let profile = player.swing.profile();
    if player.timers.attack_active == 0 || player.timers.attack_active != profile.hit_frame {
        return;
    }
    let sword = sword_box(player, profile.reach);

    for index in 0..state.level.enemies.len() {
        let enemy = &state.level.enemies[index];
        if enemy.alive && sword.overlaps(&enemy.body.bounds) {
            strike_enemy(state, index);
        }
    }

    let boss = &state.level.boss;
    if boss.alive && sword.overlaps(&boss.body.bounds) {
        strike_boss(state);
    }
}

fn roll_crit(state: &mut SimulationState) -> bool {
    let chance = state.crit_chance.clamp(0.0, 1.0);
    state.rng.gen_bool(chance)
}

fn strike_enemy(state: &mut SimulationState, index: usize) {
    let crit = roll_crit(state);
    let charged = state.player.charged_attack;
    let facing = state.player.facing;
    let damage = sword_damage(state.player.attack, state.player.swing, 0, charged, crit);

    let enemy = &mut state.level.enemies[index];
    enemy.health.take_damage(damage);
    enemy.hit_stun = TARGET_HIT_STUN;
    enemy.knockback = facing * ENEMY_KNOCKBACK;
    let center = enemy.body.center();
    let top = Vec2::new(center.x, enemy.body.bounds.top() - 10.0);
    let dead = enemy.health.is_dead();

    let fx = &mut state.effects;
    fx.damage_numbers.push(DamageNumber::over_enemy(top, damage, crit));
    let combo = fx.combo.hit();
    let heavy = crit || charged;
    let color = if crit { GOLD } else { WHITE };
    fx.particles.burst(
        &mut state.rng,
        center,
        if heavy { 18 } else { 10 },
        Vec2::splat(8.0),
        Vec2::ZERO,
        ParticleStyle::new(20, 4.0, color),
    );
    fx.shake.add(if heavy { 6.0 } else { 4.0 }, &mut state.rng);
    fx.hit_stop.trigger(hit_stop_frames(false, crit, charged));
    state.award(ENEMY_HIT_SCORE * combo as u64);
    state.events.push(SimEvent::HitLanded { crit, charged });

    if dead {
        kill_enemy(state, index, false);
    }
}

/// Mark an enemy dead, score it, and announce a cleared wave.
fn kill_enemy(state: &mut SimulationState, index: usize, stomp: bool) {
    let enemy = &mut state.level.enemies[index];
    if !enemy.alive {
        return;
    }
    enemy.alive = false;
    let center = enemy.body.center();
    state.effects.particles.burst(
        &mut state.rng,
        center,
        20,
        Vec2::splat(10.0),
        Vec2::ZERO,
        ParticleStyle::new(40, 5.0, GOLD),
    );
    state.award(ENEMY_KILL_SCORE);
    state.events.push(SimEvent::EnemyKilled { stomp });
    if state.level.living_enemies() == 0 {
        state.events.push(SimEvent::WaveCleared);
    }
}

fn strike_boss(state: &mut SimulationState) {
    let crit = roll_crit(state);
    let charged = state.player.charged_attack;
    let damage = sword_damage(
        state.player.attack,
        state.player.swing,
        state.player.boss_bonus,
        charged,
        crit,
    );

    let boss = &mut state.level.boss;
    boss.health.take_damage(damage);
    boss.hit_stun = TARGET_HIT_STUN;
    let center = boss.body.center();
    let label = Vec2::new(center.x, boss.body.bounds.top() - 15.0);
    let phase_changed = boss.check_phase();
    let dead = boss.health.is_dead();

    let fx = &mut state.effects;
    fx.damage_numbers.push(DamageNumber::over_boss(label, damage, crit));
    if phase_changed {
        fx.time_scale.slow(PHASE_SLOWMO);
        fx.shake.add(8.0, &mut state.rng);
        fx.flashes.boss_phase = PHASE_FLASH_FRAMES;
    }
    let heavy = crit || charged;
    fx.shake.add(if heavy { 10.0 } else { 6.0 }, &mut state.rng);
    fx.hit_stop.trigger(hit_stop_frames(true, crit, charged));
    fx.particles.burst(
        &mut state.rng,
        center,
        if heavy { 25 } else { 15 },
        Vec2::splat(10.0),
        Vec2::ZERO,
        ParticleStyle::new(25, 5.0, if crit { GOLD } else { WHITE }),
    );
    state.events.push(SimEvent::HitLanded { crit, charged });
    if phase_changed {
        bevy::log::info!("{} enters its second phase", state.level.boss.name);
        state.events.push(SimEvent::BossPhaseChanged);
    }

    if dead {
        defeat_boss(state);
    }
}

fn defeat_boss(state: &mut SimulationState) {
    let boss = &mut state.level.boss;
    if !boss.alive {
        return;
    }
    boss.alive = false;
    boss.projectiles.clear();
    let center = boss.body.center();
    let name = boss.name;

    let fx = &mut state.effects;
    fx.shake.add(20.0, &mut state.rng);
    fx.flashes.victory = VICTORY_FLASH_FRAMES;
    fx.particles.burst(
        &mut state.rng,
        center,
        60,
        Vec2::splat(15.0),
        Vec2::ZERO,
        ParticleStyle::new(60, 6.0, GOLD),
    );
    fx.particles.burst(
        &mut state.rng,
        center,
        40,
        Vec2::splat(12.0),
        Vec2::new(0.0, -4.0),
        ParticleStyle::new(50, 4.0, WHITE),
    );
    state.award(500 + 100 * state.run.level_index as u64);
    state.events.push(SimEvent::BossDefeated);
    bevy::log::info!("{} defeated", name);

    if !state.run.transitioning {
        state.run.transitioning = true;
        state.request_transition(Transition::AdvanceLevel);
    }
}

/// Apply a damaging overlap to the player. `from_x` is the source's center, for knockback.
pub fn hurt_player(state: &mut SimulationState, source: DamageSource, from_x: f32) -> ContactOutcome {
    let player = &mut state.player;
    if player.is_dodging() {
        if player.perfect_dodge_spent {
            return ContactOutcome::Absorbed;
        }
        player.perfect_dodge_spent = true;
        let center = player.center();
        let fx = &mut state.effects;
        fx.time_scale.slow(DODGE_SLOWMO);
        fx.shake.add(6.0, &mut state.rng);
        fx.particles.burst(
            &mut state.rng,
            center,
            15,
            Vec2::splat(6.0),
            Vec2::ZERO,
            ParticleStyle::new(25, 4.0, GOLD),
        );
        state.events.push(SimEvent::PerfectDodge);
        return ContactOutcome::PerfectDodge;
    }
    if player.timers.invincible > 0 || player.is_dashing() || player.shield_up() || player.health.is_dead() {
        return ContactOutcome::Absorbed;
    }

    let damage = source.damage(state.run.level_index);
    player.health.take_damage(damage);
    player.timers.hurt = PLAYER_HURT_FRAMES;
    player.timers.invincible = PLAYER_INVINCIBLE_FRAMES;
    let (push, pop) = source.knockback();
    player.body.vel.y = pop;
    if let Some(push) = push {
        let away = if player.center().x < from_x { -1.0 } else { 1.0 };
        player.body.vel.x = away * push;
    }

    let fx = &mut state.effects;
    fx.flashes.damage = if matches!(source, DamageSource::Boss) { 4 } else { 3 };
    fx.shake.add(source.shake(), &mut state.rng);
    state.events.push(SimEvent::PlayerHurt { damage });
    ContactOutcome::Damaged
}

/// Overlaps that hurt the player, plus stomps.
pub fn resolve_player_contacts(state: &mut SimulationState) {
    for index in 0..state.level.hazards.len() {
        let hazard = state.level.hazards[index];
        if state.player.body.bounds.overlaps(&hazard.bounds) {
            hurt_player(state, DamageSource::Hazard { damage: hazard.damage }, hazard.bounds.center().x);
        }
    }

    for index in 0..state.level.enemies.len() {
        let enemy = &state.level.enemies[index];
        if !enemy.alive || !state.player.body.bounds.overlaps(&enemy.body.bounds) {
            continue;
        }
        let falling = state.player.body.vel.y > 0.0;
        let from_above = state.player.body.bottom() - enemy.body.bounds.top() <= STOMP_BAND;
        if falling && from_above {
            stomp(state, index);
        } else {
            let from_x = enemy.body.center().x;
            hurt_player(state, DamageSource::Enemy, from_x);
        }
    }

    if !state.level.boss.alive {
        return;
    }
    let player_center = state.player.center();
    for index in 0..state.level.boss.projectiles.len() {
        let proj = state.level.boss.projectiles[index];
        if !proj.alive || !proj.hits(player_center) {
            continue;
        }
        let outcome = hurt_player(state, DamageSource::Projectile, proj.pos.x);
        if outcome.consumes_projectile() {
            state.level.boss.projectiles[index].alive = false;
        }
    }

    let boss = &state.level.boss;
    if state.player.body.bounds.overlaps(&boss.body.bounds) {
        let from_x = boss.body.center().x;
        hurt_player(state, DamageSource::Boss, from_x);
    }
}

fn stomp(state: &mut SimulationState, index: usize) {
    let enemy = &mut state.level.enemies[index];
    let remaining = enemy.health.current;
    enemy.health.take_damage(remaining);
    state.player.body.vel.y = STOMP_BOUNCE_VY;
    state.effects.shake.add(5.0, &mut state.rng);
    kill_enemy(state, index, true);
}

/// Death particles and shake, once per life.
pub fn player_death_burst(state: &mut SimulationState) {
    let center = state.player.center();
    let fx = &mut state.effects;
    fx.shake.add(23.0, &mut state.rng);
    fx.flashes.damage = fx.flashes.damage.max(8);
    fx.particles.burst(
        &mut state.rng,
        center,
        55,
        Vec2::splat(10.0),
        Vec2::ZERO,
        ParticleStyle::new(40, 5.0, BLOOD),
    );
}
