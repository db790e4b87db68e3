//! The per-frame pipeline.
//!
//! Order within a gameplay frame:
//! input, timers, platforms, player physics, collectibles, sword hits,
//! contacts, enemies, boss, projectiles, death check. Effect decay and the
//! camera run every frame, including frames frozen by hit-stop.

use bevy::math::Vec2;

use super::state::SimulationState;
use crate::combat::{player_death_burst, resolve_player_contacts, resolve_sword_hits};
use crate::core::{SimEvent, Transition};
use crate::effects::{ParticleStyle, DUST};
use crate::enemies::update_enemies;
use crate::physics::{Landing, LANDING_IMPACT_MIN, LAND_DUST_VY};
use crate::player::{apply_intents, move_player, tick_timers, InputIntents, LAND_SQUASH_FRAMES};
use crate::world::{update_collectibles, FALL_DEATH_Y};

/// Dead enemies and spent projectiles are dropped this often.
pub const COMPACT_INTERVAL: u64 = 120;

/// Advance the simulation by one display frame.
pub fn step_frame(state: &mut SimulationState, intents: &InputIntents) {
    let frozen = state.effects.hit_stop.tick();
    if !frozen {
        advance_gameplay(state, intents);
        if state.frame % COMPACT_INTERVAL == 0 {
            state.level.compact();
            state.level.boss.compact();
        }
    }

    state.effects.decay();
    let p = &state.player;
    state
        .effects
        .camera
        .update(p.body.pos().x, p.facing, p.body.vel.y, state.level.width);
}

fn advance_gameplay(state: &mut SimulationState, intents: &InputIntents) {
    state.frame += 1;
    let dt = state.effects.time_scale.update();

    // The dead wait for their deferred transition without acting
    if !state.player.health.is_dead() {
        apply_intents(&mut state.player, intents, &mut state.events);
    }
    tick_timers(&mut state.player);
    state.effects.combo.update();

    let frame = state.frame;
    for plat in &mut state.level.platforms {
        plat.advance(frame);
    }
    for hazard in &mut state.level.hazards {
        hazard.advance(frame);
    }

    if let Some(landing) = move_player(&mut state.player, &state.level.platforms, state.level.width, dt) {
        on_landing(state, landing);
    }
    if state.player.body.bounds.top() > FALL_DEATH_Y {
        state.player.health.kill();
    }

    update_collectibles(state);
    if !state.player.health.is_dead() {
        resolve_sword_hits(state);
        resolve_player_contacts(state);
    }

    let player_center = state.player.center();
    update_enemies(&mut state.level.enemies, player_center, frame, state.level.width, dt);
    state.level.boss.update(player_center.x, state.level.width, dt);
    state.level.boss.update_projectiles(dt);

    check_player_death(state);
}

fn on_landing(state: &mut SimulationState, landing: Landing) {
    if landing.impact <= LANDING_IMPACT_MIN {
        return;
    }
    let p = &mut state.player;
    p.timers.land_squash = LAND_SQUASH_FRAMES;
    state.events.push(SimEvent::PlayerLanded { impact: landing.impact });

    if landing.impact > LAND_DUST_VY {
        p.timers.land_squash = LAND_SQUASH_FRAMES + 4;
        let feet = Vec2::new(p.center().x, p.body.bottom());
        let count = (landing.impact * 1.5) as usize;
        state.effects.particles.burst(
            &mut state.rng,
            feet,
            count,
            Vec2::new(4.0, 1.0),
            Vec2::new(0.0, -1.0),
            ParticleStyle::new(20, 3.0, DUST),
        );
    }
}

/// Fires once per life: the transitioning guard holds until the deferred
/// transition respawns the player or ends the run.
fn check_player_death(state: &mut SimulationState) {
    if !state.player.health.is_dead() || state.run.transitioning {
        return;
    }
    state.run.transitioning = true;
    player_death_burst(state);
    state.events.push(SimEvent::PlayerDied);
    state.request_transition(Transition::RespawnOrGameOver);
    bevy::log::info!("Player died on level {}", state.run.level_index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::HeroTemplate;
    use crate::world::GROUND_Y;

    fn quiet_state() -> SimulationState {
        let mut s = SimulationState::seeded(HeroTemplate::default(), 0, 11);
        s.level.enemies.clear();
        s.level.hazards.clear();
        s.level.collectibles.clear();
        s.drain_events();
        s
    }

    #[test]
    fn hit_stop_freezes_gameplay_but_not_effects() {
        let mut s = quiet_state();
        s.effects.hit_stop.trigger(3);
        s.effects.flashes.damage = 5;
        let pos = s.player.body.pos();
        for _ in 0..3 {
            step_frame(&mut s, &InputIntents::default());
        }
        assert_eq!(s.frame, 0);
        assert_eq!(s.player.body.pos(), pos);
        assert_eq!(s.effects.flashes.damage, 2);

        step_frame(&mut s, &InputIntents::default());
        assert_eq!(s.frame, 1);
    }

    #[test]
    fn falling_out_of_the_world_dies_once() {
        let mut s = quiet_state();
        s.player.body.bounds.pos.y = FALL_DEATH_Y + 10.0;
        s.player.body.bounds.pos.x = 40.0;
        s.level.platforms.clear();
        step_frame(&mut s, &InputIntents::default());
        step_frame(&mut s, &InputIntents::default());

        let deaths = s.events.iter().filter(|e| **e == SimEvent::PlayerDied).count();
        assert_eq!(deaths, 1);
        assert!(s.run.transitioning);
        assert_eq!(s.take_transition_requests(), vec![Transition::RespawnOrGameOver]);
    }

    #[test]
    fn dead_player_cannot_finish_the_boss() {
        let mut s = quiet_state();
        for _ in 0..10 {
            step_frame(&mut s, &InputIntents::default());
        }
        let h = s.level.boss.body.bounds.size.y;
        s.level.boss.body.bounds.pos = Vec2::new(s.player.body.bounds.right(), GROUND_Y - h);
        s.level.boss.health.current = 1;
        s.player.health.kill();
        step_frame(&mut s, &InputIntents::default());
        assert_eq!(s.take_transition_requests(), vec![Transition::RespawnOrGameOver]);

        let hold = InputIntents { attack_held: true, ..Default::default() };
        step_frame(&mut s, &hold);
        step_frame(&mut s, &InputIntents::default());
        assert!(s.level.boss.alive);
        assert_eq!(s.player.timers.attack_active, 0);
        assert!(!s.events.contains(&SimEvent::BossDefeated));
        assert!(s.take_transition_requests().is_empty());
    }

    #[test]
    fn hard_landing_emits_event_and_squash() {
        let mut s = quiet_state();
        s.player.body.bounds.pos.y = 300.0;
        s.player.body.vel.y = 0.0;
        let mut landed = None;
        for _ in 0..60 {
            step_frame(&mut s, &InputIntents::default());
            landed = s.events.iter().find_map(|e| match e {
                SimEvent::PlayerLanded { impact } => Some(*impact),
                _ => None,
            });
            if landed.is_some() {
                break;
            }
        }
        assert!(landed.is_some_and(|impact| impact > LAND_DUST_VY));
        assert!(s.player.timers.land_squash > LAND_SQUASH_FRAMES);
        assert!(!s.effects.particles.is_empty());
    }

    #[test]
    fn compaction_drops_dead_enemies() {
        let mut s = SimulationState::seeded(HeroTemplate::default(), 0, 5);
        s.level.hazards.clear();
        let total = s.level.enemies.len();
        for enemy in s.level.enemies.iter_mut().skip(1) {
            enemy.alive = false;
        }
        s.frame = COMPACT_INTERVAL - 1;
        step_frame(&mut s, &InputIntents::default());
        assert!(total > 1);
        assert_eq!(s.level.enemies.len(), 1);
    }
}
