//! Coin magnetism and pickup collection.

use bevy::math::Vec2;

use super::data::{CollectibleKind, COLLECT_ANIM_FRAMES};
use crate::core::{ItemKind, SimEvent};
use crate::effects::{ParticleStyle, GOLD, WHITE};
use crate::simulation::SimulationState;

/// Pickups closer than this to the player's center are collected.
pub const COLLECT_RADIUS: f32 = 24.0;
/// Coins inside this radius drift toward the player.
pub const MAGNET_RADIUS: f32 = 80.0;
pub const MAGNET_SPEED: f32 = 3.0;
pub const COIN_SCORE: u64 = 10;

/// Pull nearby coins in, collect anything in reach, and tick pickup animations.
/// A dead player picks nothing up.
pub fn update_collectibles(state: &mut SimulationState) {
    let target = state.player.center();
    let can_collect = !state.player.health.is_dead();

    for index in 0..state.level.collectibles.len() {
        let item = &mut state.level.collectibles[index];
        if item.collected {
            item.collect_anim = item.collect_anim.saturating_sub(1);
            continue;
        }
        if !can_collect {
            continue;
        }

        let to_player = target - item.pos;
        let dist = to_player.length();
        if matches!(item.kind, CollectibleKind::Coin) && dist > COLLECT_RADIUS && dist < MAGNET_RADIUS {
            item.pos += to_player / dist * MAGNET_SPEED;
        }
        if item.pos.distance(target) >= COLLECT_RADIUS {
            continue;
        }

        item.collected = true;
        item.collect_anim = COLLECT_ANIM_FRAMES;
        let pos = item.pos;
        let kind = item.kind;
        collect(state, pos, kind);
    }
}

fn collect(state: &mut SimulationState, pos: Vec2, kind: CollectibleKind) {
    let item = match kind {
        CollectibleKind::Coin => {
            state.award(COIN_SCORE);
            state.effects.particles.burst(
                &mut state.rng,
                pos,
                12,
                Vec2::splat(4.0),
                Vec2::new(0.0, -1.0),
                ParticleStyle::new(20, 3.0, GOLD),
            );
            ItemKind::Coin
        }
        CollectibleKind::Heart { heal } => {
            state.player.health.heal(heal);
            ItemKind::Heart
        }
        CollectibleKind::Scroll { lore } => {
            state.last_scroll = Some(lore);
            state.effects.particles.burst(
                &mut state.rng,
                pos,
                8,
                Vec2::splat(3.0),
                Vec2::new(0.0, -1.5),
                ParticleStyle::new(30, 3.0, WHITE),
            );
            ItemKind::Scroll
        }
    };
    state.events.push(SimEvent::ItemCollected(item));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::HeroTemplate;
    use crate::world::Collectible;

    fn state_with(kind: CollectibleKind, offset: Vec2) -> SimulationState {
        let mut s = SimulationState::seeded(HeroTemplate::default(), 0, 3);
        let c = s.player.center() + offset;
        s.level.collectibles = vec![Collectible::new(c.x, c.y, kind)];
        s.drain_events();
        s
    }

    #[test]
    fn coin_in_reach_is_collected_once() {
        let mut s = state_with(CollectibleKind::Coin, Vec2::new(10.0, 0.0));
        update_collectibles(&mut s);
        assert!(s.level.collectibles[0].collected);
        assert_eq!(s.run.score, COIN_SCORE);
        assert_eq!(s.events, vec![SimEvent::ItemCollected(ItemKind::Coin)]);

        update_collectibles(&mut s);
        assert_eq!(s.run.score, COIN_SCORE);
        assert_eq!(s.level.collectibles[0].collect_anim, COLLECT_ANIM_FRAMES - 1);
    }

    #[test]
    fn nearby_coin_drifts_toward_player() {
        let mut s = state_with(CollectibleKind::Coin, Vec2::new(60.0, 0.0));
        let before = s.level.collectibles[0].pos.distance(s.player.center());
        update_collectibles(&mut s);
        let after = s.level.collectibles[0].pos.distance(s.player.center());
        assert!((before - after - MAGNET_SPEED).abs() < 1e-3);
        assert!(!s.level.collectibles[0].collected);
    }

    #[test]
    fn hearts_do_not_drift() {
        let mut s = state_with(CollectibleKind::Heart { heal: 25 }, Vec2::new(60.0, 0.0));
        let before = s.level.collectibles[0].pos;
        update_collectibles(&mut s);
        assert_eq!(s.level.collectibles[0].pos, before);
    }

    #[test]
    fn heart_heals_up_to_maximum() {
        let mut s = state_with(CollectibleKind::Heart { heal: 25 }, Vec2::ZERO);
        s.player.health.current = 90;
        update_collectibles(&mut s);
        assert_eq!(s.player.health.current, 100);
    }

    #[test]
    fn dead_player_collects_nothing() {
        let mut s = state_with(CollectibleKind::Heart { heal: 25 }, Vec2::ZERO);
        s.player.health.current = -3;
        update_collectibles(&mut s);
        assert!(!s.level.collectibles[0].collected);
        assert_eq!(s.player.health.current, -3);
        assert!(s.events.is_empty());
    }

    #[test]
    fn scroll_records_lore() {
        let mut s = state_with(CollectibleKind::Scroll { lore: 4 }, Vec2::ZERO);
        update_collectibles(&mut s);
        assert_eq!(s.last_scroll, Some(4));
        assert_eq!(s.events, vec![SimEvent::ItemCollected(ItemKind::Scroll)]);
    }
}
