//! Player controller: intents to actions, timer bookkeeping, and motion.

use super::components::*;
use super::input::InputIntents;
use crate::combat::{AttackType, CHARGED_COOLDOWN_EXTRA, CHARGE_THRESHOLD, SPECIAL_GAUGE_FRAMES};
use crate::core::SimEvent;
use crate::physics::{integrate, resolve_landing, resolve_walls, standing_on, Landing};
use crate::world::Platform;

/// Horizontal acceleration as a fraction of top speed.
const MOVE_ACCEL: f32 = 0.4;

/// Turn this frame's intents into actions. Runs before physics.
pub fn apply_intents(player: &mut Player, intents: &InputIntents, events: &mut Vec<SimEvent>) {
    // Level state, so a release missed while paused still cuts the jump
    player.jump_held = intents.jump_held && !intents.jump_released;

    if !player.is_locked() {
        start_evasion(player, intents);
    }

    if player.is_locked() {
        let speed = if player.is_dashing() { DASH_SPEED } else { DODGE_SPEED };
        player.body.vel.x = player.facing * speed;
        player.body.vel.y = 0.0;
        return;
    }

    if intents.move_left {
        player.body.vel.x -= player.speed * MOVE_ACCEL;
        player.facing = -1.0;
    }
    if intents.move_right {
        player.body.vel.x += player.speed * MOVE_ACCEL;
        player.facing = 1.0;
    }

    jump(player, intents, events);

    if let Some(attack_type) = intents.select_attack {
        if player.timers.attack_charge == 0 && player.timers.attack_active == 0 {
            player.attack_type = attack_type;
        }
    }
    attack(player, intents, events);

    if intents.shield && player.has_shield && player.timers.shield_cooldown == 0 {
        player.timers.shield_active = SHIELD_FRAMES;
        player.timers.shield_cooldown = SHIELD_COOLDOWN;
        events.push(SimEvent::ShieldRaised);
    }
}

/// Dodge roll or dash. Starting either cancels a swing in progress.
fn start_evasion(player: &mut Player, intents: &InputIntents) {
    let t = &mut player.timers;
    if intents.dodge && t.dodge_roll_cooldown == 0 {
        t.dodge_roll_active = DODGE_FRAMES;
        player.perfect_dodge_spent = false;
    } else if intents.dash && player.can_dash && t.dash_cooldown == 0 {
        t.dash_active = DASH_FRAMES;
    } else {
        return;
    }
    t.attack_active = 0;
    t.attack_charge = 0;
    player.charged_attack = false;
}

fn jump(player: &mut Player, intents: &InputIntents, events: &mut Vec<SimEvent>) {
    if intents.jump_pressed {
        player.timers.jump_buffer = JUMP_BUFFER_FRAMES;
    }
    if player.timers.jump_buffer == 0 {
        return;
    }

    let walled = !player.grounded && (player.wall_slide_left || player.wall_slide_right);
    if walled {
        let away = if player.wall_slide_left { 1.0 } else { -1.0 };
        player.body.vel.x = away * WALL_JUMP_VX;
        player.body.vel.y = player.jump_power * WALL_JUMP_POWER;
        player.facing = away;
        player.jumps_left = player.max_jumps.saturating_sub(1);
        player.wall_slide_left = false;
        player.wall_slide_right = false;
    } else if player.grounded || player.timers.coyote > 0 {
        player.body.vel.y = player.jump_power;
        player.jumps_left = player.max_jumps.saturating_sub(1);
    } else if intents.jump_pressed && player.jumps_left > 0 && player.max_jumps > 1 {
        player.body.vel.y = player.jump_power;
        player.jumps_left -= 1;
    } else {
        // Buffered for a landing in the next few frames
        return;
    }

    player.grounded = false;
    player.timers.coyote = 0;
    player.timers.jump_buffer = 0;
    player.timers.jump_stretch = JUMP_STRETCH_FRAMES;
    player.jump_held = true;
    events.push(SimEvent::PlayerJumped);
}

/// Hold to charge, release to swing.
fn attack(player: &mut Player, intents: &InputIntents, events: &mut Vec<SimEvent>) {
    let t = &mut player.timers;
    if intents.attack_held {
        if t.attack_active == 0 {
            t.attack_charge += 1;
        }
        return;
    }
    if t.attack_charge == 0 {
        return;
    }

    let held = std::mem::take(&mut t.attack_charge);
    let attack_type = player.attack_type;
    let gauge_ready = attack_type != AttackType::Special || t.special_cooldown == 0;
    if t.attack_cooldown > 0 || t.attack_active > 0 || !gauge_ready {
        return;
    }

    let profile = attack_type.profile();
    let charged = attack_type.can_charge() && held >= CHARGE_THRESHOLD;
    t.attack_active = profile.active_frames;
    t.attack_cooldown = profile.cooldown + if charged { CHARGED_COOLDOWN_EXTRA } else { 0 };
    if attack_type == AttackType::Special {
        t.special_cooldown = SPECIAL_GAUGE_FRAMES;
    }
    player.swing = attack_type;
    player.charged_attack = charged;
    events.push(SimEvent::AttackSwung { attack_type, charged });
}

/// Count every timer down by one frame. Finishing a roll or dash starts its cooldown.
pub fn tick_timers(player: &mut Player) {
    let t = &mut player.timers;
    for timer in [
        &mut t.attack_active,
        &mut t.attack_cooldown,
        &mut t.special_cooldown,
        &mut t.hurt,
        &mut t.invincible,
        &mut t.jump_buffer,
        &mut t.dodge_roll_cooldown,
        &mut t.dash_cooldown,
        &mut t.shield_active,
        &mut t.shield_cooldown,
        &mut t.land_squash,
        &mut t.jump_stretch,
    ] {
        *timer = timer.saturating_sub(1);
    }

    if t.dodge_roll_active > 0 {
        t.dodge_roll_active -= 1;
        if t.dodge_roll_active == 0 {
            t.dodge_roll_cooldown = DODGE_COOLDOWN;
        }
    }
    if t.dash_active > 0 {
        t.dash_active -= 1;
        if t.dash_active == 0 {
            t.dash_cooldown = DASH_COOLDOWN;
        }
    }
    if t.attack_active == 0 {
        player.charged_attack = false;
    }
}

/// Integrate and collide the player against the level. Returns the landing, if any.
pub fn move_player(player: &mut Player, platforms: &[Platform], level_width: f32, dt: f32) -> Option<Landing> {
    let was_grounded = player.grounded;

    let landing = if player.is_locked() {
        player.body.bounds.pos.x += player.body.vel.x * dt;
        player.grounded = standing_on(&player.body, platforms).is_some();
        None
    } else {
        integrate(&mut player.body, dt);
        if !player.grounded && player.body.vel.y < 0.0 && !player.jump_held {
            player.body.vel.y *= JUMP_CUT;
        }
        player.body.vel.x = player.body.vel.x.clamp(-player.speed, player.speed);
        let landing = resolve_landing(&mut player.body, platforms);
        player.grounded = landing.is_some();
        landing
    };

    let max_x = level_width - player.body.bounds.size.x;
    player.body.bounds.pos.x = player.body.bounds.pos.x.clamp(0.0, max_x.max(0.0));

    let walls = if player.grounded {
        Default::default()
    } else {
        resolve_walls(&mut player.body, platforms)
    };
    player.wall_slide_left = walls.left;
    player.wall_slide_right = walls.right;

    if player.grounded {
        player.jumps_left = player.max_jumps;
        player.timers.coyote = COYOTE_FRAMES;
    } else if player.timers.coyote > 0 {
        player.timers.coyote -= 1;
        // Walking off a ledge spends the ground jump once coyote time runs out
        if player.timers.coyote == 0 && player.jumps_left == player.max_jumps {
            player.jumps_left -= 1;
        }
    } else if was_grounded && player.jumps_left == player.max_jumps {
        player.jumps_left -= 1;
    }

    landing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::GRAVITY;
    use crate::player::builtin_heroes;
    use crate::world::{Platform, GROUND_Y, TILE};

    fn knight() -> Player {
        let hero = builtin_heroes().into_iter().next().expect("knight");
        Player::new(&hero, 0)
    }

    fn floor() -> Vec<Platform> {
        (0..40).map(|i| Platform::ground(i as f32 * TILE, GROUND_Y, TILE, TILE)).collect()
    }

    /// One controller frame the way the simulation runs it.
    fn frame(player: &mut Player, intents: &InputIntents, platforms: &[Platform]) -> Vec<SimEvent> {
        let mut events = Vec::new();
        apply_intents(player, intents, &mut events);
        tick_timers(player);
        move_player(player, platforms, 1600.0, 1.0);
        events
    }

    fn settle(player: &mut Player, platforms: &[Platform]) {
        for _ in 0..30 {
            frame(player, &InputIntents::default(), platforms);
        }
        assert!(player.grounded);
    }

    #[test]
    fn landing_restores_jumps_and_coyote() {
        let plats = floor();
        let mut p = knight();
        p.jumps_left = 0;
        settle(&mut p, &plats);
        assert_eq!(p.jumps_left, p.max_jumps);
        assert_eq!(p.timers.coyote, COYOTE_FRAMES);
        assert_eq!(p.body.bottom(), GROUND_Y);
    }

    #[test]
    fn grounded_jump_leaves_the_floor() {
        let plats = floor();
        let mut p = knight();
        settle(&mut p, &plats);
        let events = frame(&mut p, &InputIntents { jump_pressed: true, jump_held: true, ..Default::default() }, &plats);
        assert!(events.contains(&SimEvent::PlayerJumped));
        assert!(!p.grounded);
        assert!(p.body.vel.y < 0.0);
        assert_eq!(p.jumps_left, 0);
    }

    #[test]
    fn single_jump_hero_cannot_air_jump() {
        let plats = floor();
        let mut p = knight();
        settle(&mut p, &plats);
        frame(&mut p, &InputIntents { jump_pressed: true, jump_held: true, ..Default::default() }, &plats);
        frame(&mut p, &InputIntents { jump_held: true, ..Default::default() }, &plats);
        let events = frame(&mut p, &InputIntents { jump_pressed: true, jump_held: true, ..Default::default() }, &plats);
        assert!(events.is_empty());
    }

    #[test]
    fn buffered_jump_fires_on_landing() {
        let plats = floor();
        let mut p = knight();
        settle(&mut p, &plats);
        // Drop from a short height and press jump just before touching down
        p.body.bounds.pos.y = GROUND_Y - PLAYER_HEIGHT - 6.0;
        p.grounded = false;
        p.timers.coyote = 0;
        p.body.vel.y = 3.0;
        let mut jumped = frame(&mut p, &InputIntents { jump_pressed: true, jump_held: true, ..Default::default() }, &plats);
        for _ in 0..3 {
            jumped.extend(frame(&mut p, &InputIntents { jump_held: true, ..Default::default() }, &plats));
        }
        assert!(jumped.contains(&SimEvent::PlayerJumped));
    }

    #[test]
    fn releasing_jump_cuts_height() {
        let plats = floor();
        let mut full = knight();
        let mut cut = knight();
        settle(&mut full, &plats);
        settle(&mut cut, &plats);
        let press = InputIntents { jump_pressed: true, jump_held: true, ..Default::default() };
        frame(&mut full, &press, &plats);
        frame(&mut cut, &press, &plats);
        let held = InputIntents { jump_held: true, ..Default::default() };
        let released = InputIntents { jump_released: true, ..Default::default() };
        frame(&mut full, &held, &plats);
        frame(&mut cut, &released, &plats);
        assert!(cut.body.vel.y > full.body.vel.y);
    }

    #[test]
    fn dodge_drives_motion_and_starts_cooldown_on_completion() {
        let plats = floor();
        let mut p = knight();
        settle(&mut p, &plats);
        let x0 = p.body.bounds.pos.x;
        frame(&mut p, &InputIntents { dodge: true, ..Default::default() }, &plats);
        assert!(p.is_dodging());
        assert_eq!(p.timers.dodge_roll_cooldown, 0);
        assert!(p.body.bounds.pos.x - x0 >= DODGE_SPEED - 0.01);

        // Re-triggering mid-roll changes nothing
        let before = p.timers.dodge_roll_active;
        frame(&mut p, &InputIntents { dodge: true, ..Default::default() }, &plats);
        assert_eq!(p.timers.dodge_roll_active, before - 1);

        for _ in 0..DODGE_FRAMES {
            frame(&mut p, &InputIntents::default(), &plats);
        }
        assert!(!p.is_dodging());
        assert!(p.timers.dodge_roll_cooldown > 0 && p.timers.dodge_roll_cooldown <= DODGE_COOLDOWN);
        frame(&mut p, &InputIntents { dodge: true, ..Default::default() }, &plats);
        assert!(!p.is_dodging());
    }

    #[test]
    fn dash_requires_unlock() {
        let plats = floor();
        let mut p = knight();
        settle(&mut p, &plats);
        frame(&mut p, &InputIntents { dash: true, ..Default::default() }, &plats);
        assert!(!p.is_dashing());
        p.can_dash = true;
        frame(&mut p, &InputIntents { dash: true, dodge: false, ..Default::default() }, &plats);
        assert!(p.is_dashing());
        assert!(!p.is_dodging());
    }

    #[test]
    fn dash_cannot_retrigger_while_active() {
        let plats = floor();
        let mut p = knight();
        p.can_dash = true;
        settle(&mut p, &plats);
        let dash = InputIntents { dash: true, ..Default::default() };
        frame(&mut p, &dash, &plats);
        assert_eq!(p.timers.dash_active, DASH_FRAMES - 1);

        for remaining in (1..DASH_FRAMES - 1).rev() {
            frame(&mut p, &dash, &plats);
            assert_eq!(p.timers.dash_active, remaining);
            assert_eq!(p.timers.dash_cooldown, 0);
        }
        frame(&mut p, &dash, &plats);
        assert!(!p.is_dashing());
        assert_eq!(p.timers.dash_cooldown, DASH_COOLDOWN);

        // Still on cooldown
        frame(&mut p, &dash, &plats);
        assert!(!p.is_dashing());
        assert_eq!(p.timers.dash_cooldown, DASH_COOLDOWN - 1);
    }

    #[test]
    fn jump_held_state_controls_the_cut() {
        let plats = floor();
        let mut p = knight();
        settle(&mut p, &plats);
        frame(&mut p, &InputIntents { jump_pressed: true, jump_held: true, ..Default::default() }, &plats);
        assert!(p.jump_held);

        // The release edge never arrives, but the key is no longer held
        let vy = p.body.vel.y;
        frame(&mut p, &InputIntents::default(), &plats);
        assert!(!p.jump_held);
        assert!((p.body.vel.y - (vy + GRAVITY) * JUMP_CUT).abs() < 1e-4);
    }

    #[test]
    fn dodge_cancels_swing_and_ignores_attack() {
        let plats = floor();
        let mut p = knight();
        settle(&mut p, &plats);
        frame(&mut p, &InputIntents { attack_held: true, ..Default::default() }, &plats);
        let events = frame(&mut p, &InputIntents::default(), &plats);
        assert!(matches!(events[0], SimEvent::AttackSwung { .. }));
        assert!(p.timers.attack_active > 0);
        frame(&mut p, &InputIntents { dodge: true, ..Default::default() }, &plats);
        assert_eq!(p.timers.attack_active, 0);
        frame(&mut p, &InputIntents { attack_held: true, ..Default::default() }, &plats);
        assert_eq!(p.timers.attack_charge, 0);
        assert_eq!(p.action_state(), ActionState::DodgeRolling);
    }

    #[test]
    fn long_hold_charges_fast_and_slow_only() {
        let plats = floor();
        let mut p = knight();
        settle(&mut p, &plats);
        for _ in 0..CHARGE_THRESHOLD {
            frame(&mut p, &InputIntents { attack_held: true, ..Default::default() }, &plats);
        }
        assert_eq!(p.action_state(), ActionState::Charging(AttackType::Fast));
        let events = frame(&mut p, &InputIntents::default(), &plats);
        assert_eq!(events, vec![SimEvent::AttackSwung { attack_type: AttackType::Fast, charged: true }]);

        for _ in 0..60 {
            frame(&mut p, &InputIntents::default(), &plats);
        }
        frame(&mut p, &InputIntents { select_attack: Some(AttackType::Special), ..Default::default() }, &plats);
        for _ in 0..CHARGE_THRESHOLD {
            frame(&mut p, &InputIntents { attack_held: true, ..Default::default() }, &plats);
        }
        let events = frame(&mut p, &InputIntents::default(), &plats);
        assert_eq!(events, vec![SimEvent::AttackSwung { attack_type: AttackType::Special, charged: false }]);
        assert!(p.timers.special_cooldown > 0);
    }

    #[test]
    fn special_waits_for_gauge() {
        let plats = floor();
        let mut p = knight();
        settle(&mut p, &plats);
        p.attack_type = AttackType::Special;
        p.timers.special_cooldown = 100;
        frame(&mut p, &InputIntents { attack_held: true, ..Default::default() }, &plats);
        let events = frame(&mut p, &InputIntents::default(), &plats);
        assert!(events.is_empty());
        assert_eq!(p.timers.attack_active, 0);
        assert_eq!(p.timers.attack_charge, 0);
    }

    #[test]
    fn attack_on_cooldown_does_nothing() {
        let plats = floor();
        let mut p = knight();
        settle(&mut p, &plats);
        p.timers.attack_cooldown = 10;
        frame(&mut p, &InputIntents { attack_held: true, ..Default::default() }, &plats);
        assert!(frame(&mut p, &InputIntents::default(), &plats).is_empty());
    }

    #[test]
    fn wall_jump_pushes_away_from_wall() {
        let mut plats = floor();
        plats.push(Platform::ground(400.0, GROUND_Y - 300.0, TILE, 300.0));
        let mut p = knight();
        p.body.bounds.pos = bevy::math::Vec2::new(400.0 - PLAYER_WIDTH - 1.0, GROUND_Y - 200.0);
        p.body.vel.y = 1.0;
        p.grounded = false;
        move_player(&mut p, &plats, 1600.0, 1.0);
        assert!(p.wall_slide_right);
        assert!(matches!(p.movement_state(), MovementState::WallSliding { left: false }));

        let events = frame(&mut p, &InputIntents { jump_pressed: true, jump_held: true, ..Default::default() }, &plats);
        assert!(events.contains(&SimEvent::PlayerJumped));
        assert!(p.body.vel.x < 0.0);
        assert_eq!(p.facing, -1.0);
    }

    #[test]
    fn shield_is_hero_specific() {
        let plats = floor();
        let mut p = knight();
        settle(&mut p, &plats);
        assert!(frame(&mut p, &InputIntents { shield: true, ..Default::default() }, &plats).is_empty());
        p.has_shield = true;
        let events = frame(&mut p, &InputIntents { shield: true, ..Default::default() }, &plats);
        assert_eq!(events, vec![SimEvent::ShieldRaised]);
        assert!(p.shield_up());
        assert_eq!(p.action_state(), ActionState::ShieldRaised);
    }
}
