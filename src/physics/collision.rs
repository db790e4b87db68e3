//! Integration and platform contact resolution.

use super::body::Body;
use crate::world::Platform;

pub const GRAVITY: f32 = 0.6;
/// Per-frame horizontal damping.
pub const FRICTION: f32 = 0.85;
/// How far below a platform's bottom edge a falling body may be and still land.
pub const LANDING_TOLERANCE: f32 = 15.0;
/// Vertical velocity given by a hard landing on a floating or moving platform.
pub const PLATFORM_BOUNCE_VY: f32 = -5.0;
/// Landings faster than this bounce, squash, and emit a landing event.
pub const LANDING_IMPACT_MIN: f32 = 2.0;
/// Landings faster than this kick up dust.
pub const LAND_DUST_VY: f32 = 5.0;
pub const WALL_MARGIN: f32 = 6.0;
pub const WALL_SLIDE_MAX_VY: f32 = 2.5;

/// Result of a landing this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landing {
    /// Downward speed at the moment of contact.
    pub impact: f32,
}

/// Which sides of the body are pressed against a platform edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

/// Gravity and friction, then advance position by time-scaled velocity.
pub fn integrate(body: &mut Body, dt: f32) {
    body.vel.y += GRAVITY * dt;
    body.vel.x *= FRICTION;
    body.bounds.pos += body.vel * dt;
}

/// Land on the first platform whose top the body's bottom edge has just crossed.
pub fn resolve_landing(body: &mut Body, platforms: &[Platform]) -> Option<Landing> {
    if body.vel.y < 0.0 {
        return None;
    }
    let bottom = body.bounds.bottom();
    let plat = platforms.iter().find(|plat| {
        body.bounds.spans_x(&plat.bounds)
            && bottom > plat.bounds.top()
            && bottom < plat.bounds.top() + plat.bounds.size.y + LANDING_TOLERANCE
    })?;

    let impact = body.vel.y;
    body.bounds.pos.y = plat.bounds.top() - body.bounds.size.y;
    body.vel.y = 0.0;
    if plat.is_springy() && impact > LANDING_IMPACT_MIN {
        body.vel.y = PLATFORM_BOUNCE_VY;
    }
    body.bounds.pos.x += plat.delta_x;

    Some(Landing { impact })
}

/// Index of the platform the body rests on, for bodies moved without gravity.
pub fn standing_on(body: &Body, platforms: &[Platform]) -> Option<usize> {
    let bottom = body.bounds.bottom();
    platforms
        .iter()
        .position(|plat| body.bounds.spans_x(&plat.bounds) && (bottom - plat.bounds.top()).abs() < 1.0)
}

/// Detect side contact with platform edges and clamp the slide speed.
///
/// Only checked while airborne and not rising quickly.
pub fn resolve_walls(body: &mut Body, platforms: &[Platform]) -> WallContact {
    let mut contact = WallContact::default();
    if body.vel.y < -0.5 {
        return contact;
    }
    for plat in platforms {
        if !body.bounds.spans_y(&plat.bounds) || body.bounds.bottom() <= plat.bounds.top() + 1.0 {
            continue;
        }
        if (body.bounds.right() - plat.bounds.left()).abs() <= WALL_MARGIN {
            contact.right = true;
            body.bounds.pos.x = plat.bounds.left() - body.bounds.size.x;
        } else if (body.bounds.left() - plat.bounds.right()).abs() <= WALL_MARGIN {
            contact.left = true;
            body.bounds.pos.x = plat.bounds.right();
        }
    }
    if contact.any() {
        body.vel.y = body.vel.y.min(WALL_SLIDE_MAX_VY);
    }
    contact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Platform, GROUND_Y, TILE};

    #[test]
    fn falling_body_lands_on_ground() {
        let mut body = Body::new(100.0, GROUND_Y - 36.0 + 3.0, 32.0, 36.0);
        body.vel.y = 4.0;
        let ground = [Platform::ground(80.0, GROUND_Y, TILE * 4.0, TILE)];
        let landing = resolve_landing(&mut body, &ground).expect("should land");
        assert_eq!(landing.impact, 4.0);
        assert_eq!(body.bottom(), GROUND_Y);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn rising_body_passes_through() {
        let mut body = Body::new(100.0, GROUND_Y - 30.0, 32.0, 36.0);
        body.vel.y = -3.0;
        let ground = [Platform::ground(80.0, GROUND_Y, TILE * 4.0, TILE)];
        assert!(resolve_landing(&mut body, &ground).is_none());
    }

    #[test]
    fn hard_landing_on_float_bounces() {
        let mut body = Body::new(100.0, 300.0 - 36.0 + 5.0, 32.0, 36.0);
        body.vel.y = 8.0;
        let plats = [Platform::float(90.0, 300.0, 120.0)];
        let landing = resolve_landing(&mut body, &plats).expect("should land");
        assert_eq!(landing.impact, 8.0);
        assert_eq!(body.vel.y, PLATFORM_BOUNCE_VY);
    }

    #[test]
    fn body_too_far_below_top_does_not_snap() {
        let mut body = Body::new(100.0, 300.0 + 40.0, 32.0, 36.0);
        body.vel.y = 3.0;
        let plats = [Platform::float(90.0, 300.0, 120.0)];
        assert!(resolve_landing(&mut body, &plats).is_none());
    }

    #[test]
    fn wall_contact_caps_slide_speed() {
        let mut body = Body::new(200.0 - 32.0 - 2.0, GROUND_Y - 50.0, 32.0, 36.0);
        body.vel.y = 6.0;
        let wall = [Platform::ground(200.0, GROUND_Y - 100.0, TILE, 200.0)];
        let contact = resolve_walls(&mut body, &wall);
        assert!(contact.right && !contact.left);
        assert_eq!(body.vel.y, WALL_SLIDE_MAX_VY);
    }

    #[test]
    fn integrate_applies_gravity_and_friction() {
        let mut body = Body::new(0.0, 0.0, 10.0, 10.0);
        body.vel.x = 4.0;
        integrate(&mut body, 1.0);
        assert!((body.vel.x - 3.4).abs() < 1e-5);
        assert!((body.vel.y - GRAVITY).abs() < 1e-5);
        assert!((body.bounds.pos.x - 3.4).abs() < 1e-5);
    }
}
