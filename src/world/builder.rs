//! Procedural level construction.
//!
//! Placement comes from `seed = level_index * 137` with modular arithmetic,
//! so counts and positions are a pure function of the level index. Only
//! ground-strip gaps use the injected random source.

use rand::Rng;

use super::data::*;
use crate::enemies::{Boss, Enemy, EnemyKind, ENEMY_HEIGHT};
use crate::physics::Aabb;

/// Chance that a ground tile is left out.
const GAP_CHANCE: f32 = 0.06;
/// Distance from the right edge where the boss stands.
const BOSS_OFFSET: f32 = 350.0;
const HEART_HEAL: i32 = 25;
const SCROLLS_PER_LEVEL: usize = 3;

/// Counts of each generated element for a level index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelCounts {
    pub floating: usize,
    pub moving: usize,
    pub enemies: usize,
    pub ground_hazards: usize,
    pub ceiling_hazards: usize,
    pub patrolling_hazards: usize,
    pub coins: usize,
    pub hearts: usize,
    pub scrolls: usize,
}

impl LevelCounts {
    pub fn for_level(level_index: usize) -> Self {
        let l = level_index;
        Self {
            floating: 30 + 5 * l,
            moving: 5 + l,
            enemies: 15 + 3 * l,
            ground_hazards: 8 + 2 * l,
            ceiling_hazards: 2 + l,
            patrolling_hazards: 1 + l / 2,
            coins: 40 + 5 * l,
            hearts: 2 + l / 3,
            scrolls: SCROLLS_PER_LEVEL,
        }
    }
}

/// `base + ((seed + i * step) mod span)`, the placement rule used throughout.
fn place(base: f32, seed: usize, i: usize, step: usize, span: f32) -> f32 {
    let span = span.max(1.0) as usize;
    base + ((seed + i * step) % span) as f32
}

/// Build the level for `level_index`, clamped into the realm table.
pub fn generate(level_index: usize, rng: &mut impl Rng) -> LevelData {
    let l = level_index.min(LEVEL_COUNT - 1);
    let lf = l as f32;
    let width = LevelData::level_width(l);
    let seed = l * 137;
    let counts = LevelCounts::for_level(l);
    let theme = level_theme(l);

    let mut platforms = Vec::new();

    // Ground strip with gaps, never at the spawn or in the boss approach
    let mut x = 0.0;
    while x < width {
        let protected = x < 200.0 || x > width - 400.0;
        if protected || rng.gen::<f32>() >= GAP_CHANCE {
            platforms.push(Platform::ground(x, GROUND_Y, TILE, TILE));
        }
        x += TILE;
    }

    let float_start = platforms.len();
    for i in 0..counts.floating {
        let px = place(300.0, seed, i, 173, width - 600.0);
        let py = place(160.0, seed, i, 91, 280.0);
        platforms.push(Platform::float(px, py, TILE * (2 + i % 3) as f32));
    }

    for i in 0..counts.moving {
        let px = place(500.0, seed, i, 211, width - 800.0);
        let py = place(200.0, seed, i, 67, 240.0);
        platforms.push(Platform::moving(px, py, TILE * 3.0, 120.0, 0.5 + (i % 3) as f32 * 0.3));
    }

    let enemy_health = 20 + 5 * l as i32;
    let enemy_speed = 1.0 + 0.15 * lf;
    let enemies = (0..counts.enemies)
        .map(|i| {
            let ex = place(400.0, seed, i, 197, width - 800.0);
            let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
            Enemy::new(
                EnemyKind::for_index(i),
                ex,
                GROUND_Y - ENEMY_HEIGHT,
                enemy_health,
                enemy_speed,
                direction,
            )
        })
        .collect();

    let mut hazards = Vec::new();
    for i in 0..counts.ground_hazards {
        let hx = place(500.0, seed, i, 157, width - 600.0);
        hazards.push(Hazard {
            bounds: Aabb::new(hx, GROUND_Y - 12.0, TILE * 2.0, 12.0),
            kind: HazardKind::Ground,
            damage: 8 + 2 * l as i32,
        });
    }
    // Hang ceiling spikes under every few floating platforms
    let floats = &platforms[float_start..float_start + counts.floating];
    for i in 0..counts.ceiling_hazards {
        let host = floats[(i * 7 + l) % floats.len()].bounds;
        hazards.push(Hazard {
            bounds: Aabb::new(host.left() + 8.0, host.bottom(), host.size.x - 16.0, 14.0),
            kind: HazardKind::Ceiling,
            damage: 6 + 2 * l as i32,
        });
    }
    for i in 0..counts.patrolling_hazards {
        let hx = place(800.0, seed, i, 241, width - 1400.0);
        hazards.push(Hazard {
            bounds: Aabb::new(hx, GROUND_Y - 24.0, 24.0, 24.0),
            kind: HazardKind::Patrolling {
                origin_x: hx,
                range: 100.0,
                speed: 0.6 + (i % 2) as f32 * 0.4,
            },
            damage: 10 + 2 * l as i32,
        });
    }

    let mut collectibles = Vec::new();
    for i in 0..counts.coins {
        let cx = place(200.0, seed, i, 113, width - 400.0);
        let cy = place(100.0, seed, i, 79, 360.0);
        collectibles.push(Collectible::new(cx, cy, CollectibleKind::Coin));
    }
    for i in 0..counts.hearts {
        let hx = place(600.0, seed, i, 331, width - 1200.0);
        collectibles.push(Collectible::new(hx, GROUND_Y - 30.0, CollectibleKind::Heart { heal: HEART_HEAL }));
    }
    for i in 0..counts.scrolls {
        let sx = place(700.0, seed, i, 389, width - 1400.0);
        let lore = (l + i * 2) % LORE.len();
        collectibles.push(Collectible::new(sx, GROUND_Y - 30.0, CollectibleKind::Scroll { lore }));
    }

    // Boss arena
    let boss_x = width - BOSS_OFFSET;
    platforms.push(Platform::ground(boss_x - 200.0, GROUND_Y, 600.0, TILE));
    platforms.push(Platform::float(boss_x - 100.0, 300.0, TILE * 4.0));
    platforms.push(Platform::float(boss_x + 100.0, 200.0, TILE * 3.0));
    let boss = Boss::new(theme.boss_name, boss_x, GROUND_Y, l);

    LevelData {
        level_index: l,
        width,
        theme,
        platforms,
        hazards,
        collectibles,
        enemies,
        boss,
    }
}
