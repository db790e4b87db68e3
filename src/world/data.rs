//! Level geometry, collectibles, and the realm theme table.

use bevy::math::Vec2;

use crate::enemies::{Boss, Enemy};
use crate::physics::Aabb;

/// Size of one ground tile in pixels.
pub const TILE: f32 = 40.0;
/// Visible area of the host's viewport.
pub const VIEW_WIDTH: f32 = 960.0;
pub const VIEW_HEIGHT: f32 = 540.0;
/// Top edge of the ground strip.
pub const GROUND_Y: f32 = VIEW_HEIGHT - TILE;
/// Anything whose top passes this line has fallen out of the world.
pub const FALL_DEATH_Y: f32 = VIEW_HEIGHT + 100.0;
/// Number of realms in a full run.
pub const LEVEL_COUNT: usize = 10;

/// Realm flavor for one level index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelTheme {
    pub name: &'static str,
    pub boss_name: &'static str,
    pub hazard: &'static str,
}

const THEMES: [LevelTheme; LEVEL_COUNT] = [
    LevelTheme { name: "Enchanted Forest", boss_name: "Treant King", hazard: "thorns" },
    LevelTheme { name: "Crystal Caves", boss_name: "Crystal Golem", hazard: "crystals" },
    LevelTheme { name: "Volcanic Wastes", boss_name: "Magma Wyrm", hazard: "lava" },
    LevelTheme { name: "Frozen Peaks", boss_name: "Frost Giant", hazard: "ice" },
    LevelTheme { name: "Ancient Ruins", boss_name: "Stone Guardian", hazard: "traps" },
    LevelTheme { name: "Shadow Marsh", boss_name: "Swamp Hydra", hazard: "poison" },
    LevelTheme { name: "Sky Citadel", boss_name: "Storm Lord", hazard: "wind" },
    LevelTheme { name: "Desert Temple", boss_name: "Pharaoh Lich", hazard: "sand" },
    LevelTheme { name: "Abyssal Depths", boss_name: "Leviathan", hazard: "water" },
    LevelTheme { name: "Dragon's Keep", boss_name: "Elder Dragon", hazard: "fire" },
];

/// Theme for a level index; out-of-range indices clamp to the last realm.
pub fn level_theme(level_index: usize) -> &'static LevelTheme {
    &THEMES[level_index.min(LEVEL_COUNT - 1)]
}

/// Lore lines carried by scrolls, indexed by `CollectibleKind::Scroll::lore`.
pub const LORE: [&str; 6] = [
    "The realms were bound by a single blade, long since shattered.",
    "Each guardian keeps a shard. Each shard remembers its wielder.",
    "Coins of the old kingdom still carry the warmth of the forge.",
    "Those who roll through danger unharmed are favored by time itself.",
    "The dragon did not take the keep. The keep was built around it.",
    "A guardian wounded past half its strength fights with a second heart.",
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlatformKind {
    Ground,
    Float,
    Moving {
        origin_x: f32,
        range: f32,
        speed: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    pub bounds: Aabb,
    pub kind: PlatformKind,
    /// Horizontal distance moved on the last advance.
    pub delta_x: f32,
}

impl Platform {
    pub fn ground(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { bounds: Aabb::new(x, y, w, h), kind: PlatformKind::Ground, delta_x: 0.0 }
    }

    pub fn float(x: f32, y: f32, w: f32) -> Self {
        Self { bounds: Aabb::new(x, y, w, TILE / 2.0), kind: PlatformKind::Float, delta_x: 0.0 }
    }

    pub fn moving(x: f32, y: f32, w: f32, range: f32, speed: f32) -> Self {
        Self {
            bounds: Aabb::new(x, y, w, TILE / 2.0),
            kind: PlatformKind::Moving { origin_x: x, range, speed },
            delta_x: 0.0,
        }
    }

    /// Floating and moving platforms bounce a hard landing back up.
    pub fn is_springy(&self) -> bool {
        !matches!(self.kind, PlatformKind::Ground)
    }

    /// Move to the frame's sinusoidal offset. Returns the x-delta applied.
    pub fn advance(&mut self, frame: u64) -> f32 {
        let PlatformKind::Moving { origin_x, range, speed } = self.kind else {
            return 0.0;
        };
        let x = origin_x + (frame as f32 * 0.02 * speed).sin() * range;
        self.delta_x = x - self.bounds.pos.x;
        self.bounds.pos.x = x;
        self.delta_x
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HazardKind {
    /// Spikes on the ground strip.
    Ground,
    /// Spikes hanging under a floating platform.
    Ceiling,
    /// A blade sweeping back and forth along the ground.
    Patrolling { origin_x: f32, range: f32, speed: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hazard {
    pub bounds: Aabb,
    pub kind: HazardKind,
    pub damage: i32,
}

impl Hazard {
    pub fn advance(&mut self, frame: u64) {
        if let HazardKind::Patrolling { origin_x, range, speed } = self.kind {
            self.bounds.pos.x = origin_x + (frame as f32 * 0.03 * speed).sin() * range;
        }
    }
}

/// Frames a collected pickup keeps animating before it disappears.
pub const COLLECT_ANIM_FRAMES: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CollectibleKind {
    Coin,
    Heart { heal: i32 },
    Scroll { lore: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collectible {
    /// Center of the pickup.
    pub pos: Vec2,
    pub kind: CollectibleKind,
    pub collected: bool,
    pub collect_anim: u32,
}

impl Collectible {
    pub fn new(x: f32, y: f32, kind: CollectibleKind) -> Self {
        Self { pos: Vec2::new(x, y), kind, collected: false, collect_anim: 0 }
    }
}

/// Everything the generator produces for one level.
#[derive(Clone, Debug)]
pub struct LevelData {
    pub level_index: usize,
    pub width: f32,
    pub theme: &'static LevelTheme,
    pub platforms: Vec<Platform>,
    pub hazards: Vec<Hazard>,
    pub collectibles: Vec<Collectible>,
    pub enemies: Vec<Enemy>,
    pub boss: Boss,
}

impl LevelData {
    pub fn level_width(level_index: usize) -> f32 {
        4800.0 + 400.0 * level_index as f32
    }

    pub fn living_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn coins(&self) -> impl Iterator<Item = &Collectible> {
        self.collectibles.iter().filter(|c| matches!(c.kind, CollectibleKind::Coin))
    }

    /// Drop dead enemies. Only called between frames.
    pub fn compact(&mut self) {
        self.enemies.retain(|e| e.alive);
        self.collectibles.retain(|c| !c.collected || c.collect_anim > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_platform_stays_within_range() {
        let mut plat = Platform::moving(1000.0, 300.0, 120.0, 120.0, 1.1);
        for frame in 0..2000 {
            let dx = plat.advance(frame);
            assert!(dx.abs() <= 120.0 * 2.0);
            assert!((plat.bounds.pos.x - 1000.0).abs() <= 120.01);
        }
    }

    #[test]
    fn static_platforms_never_move() {
        let mut plat = Platform::float(10.0, 20.0, 80.0);
        assert_eq!(plat.advance(500), 0.0);
        assert_eq!(plat.bounds.pos, Vec2::new(10.0, 20.0));
        assert!(plat.is_springy());
        assert!(!Platform::ground(0.0, GROUND_Y, TILE, TILE).is_springy());
    }

    #[test]
    fn theme_clamps_out_of_range_levels() {
        assert_eq!(level_theme(0).boss_name, "Treant King");
        assert_eq!(level_theme(42).name, "Dragon's Keep");
    }
}
