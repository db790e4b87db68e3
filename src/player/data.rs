//! Hero stat templates loaded from RON data files.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::core::{read_ron, DataLoadError};

pub const HEROES_PATH: &str = "assets/data/heroes.ron";

/// Base stats for a playable hero.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HeroTemplate {
    pub id: String,
    pub name: String,
    pub speed: f32,
    /// Initial vertical velocity of a jump (negative is up).
    pub jump: f32,
    pub health: i32,
    pub attack: i32,
    #[serde(default = "default_jumps")]
    pub max_jumps: u32,
    /// Flat damage added to sword hits on the boss.
    #[serde(default)]
    pub boss_bonus: i32,
    #[serde(default)]
    pub shield: bool,
    #[serde(default)]
    pub dash: bool,
}

fn default_jumps() -> u32 {
    1
}

impl HeroTemplate {
    fn builtin(id: &str, name: &str, speed: f32, jump: f32, health: i32, attack: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            speed,
            jump,
            health,
            attack,
            max_jumps: 1,
            boss_bonus: 0,
            shield: false,
            dash: false,
        }
    }
}

impl Default for HeroTemplate {
    fn default() -> Self {
        Self::builtin("knight", "Knight", 4.0, -12.0, 100, 15)
    }
}

/// The six heroes of the base game.
pub fn builtin_heroes() -> Vec<HeroTemplate> {
    vec![
        HeroTemplate::default(),
        HeroTemplate {
            dash: true,
            ..HeroTemplate::builtin("rogue", "Rogue", 6.0, -11.0, 70, 12)
        },
        HeroTemplate {
            boss_bonus: 5,
            ..HeroTemplate::builtin("mage", "Mage", 3.5, -11.5, 75, 20)
        },
        HeroTemplate::builtin("berserker", "Berserker", 3.0, -10.5, 120, 25),
        HeroTemplate {
            max_jumps: 2,
            ..HeroTemplate::builtin("ranger", "Ranger", 5.0, -13.0, 80, 13)
        },
        HeroTemplate {
            shield: true,
            ..HeroTemplate::builtin("paladin", "Paladin", 3.5, -11.0, 140, 18)
        },
    ]
}

/// Resource holding every hero template by id.
#[derive(Resource, Clone, Debug)]
pub struct HeroRegistry {
    pub heroes: HashMap<String, HeroTemplate>,
}

impl Default for HeroRegistry {
    fn default() -> Self {
        Self::from_templates(builtin_heroes())
    }
}

impl HeroRegistry {
    pub fn from_templates(templates: Vec<HeroTemplate>) -> Self {
        Self {
            heroes: templates.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&HeroTemplate> {
        self.heroes.get(id)
    }

    pub fn require(&self, id: &str) -> Result<&HeroTemplate, DataLoadError> {
        self.get(id).ok_or_else(|| DataLoadError::UnknownHero(id.to_string()))
    }

    /// Read templates from a RON list of heroes.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let templates: Vec<HeroTemplate> = read_ron(path)?;
        if templates.is_empty() {
            return Err(DataLoadError::Empty(path.display().to_string()));
        }
        Ok(Self::from_templates(templates))
    }
}

/// Replace the built-in heroes with the data file, keeping built-ins on failure.
pub fn load_hero_registry(mut registry: ResMut<HeroRegistry>) {
    match HeroRegistry::load(Path::new(HEROES_PATH)) {
        Ok(loaded) => {
            info!("Loaded {} hero templates", loaded.heroes.len());
            *registry = loaded;
        }
        Err(DataLoadError::FileNotFound(path)) => {
            warn!("Hero data not found at {}, using built-in heroes", path);
        }
        Err(e) => {
            error!("{}; using built-in heroes", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_hero_file_matches_builtins() {
        let parsed: Vec<HeroTemplate> =
            ron::from_str(include_str!("../../assets/data/heroes.ron")).expect("heroes.ron parses");
        assert_eq!(parsed, builtin_heroes());
    }

    #[test]
    fn traits_are_assigned() {
        let registry = HeroRegistry::default();
        assert_eq!(registry.heroes.len(), 6);
        assert_eq!(registry.get("ranger").map(|h| h.max_jumps), Some(2));
        assert_eq!(registry.get("mage").map(|h| h.boss_bonus), Some(5));
        assert!(registry.get("paladin").is_some_and(|h| h.shield));
    }

    #[test]
    fn unknown_hero_is_an_error() {
        let registry = HeroRegistry::default();
        assert!(matches!(registry.require("bard"), Err(DataLoadError::UnknownHero(id)) if id == "bard"));
    }

    #[test]
    fn missing_file_reports_not_found() {
        let result = HeroRegistry::load(Path::new("assets/data/does_not_exist.ron"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
    }
}
