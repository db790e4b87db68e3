//! Run configuration chosen before play starts.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{read_ron, DataLoadError};
use crate::world::LEVEL_COUNT;

pub const RUN_CONFIG_PATH: &str = "assets/data/run_config.ron";

/// Hero and starting level for a run.
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RunConfig {
    pub hero: String,
    pub level_index: usize,
    #[serde(default = "default_lives")]
    pub lives: u32,
    /// Fixed random seed for reproducible runs. Entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_lives() -> u32 {
    3
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            hero: "knight".to_string(),
            level_index: 0,
            lives: default_lives(),
            seed: None,
        }
    }
}

impl RunConfig {
    /// Load from a RON file. Out-of-range values are clamped.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let mut config: RunConfig = read_ron(path)?;
        config.level_index = config.level_index.min(LEVEL_COUNT - 1);
        config.lives = config.lives.max(1);
        Ok(config)
    }
}

/// Replace the default run configuration with the data file, if present.
pub fn load_run_config(mut config: ResMut<RunConfig>) {
    match RunConfig::load(Path::new(RUN_CONFIG_PATH)) {
        Ok(loaded) => {
            info!(
                "Run config: hero '{}', level {}, {} lives",
                loaded.hero, loaded.level_index, loaded.lives
            );
            *config = loaded;
        }
        Err(DataLoadError::FileNotFound(path)) => {
            info!("No run config at {}, using defaults", path);
        }
        Err(e) => {
            error!("{}; using default run config", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_config_parses() {
        let config: RunConfig =
            ron::from_str(include_str!("../../assets/data/run_config.ron")).expect("run_config.ron parses");
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn lives_default_when_omitted() {
        let config: RunConfig = ron::from_str("(hero: \"mage\", level_index: 4)").expect("parses");
        assert_eq!(config.lives, 3);
        assert_eq!(config.level_index, 4);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn seed_is_optional() {
        let config: RunConfig = ron::from_str("(hero: \"rogue\", level_index: 1, seed: Some(42))").expect("parses");
        assert_eq!(config.seed, Some(42));
    }
}
