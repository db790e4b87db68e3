//! The simulation aggregate and run lifecycle.
//!
//! `SimulationState` owns everything that changes from frame to frame. The
//! per-frame functions in the other modules borrow it mutably in a fixed
//! order; nothing else holds game state.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::combat::CRIT_CHANCE;
use crate::core::{RunCommand, SimEvent, Transition};
use crate::effects::{EffectBus, LEVEL_TITLE_FRAMES};
use crate::player::{HeroTemplate, Player};
use crate::world::{generate, LevelData, LEVEL_COUNT};

/// Progress of the current run across levels and lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunProgress {
    pub level_index: usize,
    /// Level the run started on; `Quit` returns here.
    pub first_level: usize,
    pub lives: u32,
    pub starting_lives: u32,
    pub score: u64,
    /// Set while a death or level clear waits on its deferred transition.
    pub transitioning: bool,
    /// Bumped by every reset; deferred transitions from older generations are ignored.
    pub generation: u64,
}

/// What the host should do after a deferred transition is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Continue,
    GameOver,
    Victory,
}

#[derive(Resource)]
pub struct SimulationState {
    /// Simulated frames since the level started. Frozen by hit-stop and pause.
    pub frame: u64,
    pub hero: HeroTemplate,
    pub player: Player,
    pub level: LevelData,
    pub effects: EffectBus,
    pub run: RunProgress,
    /// Events produced since the host last drained them.
    pub events: Vec<SimEvent>,
    /// Lore line index of the last scroll picked up.
    pub last_scroll: Option<usize>,
    pub rng: StdRng,
    pub crit_chance: f64,
    transition_requests: Vec<Transition>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(HeroTemplate::default(), 0, 3, StdRng::from_entropy())
    }
}

impl SimulationState {
    pub fn new(hero: HeroTemplate, level_index: usize, lives: u32, mut rng: StdRng) -> Self {
        let level_index = level_index.min(LEVEL_COUNT - 1);
        let level = generate(level_index, &mut rng);
        let player = Player::new(&hero, level_index);
        let mut state = Self {
            frame: 0,
            hero,
            player,
            level,
            effects: EffectBus::default(),
            run: RunProgress {
                level_index,
                first_level: level_index,
                lives: lives.max(1),
                starting_lives: lives.max(1),
                score: 0,
                transitioning: false,
                generation: 0,
            },
            events: Vec::new(),
            last_scroll: None,
            rng,
            crit_chance: CRIT_CHANCE,
            transition_requests: Vec::new(),
        };
        state.enter_level(level_index);
        state
    }

    /// Deterministic state for tests and replays of a single session.
    pub fn seeded(hero: HeroTemplate, level_index: usize, seed: u64) -> Self {
        Self::new(hero, level_index, 3, StdRng::seed_from_u64(seed))
    }

    /// Generate `level_index` and put a fresh player at its start.
    pub fn start_level(&mut self, level_index: usize) {
        let level_index = level_index.min(LEVEL_COUNT - 1);
        self.level = generate(level_index, &mut self.rng);
        self.enter_level(level_index);
    }

    fn enter_level(&mut self, level_index: usize) {
        self.run.level_index = level_index;
        self.run.transitioning = false;
        self.frame = 0;
        self.last_scroll = None;
        self.player = Player::new(&self.hero, level_index);
        self.effects.clear();
        self.effects.flashes.level_title = LEVEL_TITLE_FRAMES;
        self.effects.camera.snap(self.player.body.pos().x, self.level.width);
        self.events.push(SimEvent::LevelStarted { level_index });
        info!(
            "Level {} '{}' started: {} enemies, boss '{}'",
            level_index,
            self.level.theme.name,
            self.level.enemies.len(),
            self.level.boss.name
        );
    }

    /// Same hero at the current level start, keeping the generated layout.
    pub fn respawn(&mut self) {
        self.player = Player::new(&self.hero, self.run.level_index);
        self.effects.camera.snap(self.player.body.pos().x, self.level.width);
        self.run.transitioning = false;
    }

    pub fn award(&mut self, points: u64) {
        self.run.score += points;
    }

    /// Queue a deferred transition for the host to schedule.
    pub fn request_transition(&mut self, transition: Transition) {
        self.transition_requests.push(transition);
    }

    pub fn take_transition_requests(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.transition_requests)
    }

    /// Retry or quit. Invalidates every pending deferred transition.
    pub fn reset_run(&mut self, command: RunCommand) {
        self.run.generation += 1;
        self.transition_requests.clear();
        self.run.lives = self.run.starting_lives;
        let level_index = match command {
            RunCommand::Retry => self.run.level_index,
            RunCommand::Quit => {
                self.run.score = 0;
                self.run.first_level
            }
        };
        info!("Run reset ({:?}), generation {}", command, self.run.generation);
        self.start_level(level_index);
    }

    /// Apply a deferred transition, unless a reset has happened since it was scheduled.
    pub fn apply_transition(&mut self, transition: Transition, generation: u64) -> Option<RunOutcome> {
        if generation != self.run.generation {
            debug!(
                "Ignoring stale {:?} from generation {} (now {})",
                transition, generation, self.run.generation
            );
            return None;
        }
        let outcome = match transition {
            // The level was cleared before the death resolved
            Transition::RespawnOrGameOver if !self.level.boss.alive => {
                info!("Boss already defeated, advancing instead of respawning");
                self.advance_level()
            }
            Transition::RespawnOrGameOver => {
                if self.run.lives <= 1 {
                    self.run.lives = 0;
                    info!("Out of lives, final score {}", self.run.score);
                    RunOutcome::GameOver
                } else {
                    self.run.lives -= 1;
                    info!("Respawning, {} lives left", self.run.lives);
                    self.respawn();
                    RunOutcome::Continue
                }
            }
            Transition::AdvanceLevel => self.advance_level(),
        };
        Some(outcome)
    }

    fn advance_level(&mut self) -> RunOutcome {
        if self.run.level_index + 1 >= LEVEL_COUNT {
            info!("Every realm cleared, final score {}", self.run.score);
            RunOutcome::Victory
        } else {
            self.start_level(self.run.level_index + 1);
            RunOutcome::Continue
        }
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
