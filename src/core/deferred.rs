//! Wall-clock delayed run transitions.
//!
//! Each entry is stamped with the run generation current when it was
//! scheduled. A reset bumps the generation, so entries scheduled before it
//! fire into a generation check that turns them into no-ops.

use bevy::prelude::*;
use std::time::Duration;

/// A state change that must outlive the frame that requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// After a death: lose a life and respawn, or end the run.
    RespawnOrGameOver,
    /// After a boss kill: load the next realm, or win.
    AdvanceLevel,
}

impl Transition {
    pub fn delay(self) -> Duration {
        match self {
            Transition::RespawnOrGameOver => Duration::from_millis(1000),
            Transition::AdvanceLevel => Duration::from_millis(2000),
        }
    }
}

#[derive(Debug)]
struct Pending {
    transition: Transition,
    timer: Timer,
    generation: u64,
}

/// Queue of scheduled transitions.
#[derive(Resource, Debug, Default)]
pub struct DeferredTransitions {
    pending: Vec<Pending>,
}

impl DeferredTransitions {
    /// Queue `transition` to fire after its own delay.
    pub fn schedule(&mut self, transition: Transition, generation: u64) {
        self.pending.push(Pending {
            transition,
            timer: Timer::new(transition.delay(), TimerMode::Once),
            generation,
        });
    }

    /// Advance every timer and return the entries that came due, oldest first.
    pub fn tick(&mut self, delta: Duration) -> Vec<(Transition, u64)> {
        let mut due = Vec::new();
        self.pending.retain_mut(|p| {
            p.timer.tick(delta);
            if p.timer.finished() {
                due.push((p.transition, p.generation));
                false
            } else {
                true
            }
        });
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_delay() {
        let mut deferred = DeferredTransitions::default();
        deferred.schedule(Transition::RespawnOrGameOver, 0);
        assert!(deferred.tick(Duration::from_millis(600)).is_empty());
        let due = deferred.tick(Duration::from_millis(600));
        assert_eq!(due, vec![(Transition::RespawnOrGameOver, 0)]);
        assert!(deferred.is_empty());
    }

    #[test]
    fn keeps_generation_stamp() {
        let mut deferred = DeferredTransitions::default();
        deferred.schedule(Transition::AdvanceLevel, 3);
        deferred.schedule(Transition::RespawnOrGameOver, 4);
        let due = deferred.tick(Duration::from_millis(2500));
        assert_eq!(due, vec![(Transition::AdvanceLevel, 3), (Transition::RespawnOrGameOver, 4)]);
    }
}
