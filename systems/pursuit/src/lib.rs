#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pursuit system that periodically re-aims hostiles at the player.
//!
//! Steering is reactive rather than path based: a hostile that is due for a
//! decision receives the straight-line bearing toward the player plus a small
//! random perturbation. Wall avoidance happens in the world when the hostile
//! advances, so the system only needs immutable views.

use std::time::Duration;

use glam::Vec2;
use maze_runner_core::{Command, Event, GamePhase, HostileSnapshot, HostileTuning, HostileView};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the pursuit system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    repath_interval: Duration,
    perturbation: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadence, perturbation
    /// half-width in radians, and seed.
    #[must_use]
    pub const fn new(repath_interval: Duration, perturbation: f32, rng_seed: u64) -> Self {
        Self {
            repath_interval,
            perturbation,
            rng_seed,
        }
    }

    /// Derives the configuration from hostile tuning.
    #[must_use]
    pub fn from_tuning(tuning: &HostileTuning, rng_seed: u64) -> Self {
        Self::new(
            tuning.repath_interval(),
            tuning.heading_perturbation,
            rng_seed,
        )
    }
}

/// Pure system that emits steering commands for hostiles due a new heading.
#[derive(Debug)]
pub struct Pursuit {
    repath_interval: Duration,
    perturbation: f32,
    rng: ChaCha8Rng,
}

impl Pursuit {
    /// Creates a new pursuit system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            repath_interval: config.repath_interval,
            perturbation: config.perturbation.abs(),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes world events and immutable views to emit steering commands.
    ///
    /// Nothing is emitted unless the session is running and the batch contains
    /// a [`Event::TimeAdvanced`]. `now` is the simulation clock after that tick.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: GamePhase,
        hostiles: &HostileView,
        player: Vec2,
        now: Duration,
        out: &mut Vec<Command>,
    ) {
        if phase != GamePhase::Running {
            return;
        }

        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for hostile in hostiles.iter() {
            if !self.is_due(hostile, now) {
                continue;
            }

            let offset = player - hostile.position;
            let bearing = offset.y.atan2(offset.x);
            let heading = bearing + self.perturbation_sample();
            out.push(Command::SteerHostile {
                hostile: hostile.id,
                heading,
            });
        }
    }

    fn is_due(&self, hostile: &HostileSnapshot, now: Duration) -> bool {
        match hostile.last_repath {
            None => true,
            Some(last) => now.saturating_sub(last) > self.repath_interval,
        }
    }

    fn perturbation_sample(&mut self) -> f32 {
        if self.perturbation > 0.0 {
            self.rng.gen_range(-self.perturbation..=self.perturbation)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_runner_core::{HostileId, PursuitState};

    fn snapshot(last_repath: Option<Duration>) -> HostileSnapshot {
        HostileSnapshot {
            id: HostileId::new(0),
            position: Vec2::ZERO,
            size: 30.0,
            speed: 2.0,
            heading: 0.0,
            state: PursuitState::Seeking,
            last_repath,
        }
    }

    #[test]
    fn repath_interval_is_strict() {
        let pursuit = Pursuit::new(Config::new(Duration::from_millis(500), 0.25, 1));
        let hostile = snapshot(Some(Duration::from_millis(100)));

        assert!(!pursuit.is_due(&hostile, Duration::from_millis(600)));
        assert!(pursuit.is_due(&hostile, Duration::from_millis(601)));
        assert!(pursuit.is_due(&snapshot(None), Duration::ZERO));
    }

    #[test]
    fn zero_perturbation_samples_nothing() {
        let mut pursuit = Pursuit::new(Config::new(Duration::from_millis(500), 0.0, 1));
        assert_eq!(pursuit.perturbation_sample(), 0.0);
    }
}
