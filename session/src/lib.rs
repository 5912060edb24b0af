#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame orchestration for Maze Runner sessions.
//!
//! A [`Session`] owns the authoritative world together with the systems that
//! feed it. Each call to [`Session::advance`] applies one complete tick: the
//! player moves, hostiles due a decision are re-aimed, hostiles advance, and
//! contacts are resolved. When the exit is reached the next level is generated
//! and loaded inside the same call. Observers are notified only after the
//! whole batch has been applied, so they never see a half-updated level.

use std::{fmt, time::Duration};

use maze_runner_core::{
    Command, ConfigError, Event, FrameView, GameConfig, GamePhase, InputSnapshot, LevelLayout,
    Stats, Viewport,
};
use maze_runner_system_maze_generation::MazeGenerator;
use maze_runner_system_pursuit::{Config as PursuitConfig, Pursuit};
use maze_runner_system_spawning::Spawning;
use maze_runner_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const PURSUIT_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;
const LEVEL_SEED_SALT: u64 = 0xd1b5_4a32_d192_ed03;

/// Receives lifecycle notifications after each applied batch.
///
/// Every method has an empty default so observers only implement what they
/// display.
pub trait SessionObserver {
    /// Called once per batch in which score, health, or level changed.
    fn on_stats_changed(&mut self, _stats: Stats) {}

    /// Called when the exit was reached, with the level about to be played.
    fn on_level_complete(&mut self, _new_level: u32) {}

    /// Called once when health runs out.
    fn on_game_over(&mut self, _final_score: u32) {}

    /// Called for every phase transition, in order.
    fn on_phase_changed(&mut self, _phase: GamePhase) {}
}

/// Owns the world and drives it one frame at a time.
pub struct Session {
    world: World,
    pursuit: Pursuit,
    generator: MazeGenerator,
    spawning: Spawning,
    level_rng: ChaCha8Rng,
    viewport: Viewport,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("phase", &query::phase(&self.world))
            .field("stats", &query::stats(&self.world))
            .field("viewport", &self.viewport)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Validates the configuration and creates a session waiting in the menu.
    ///
    /// All randomness (maze carving, spawn placement, hostile steering, and
    /// wall turns) derives from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let pursuit = Pursuit::new(PursuitConfig::from_tuning(
            &config.hostiles,
            seed ^ PURSUIT_SEED_SALT,
        ));
        let generator = MazeGenerator::from_config(&config);
        let spawning = Spawning::from_config(&config);
        let viewport = config.viewport;

        Ok(Self {
            world: World::new(config, seed),
            pursuit,
            generator,
            spawning,
            level_rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(LEVEL_SEED_SALT)),
            viewport,
            observers: Vec::new(),
        })
    }

    /// Registers an observer for lifecycle notifications.
    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Starts a new game at level one from the menu or after a game over.
    ///
    /// Returns the events produced; the call is ignored in any other phase.
    pub fn start(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if !matches!(self.phase(), GamePhase::Menu | GamePhase::GameOver) {
            return events;
        }

        let layout = self.generate_level(1);
        world::apply(&mut self.world, Command::StartGame { layout }, &mut events);
        self.dispatch(&events);
        events
    }

    /// Applies one complete frame of simulation.
    ///
    /// Does nothing unless the session is running.
    pub fn advance(&mut self, dt: Duration, input: InputSnapshot) -> Vec<Event> {
        let mut events = Vec::new();
        if self.phase() != GamePhase::Running {
            return events;
        }

        world::apply(&mut self.world, Command::Tick { dt, input }, &mut events);

        let mut commands = Vec::new();
        self.pursuit.handle(
            &events,
            query::phase(&self.world),
            &query::hostile_view(&self.world),
            query::player(&self.world).position,
            query::elapsed(&self.world),
            &mut commands,
        );
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        world::apply(&mut self.world, Command::AdvanceHostiles, &mut events);
        world::apply(&mut self.world, Command::ResolveContacts, &mut events);

        let completed = events.iter().find_map(|event| match event {
            Event::LevelCompleted { level, .. } => Some(*level),
            _ => None,
        });
        if let Some(level) = completed {
            let layout = self.generate_level(level);
            world::apply(&mut self.world, Command::LoadLevel { layout }, &mut events);
        }

        self.dispatch(&events);
        events
    }

    /// Suspends a running session. Repeated calls have no effect.
    pub fn pause(&mut self) -> Vec<Event> {
        self.submit(Command::SetPaused { paused: true })
    }

    /// Resumes a paused session. Repeated calls have no effect.
    pub fn resume(&mut self) -> Vec<Event> {
        self.submit(Command::SetPaused { paused: false })
    }

    /// Abandons the current game and returns to the menu.
    pub fn return_to_menu(&mut self) -> Vec<Event> {
        self.submit(Command::ReturnToMenu)
    }

    /// Records a new viewport; the next generated level uses it.
    pub fn resize_viewport(&mut self, viewport: Viewport) {
        log::debug!(
            "viewport resized to {}x{}, applied from the next level",
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
    }

    /// Current score, health, and level.
    #[must_use]
    pub fn stats(&self) -> Stats {
        query::stats(&self.world)
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        query::phase(&self.world)
    }

    /// Read-only view for render sinks.
    #[must_use]
    pub fn frame(&self) -> FrameView<'_> {
        query::frame(&self.world)
    }

    /// Read-only access to the underlying world for further queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.dispatch(&events);
        events
    }

    fn generate_level(&mut self, level: u32) -> LevelLayout {
        let grid = self
            .generator
            .generate_for_viewport(self.viewport, level, &mut self.level_rng);
        let layout = self.spawning.populate(grid, level, &mut self.level_rng);
        log::debug!(
            "generated level {level}: {}x{} cells, {} open passages, {} hostiles, {} items",
            layout.grid.columns(),
            layout.grid.rows(),
            layout.grid.open_passages(),
            layout.hostiles.len(),
            layout.items.len()
        );
        layout
    }

    fn dispatch(&mut self, events: &[Event]) {
        let mut stats_changed = false;

        for event in events {
            match event {
                Event::PhaseChanged { phase } => {
                    log::debug!("phase changed to {phase:?}");
                    for observer in &mut self.observers {
                        observer.on_phase_changed(*phase);
                    }
                }
                Event::LevelStarted {
                    level,
                    columns,
                    rows,
                } => {
                    log::info!("level {level} started on a {columns}x{rows} maze");
                    stats_changed = true;
                }
                Event::LevelCompleted { level, bonus } => {
                    log::info!("exit reached, advancing to level {level} (+{bonus} bonus)");
                    for observer in &mut self.observers {
                        observer.on_level_complete(*level);
                    }
                    stats_changed = true;
                }
                Event::GameOver { final_score } => {
                    log::info!("game over with a final score of {final_score}");
                    for observer in &mut self.observers {
                        observer.on_game_over(*final_score);
                    }
                    stats_changed = true;
                }
                Event::HealthChanged { .. } | Event::ScoreChanged { .. } => {
                    stats_changed = true;
                }
                Event::ItemCollected { item, kind, value } => {
                    log::debug!("collected {kind:?} item {} worth {value}", item.get());
                }
                _ => {}
            }
        }

        if stats_changed {
            let stats = self.stats();
            for observer in &mut self.observers {
                observer.on_stats_changed(stats);
            }
        }
    }
}
