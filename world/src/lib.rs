#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Runner.
//!
//! The world owns the loaded level, the player, hostiles, items, the exit, and
//! the session counters. All mutation happens through [`apply`], which executes
//! a single [`Command`] and appends the resulting [`Event`] values. Commands
//! that make no sense for the current [`GamePhase`] are ignored without
//! emitting anything.

mod collision;
mod entities;

use std::time::Duration;

use glam::Vec2;
use maze_runner_core::{
    circles_overlap, CellCoord, Command, Event, GameConfig, GamePhase, HostileId, ItemId,
    ItemKind, LevelLayout, Stats, WallGrid,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use collision::collides;

use entities::{Exit, Hostile, Item, Player, PlayerStep};

/// Represents the authoritative Maze Runner world state.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    phase: GamePhase,
    stats: Stats,
    grid: WallGrid,
    player: Player,
    hostiles: Vec<Hostile>,
    items: Vec<Item>,
    exit: Exit,
    elapsed: Duration,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world waiting in the menu with a fully walled placeholder grid.
    ///
    /// The seed drives the random turns hostiles take when they hit a wall.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let grid = WallGrid::from_viewport(
            config.viewport.width,
            config.viewport.height,
            config.cell_length,
        );
        let start = grid.cell_center(CellCoord::new(0, 0));
        let exit = Exit {
            position: far_corner(&grid),
            size: config.exit_size(),
        };
        let player = Player::new(start, config.player.size, config.player.speed);
        let stats = Stats {
            score: 0,
            health: config.player.starting_health,
            level: 1,
        };

        Self {
            phase: GamePhase::Menu,
            stats,
            grid,
            player,
            hostiles: Vec::new(),
            items: Vec::new(),
            exit,
            elapsed: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        }
    }

    fn set_phase(&mut self, phase: GamePhase, out_events: &mut Vec<Event>) {
        if self.phase == phase {
            return;
        }
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn load_layout(&mut self, layout: LevelLayout, out_events: &mut Vec<Event>) {
        let LevelLayout {
            level,
            grid,
            hostiles,
            items,
            exit,
        } = layout;

        self.grid = grid;
        self.stats.level = level;
        self.player.teleport(self.grid.cell_center(CellCoord::new(0, 0)));

        let hostile_size = self.config.hostiles.size;
        self.hostiles = hostiles
            .into_iter()
            .zip(0_u32..)
            .map(|(seed, id)| Hostile::from_seed(HostileId::new(id), seed, hostile_size))
            .collect();

        let item_size = self.config.items.size;
        self.items = items
            .into_iter()
            .zip(0_u32..)
            .map(|(seed, id)| Item::from_seed(ItemId::new(id), seed, item_size))
            .collect();

        self.exit = Exit {
            position: exit,
            size: self.config.exit_size(),
        };

        out_events.push(Event::LevelStarted {
            level,
            columns: self.grid.columns(),
            rows: self.grid.rows(),
        });
        self.set_phase(GamePhase::Running, out_events);
    }

    fn resolve_hostile_contacts(&mut self, out_events: &mut Vec<Event>) -> bool {
        let damage = self.config.hostiles.contact_damage;
        let knockback = self.config.hostiles.knockback;
        let mut defeated = false;

        for hostile in &self.hostiles {
            if !circles_overlap(
                self.player.position(),
                self.player.radius(),
                hostile.position(),
                hostile.radius(),
            ) {
                continue;
            }

            self.stats.health = self.stats.health.saturating_sub(damage);
            let knocked_back = self
                .player
                .knock_back(&self.grid, hostile.position(), knockback);
            out_events.push(Event::PlayerHit {
                hostile: hostile.id(),
                knocked_back,
            });
            out_events.push(Event::HealthChanged {
                health: self.stats.health,
            });

            if self.stats.health == 0 {
                defeated = true;
                break;
            }
        }

        if !defeated {
            return false;
        }
        out_events.push(Event::GameOver {
            final_score: self.stats.score,
        });
        self.set_phase(GamePhase::GameOver, out_events);
        true
    }

    fn collect_items(&mut self, out_events: &mut Vec<Event>) {
        let position = self.player.position();
        let radius = self.player.radius();

        for item in &mut self.items {
            if !item.touches(position, radius) || !item.collect() {
                continue;
            }

            let snapshot = item.snapshot();
            out_events.push(Event::ItemCollected {
                item: snapshot.id,
                kind: snapshot.kind,
                value: snapshot.value,
            });

            match snapshot.kind {
                ItemKind::Health => {
                    self.stats.health = self
                        .stats
                        .health
                        .saturating_add(snapshot.value)
                        .min(self.config.player.max_health);
                    out_events.push(Event::HealthChanged {
                        health: self.stats.health,
                    });
                }
                ItemKind::Score => {
                    self.stats.score = self.stats.score.saturating_add(snapshot.value);
                    out_events.push(Event::ScoreChanged {
                        score: self.stats.score,
                    });
                }
                ItemKind::Speed => {
                    let speed = self.player.speed() + snapshot.value as f32;
                    self.player.set_speed(speed);
                    out_events.push(Event::PlayerSpeedChanged { speed });
                }
            }
        }
    }

    fn check_exit(&mut self, out_events: &mut Vec<Event>) {
        let reached = circles_overlap(
            self.player.position(),
            self.player.radius(),
            self.exit.position,
            self.exit.size / 2.0,
        );
        if !reached {
            return;
        }

        self.stats.level = self.stats.level.saturating_add(1);
        let bonus = self.stats.level.saturating_mul(self.config.level_bonus);
        self.stats.score = self.stats.score.saturating_add(bonus);
        out_events.push(Event::LevelCompleted {
            level: self.stats.level,
            bonus,
        });
        out_events.push(Event::ScoreChanged {
            score: self.stats.score,
        });
        self.set_phase(GamePhase::LevelComplete, out_events);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartGame { layout } => {
            if !matches!(world.phase, GamePhase::Menu | GamePhase::GameOver) {
                return;
            }
            world.stats = Stats {
                score: 0,
                health: world.config.player.starting_health,
                level: layout.level,
            };
            world.player.set_speed(world.config.player.speed);
            world.elapsed = Duration::ZERO;
            world.load_layout(layout, out_events);
            out_events.push(Event::HealthChanged {
                health: world.stats.health,
            });
            out_events.push(Event::ScoreChanged {
                score: world.stats.score,
            });
        }
        Command::LoadLevel { layout } => {
            if world.phase != GamePhase::LevelComplete {
                return;
            }
            world.load_layout(layout, out_events);
        }
        Command::Tick { dt, input } => {
            if world.phase != GamePhase::Running {
                return;
            }
            world.elapsed = world.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });

            match world.player.apply_input(&world.grid, input) {
                PlayerStep::Idle => {}
                PlayerStep::Moved { from, to } => out_events.push(Event::PlayerMoved { from, to }),
                PlayerStep::Blocked => out_events.push(Event::PlayerBlocked {
                    at: world.player.position(),
                }),
            }
        }
        Command::SteerHostile { hostile, heading } => {
            if world.phase != GamePhase::Running || !heading.is_finite() {
                return;
            }
            let now = world.elapsed;
            if let Some(target) = world.hostiles.iter_mut().find(|h| h.id() == hostile) {
                let heading = heading.rem_euclid(std::f32::consts::TAU);
                target.steer(heading, now);
                out_events.push(Event::HostileRepathed { hostile, heading });
            }
        }
        Command::AdvanceHostiles => {
            if world.phase != GamePhase::Running {
                return;
            }
            for hostile in &mut world.hostiles {
                if let Some(heading) = hostile.advance(&world.grid, &mut world.rng) {
                    out_events.push(Event::HostileBlocked {
                        hostile: hostile.id(),
                        heading,
                    });
                }
            }
        }
        Command::ResolveContacts => {
            if world.phase != GamePhase::Running {
                return;
            }
            if world.resolve_hostile_contacts(out_events) {
                return;
            }
            world.collect_items(out_events);
            world.check_exit(out_events);
        }
        Command::SetPaused { paused } => match (world.phase, paused) {
            (GamePhase::Running, true) => world.set_phase(GamePhase::Paused, out_events),
            (GamePhase::Paused, false) => world.set_phase(GamePhase::Running, out_events),
            _ => {}
        },
        Command::ReturnToMenu => world.set_phase(GamePhase::Menu, out_events),
    }
}

fn far_corner(grid: &WallGrid) -> Vec2 {
    grid.cell_center(CellCoord::new(
        grid.columns().saturating_sub(1),
        grid.rows().saturating_sub(1),
    ))
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use maze_runner_core::{
        ExitSnapshot, FrameView, GameConfig, GamePhase, HostileView, ItemSnapshot, PlayerSnapshot,
        Stats, WallGrid, WELCOME_BANNER,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(_world: &World) -> &'static str {
        WELCOME_BANNER
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Score, health, and level counters.
    #[must_use]
    pub fn stats(world: &World) -> Stats {
        world.stats
    }

    /// Provides read-only access to the loaded maze.
    #[must_use]
    pub fn grid(world: &World) -> &WallGrid {
        &world.grid
    }

    /// Captures the player state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Captures a read-only view of the hostiles roaming the maze.
    #[must_use]
    pub fn hostile_view(world: &World) -> HostileView {
        HostileView::from_snapshots(world.hostiles.iter().map(|h| h.snapshot()).collect())
    }

    /// Captures every item that is still waiting to be collected.
    #[must_use]
    pub fn items(world: &World) -> Vec<ItemSnapshot> {
        world
            .items
            .iter()
            .filter(|item| item.is_available())
            .map(|item| item.snapshot())
            .collect()
    }

    /// Captures the exit marker.
    #[must_use]
    pub fn exit(world: &World) -> ExitSnapshot {
        ExitSnapshot {
            position: world.exit.position,
            size: world.exit.size,
        }
    }

    /// Simulation time accumulated since the session started.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Bundles everything a render sink needs for one frame.
    #[must_use]
    pub fn frame(world: &World) -> FrameView<'_> {
        FrameView {
            grid: &world.grid,
            player: player(world),
            hostiles: hostile_view(world),
            items: items(world),
            exit: exit(world),
            stats: world.stats,
            phase: world.phase,
        }
    }
}
