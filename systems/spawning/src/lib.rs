#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system that populates a freshly carved maze.
//!
//! Every entity is placed at a cell centre. Hostiles keep a minimum distance
//! from the player start; when no sampled cell satisfies that distance within
//! the attempt budget, the farthest candidate seen is used instead so that
//! placement always terminates.

use std::f32::consts::TAU;

use glam::Vec2;
use maze_runner_core::{
    CellCoord, GameConfig, HostileSeed, HostileTuning, ItemKind, ItemSeed, ItemTuning,
    LevelLayout, WallGrid,
};
use rand::Rng;

/// Produces hostiles, items, and the exit for a level.
#[derive(Clone, Debug)]
pub struct Spawning {
    hostiles: HostileTuning,
    items: ItemTuning,
}

impl Spawning {
    /// Creates a new spawning system using the supplied tuning.
    #[must_use]
    pub fn new(hostiles: HostileTuning, items: ItemTuning) -> Self {
        Self { hostiles, items }
    }

    /// Creates a spawning system from the session configuration.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.hostiles.clone(), config.items.clone())
    }

    /// Bundles the grid with a full population for the level.
    ///
    /// Hostiles are drawn before items so the random stream stays stable when
    /// item counts change.
    pub fn populate<R>(&self, grid: WallGrid, level: u32, rng: &mut R) -> LevelLayout
    where
        R: Rng + ?Sized,
    {
        let player_start = grid.cell_center(CellCoord::new(0, 0));
        let hostiles = self.place_hostiles(&grid, level, player_start, rng);
        let items = self.place_items(&grid, level, rng);
        let exit = exit_position(&grid);

        LevelLayout {
            level,
            grid,
            hostiles,
            items,
            exit,
        }
    }

    /// Places `base_count + level` hostiles away from the player start.
    pub fn place_hostiles<R>(
        &self,
        grid: &WallGrid,
        level: u32,
        player_start: Vec2,
        rng: &mut R,
    ) -> Vec<HostileSeed>
    where
        R: Rng + ?Sized,
    {
        let count = self.hostiles.count_for_level(level);
        let min_distance = self.hostiles.min_spawn_distance_cells * grid.cell_length();

        (0..count)
            .map(|index| {
                let position = self.place_away_from(grid, player_start, min_distance, index, rng);
                let jitter = sample_between(
                    rng,
                    self.hostiles.speed_jitter_min,
                    self.hostiles.speed_jitter_max,
                );
                HostileSeed {
                    position,
                    speed: self.hostiles.base_speed * jitter,
                    heading: rng.gen_range(0.0..TAU),
                }
            })
            .collect()
    }

    /// Scatters `base_count + level` items over uniformly drawn cells.
    pub fn place_items<R>(&self, grid: &WallGrid, level: u32, rng: &mut R) -> Vec<ItemSeed>
    where
        R: Rng + ?Sized,
    {
        let count = self.items.count_for_level(level);

        (0..count)
            .map(|_| {
                let position = random_cell_center(grid, rng);
                let kind = ItemKind::ALL[rng.gen_range(0..ItemKind::ALL.len())];
                ItemSeed {
                    position,
                    kind,
                    value: self.items.value_for(kind),
                }
            })
            .collect()
    }

    fn place_away_from<R>(
        &self,
        grid: &WallGrid,
        player_start: Vec2,
        min_distance: f32,
        index: u32,
        rng: &mut R,
    ) -> Vec2
    where
        R: Rng + ?Sized,
    {
        let attempts = self.hostiles.max_placement_attempts.max(1);
        let mut farthest = player_start;
        let mut farthest_distance = f32::NEG_INFINITY;

        for _ in 0..attempts {
            let candidate = random_cell_center(grid, rng);
            let distance = candidate.distance(player_start);
            if distance >= min_distance {
                return candidate;
            }
            if distance > farthest_distance {
                farthest = candidate;
                farthest_distance = distance;
            }
        }

        log::warn!(
            "hostile {index} placed {farthest_distance:.1} units from the start after \
             {attempts} attempts (wanted {min_distance:.1})"
        );
        farthest
    }
}

/// Centre of the cell in the last column and last row.
#[must_use]
pub fn exit_position(grid: &WallGrid) -> Vec2 {
    grid.cell_center(CellCoord::new(
        grid.columns().saturating_sub(1),
        grid.rows().saturating_sub(1),
    ))
}

fn random_cell_center<R>(grid: &WallGrid, rng: &mut R) -> Vec2
where
    R: Rng + ?Sized,
{
    let column = rng.gen_range(0..grid.columns());
    let row = rng.gen_range(0..grid.rows());
    grid.cell_center(CellCoord::new(column, row))
}

fn sample_between<R>(rng: &mut R, low: f32, high: f32) -> f32
where
    R: Rng + ?Sized,
{
    if high > low {
        rng.gen_range(low..=high)
    } else {
        low
    }
}
