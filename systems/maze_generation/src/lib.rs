#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Maze generation system that carves wall grids for each level.
//!
//! Generation runs in two passes. A randomised depth-first search first turns
//! the fully walled grid into a spanning tree, after which a difficulty pass
//! knocks out additional interior walls with a probability that grows with the
//! level. Both passes carve through [`WallGrid::carve`], so every removal is
//! symmetric and the perimeter stays closed.

use maze_runner_core::{CellCoord, GameConfig, MazeTuning, Side, Viewport, WallGrid};
use rand::{seq::SliceRandom, Rng};

/// Produces carved grids from dimensions, level, and an injected random source.
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    cell_length: f32,
    tuning: MazeTuning,
}

impl MazeGenerator {
    /// Creates a generator for cells of the provided length.
    #[must_use]
    pub fn new(cell_length: f32, tuning: MazeTuning) -> Self {
        Self {
            cell_length,
            tuning,
        }
    }

    /// Creates a generator from the session configuration.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.cell_length, config.maze.clone())
    }

    /// Carves a grid with explicit dimensions for the provided level.
    pub fn generate<R>(&self, columns: u32, rows: u32, level: u32, rng: &mut R) -> WallGrid
    where
        R: Rng + ?Sized,
    {
        let mut grid = WallGrid::new(columns, rows, self.cell_length);
        carve_spanning_tree(&mut grid, rng);
        open_for_difficulty(&mut grid, self.tuning.removal_probability(level), rng);
        grid
    }

    /// Carves a grid sized to fill the viewport for the provided level.
    pub fn generate_for_viewport<R>(&self, viewport: Viewport, level: u32, rng: &mut R) -> WallGrid
    where
        R: Rng + ?Sized,
    {
        let sizing = WallGrid::from_viewport(viewport.width, viewport.height, self.cell_length);
        self.generate(sizing.columns(), sizing.rows(), level, rng)
    }
}

/// Turns the grid into a spanning tree rooted at cell (0, 0).
///
/// Neighbours are gathered in north, east, south, west order and one is drawn
/// uniformly. The explicit stack holds the path back to the root, so the walk
/// ends once every branch has been exhausted.
pub fn carve_spanning_tree<R>(grid: &mut WallGrid, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let mut visited = vec![false; grid.cell_count()];
    let mut stack: Vec<CellCoord> = Vec::with_capacity(grid.cell_count());
    let mut candidates: Vec<(Side, CellCoord)> = Vec::with_capacity(Side::ALL.len());

    let mut current = CellCoord::new(0, 0);
    visited[visit_index(grid, current)] = true;

    loop {
        candidates.clear();
        for side in Side::ALL {
            if let Some(neighbor) = grid.neighbor(current, side) {
                if !visited[visit_index(grid, neighbor)] {
                    candidates.push((side, neighbor));
                }
            }
        }

        if let Some(&(side, next)) = candidates.choose(rng) {
            let _ = grid.carve(current, side);
            visited[visit_index(grid, next)] = true;
            stack.push(current);
            current = next;
        } else if let Some(previous) = stack.pop() {
            current = previous;
        } else {
            break;
        }
    }
}

/// Removes each standing interior wall with the provided probability.
///
/// Cells are visited in row-major order and sides in north, east, south, west
/// order. A wall already opened from the other side is not rolled again.
pub fn open_for_difficulty<R>(grid: &mut WallGrid, probability: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    if !(probability > 0.0) {
        return;
    }
    let probability = probability.min(1.0);

    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let coord = CellCoord::new(column, row);
            for side in Side::ALL {
                if !grid.has_wall(coord, side) || grid.neighbor(coord, side).is_none() {
                    continue;
                }
                if rng.gen_bool(probability) {
                    let _ = grid.carve(coord, side);
                }
            }
        }
    }
}

fn visit_index(grid: &WallGrid, coord: CellCoord) -> usize {
    coord.row() as usize * grid.columns() as usize + coord.column() as usize
}
