//! Scripted player that walks the shortest corridor route to the exit.

use std::collections::VecDeque;

use glam::Vec2;
use maze_runner_core::{CellCoord, FrameView, GamePhase, InputSnapshot, Intent, Side, WallGrid};

/// Breadth-first distances, in cells, from the exit over open passages.
#[derive(Clone, Debug, Default)]
struct DistanceField {
    columns: u32,
    distances: Vec<u32>,
}

impl DistanceField {
    fn build(grid: &WallGrid, exit: CellCoord) -> Self {
        let columns = grid.columns();
        let mut distances = vec![u32::MAX; grid.cell_count()];
        let mut queue = VecDeque::new();

        if let Some(index) = index(columns, exit) {
            if let Some(slot) = distances.get_mut(index) {
                *slot = 0;
                queue.push_back(exit);
            }
        }

        while let Some(cell) = queue.pop_front() {
            let Some(current) = index(columns, cell).and_then(|i| distances.get(i).copied())
            else {
                continue;
            };

            for side in Side::ALL {
                if grid.has_wall(cell, side) {
                    continue;
                }
                let Some(neighbor) = grid.neighbor(cell, side) else {
                    continue;
                };
                let Some(slot) = index(columns, neighbor).and_then(|i| distances.get_mut(i))
                else {
                    continue;
                };
                if *slot <= current + 1 {
                    continue;
                }
                *slot = current + 1;
                queue.push_back(neighbor);
            }
        }

        Self { columns, distances }
    }

    fn distance(&self, cell: CellCoord) -> Option<u32> {
        let distance = *self.distances.get(index(self.columns, cell)?)?;
        (distance != u32::MAX).then_some(distance)
    }
}

fn index(columns: u32, cell: CellCoord) -> Option<usize> {
    if cell.column() >= columns {
        return None;
    }
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    let columns = usize::try_from(columns).ok()?;
    row.checked_mul(columns)?.checked_add(column)
}

/// Produces input that leads the player through the maze to the exit.
///
/// The route ignores hostiles and items; anything collected on the way is
/// incidental.
#[derive(Clone, Debug, Default)]
pub(crate) struct Autopilot {
    cached: Option<(WallGrid, CellCoord, DistanceField)>,
}

impl Autopilot {
    /// Creates an autopilot with no cached route.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Chooses the intents to hold for the next tick.
    pub(crate) fn steer(&mut self, frame: &FrameView<'_>) -> InputSnapshot {
        if frame.phase != GamePhase::Running {
            return InputSnapshot::idle();
        }

        let grid = frame.grid;
        let position = frame.player.position;
        let speed = frame.player.speed;
        let (Some(cell), Some(exit)) = (
            grid.coord_at(position),
            grid.coord_at(frame.exit.position),
        ) else {
            return InputSnapshot::idle();
        };

        let Some(field) = self.field(grid, exit) else {
            return InputSnapshot::idle();
        };
        let Some(distance) = field.distance(cell) else {
            return InputSnapshot::idle();
        };

        if distance == 0 {
            return approach(position, frame.exit.position, speed);
        }

        let next = Side::ALL.into_iter().find(|&side| {
            !grid.has_wall(cell, side)
                && grid
                    .neighbor(cell, side)
                    .and_then(|neighbor| field.distance(neighbor))
                    .is_some_and(|candidate| candidate < distance)
        });
        let Some(side) = next else {
            return InputSnapshot::idle();
        };

        let center = grid.cell_center(cell);
        let tolerance = speed / 2.0;
        match side {
            Side::North | Side::South => {
                let misaligned =
                    align(position.x, center.x, tolerance, Intent::Left, Intent::Right);
                if let Some(intent) = misaligned {
                    return InputSnapshot::idle().with(intent);
                }
            }
            Side::East | Side::West => {
                let misaligned = align(position.y, center.y, tolerance, Intent::Up, Intent::Down);
                if let Some(intent) = misaligned {
                    return InputSnapshot::idle().with(intent);
                }
            }
        }

        InputSnapshot::idle().with(intent_for(side))
    }

    fn field(&mut self, grid: &WallGrid, exit: CellCoord) -> Option<&DistanceField> {
        let stale = !matches!(
            &self.cached,
            Some((cached_grid, cached_exit, _)) if cached_grid == grid && *cached_exit == exit
        );
        if stale {
            log::debug!(
                "rebuilding autopilot route for a {}x{} maze",
                grid.columns(),
                grid.rows()
            );
            self.cached = Some((grid.clone(), exit, DistanceField::build(grid, exit)));
        }

        self.cached.as_ref().map(|(_, _, field)| field)
    }
}

fn approach(position: Vec2, target: Vec2, speed: f32) -> InputSnapshot {
    let tolerance = speed / 2.0;
    let mut input = InputSnapshot::idle();
    if let Some(intent) = align(position.x, target.x, tolerance, Intent::Left, Intent::Right) {
        input = input.with(intent);
    }
    if let Some(intent) = align(position.y, target.y, tolerance, Intent::Up, Intent::Down) {
        input = input.with(intent);
    }
    input
}

fn align(
    current: f32,
    target: f32,
    tolerance: f32,
    decrease: Intent,
    increase: Intent,
) -> Option<Intent> {
    let delta = target - current;
    if delta.abs() <= tolerance {
        None
    } else if delta < 0.0 {
        Some(decrease)
    } else {
        Some(increase)
    }
}

fn intent_for(side: Side) -> Intent {
    match side {
        Side::North => Intent::Up,
        Side::East => Intent::Right,
        Side::South => Intent::Down,
        Side::West => Intent::Left,
    }
}
