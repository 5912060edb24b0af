//! Box-versus-wall collision tests against the cell grid.

use glam::Vec2;
use maze_runner_core::{CellCoord, Side, WallGrid};

/// Reports whether a square footprint touches a standing wall or leaves the grid.
///
/// The footprint spans `size` world units centred on `center`. Every cell whose
/// index range overlaps the footprint is inspected; any overlapped row or
/// column outside the grid counts as a collision, as does a centre outside the
/// grid. North and west edges use an inclusive lower bound so a footprint
/// resting exactly on those edges still collides. No penetration depth is
/// computed, callers roll the move back wholesale.
#[must_use]
pub fn collides(grid: &WallGrid, center: Vec2, size: f32) -> bool {
    let length = grid.cell_length();
    if !(length > 0.0) || grid.coord_at(center).is_none() {
        return true;
    }

    let half = size / 2.0;
    let left = center.x - half;
    let right = center.x + half;
    let top = center.y - half;
    let bottom = center.y + half;

    for row in cell_index(top, length)..=cell_index(bottom, length) {
        for column in cell_index(left, length)..=cell_index(right, length) {
            let Some(coord) = coord_in_bounds(grid, column, row) else {
                return true;
            };
            let Some(cell) = grid.cell(coord) else {
                return true;
            };

            let origin = grid.cell_origin(coord);
            let spans_x = left < origin.x + length && right > origin.x;
            let spans_y = top < origin.y + length && bottom > origin.y;

            if cell.has_wall(Side::North) && top <= origin.y && bottom > origin.y && spans_x {
                return true;
            }
            if cell.has_wall(Side::East)
                && left < origin.x + length
                && right > origin.x + length
                && spans_y
            {
                return true;
            }
            if cell.has_wall(Side::South)
                && top < origin.y + length
                && bottom > origin.y + length
                && spans_x
            {
                return true;
            }
            if cell.has_wall(Side::West) && left <= origin.x && right > origin.x && spans_y {
                return true;
            }
        }
    }

    false
}

fn cell_index(value: f32, length: f32) -> i64 {
    (value / length).floor() as i64
}

fn coord_in_bounds(grid: &WallGrid, column: i64, row: i64) -> Option<CellCoord> {
    let column = u32::try_from(column).ok()?;
    let row = u32::try_from(row).ok()?;
    let coord = CellCoord::new(column, row);
    grid.contains(coord).then_some(coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_pair() -> WallGrid {
        let mut grid = WallGrid::new(2, 1, 40.0);
        assert!(grid.carve(CellCoord::new(0, 0), Side::East));
        grid
    }

    #[test]
    fn footprint_inside_an_open_cell_is_free() {
        let grid = WallGrid::new(1, 1, 40.0);
        assert!(!collides(&grid, Vec2::new(20.0, 20.0), 25.0));
    }

    #[test]
    fn crossing_a_standing_wall_collides() {
        let grid = WallGrid::new(2, 1, 40.0);
        assert!(collides(&grid, Vec2::new(30.0, 20.0), 25.0));
    }

    #[test]
    fn crossing_an_open_wall_is_free() {
        let grid = open_pair();
        assert!(!collides(&grid, Vec2::new(40.0, 20.0), 25.0));
    }

    #[test]
    fn centre_outside_the_grid_collides() {
        let grid = WallGrid::new(1, 1, 40.0);
        assert!(collides(&grid, Vec2::new(-1.0, 20.0), 0.5));
        assert!(collides(&grid, Vec2::new(20.0, 40.0), 0.5));
        assert!(collides(&grid, Vec2::new(f32::NAN, 20.0), 0.5));
    }

    #[test]
    fn footprint_reaching_past_the_edge_collides() {
        let grid = open_pair();
        assert!(collides(&grid, Vec2::new(70.0, 20.0), 25.0));
    }

    #[test]
    fn west_edge_contact_is_inclusive() {
        let grid = WallGrid::new(1, 1, 40.0);
        assert!(collides(&grid, Vec2::new(10.0, 20.0), 20.0));
        assert!(!collides(&grid, Vec2::new(10.5, 20.0), 20.0));
    }
}
