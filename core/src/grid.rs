//! Cell-wall grid that every maze is carved into.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::CellCoord;

/// Sides of a square cell, listed clockwise from the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Edge facing decreasing row indices.
    North,
    /// Edge facing increasing column indices.
    East,
    /// Edge facing increasing row indices.
    South,
    /// Edge facing decreasing column indices.
    West,
}

impl Side {
    /// Every side in the canonical north, east, south, west order.
    pub const ALL: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    /// Side of the neighbouring cell that shares this edge.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Column and row offsets that lead to the neighbour across this side.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

/// Single square of the maze with up to four standing walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    walls: [bool; 4],
}

impl Cell {
    /// Creates a cell with all four walls standing.
    #[must_use]
    pub const fn walled() -> Self {
        Self { walls: [true; 4] }
    }

    /// Reports whether the wall on the provided side is still standing.
    #[must_use]
    pub const fn has_wall(&self, side: Side) -> bool {
        self.walls[side.index()]
    }

    /// Number of walls still standing around the cell.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|wall| **wall).count()
    }

    fn clear(&mut self, side: Side) {
        self.walls[side.index()] = false;
    }
}

/// Row-major grid of cells with a fixed world-space cell length.
///
/// Wall removal only happens through [`WallGrid::carve`], which always clears
/// both sides of the shared edge. The outer perimeter has no neighbour to
/// carve into and therefore stays closed for the lifetime of the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct WallGrid {
    columns: u32,
    rows: u32,
    cell_length: f32,
    cells: Vec<Cell>,
}

impl WallGrid {
    /// Creates a fully walled grid. Dimensions are clamped to at least 1x1.
    #[must_use]
    pub fn new(columns: u32, rows: u32, cell_length: f32) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let count = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(1);
        Self {
            columns,
            rows,
            cell_length,
            cells: vec![Cell::walled(); count],
        }
    }

    /// Derives grid dimensions from a viewport by flooring against the cell length.
    #[must_use]
    pub fn from_viewport(width: f32, height: f32, cell_length: f32) -> Self {
        if !(cell_length > 0.0) {
            return Self::new(1, 1, cell_length);
        }

        let columns = cells_along(width, cell_length);
        let rows = cells_along(height, cell_length);
        Self::new(columns, rows, cell_length)
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a cell in world units.
    #[must_use]
    pub const fn cell_length(&self) -> f32 {
        self.cell_length
    }

    /// Total width of the grid in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Total height of the grid in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Total number of cells stored in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the coordinate addresses a cell inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.column() < self.columns && coord.row() < self.rows
    }

    /// Returns the cell stored at the coordinate, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.index(coord).and_then(|index| self.cells.get(index))
    }

    /// Locates the cell containing a world-space point.
    ///
    /// `None` signals the point is outside the grid, which is a different
    /// outcome from landing in a walled cell.
    #[must_use]
    pub fn cell_at(&self, point: Vec2) -> Option<(CellCoord, &Cell)> {
        let coord = self.coord_at(point)?;
        self.cell(coord).map(|cell| (coord, cell))
    }

    /// Converts a world-space point into the coordinate of its containing cell.
    #[must_use]
    pub fn coord_at(&self, point: Vec2) -> Option<CellCoord> {
        if !(self.cell_length > 0.0) {
            return None;
        }

        let column = (point.x / self.cell_length).floor();
        let row = (point.y / self.cell_length).floor();
        let inside = column >= 0.0
            && row >= 0.0
            && column < self.columns as f32
            && row < self.rows as f32;
        if !inside {
            return None;
        }

        Some(CellCoord::new(column as u32, row as u32))
    }

    /// Coordinate of the neighbour across the provided side, if one exists.
    #[must_use]
    pub fn neighbor(&self, coord: CellCoord, side: Side) -> Option<CellCoord> {
        if !self.contains(coord) {
            return None;
        }

        let (column_offset, row_offset) = side.offset();
        let column = i64::from(coord.column()) + column_offset;
        let row = i64::from(coord.row()) + row_offset;
        if column < 0 || row < 0 {
            return None;
        }

        let neighbor = CellCoord::new(u32::try_from(column).ok()?, u32::try_from(row).ok()?);
        self.contains(neighbor).then_some(neighbor)
    }

    /// Reports whether a wall blocks the side. Out-of-bounds cells are solid.
    #[must_use]
    pub fn has_wall(&self, coord: CellCoord, side: Side) -> bool {
        self.cell(coord).map_or(true, |cell| cell.has_wall(side))
    }

    /// Removes the wall shared by `coord` and its neighbour across `side`.
    ///
    /// Returns `false` when there is no neighbour or the wall was already open.
    pub fn carve(&mut self, coord: CellCoord, side: Side) -> bool {
        let Some(neighbor) = self.neighbor(coord, side) else {
            return false;
        };
        let (Some(index), Some(neighbor_index)) = (self.index(coord), self.index(neighbor)) else {
            return false;
        };
        if !self.cells[index].has_wall(side) {
            return false;
        }

        self.cells[index].clear(side);
        self.cells[neighbor_index].clear(side.opposite());
        true
    }

    /// World-space position of the cell's upper-left corner.
    #[must_use]
    pub fn cell_origin(&self, coord: CellCoord) -> Vec2 {
        Vec2::new(
            coord.column() as f32 * self.cell_length,
            coord.row() as f32 * self.cell_length,
        )
    }

    /// World-space position of the cell's centre.
    #[must_use]
    pub fn cell_center(&self, coord: CellCoord) -> Vec2 {
        self.cell_origin(coord) + Vec2::splat(self.cell_length / 2.0)
    }

    /// Iterates over every cell in row-major order alongside its coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Cell)> + '_ {
        let columns = self.columns;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), cell)
        })
    }

    /// Counts interior edges whose shared wall has been removed.
    #[must_use]
    pub fn open_passages(&self) -> usize {
        self.iter()
            .map(|(coord, cell)| {
                [Side::East, Side::South]
                    .into_iter()
                    .filter(|side| !cell.has_wall(*side) && self.neighbor(coord, *side).is_some())
                    .count()
            })
            .sum()
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let row = usize::try_from(coord.row()).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

fn cells_along(extent: f32, cell_length: f32) -> u32 {
    let cells = (extent / cell_length).floor();
    if cells.is_nan() || cells < 1.0 {
        1
    } else if cells >= u32::MAX as f32 {
        u32::MAX
    } else {
        cells as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_fully_walled() {
        let grid = WallGrid::new(3, 2, 40.0);
        assert_eq!(grid.cell_count(), 6);
        assert!(grid.iter().all(|(_, cell)| cell.wall_count() == 4));
        assert_eq!(grid.open_passages(), 0);
    }

    #[test]
    fn viewport_dimensions_floor_against_cell_length() {
        let grid = WallGrid::from_viewport(815.0, 599.0, 40.0);
        assert_eq!(grid.columns(), 20);
        assert_eq!(grid.rows(), 14);
    }

    #[test]
    fn tiny_viewport_yields_single_cell() {
        let grid = WallGrid::from_viewport(10.0, 0.0, 40.0);
        assert_eq!((grid.columns(), grid.rows()), (1, 1));
    }

    #[test]
    fn cell_at_distinguishes_out_of_bounds() {
        let grid = WallGrid::new(2, 2, 40.0);
        let (coord, cell) = grid.cell_at(Vec2::new(45.0, 10.0)).expect("inside grid");
        assert_eq!(coord, CellCoord::new(1, 0));
        assert!(cell.has_wall(Side::North));

        assert!(grid.cell_at(Vec2::new(-0.1, 10.0)).is_none());
        assert!(grid.cell_at(Vec2::new(80.0, 10.0)).is_none());
        assert!(grid.cell_at(Vec2::new(10.0, 80.0)).is_none());
    }

    #[test]
    fn neighbor_respects_bounds() {
        let grid = WallGrid::new(2, 2, 40.0);
        let origin = CellCoord::new(0, 0);
        assert_eq!(grid.neighbor(origin, Side::North), None);
        assert_eq!(grid.neighbor(origin, Side::West), None);
        assert_eq!(grid.neighbor(origin, Side::East), Some(CellCoord::new(1, 0)));
        assert_eq!(grid.neighbor(origin, Side::South), Some(CellCoord::new(0, 1)));
        assert_eq!(grid.neighbor(CellCoord::new(1, 1), Side::East), None);
    }

    #[test]
    fn carve_clears_both_sides_of_the_edge() {
        let mut grid = WallGrid::new(2, 1, 40.0);
        assert!(grid.carve(CellCoord::new(1, 0), Side::West));

        assert!(!grid.has_wall(CellCoord::new(1, 0), Side::West));
        assert!(!grid.has_wall(CellCoord::new(0, 0), Side::East));
        assert_eq!(grid.open_passages(), 1);
        assert!(!grid.carve(CellCoord::new(0, 0), Side::East));
    }

    #[test]
    fn carve_never_opens_the_perimeter() {
        let mut grid = WallGrid::new(1, 1, 40.0);
        for side in Side::ALL {
            assert!(!grid.carve(CellCoord::new(0, 0), side));
            assert!(grid.has_wall(CellCoord::new(0, 0), side));
        }
    }

    #[test]
    fn out_of_bounds_walls_are_solid() {
        let grid = WallGrid::new(1, 1, 40.0);
        assert!(grid.has_wall(CellCoord::new(5, 5), Side::North));
    }

    #[test]
    fn cell_center_is_offset_by_half_a_cell() {
        let grid = WallGrid::new(3, 3, 40.0);
        assert_eq!(grid.cell_center(CellCoord::new(2, 1)), Vec2::new(100.0, 60.0));
    }
}
