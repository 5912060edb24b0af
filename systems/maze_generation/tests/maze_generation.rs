use std::collections::VecDeque;

use maze_runner_core::{CellCoord, MazeTuning, Side, Viewport, WallGrid};
use maze_runner_system_maze_generation::{carve_spanning_tree, MazeGenerator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn carving_produces_a_spanning_tree() {
    for (seed, columns, rows) in [(1, 20, 15), (2, 7, 3), (3, 1, 9), (4, 12, 12)] {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = WallGrid::new(columns, rows, 40.0);

        carve_spanning_tree(&mut grid, &mut rng);

        let cells = (columns * rows) as usize;
        assert_eq!(grid.cell_count(), cells);
        assert_eq!(
            grid.open_passages(),
            cells - 1,
            "a tree over {cells} cells has {} edges",
            cells - 1
        );
        assert_eq!(reachable_cells(&grid), cells, "maze must be connected");
        assert_symmetric(&grid);
    }
}

#[test]
fn single_cell_grid_keeps_all_walls() {
    let generator = MazeGenerator::new(40.0, MazeTuning::default());
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let grid = generator.generate(1, 1, 50, &mut rng);

    assert_eq!(grid.cell_count(), 1);
    let cell = grid.cell(CellCoord::new(0, 0)).expect("single cell");
    assert_eq!(cell.wall_count(), 4);
}

#[test]
fn difficulty_pass_keeps_walls_symmetric_and_perimeter_closed() {
    let generator = MazeGenerator::new(40.0, MazeTuning::default());
    for level in [1, 5, 20, 200] {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(level));
        let grid = generator.generate(16, 11, level, &mut rng);

        assert_symmetric(&grid);
        assert_perimeter_closed(&grid);
        assert_eq!(reachable_cells(&grid), grid.cell_count());
        assert!(grid.open_passages() >= grid.cell_count() - 1);
    }
}

#[test]
fn higher_levels_open_more_walls_on_average() {
    let generator = MazeGenerator::new(40.0, MazeTuning::default());
    let mut low = 0;
    let mut high = 0;
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        low += generator.generate(20, 15, 1, &mut rng).open_passages();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        high += generator.generate(20, 15, 30, &mut rng).open_passages();
    }

    assert!(high > low, "level 30 ({high}) should be more open than level 1 ({low})");
}

#[test]
fn viewport_generation_floors_dimensions() {
    let generator = MazeGenerator::new(40.0, MazeTuning::default());
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    let grid = generator.generate_for_viewport(Viewport::new(819.0, 601.0), 1, &mut rng);

    assert_eq!((grid.columns(), grid.rows()), (20, 15));
}

#[test]
fn same_seed_generates_same_maze() {
    let generator = MazeGenerator::new(40.0, MazeTuning::default());
    let mut first_rng = ChaCha8Rng::seed_from_u64(77);
    let mut second_rng = ChaCha8Rng::seed_from_u64(77);

    let first = generator.generate(14, 9, 3, &mut first_rng);
    let second = generator.generate(14, 9, 3, &mut second_rng);

    assert_eq!(first, second);
}

fn reachable_cells(grid: &WallGrid) -> usize {
    let mut seen = vec![false; grid.cell_count()];
    let mut queue = VecDeque::from([CellCoord::new(0, 0)]);
    seen[0] = true;
    let mut count = 0;

    while let Some(coord) = queue.pop_front() {
        count += 1;
        for side in Side::ALL {
            if grid.has_wall(coord, side) {
                continue;
            }
            let neighbor = grid
                .neighbor(coord, side)
                .expect("open side must lead to a neighbour");
            let index = (neighbor.row() * grid.columns() + neighbor.column()) as usize;
            if !seen[index] {
                seen[index] = true;
                queue.push_back(neighbor);
            }
        }
    }

    count
}

fn assert_symmetric(grid: &WallGrid) {
    for (coord, cell) in grid.iter() {
        for side in Side::ALL {
            if let Some(neighbor) = grid.neighbor(coord, side) {
                assert_eq!(
                    cell.has_wall(side),
                    grid.has_wall(neighbor, side.opposite()),
                    "asymmetric wall between {coord:?} and {neighbor:?}"
                );
            }
        }
    }
}

fn assert_perimeter_closed(grid: &WallGrid) {
    for (coord, cell) in grid.iter() {
        for side in Side::ALL {
            if grid.neighbor(coord, side).is_none() {
                assert!(cell.has_wall(side), "perimeter opened at {coord:?} {side:?}");
            }
        }
    }
}
