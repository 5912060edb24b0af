use glam::Vec2;
use maze_runner_core::{
    CellCoord, Command, GameConfig, GamePhase, HostileTuning, ItemKind, ItemTuning, WallGrid,
};
use maze_runner_system_spawning::{exit_position, Spawning};
use maze_runner_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn spawning() -> Spawning {
    Spawning::from_config(&GameConfig::default())
}

fn is_cell_center(grid: &WallGrid, position: Vec2) -> bool {
    grid.coord_at(position)
        .map(|coord| grid.cell_center(coord) == position)
        .unwrap_or(false)
}

#[test]
fn counts_grow_with_level() {
    let grid = WallGrid::new(20, 15, 40.0);
    for level in [1, 2, 7] {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(level));
        let layout = spawning().populate(grid.clone(), level, &mut rng);

        assert_eq!(layout.level, level);
        assert_eq!(layout.hostiles.len(), 3 + level as usize);
        assert_eq!(layout.items.len(), 5 + level as usize);
        assert_eq!(layout.exit, exit_position(&grid));
    }
}

#[test]
fn hostiles_keep_their_distance_from_the_start() {
    let grid = WallGrid::new(20, 15, 40.0);
    let start = grid.cell_center(CellCoord::new(0, 0));

    for seed in 0..25 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let hostiles = spawning().place_hostiles(&grid, 5, start, &mut rng);

        for hostile in hostiles {
            assert!(is_cell_center(&grid, hostile.position));
            assert!(hostile.position.distance(start) >= 200.0);
            assert!((1.6..=2.4).contains(&hostile.speed), "speed {}", hostile.speed);
            assert!((0.0..std::f32::consts::TAU).contains(&hostile.heading));
        }
    }
}

#[test]
fn tiny_grid_falls_back_to_the_farthest_candidate() {
    let grid = WallGrid::new(2, 2, 40.0);
    let start = grid.cell_center(CellCoord::new(0, 0));
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let hostiles = spawning().place_hostiles(&grid, 3, start, &mut rng);

    assert_eq!(hostiles.len(), 6);
    for hostile in hostiles {
        assert!(is_cell_center(&grid, hostile.position));
        // 64 draws over four cells all but guarantee the far corner shows up.
        assert_eq!(hostile.position, Vec2::new(60.0, 60.0));
    }
}

#[test]
fn single_cell_grid_terminates() {
    let grid = WallGrid::new(1, 1, 40.0);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let layout = spawning().populate(grid, 1, &mut rng);

    assert_eq!(layout.hostiles.len(), 4);
    assert!(layout
        .hostiles
        .iter()
        .all(|hostile| hostile.position == Vec2::new(20.0, 20.0)));
    assert_eq!(layout.exit, Vec2::new(20.0, 20.0));
}

#[test]
fn item_values_follow_their_kind() {
    let tuning = ItemTuning {
        base_count: 60,
        ..ItemTuning::default()
    };
    let spawner = Spawning::new(HostileTuning::default(), tuning);
    let grid = WallGrid::new(10, 10, 40.0);
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    let items = spawner.place_items(&grid, 0, &mut rng);

    assert_eq!(items.len(), 60);
    for kind in ItemKind::ALL {
        assert!(items.iter().any(|item| item.kind == kind), "{kind:?} never drawn");
    }
    for item in items {
        assert!(is_cell_center(&grid, item.position));
        let expected = match item.kind {
            ItemKind::Health => 20,
            ItemKind::Score => 50,
            ItemKind::Speed => 1,
        };
        assert_eq!(item.value, expected);
    }
}

#[test]
fn same_seed_populates_identically() {
    let grid = WallGrid::new(12, 9, 40.0);
    let mut first_rng = ChaCha8Rng::seed_from_u64(0x1234_5678);
    let mut second_rng = ChaCha8Rng::seed_from_u64(0x1234_5678);

    let first = spawning().populate(grid.clone(), 4, &mut first_rng);
    let second = spawning().populate(grid, 4, &mut second_rng);

    assert_eq!(first, second);
}

#[test]
fn populated_layout_starts_a_game() {
    let config = GameConfig::default();
    let grid = WallGrid::new(20, 15, config.cell_length);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let layout = Spawning::from_config(&config).populate(grid, 1, &mut rng);

    let mut world = World::new(config, 99);
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartGame { layout }, &mut events);

    assert_eq!(query::phase(&world), GamePhase::Running);
    assert_eq!(query::hostile_view(&world).len(), 4);
    assert_eq!(query::items(&world).len(), 6);
    assert_eq!(query::exit(&world).position, Vec2::new(780.0, 580.0));
    assert_eq!(query::exit(&world).size, 32.0);
}
