//! Mutable entity state owned by the world and the moves applied to it.

use std::{
    f32::consts::{FRAC_PI_2, PI, TAU},
    time::Duration,
};

use glam::Vec2;
use maze_runner_core::{
    HostileId, HostileSeed, HostileSnapshot, InputSnapshot, ItemId, ItemKind, ItemSeed,
    ItemSnapshot, PlayerSnapshot, PursuitState, WallGrid,
};
use rand::Rng;

use crate::collision::collides;

/// Result of applying one tick of input to the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerStep {
    Idle,
    Moved { from: Vec2, to: Vec2 },
    Blocked,
}

#[derive(Clone, Debug)]
pub(crate) struct Player {
    position: Vec2,
    size: f32,
    speed: f32,
}

impl Player {
    pub(crate) fn new(position: Vec2, size: f32, speed: f32) -> Self {
        Self {
            position,
            size,
            speed,
        }
    }

    pub(crate) fn position(&self) -> Vec2 {
        self.position
    }

    pub(crate) fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub(crate) fn speed(&self) -> f32 {
        self.speed
    }

    pub(crate) fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub(crate) fn teleport(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Moves along every pressed axis at once; a colliding candidate is dropped.
    pub(crate) fn apply_input(&mut self, grid: &WallGrid, input: InputSnapshot) -> PlayerStep {
        if input.is_idle() {
            return PlayerStep::Idle;
        }

        let from = self.position;
        let candidate = from + input.displacement(self.speed);
        if candidate == from {
            return PlayerStep::Idle;
        }
        if collides(grid, candidate, self.size) {
            return PlayerStep::Blocked;
        }

        self.position = candidate;
        PlayerStep::Moved {
            from,
            to: candidate,
        }
    }

    /// Pushes the player away from `source`, restoring the exact previous
    /// position when the push lands in a wall. Returns whether the push stuck.
    pub(crate) fn knock_back(&mut self, grid: &WallGrid, source: Vec2, distance: f32) -> bool {
        let previous = self.position;
        let offset = previous - source;
        let angle = offset.y.atan2(offset.x);
        let candidate = previous + Vec2::new(angle.cos(), angle.sin()) * distance;

        if collides(grid, candidate, self.size) {
            self.position = previous;
            return false;
        }

        self.position = candidate;
        true
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            size: self.size,
            speed: self.speed,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Hostile {
    id: HostileId,
    position: Vec2,
    size: f32,
    speed: f32,
    heading: f32,
    state: PursuitState,
    last_repath: Option<Duration>,
}

impl Hostile {
    pub(crate) fn from_seed(id: HostileId, seed: HostileSeed, size: f32) -> Self {
        Self {
            id,
            position: seed.position,
            size,
            speed: seed.speed,
            heading: seed.heading,
            state: PursuitState::Seeking,
            last_repath: None,
        }
    }

    pub(crate) fn id(&self) -> HostileId {
        self.id
    }

    pub(crate) fn position(&self) -> Vec2 {
        self.position
    }

    pub(crate) fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub(crate) fn steer(&mut self, heading: f32, now: Duration) {
        self.heading = heading;
        self.last_repath = Some(now);
    }

    /// Steps along the heading. On a wall hit the hostile stays put and turns
    /// by a random angle in `[π/2, 3π/2)`; returns the heading it turned to.
    pub(crate) fn advance<R>(&mut self, grid: &WallGrid, rng: &mut R) -> Option<f32>
    where
        R: Rng + ?Sized,
    {
        let direction = Vec2::new(self.heading.cos(), self.heading.sin());
        let candidate = self.position + direction * self.speed;

        if collides(grid, candidate, self.size) {
            let turn = rng.gen_range(FRAC_PI_2..FRAC_PI_2 + PI);
            self.heading = (self.heading + turn).rem_euclid(TAU);
            self.state = PursuitState::Blocked;
            return Some(self.heading);
        }

        self.position = candidate;
        self.state = PursuitState::Seeking;
        None
    }

    pub(crate) fn snapshot(&self) -> HostileSnapshot {
        HostileSnapshot {
            id: self.id,
            position: self.position,
            size: self.size,
            speed: self.speed,
            heading: self.heading,
            state: self.state,
            last_repath: self.last_repath,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Item {
    id: ItemId,
    position: Vec2,
    size: f32,
    kind: ItemKind,
    value: u32,
    collected: bool,
}

impl Item {
    pub(crate) fn from_seed(id: ItemId, seed: ItemSeed, size: f32) -> Self {
        Self {
            id,
            position: seed.position,
            size,
            kind: seed.kind,
            value: seed.value,
            collected: false,
        }
    }

    pub(crate) fn is_available(&self) -> bool {
        !self.collected
    }

    pub(crate) fn touches(&self, position: Vec2, radius: f32) -> bool {
        self.is_available()
            && maze_runner_core::circles_overlap(position, radius, self.position, self.size / 2.0)
    }

    /// Marks the item collected. Only the first call reports `true`.
    pub(crate) fn collect(&mut self) -> bool {
        let was_available = !self.collected;
        self.collected = true;
        was_available
    }

    pub(crate) fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            id: self.id,
            position: self.position,
            size: self.size,
            kind: self.kind,
            value: self.value,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Exit {
    pub(crate) position: Vec2,
    pub(crate) size: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_runner_core::{CellCoord, Intent, Side};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn corridor() -> WallGrid {
        let mut grid = WallGrid::new(3, 1, 40.0);
        assert!(grid.carve(CellCoord::new(0, 0), Side::East));
        assert!(grid.carve(CellCoord::new(1, 0), Side::East));
        grid
    }

    #[test]
    fn player_moves_along_open_corridor() {
        let grid = corridor();
        let mut player = Player::new(Vec2::new(20.0, 20.0), 25.0, 5.0);

        let step = player.apply_input(&grid, InputSnapshot::idle().with(Intent::Right));

        assert_eq!(
            step,
            PlayerStep::Moved {
                from: Vec2::new(20.0, 20.0),
                to: Vec2::new(25.0, 20.0)
            }
        );
    }

    #[test]
    fn blocked_diagonal_does_not_slide() {
        let grid = corridor();
        let mut player = Player::new(Vec2::new(20.0, 20.0), 25.0, 5.0);
        let input = InputSnapshot::idle().with(Intent::Right).with(Intent::Down);

        assert_eq!(player.apply_input(&grid, input), PlayerStep::Blocked);
        assert_eq!(player.position(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn knock_back_into_wall_restores_position() {
        let grid = WallGrid::new(1, 1, 40.0);
        let start = Vec2::new(20.0, 20.0);
        let mut player = Player::new(start, 25.0, 5.0);

        assert!(!player.knock_back(&grid, Vec2::new(10.0, 20.0), 20.0));
        assert_eq!(player.position(), start);
    }

    #[test]
    fn knock_back_pushes_away_from_source() {
        let grid = corridor();
        let mut player = Player::new(Vec2::new(40.0, 20.0), 25.0, 5.0);

        assert!(player.knock_back(&grid, Vec2::new(30.0, 20.0), 20.0));
        assert!((player.position() - Vec2::new(60.0, 20.0)).length() < 1e-4);
    }

    #[test]
    fn blocked_hostile_turns_at_least_a_quarter() {
        let grid = WallGrid::new(1, 1, 40.0);
        let seed = HostileSeed {
            position: Vec2::new(20.0, 20.0),
            speed: 10.0,
            heading: 0.0,
        };
        let mut hostile = Hostile::from_seed(HostileId::new(0), seed, 30.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let heading = hostile.advance(&grid, &mut rng).expect("wall ahead");

        assert_eq!(hostile.position(), Vec2::new(20.0, 20.0));
        assert!((FRAC_PI_2..FRAC_PI_2 + PI).contains(&heading));
        assert_eq!(hostile.snapshot().state, PursuitState::Blocked);
    }

    #[test]
    fn collecting_twice_reports_once() {
        let seed = ItemSeed {
            position: Vec2::ZERO,
            kind: ItemKind::Speed,
            value: 1,
        };
        let mut item = Item::from_seed(ItemId::new(0), seed, 20.0);

        assert!(item.collect());
        assert!(!item.collect());
        assert!(!item.touches(Vec2::ZERO, 10.0));
    }
}
