#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Runner engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! observers to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command batches.

mod config;
mod grid;

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use config::{
    ConfigError, GameConfig, HostileTuning, ItemTuning, MazeTuning, PlayerTuning, Viewport,
    MAX_GRID_CELLS,
};
pub use grid::{Cell, Side, WallGrid};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Runner.";

/// Lifecycle phase of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// No level is loaded; waiting for a start request.
    Menu,
    /// Ticks advance the simulation.
    Running,
    /// Ticks are ignored until the session resumes.
    Paused,
    /// The exit was reached and the next level has not been loaded yet.
    LevelComplete,
    /// Health ran out; the session waits for a restart or a return to the menu.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resets the session statistics and loads the first level.
    StartGame {
        /// Generated content for the first level.
        layout: LevelLayout,
    },
    /// Replaces the completed level with freshly generated content.
    LoadLevel {
        /// Generated content for the next level.
        layout: LevelLayout,
    },
    /// Advances the simulation clock and applies player input.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
        /// Directions held by the player during the tick.
        input: InputSnapshot,
    },
    /// Assigns a new pursuit heading to a hostile.
    SteerHostile {
        /// Identifier of the hostile being steered.
        hostile: HostileId,
        /// Heading in radians, measured from the positive x axis.
        heading: f32,
    },
    /// Moves every hostile along its heading, turning away from walls.
    AdvanceHostiles,
    /// Resolves hostile contacts, item pickups, and exit arrival for the tick.
    ResolveContacts,
    /// Suspends or resumes a running session.
    SetPaused {
        /// Whether ticks should be ignored.
        paused: bool,
    },
    /// Abandons the current session and returns to the menu.
    ReturnToMenu,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: GamePhase,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a level was loaded and play may begin.
    LevelStarted {
        /// Number of the loaded level.
        level: u32,
        /// Number of columns in the new grid.
        columns: u32,
        /// Number of rows in the new grid.
        rows: u32,
    },
    /// Confirms that the player moved during the tick.
    PlayerMoved {
        /// Position before the move.
        from: Vec2,
        /// Position after the move.
        to: Vec2,
    },
    /// Reports that the requested player move hit a wall and was rolled back.
    PlayerBlocked {
        /// Position the player kept.
        at: Vec2,
    },
    /// Confirms that a hostile adopted a new pursuit heading.
    HostileRepathed {
        /// Identifier of the hostile.
        hostile: HostileId,
        /// Newly assigned heading in radians.
        heading: f32,
    },
    /// Reports that a hostile hit a wall and turned away.
    HostileBlocked {
        /// Identifier of the hostile.
        hostile: HostileId,
        /// Heading adopted after turning.
        heading: f32,
    },
    /// Reports that a hostile touched the player.
    PlayerHit {
        /// Identifier of the hostile.
        hostile: HostileId,
        /// Whether the knockback displacement was kept.
        knocked_back: bool,
    },
    /// Reports a new health value.
    HealthChanged {
        /// Health after the change.
        health: u32,
    },
    /// Reports a new score value.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// Reports a new player speed.
    PlayerSpeedChanged {
        /// Speed after the change.
        speed: f32,
    },
    /// Confirms that an item was collected.
    ItemCollected {
        /// Identifier of the item.
        item: ItemId,
        /// Kind of the item.
        kind: ItemKind,
        /// Effect magnitude applied.
        value: u32,
    },
    /// Reports that the player reached the exit.
    LevelCompleted {
        /// Level that will be loaded next.
        level: u32,
        /// Score bonus awarded for finishing the level.
        bonus: u32,
    },
    /// Reports that health ran out.
    GameOver {
        /// Score at the moment the session ended.
        final_score: u32,
    },
}

/// Abstract directional intents the player can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Towards decreasing y.
    Up,
    /// Towards increasing y.
    Down,
    /// Towards decreasing x.
    Left,
    /// Towards increasing x.
    Right,
}

impl Intent {
    /// Every intent in a stable order.
    pub const ALL: [Intent; 4] = [Intent::Up, Intent::Down, Intent::Left, Intent::Right];
}

/// Pressed state of every directional intent for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputSnapshot {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl InputSnapshot {
    /// Snapshot with nothing pressed.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: false,
        }
    }

    /// Returns a copy of the snapshot with the intent pressed.
    #[must_use]
    pub const fn with(self, intent: Intent) -> Self {
        self.set(intent, true)
    }

    /// Returns a copy of the snapshot with the intent set to the given state.
    #[must_use]
    pub const fn set(mut self, intent: Intent, pressed: bool) -> Self {
        match intent {
            Intent::Up => self.up = pressed,
            Intent::Down => self.down = pressed,
            Intent::Left => self.left = pressed,
            Intent::Right => self.right = pressed,
        }
        self
    }

    /// Reports whether the intent is held.
    #[must_use]
    pub const fn pressed(&self, intent: Intent) -> bool {
        match intent {
            Intent::Up => self.up,
            Intent::Down => self.down,
            Intent::Left => self.left,
            Intent::Right => self.right,
        }
    }

    /// Reports whether no intent is held.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    /// Displacement produced by the held intents at the provided speed.
    ///
    /// Each axis is applied independently and opposing intents cancel, so a
    /// diagonal covers `speed` along both axes.
    #[must_use]
    pub fn displacement(&self, speed: f32) -> Vec2 {
        let mut delta = Vec2::ZERO;
        if self.up {
            delta.y -= speed;
        }
        if self.down {
            delta.y += speed;
        }
        if self.left {
            delta.x -= speed;
        }
        if self.right {
            delta.x += speed;
        }
        delta
    }
}

/// Unique identifier assigned to a hostile within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostileId(u32);

impl HostileId {
    /// Creates a new hostile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an item within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new item identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Kinds of beneficial items scattered through the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Restores health up to the configured maximum.
    Health,
    /// Adds to the score.
    Score,
    /// Permanently raises the player's speed.
    Speed,
}

impl ItemKind {
    /// Every item kind, used for uniform selection.
    pub const ALL: [ItemKind; 3] = [ItemKind::Health, ItemKind::Score, ItemKind::Speed];
}

/// Movement state of a hostile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PursuitState {
    /// The last step moved toward the current heading.
    #[default]
    Seeking,
    /// The last step hit a wall and the hostile turned away.
    Blocked,
}

/// Player-facing counters shown by the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Stats {
    /// Accumulated score.
    pub score: u32,
    /// Remaining health.
    pub health: u32,
    /// Current level, starting at one.
    pub level: u32,
}

/// Spawn parameters for a single hostile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostileSeed {
    /// Spawn position in world units.
    pub position: Vec2,
    /// Distance travelled per tick.
    pub speed: f32,
    /// Initial heading in radians.
    pub heading: f32,
}

/// Spawn parameters for a single item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemSeed {
    /// Spawn position in world units.
    pub position: Vec2,
    /// Kind of the item.
    pub kind: ItemKind,
    /// Effect magnitude applied on pickup.
    pub value: u32,
}

/// Complete generated content for one level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelLayout {
    /// Level number the content was generated for.
    pub level: u32,
    /// Carved maze.
    pub grid: WallGrid,
    /// Hostiles to spawn.
    pub hostiles: Vec<HostileSeed>,
    /// Items to scatter.
    pub items: Vec<ItemSeed>,
    /// Centre of the exit marker.
    pub exit: Vec2,
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Centre of the player in world units.
    pub position: Vec2,
    /// Diameter of the collision footprint.
    pub size: f32,
    /// Current speed including pickups.
    pub speed: f32,
}

/// Immutable representation of a single hostile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostileSnapshot {
    /// Unique identifier assigned to the hostile.
    pub id: HostileId,
    /// Centre of the hostile in world units.
    pub position: Vec2,
    /// Diameter of the collision footprint.
    pub size: f32,
    /// Distance travelled per tick.
    pub speed: f32,
    /// Current heading in radians.
    pub heading: f32,
    /// Movement state after the last step.
    pub state: PursuitState,
    /// Simulation time of the last heading decision, if any.
    pub last_repath: Option<Duration>,
}

/// Read-only snapshot describing all hostiles within the maze.
#[derive(Clone, Debug, Default)]
pub struct HostileView {
    snapshots: Vec<HostileSnapshot>,
}

impl HostileView {
    /// Creates a new hostile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<HostileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured hostile snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &HostileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured hostiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no hostiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<HostileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of an uncollected item used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemSnapshot {
    /// Unique identifier assigned to the item.
    pub id: ItemId,
    /// Centre of the item in world units.
    pub position: Vec2,
    /// Diameter of the pickup footprint.
    pub size: f32,
    /// Kind of the item.
    pub kind: ItemKind,
    /// Effect magnitude.
    pub value: u32,
}

/// Immutable representation of the level exit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitSnapshot {
    /// Centre of the exit in world units.
    pub position: Vec2,
    /// Diameter of the exit marker.
    pub size: f32,
}

/// Everything a render sink needs to draw one frame.
#[derive(Clone, Debug)]
pub struct FrameView<'a> {
    /// Maze walls.
    pub grid: &'a WallGrid,
    /// Player state.
    pub player: PlayerSnapshot,
    /// Hostiles in deterministic order.
    pub hostiles: HostileView,
    /// Items that have not been collected yet.
    pub items: Vec<ItemSnapshot>,
    /// Exit marker.
    pub exit: ExitSnapshot,
    /// UI counters.
    pub stats: Stats,
    /// Current lifecycle phase.
    pub phase: GamePhase,
}

/// Reports whether two circles overlap, treating touching circles as apart.
#[must_use]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}
