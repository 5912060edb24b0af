#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Runner adapters.
//!
//! Backends never read the world directly. They receive a [`Scene`] built from
//! a [`FrameView`] snapshot: deduplicated wall segments, discs for every
//! entity in draw order, and the counters shown in the heads-up display.

mod text;

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_runner_core::{FrameView, GamePhase, ItemKind, PursuitState, Side, WallGrid};
use std::{error::Error, fmt};

pub use text::TextCanvas;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors applied to each kind of scene element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Maze walls.
    pub wall: Color,
    /// Player disc.
    pub player: Color,
    /// Hostile discs; blocked hostiles are drawn lighter.
    pub hostile: Color,
    /// Exit marker.
    pub exit: Color,
    /// Health items.
    pub health_item: Color,
    /// Score items.
    pub score_item: Color,
    /// Speed items.
    pub speed_item: Color,
}

impl Palette {
    /// Color of an item of the provided kind.
    #[must_use]
    pub const fn item(&self, kind: ItemKind) -> Color {
        match kind {
            ItemKind::Health => self.health_item,
            ItemKind::Score => self.score_item,
            ItemKind::Speed => self.speed_item,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: Color::from_rgb_u8(0x7f, 0x8c, 0x8d),
            player: Color::from_rgb_u8(0x34, 0x98, 0xdb),
            hostile: Color::from_rgb_u8(0xe7, 0x4c, 0x3c),
            exit: Color::from_rgb_u8(0x27, 0xae, 0x60),
            health_item: Color::from_rgb_u8(0x2e, 0xcc, 0x71),
            score_item: Color::from_rgb_u8(0xf1, 0xc4, 0x0f),
            speed_item: Color::from_rgb_u8(0x9b, 0x59, 0xb6),
        }
    }
}

/// Straight wall piece between two grid corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSegment {
    /// Start point in world units.
    pub from: Vec2,
    /// End point in world units.
    pub to: Vec2,
}

impl WallSegment {
    /// Reports whether the segment runs along the x axis.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.from.y == self.to.y
    }
}

/// Category of entity represented by a disc.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiscKind {
    /// Level exit.
    Exit,
    /// Uncollected item.
    Item(ItemKind),
    /// The player.
    Player,
    /// A hostile.
    Hostile,
}

impl DiscKind {
    /// Single character identifying the disc in text output.
    #[must_use]
    pub const fn glyph(&self) -> char {
        match self {
            Self::Exit => 'E',
            Self::Item(ItemKind::Health) => 'H',
            Self::Item(ItemKind::Score) => 'S',
            Self::Item(ItemKind::Speed) => '^',
            Self::Player => '@',
            Self::Hostile => 'Z',
        }
    }
}

/// Filled circle marking an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disc {
    /// What the disc represents.
    pub kind: DiscKind,
    /// Centre in world units.
    pub center: Vec2,
    /// Radius in world units.
    pub radius: f32,
    /// Fill color.
    pub color: Color,
}

/// Counters shown next to the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Accumulated score.
    pub score: u32,
    /// Remaining health.
    pub health: u32,
    /// Current level.
    pub level: u32,
    /// Lifecycle phase.
    pub phase: GamePhase,
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {}  Health: {}  Level: {}",
            self.score, self.health, self.level
        )?;
        match self.phase {
            GamePhase::Running => Ok(()),
            GamePhase::Menu => write!(f, "  [menu]"),
            GamePhase::Paused => write!(f, "  [paused]"),
            GamePhase::LevelComplete => write!(f, "  [level complete]"),
            GamePhase::GameOver => write!(f, "  [game over]"),
        }
    }
}

/// Scene description combining the maze walls, entities, and counters.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Width of the maze in world units.
    pub width: f32,
    /// Height of the maze in world units.
    pub height: f32,
    /// Color used for walls.
    pub wall_color: Color,
    /// Every standing wall, each shared wall listed once.
    pub walls: Vec<WallSegment>,
    /// Entities in draw order: exit, items, player, hostiles.
    pub discs: Vec<Disc>,
    /// Counters shown to the player.
    pub hud: Hud,
}

impl Scene {
    /// Builds a scene from a frame snapshot.
    #[must_use]
    pub fn from_frame(frame: &FrameView<'_>, palette: &Palette) -> Self {
        let mut discs = Vec::with_capacity(frame.items.len() + frame.hostiles.len() + 2);

        discs.push(Disc {
            kind: DiscKind::Exit,
            center: frame.exit.position,
            radius: frame.exit.size / 2.0,
            color: palette.exit,
        });
        discs.extend(frame.items.iter().map(|item| Disc {
            kind: DiscKind::Item(item.kind),
            center: item.position,
            radius: item.size / 2.0,
            color: palette.item(item.kind),
        }));
        discs.push(Disc {
            kind: DiscKind::Player,
            center: frame.player.position,
            radius: frame.player.size / 2.0,
            color: palette.player,
        });
        discs.extend(frame.hostiles.iter().map(|hostile| Disc {
            kind: DiscKind::Hostile,
            center: hostile.position,
            radius: hostile.size / 2.0,
            color: match hostile.state {
                PursuitState::Seeking => palette.hostile,
                PursuitState::Blocked => palette.hostile.lighten(0.35),
            },
        }));

        Self {
            width: frame.grid.width(),
            height: frame.grid.height(),
            wall_color: palette.wall,
            walls: wall_segments(frame.grid),
            discs,
            hud: Hud {
                score: frame.stats.score,
                health: frame.stats.health,
                level: frame.stats.level,
                phase: frame.phase,
            },
        }
    }
}

/// Collects every standing wall exactly once.
///
/// Each cell contributes its north and west walls; the last column adds its
/// east walls and the last row its south walls. Walls are symmetric, so this
/// covers every wall without duplicates.
#[must_use]
pub fn wall_segments(grid: &WallGrid) -> Vec<WallSegment> {
    let length = grid.cell_length();
    let last_column = grid.columns().saturating_sub(1);
    let last_row = grid.rows().saturating_sub(1);
    let mut segments = Vec::new();

    for (coord, cell) in grid.iter() {
        let origin = grid.cell_origin(coord);
        let top_left = origin;
        let top_right = origin + Vec2::new(length, 0.0);
        let bottom_left = origin + Vec2::new(0.0, length);
        let bottom_right = origin + Vec2::new(length, length);

        if cell.has_wall(Side::North) {
            segments.push(WallSegment {
                from: top_left,
                to: top_right,
            });
        }
        if cell.has_wall(Side::West) {
            segments.push(WallSegment {
                from: top_left,
                to: bottom_left,
            });
        }
        if coord.column() == last_column && cell.has_wall(Side::East) {
            segments.push(WallSegment {
                from: top_right,
                to: bottom_right,
            });
        }
        if coord.row() == last_row && cell.has_wall(Side::South) {
            segments.push(WallSegment {
                from: bottom_left,
                to: bottom_right,
            });
        }
    }

    segments
}

/// Rendering backend capable of presenting Maze Runner scenes.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// A glyph must cover a positive, finite area of world space.
    InvalidGlyphSize {
        /// Provided glyph size that failed validation.
        glyph_size: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGlyphSize { glyph_size } => {
                write!(f, "glyph size must be positive (received {glyph_size})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_runner_core::{
        CellCoord, ExitSnapshot, HostileId, HostileSnapshot, HostileView, ItemId, ItemSnapshot,
        PlayerSnapshot, Stats,
    };

    fn cell_origin_at(grid: &WallGrid, column: u32, row: u32) -> Vec2 {
        grid.cell_origin(CellCoord::new(column, row))
    }

    fn frame(grid: &WallGrid) -> FrameView<'_> {
        FrameView {
            grid,
            player: PlayerSnapshot {
                position: Vec2::new(20.0, 20.0),
                size: 25.0,
                speed: 5.0,
            },
            hostiles: HostileView::from_snapshots(vec![HostileSnapshot {
                id: HostileId::new(0),
                position: Vec2::new(60.0, 20.0),
                size: 30.0,
                speed: 2.0,
                heading: 0.0,
                state: PursuitState::Blocked,
                last_repath: None,
            }]),
            items: vec![ItemSnapshot {
                id: ItemId::new(0),
                position: Vec2::new(60.0, 20.0),
                size: 20.0,
                kind: ItemKind::Speed,
                value: 1,
            }],
            exit: ExitSnapshot {
                position: Vec2::new(60.0, 20.0),
                size: 32.0,
            },
            stats: Stats {
                score: 10,
                health: 90,
                level: 2,
            },
            phase: GamePhase::Paused,
        }
    }

    #[test]
    fn single_cell_has_four_walls() {
        let grid = WallGrid::new(1, 1, 40.0);
        assert_eq!(wall_segments(&grid).len(), 4);
    }

    #[test]
    fn shared_wall_is_listed_once() {
        let grid = WallGrid::new(2, 1, 40.0);
        let segments = wall_segments(&grid);

        assert_eq!(segments.len(), 7);
        let shared = WallSegment {
            from: cell_origin_at(&grid, 1, 0),
            to: cell_origin_at(&grid, 1, 0) + Vec2::new(0.0, 40.0),
        };
        assert_eq!(segments.iter().filter(|s| **s == shared).count(), 1);
    }

    #[test]
    fn carved_wall_disappears() {
        let mut grid = WallGrid::new(2, 1, 40.0);
        assert!(grid.carve(CellCoord::new(0, 0), Side::East));
        assert_eq!(wall_segments(&grid).len(), 6);
    }

    #[test]
    fn scene_orders_discs_for_drawing() {
        let grid = WallGrid::new(2, 1, 40.0);
        let palette = Palette::default();

        let scene = Scene::from_frame(&frame(&grid), &palette);

        let kinds: Vec<DiscKind> = scene.discs.iter().map(|disc| disc.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiscKind::Exit,
                DiscKind::Item(ItemKind::Speed),
                DiscKind::Player,
                DiscKind::Hostile
            ]
        );
        assert_eq!(scene.discs[3].color, palette.hostile.lighten(0.35));
        assert_eq!((scene.width, scene.height), (80.0, 40.0));
        assert_eq!(scene.hud.to_string(), "Score: 10  Health: 90  Level: 2  [paused]");
    }

    #[test]
    fn every_disc_kind_has_a_distinct_glyph() {
        let kinds = [
            DiscKind::Exit,
            DiscKind::Item(ItemKind::Health),
            DiscKind::Item(ItemKind::Score),
            DiscKind::Item(ItemKind::Speed),
            DiscKind::Player,
            DiscKind::Hostile,
        ];
        let glyphs: Vec<char> = kinds.iter().map(DiscKind::glyph).collect();

        assert_eq!(glyphs, vec!['E', 'H', 'S', '^', '@', 'Z']);
    }

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::from_rgb_u8(0, 0, 0).lighten(0.5);
        assert_eq!(color, Color::new(0.5, 0.5, 0.5, 1.0));
    }
}
