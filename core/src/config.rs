//! Tuning knobs shared by the world, systems, and adapters.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ItemKind;

/// Largest maze, in cells, a viewport may produce.
pub const MAX_GRID_CELLS: u32 = 1 << 20;

/// Aggregated configuration for a game session.
///
/// Every section falls back to its defaults when omitted, so partial TOML
/// documents are accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of a maze cell in world units.
    pub cell_length: f32,
    /// Playable area used to derive the grid dimensions of each level.
    pub viewport: Viewport,
    /// Target number of simulation ticks per second.
    pub tick_rate_hz: u32,
    /// Exit diameter expressed as a fraction of the cell length.
    pub exit_scale: f32,
    /// Score multiplier awarded per level when the exit is reached.
    pub level_bonus: u32,
    /// Seed for every random stream; adapters pick one when absent.
    pub seed: Option<u64>,
    /// Player parameters.
    pub player: PlayerTuning,
    /// Hostile parameters.
    pub hostiles: HostileTuning,
    /// Item parameters.
    pub items: ItemTuning,
    /// Maze generation parameters.
    pub maze: MazeTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_length: 40.0,
            viewport: Viewport::default(),
            tick_rate_hz: 60,
            exit_scale: 0.8,
            level_bonus: 100,
            seed: None,
            player: PlayerTuning::default(),
            hostiles: HostileTuning::default(),
            items: ItemTuning::default(),
            maze: MazeTuning::default(),
        }
    }
}

impl GameConfig {
    /// Checks every knob for values the simulation cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("cell_length", self.cell_length)?;
        positive("viewport.width", self.viewport.width)?;
        positive("viewport.height", self.viewport.height)?;
        let cells = self.grid_cells();
        if cells > f64::from(MAX_GRID_CELLS) {
            return Err(ConfigError::GridTooLarge {
                cells,
                max: MAX_GRID_CELLS,
            });
        }
        positive("exit_scale", self.exit_scale)?;
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        positive("player.size", self.player.size)?;
        positive("player.speed", self.player.speed)?;
        if self.player.max_health == 0 {
            return Err(ConfigError::ZeroMaxHealth);
        }
        if self.player.starting_health > self.player.max_health {
            return Err(ConfigError::HealthExceedsMaximum {
                starting: self.player.starting_health,
                max: self.player.max_health,
            });
        }

        positive("hostiles.size", self.hostiles.size)?;
        positive("hostiles.base_speed", self.hostiles.base_speed)?;
        positive("hostiles.speed_jitter_min", self.hostiles.speed_jitter_min)?;
        if self.hostiles.speed_jitter_min > self.hostiles.speed_jitter_max {
            return Err(ConfigError::InvertedSpeedJitter {
                min: self.hostiles.speed_jitter_min,
                max: self.hostiles.speed_jitter_max,
            });
        }
        if !(self.hostiles.heading_perturbation >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "hostiles.heading_perturbation",
                value: self.hostiles.heading_perturbation,
            });
        }
        if self.hostiles.max_placement_attempts == 0 {
            return Err(ConfigError::ZeroPlacementAttempts);
        }

        positive("items.size", self.items.size)?;

        probability("maze.removal_base", self.maze.removal_base)?;
        probability("maze.removal_per_level", self.maze.removal_per_level)?;
        probability("maze.removal_ceiling", self.maze.removal_ceiling)?;
        Ok(())
    }

    /// Number of cells a level generated for the viewport would hold.
    fn grid_cells(&self) -> f64 {
        let along = |extent: f32| f64::from((extent / self.cell_length).floor().max(1.0));
        along(self.viewport.width) * along(self.viewport.height)
    }

    /// Nominal duration of a single simulation tick.
    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }

    /// Diameter of the exit marker in world units.
    #[must_use]
    pub fn exit_size(&self) -> f32 {
        self.cell_length * self.exit_scale
    }
}

/// Dimensions of the playable area in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport from explicit dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Player parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Diameter of the player's collision footprint.
    pub size: f32,
    /// Distance travelled per tick along each pressed axis before pickups.
    pub speed: f32,
    /// Health granted at the start of a session.
    pub starting_health: u32,
    /// Upper bound applied when health pickups are collected.
    pub max_health: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: 25.0,
            speed: 5.0,
            starting_health: 100,
            max_health: 100,
        }
    }
}

/// Hostile parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileTuning {
    /// Diameter of a hostile's collision footprint.
    pub size: f32,
    /// Base distance travelled per tick before per-instance jitter.
    pub base_speed: f32,
    /// Lower bound of the multiplier applied to the base speed at spawn.
    pub speed_jitter_min: f32,
    /// Upper bound of the multiplier applied to the base speed at spawn.
    pub speed_jitter_max: f32,
    /// Hostiles spawned on level zero; one more is added per level.
    pub base_count: u32,
    /// Minimum simulation time between two heading decisions of a hostile.
    pub repath_interval_ms: u64,
    /// Half-width in radians of the uniform noise added to pursuit headings.
    pub heading_perturbation: f32,
    /// Health removed from the player per contact.
    pub contact_damage: u32,
    /// Distance the player is pushed away from a hostile on contact.
    pub knockback: f32,
    /// Minimum spawn distance from the player start, in cell lengths.
    pub min_spawn_distance_cells: f32,
    /// Sampling attempts per hostile before falling back to the farthest candidate.
    pub max_placement_attempts: u32,
}

impl Default for HostileTuning {
    fn default() -> Self {
        Self {
            size: 30.0,
            base_speed: 2.0,
            speed_jitter_min: 0.8,
            speed_jitter_max: 1.2,
            base_count: 3,
            repath_interval_ms: 500,
            heading_perturbation: 0.25,
            contact_damage: 2,
            knockback: 20.0,
            min_spawn_distance_cells: 5.0,
            max_placement_attempts: 64,
        }
    }
}

impl HostileTuning {
    /// Number of hostiles spawned for the level.
    #[must_use]
    pub const fn count_for_level(&self, level: u32) -> u32 {
        self.base_count.saturating_add(level)
    }

    /// Minimum simulation time between heading decisions.
    #[must_use]
    pub const fn repath_interval(&self) -> Duration {
        Duration::from_millis(self.repath_interval_ms)
    }
}

/// Item parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTuning {
    /// Diameter of an item's pickup footprint.
    pub size: f32,
    /// Items spawned on level zero; one more is added per level.
    pub base_count: u32,
    /// Health restored by a health item.
    pub health_value: u32,
    /// Score granted by a score item.
    pub score_value: u32,
    /// Speed added by a speed item.
    pub speed_value: u32,
}

impl Default for ItemTuning {
    fn default() -> Self {
        Self {
            size: 20.0,
            base_count: 5,
            health_value: 20,
            score_value: 50,
            speed_value: 1,
        }
    }
}

impl ItemTuning {
    /// Number of items spawned for the level.
    #[must_use]
    pub const fn count_for_level(&self, level: u32) -> u32 {
        self.base_count.saturating_add(level)
    }

    /// Effect magnitude associated with the item kind.
    #[must_use]
    pub const fn value_for(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::Health => self.health_value,
            ItemKind::Score => self.score_value,
            ItemKind::Speed => self.speed_value,
        }
    }
}

/// Maze generation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeTuning {
    /// Wall removal probability of the difficulty pass at level zero.
    pub removal_base: f64,
    /// Increase of the removal probability per level.
    pub removal_per_level: f64,
    /// Hard ceiling applied to the removal probability.
    pub removal_ceiling: f64,
}

impl Default for MazeTuning {
    fn default() -> Self {
        Self {
            removal_base: 0.1,
            removal_per_level: 0.02,
            removal_ceiling: 0.9,
        }
    }
}

impl MazeTuning {
    /// Probability that the difficulty pass removes a standing interior wall.
    ///
    /// Grows linearly with the level and saturates at `removal_ceiling`, so
    /// higher levels produce more open mazes.
    #[must_use]
    pub fn removal_probability(&self, level: u32) -> f64 {
        let raw = self.removal_base + f64::from(level) * self.removal_per_level;
        raw.clamp(0.0, self.removal_ceiling.clamp(0.0, 1.0))
    }
}

/// Reasons a [`GameConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A length, speed, or scale was zero, negative, or not a number.
    #[error("`{field}` must be positive (received {value})")]
    NonPositive {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Value found in the configuration.
        value: f32,
    },
    /// The tick rate was zero.
    #[error("`tick_rate_hz` must be positive")]
    ZeroTickRate,
    /// Maximum health was zero.
    #[error("`player.max_health` must be positive")]
    ZeroMaxHealth,
    /// Starting health exceeded the maximum.
    #[error("`player.starting_health` ({starting}) exceeds `player.max_health` ({max})")]
    HealthExceedsMaximum {
        /// Configured starting health.
        starting: u32,
        /// Configured maximum health.
        max: u32,
    },
    /// The hostile speed jitter range was inverted.
    #[error("hostile speed jitter range is inverted ({min} > {max})")]
    InvertedSpeedJitter {
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
    /// Hostile placement had no attempts to work with.
    #[error("`hostiles.max_placement_attempts` must be positive")]
    ZeroPlacementAttempts,
    /// A probability knob fell outside `[0, 1]`.
    #[error("`{field}` must lie within [0, 1] (received {value})")]
    ProbabilityOutOfRange {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Value found in the configuration.
        value: f64,
    },
    /// The viewport divided by the cell length yields too many cells.
    #[error("viewport holds {cells} cells, more than the supported {max}")]
    GridTooLarge {
        /// Cells the viewport would produce.
        cells: f64,
        /// Largest accepted cell count.
        max: u32,
    },
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_cell_length_is_rejected() {
        let config = GameConfig {
            cell_length: 0.0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "cell_length",
                value: 0.0
            })
        );
    }

    #[test]
    fn huge_viewport_is_rejected_before_allocating() {
        let config = GameConfig {
            viewport: Viewport::new(1e12, 1e12),
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooLarge { max: MAX_GRID_CELLS, .. })
        ));

        let tiny_cells = GameConfig {
            cell_length: 0.01,
            ..GameConfig::default()
        };
        assert!(matches!(
            tiny_cells.validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn largest_supported_grid_is_accepted() {
        let config = GameConfig {
            cell_length: 1.0,
            viewport: Viewport::new(1024.0, 1024.0),
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn inverted_jitter_is_rejected() {
        let mut config = GameConfig::default();
        config.hostiles.speed_jitter_min = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedSpeedJitter { .. })
        ));
    }

    #[test]
    fn removal_probability_grows_with_level() {
        let maze = MazeTuning::default();
        assert!((maze.removal_probability(1) - 0.12).abs() < 1e-9);
        assert!((maze.removal_probability(10) - 0.30).abs() < 1e-9);
    }

    #[test]
    fn removal_probability_is_clamped_at_the_ceiling() {
        let maze = MazeTuning::default();
        assert!((maze.removal_probability(1_000) - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn counts_grow_by_one_per_level() {
        let config = GameConfig::default();
        assert_eq!(config.hostiles.count_for_level(1), 4);
        assert_eq!(config.items.count_for_level(3), 8);
    }

    #[test]
    fn tick_duration_matches_rate() {
        let config = GameConfig::default();
        assert_eq!(config.tick_duration(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn config_round_trips_through_bincode() {
        let config = GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        };
        let bytes = bincode::serialize(&config).expect("serialize");
        let restored: GameConfig = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, config);
    }
}
