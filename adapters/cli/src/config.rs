use std::{fs, path::Path};

use anyhow::{Context, Result};
use maze_runner_core::GameConfig;

/// Command-line values that take precedence over the configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) seed: Option<u64>,
    pub(crate) width: Option<f32>,
    pub(crate) height: Option<f32>,
}

/// Reads the optional TOML file, applies overrides, and validates the result.
pub(crate) fn load(path: Option<&Path>, overrides: Overrides) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file at {}", path.display()))?;
            parse(&contents)
                .with_context(|| format!("invalid config file at {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    apply(&mut config, overrides);
    config
        .validate()
        .context("configuration rejected after applying command-line overrides")?;
    Ok(config)
}

fn parse(contents: &str) -> Result<GameConfig> {
    toml::from_str(contents).context("failed to parse config toml contents")
}

fn apply(config: &mut GameConfig, overrides: Overrides) {
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(width) = overrides.width {
        config.viewport.width = width;
    }
    if let Some(height) = overrides.height {
        config.viewport.height = height;
    }
}
