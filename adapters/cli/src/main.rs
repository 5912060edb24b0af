#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Maze Runner in the terminal.
//!
//! The player is driven by a scripted autopilot so whole sessions can be
//! watched, logged, and replayed from a seed. By default frames advance by a
//! fixed step without pacing, so a seed reproduces a run exactly; `--realtime`
//! paces frames to the tick rate and feeds the measured wall-clock deltas.

mod autopilot;
mod clock;
mod config;
mod terminal;

use std::{
    io,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use clap::Parser;
use maze_runner_core::{GamePhase, Stats};
use maze_runner_rendering::{Palette, RenderingBackend, Scene, TextCanvas};
use maze_runner_session::{Session, SessionObserver};
use maze_runner_world::query;

use crate::{
    autopilot::Autopilot, clock::FrameClock, config::Overrides, terminal::TerminalBackend,
};

#[derive(Parser, Debug)]
#[command(
    name = "maze-runner",
    about = "Runs a Maze Runner session in the terminal"
)]
struct Cli {
    /// TOML file with gameplay tuning; defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for every random decision; taken from the clock when absent.
    #[arg(long)]
    seed: Option<u64>,
    /// Viewport width in world units.
    #[arg(long)]
    width: Option<f32>,
    /// Viewport height in world units.
    #[arg(long)]
    height: Option<f32>,
    /// Number of frames to simulate before stopping.
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    /// Print a frame every N ticks; 0 prints only the final frame.
    #[arg(long, default_value_t = 60)]
    render_every: u64,
    /// Pace frames to the tick rate and simulate measured wall-clock time.
    #[arg(long)]
    realtime: bool,
}

/// Prints lifecycle announcements for the person watching.
struct Announcer;

impl SessionObserver for Announcer {
    fn on_level_complete(&mut self, new_level: u32) {
        println!("Level complete! Entering level {new_level}.");
    }

    fn on_game_over(&mut self, final_score: u32) {
        println!("Game over. Final score: {final_score}");
    }
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let cli = Cli::parse();
    let config = config::load(
        cli.config.as_deref(),
        Overrides {
            seed: cli.seed,
            width: cli.width,
            height: cli.height,
        },
    )?;

    let seed = config.seed.unwrap_or_else(clock_seed);
    log::info!("starting session with seed {seed}");

    let mut clock = FrameClock::new(config.tick_duration(), cli.realtime);
    let canvas = TextCanvas::for_cell_length(config.cell_length)
        .context("cell length cannot be drawn as text")?;
    let mut session = Session::new(config, seed).context("invalid game configuration")?;
    session.subscribe(Box::new(Announcer));

    println!("{}", query::welcome_banner(session.world()));
    let _ = session.start();

    let palette = Palette::default();
    let mut backend = TerminalBackend::new(canvas, io::stdout());
    let mut autopilot = Autopilot::new();
    let mut simulated = 0_u64;

    for tick in 0..cli.ticks {
        if session.phase() == GamePhase::GameOver {
            break;
        }

        let input = autopilot.steer(&session.frame());
        let _ = session.advance(clock.next_delta(), input);
        simulated += 1;

        if cli.render_every > 0 && tick % cli.render_every == 0 {
            backend.present(&Scene::from_frame(&session.frame(), &palette))?;
        }
    }

    backend.present(&Scene::from_frame(&session.frame(), &palette))?;
    log::info!(
        "simulated {simulated} ticks and printed {} frames",
        backend.frames()
    );
    println!("{}", summary(session.stats(), session.phase()));
    Ok(())
}

fn summary(stats: Stats, phase: GamePhase) -> String {
    let outcome = match phase {
        GamePhase::GameOver => "defeated",
        _ => "still standing",
    };
    format!(
        "Reached level {} with {} points ({outcome}, {} health left)",
        stats.level, stats.score, stats.health
    )
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
