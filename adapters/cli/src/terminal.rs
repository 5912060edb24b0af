//! Rendering backend that prints text frames to any writer.

use std::io::Write;

use anyhow::{Context, Result};
use maze_runner_rendering::{RenderingBackend, Scene, TextCanvas};

/// Writes each presented scene as a block of text followed by a blank line.
#[derive(Debug)]
pub(crate) struct TerminalBackend<W: Write> {
    canvas: TextCanvas,
    writer: W,
    frames: u64,
}

impl<W: Write> TerminalBackend<W> {
    pub(crate) fn new(canvas: TextCanvas, writer: W) -> Self {
        Self {
            canvas,
            writer,
            frames: 0,
        }
    }

    /// Number of frames written so far.
    pub(crate) fn frames(&self) -> u64 {
        self.frames
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderingBackend for TerminalBackend<W> {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        let text = self.canvas.render(scene);
        writeln!(self.writer, "{text}\n").context("failed to write frame to terminal")?;
        self.writer
            .flush()
            .context("failed to flush terminal output")?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use maze_runner_core::{Command, GameConfig, LevelLayout, Viewport, WallGrid};
    use maze_runner_rendering::Palette;
    use maze_runner_world::{self as world, query, World};

    #[test]
    fn writes_one_block_per_frame() {
        let mut config = GameConfig::default();
        config.viewport = Viewport::new(40.0, 40.0);
        let mut world = World::new(config, 2);
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::StartGame {
                layout: LevelLayout {
                    level: 1,
                    grid: WallGrid::new(1, 1, 40.0),
                    hostiles: Vec::new(),
                    items: Vec::new(),
                    exit: Vec2::new(20.0, 20.0),
                },
            },
            &mut events,
        );

        let canvas = TextCanvas::for_cell_length(40.0).expect("positive glyph");
        let mut backend = TerminalBackend::new(canvas, Vec::new());
        let scene = Scene::from_frame(&query::frame(&world), &Palette::default());
        backend.present(&scene).expect("in-memory write");
        backend.present(&scene).expect("in-memory write");

        assert_eq!(backend.frames(), 2);
        let output = String::from_utf8(backend.into_inner()).expect("utf-8 output");
        let frame = "+-+\n|@|\n+-+\nScore: 0  Health: 100  Level: 1\n\n";
        assert_eq!(output, format!("{frame}{frame}"));
    }
}
