//! Fixed-width text rasteriser for terminals and logs.

use crate::{RenderingError, Scene};

/// Rasterises scenes into text, one glyph per `glyph_size` world units.
///
/// With a glyph size of half a cell, wall lines land on even glyph indices and
/// cell centres on odd ones, so every cell maps to a 3×3 block sharing its
/// border with its neighbours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextCanvas {
    glyph_size: f32,
}

impl TextCanvas {
    /// Creates a canvas covering `glyph_size` world units per character.
    pub fn new(glyph_size: f32) -> Result<Self, RenderingError> {
        if !(glyph_size > 0.0) || !glyph_size.is_finite() {
            return Err(RenderingError::InvalidGlyphSize { glyph_size });
        }
        Ok(Self { glyph_size })
    }

    /// Creates a canvas that draws two glyphs per cell length.
    pub fn for_cell_length(cell_length: f32) -> Result<Self, RenderingError> {
        Self::new(cell_length / 2.0)
    }

    /// World units covered by one character.
    #[must_use]
    pub const fn glyph_size(&self) -> f32 {
        self.glyph_size
    }

    /// Number of glyph columns and rows needed for the scene.
    #[must_use]
    pub fn dimensions(&self, scene: &Scene) -> (usize, usize) {
        let columns = (scene.width / self.glyph_size).round().max(0.0) as usize + 1;
        let rows = (scene.height / self.glyph_size).round().max(0.0) as usize + 1;
        (columns, rows)
    }

    /// Draws the scene followed by a line with the heads-up display.
    #[must_use]
    pub fn render(&self, scene: &Scene) -> String {
        let (columns, rows) = self.dimensions(scene);
        let mut glyphs = vec![vec![' '; columns]; rows];

        for wall in &scene.walls {
            let (line, start, end, stroke) = if wall.is_horizontal() {
                (wall.from.y, wall.from.x.min(wall.to.x), wall.from.x.max(wall.to.x), '-')
            } else {
                (wall.from.x, wall.from.y.min(wall.to.y), wall.from.y.max(wall.to.y), '|')
            };
            let line = self.index(line);
            let start = self.index(start);
            let end = self.index(end);

            for along in start..=end {
                let (column, row) = if wall.is_horizontal() {
                    (along, line)
                } else {
                    (line, along)
                };
                let Some(slot) = glyph_at(&mut glyphs, column, row) else {
                    continue;
                };
                *slot = if along == start || along == end {
                    '+'
                } else {
                    match *slot {
                        ' ' => stroke,
                        existing if existing == stroke => stroke,
                        _ => '+',
                    }
                };
            }
        }

        for disc in &scene.discs {
            let column = self.index(disc.center.x);
            let row = self.index(disc.center.y);
            if let Some(slot) = glyph_at(&mut glyphs, column, row) {
                *slot = disc.kind.glyph();
            }
        }

        let mut output = String::with_capacity((columns + 1) * (rows + 1));
        for row in glyphs {
            let line: String = row.into_iter().collect();
            output.push_str(line.trim_end());
            output.push('\n');
        }
        output.push_str(&scene.hud.to_string());
        output
    }

    fn index(&self, value: f32) -> i64 {
        (value / self.glyph_size).round() as i64
    }
}

fn glyph_at(glyphs: &mut [Vec<char>], column: i64, row: i64) -> Option<&mut char> {
    let row = usize::try_from(row).ok()?;
    let column = usize::try_from(column).ok()?;
    glyphs.get_mut(row)?.get_mut(column)
}
