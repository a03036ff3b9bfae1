//! Decorative confetti burst shown after a successful redemption.
//!
//! Nothing here feeds back into the screen state; the front end only asks
//! where each particle is at a given moment of the celebration.

use crate::random::RandomSource;

/// Number of colors in the front end's palette.
pub const PALETTE_LEN: usize = 5;

/// Glyphs a particle may be drawn with.
pub const GLYPHS: [char; 4] = ['▪', '●', '◆', '✦'];

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal start, percent of width.
    pub x: f64,
    /// Delay before the particle starts falling.
    pub delay_ms: u64,
    /// Time to fall from top to bottom.
    pub fall_ms: u64,
    /// Horizontal drift over the whole fall, percent of width.
    pub drift: f64,
    /// Degrees.
    pub rotation: f64,
    pub color: usize,
    pub glyph: char,
}

impl Particle {
    /// Position at `elapsed_ms` into the celebration as (x percent, y in
    /// `[0, 1)` from the top). `None` before the particle starts or once it
    /// has landed.
    pub fn position(&self, elapsed_ms: u64) -> Option<(f64, f64)> {
        if elapsed_ms < self.delay_ms || self.fall_ms == 0 {
            return None;
        }
        let t = (elapsed_ms - self.delay_ms) as f64 / self.fall_ms as f64;
        if t >= 1.0 {
            return None;
        }
        let x = (self.x + self.drift * t).clamp(0.0, 100.0);
        Some((x, t))
    }
}

/// Generate `count` particles.
pub fn burst(count: usize, rng: &mut dyn RandomSource) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            x: rng.range(0.0, 100.0),
            delay_ms: rng.range(0.0, 600.0) as u64,
            fall_ms: rng.range(1800.0, 3200.0) as u64,
            drift: rng.range(-10.0, 10.0),
            rotation: rng.range(0.0, 360.0),
            color: rng.index(PALETTE_LEN),
            glyph: GLYPHS[rng.index(GLYPHS.len())],
        })
        .collect()
}
