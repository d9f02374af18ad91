//! Sand painter
//!
//! Lays down a fading, sinusoidally warped line of single-unit grains between
//! a crack and the edge of the open space beside it.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{GRAIN_ALPHA, GRAIN_DRIFT, GRAIN_INIT_MAX, GRAIN_INIT_MIN};
use crate::draw::DrawingContext;
use crate::palette::{Color, Palette};

#[derive(Debug, Clone, PartialEq)]
pub struct SandPainter {
    /// Fixed for the painter's lifetime
    pub color: Color,
    /// Spread parameter, random walk clamped to [0, 1]
    pub grain: f32,
    /// Grains per stroke (>= 2)
    grains: usize,
}

impl SandPainter {
    pub fn new(color: Color, grain: f32, grains: usize) -> Self {
        Self {
            color,
            grain: grain.clamp(0.0, 1.0),
            grains: grains.max(2),
        }
    }

    /// Random color from the palette, then a random initial grain
    pub fn from_palette(palette: &Palette, rng: &mut Pcg32, grains: usize) -> Self {
        let color = palette.pick(rng);
        let grain = rng.random_range(GRAIN_INIT_MIN..GRAIN_INIT_MAX);
        Self::new(color, grain, grains)
    }

    pub fn grains(&self) -> usize {
        self.grains
    }

    /// Drift grain once, then draw the stroke from `origin` toward `target`
    pub fn render<C: DrawingContext>(
        &mut self,
        origin: Vec2,
        target: Vec2,
        rng: &mut Pcg32,
        ctx: &mut C,
    ) {
        self.grain = (self.grain + rng.random_range(-GRAIN_DRIFT..GRAIN_DRIFT)).clamp(0.0, 1.0);

        let n = self.grains as f32;
        let w = self.grain / (n - 1.0);
        let delta = target - origin;

        for i in 0..self.grains {
            let i = i as f32;
            let alpha = GRAIN_ALPHA * (1.0 - i / n);
            let t = (i * w).sin().sin();
            let p = origin + delta * t;
            ctx.set_fill_color(self.color, alpha);
            ctx.fill_rect(p.x, p.y, 1.0, 1.0);
        }
    }
}
