//! Crack growth agent
//!
//! A crack seeks a start point on an existing crack, then grows in a straight
//! line, recording its angle into the field, until it runs off the field or
//! into a crack at an incompatible angle.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::CrackField;
use super::sand::SandPainter;
use crate::consts::*;
use crate::draw::DrawingContext;
use crate::settings::SimConfig;
use crate::{circular_difference, heading};

/// Lifecycle phase of a crack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrackPhase {
    /// Dormant until a start point on an existing crack is found
    SeekingStart,
    /// Actively growing
    Growing,
    /// Hit a boundary or another crack; reseeded by the scheduler
    Terminated,
}

/// Why a crack stopped growing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TerminationCause {
    /// Lookahead cell left the field
    OutOfBounds,
    /// Lookahead cell held an incompatible angle
    Collision { found: f32 },
}

/// Result of stepping a single crack
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Still seeking, no start point found this step
    Dormant,
    /// Found a start point; growth begins next step
    Started,
    /// Advanced one segment
    Grew,
    /// Stopped this step
    Terminated(TerminationCause),
}

/// Collision tie-break: differences up to and including the tolerance are compatible
#[inline]
pub fn is_compatible(a: f32, b: f32, tolerance: f32) -> bool {
    circular_difference(a, b) <= tolerance
}

/// A growth agent
#[derive(Debug, Clone)]
pub struct Crack {
    /// Creation order, stable for the whole run
    pub id: u32,
    pub pos: Vec2,
    /// Travel direction in degrees (not normalized)
    pub angle: f32,
    pub phase: CrackPhase,
    pub painter: SandPainter,
}

impl Crack {
    /// Dormant crack; call [`Crack::find_start`] or [`Crack::start_at`] to begin
    pub fn new(id: u32, painter: SandPainter) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            angle: 0.0,
            phase: CrackPhase::SeekingStart,
            painter,
        }
    }

    /// Search random cells for an existing crack and branch off it.
    ///
    /// Draws (x, y) per attempt, then (coin, jitter) on success.
    /// Returns false and leaves the crack seeking when nothing is found.
    pub fn find_start(&mut self, field: &CrackField, rng: &mut Pcg32) -> bool {
        for _ in 0..START_ATTEMPTS {
            let (x, y) = field.random_cell(rng);
            if let Some(found) = field.get_angle(x, y) {
                let clockwise = rng.random_bool(0.5);
                let turn = START_TURN + rng.random_range(-START_JITTER..=START_JITTER);
                let angle = if clockwise { found - turn } else { found + turn };
                self.start_at(Vec2::new(x as f32, y as f32), angle);
                return true;
            }
        }
        self.phase = CrackPhase::SeekingStart;
        false
    }

    /// Begin growing from `origin`, nudged forward along `angle`
    pub fn start_at(&mut self, origin: Vec2, angle: f32) {
        self.angle = angle;
        self.pos = origin + heading(angle) * START_OFFSET;
        self.phase = CrackPhase::Growing;
    }

    /// Walk from the crack along `dir` until leaving the field or meeting a crack
    fn probe_open_space(&self, field: &CrackField, dir: Vec2) -> Vec2 {
        let mut p = self.pos;
        loop {
            p += dir * PROBE_STEP;
            match field.cell_at(p) {
                Some((cx, cy)) if field.get_angle(cx, cy).is_none() => {}
                _ => return p,
            }
        }
    }

    /// Advance one step.
    ///
    /// RNG order while growing: grain drift (left side), grain drift (right side),
    /// lookahead jitter x, lookahead jitter y.
    pub fn step<C: DrawingContext>(
        &mut self,
        field: &mut CrackField,
        rng: &mut Pcg32,
        ctx: &mut C,
        config: &SimConfig,
    ) -> StepOutcome {
        match self.phase {
            CrackPhase::SeekingStart | CrackPhase::Terminated => {
                if self.find_start(field, rng) {
                    StepOutcome::Started
                } else {
                    StepOutcome::Dormant
                }
            }
            CrackPhase::Growing => self.grow(field, rng, ctx, config),
        }
    }

    fn grow<C: DrawingContext>(
        &mut self,
        field: &mut CrackField,
        rng: &mut Pcg32,
        ctx: &mut C,
        config: &SimConfig,
    ) -> StepOutcome {
        let dir = heading(self.angle);
        let perp = Vec2::new(dir.y, -dir.x);

        // Sand strokes on both sides of the crack, out to the nearest obstacle
        for side in [perp, -perp] {
            let edge = self.probe_open_space(field, side);
            self.painter.render(self.pos, edge, rng, ctx);
        }

        let prev = self.pos;
        self.pos += dir * STEP_LENGTH;

        let fuzz = Vec2::new(
            rng.random_range(-LOOKAHEAD_FUZZ..LOOKAHEAD_FUZZ),
            rng.random_range(-LOOKAHEAD_FUZZ..LOOKAHEAD_FUZZ),
        );

        let Some((cx, cy)) = field.cell_at(self.pos + fuzz) else {
            self.phase = CrackPhase::Terminated;
            return StepOutcome::Terminated(TerminationCause::OutOfBounds);
        };

        if let Some(found) = field.get_angle(cx, cy) {
            if !is_compatible(found, self.angle, config.tolerance_deg) {
                self.phase = CrackPhase::Terminated;
                return StepOutcome::Terminated(TerminationCause::Collision { found });
            }
        }

        field.set_angle(cx, cy, self.angle);

        ctx.set_stroke_color(config.crack_color, config.crack_alpha);
        ctx.move_to(prev.x, prev.y);
        ctx.line_to(self.pos.x, self.pos.y);
        ctx.stroke();

        StepOutcome::Grew
    }
}
