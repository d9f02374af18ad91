//! Fixed step scheduler
//!
//! Advances every crack once per global step, in creation order, and handles
//! termination (reseed in place + spawn request) synchronously.

use serde::{Deserialize, Serialize};

use super::crack::{StepOutcome, TerminationCause};
use super::state::{RunStats, SubstrateState};
use crate::draw::DrawingContext;
use crate::error::SubstrateResult;
use crate::palette::{Color, Palette};
use crate::settings::SimConfig;

/// End-of-run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub steps: u64,
    pub population: usize,
    pub growing: usize,
    pub occupied_cells: usize,
    pub stats: RunStats,
}

impl RunSummary {
    pub fn from_state(state: &SubstrateState) -> Self {
        Self {
            seed: state.seed,
            steps: state.time_steps,
            population: state.cracks.len(),
            growing: state.growing_count(),
            occupied_cells: state.field.occupied_count(),
            stats: state.stats,
        }
    }
}

/// Advance the simulation by one global step.
///
/// Only cracks present at the start of the step move; cracks spawned during
/// the step first move on the next one.
pub fn step<C: DrawingContext>(state: &mut SubstrateState, ctx: &mut C) {
    state.time_steps += 1;

    let active = state.cracks.len();
    for i in 0..active {
        let outcome = {
            let SubstrateState {
                field,
                cracks,
                rng,
                config,
                ..
            } = &mut *state;
            cracks[i].step(field, rng, ctx, config)
        };

        match outcome {
            StepOutcome::Grew => {}
            StepOutcome::Started => {
                log::trace!("Crack {} started at step {}", state.cracks[i].id, state.time_steps);
            }
            StepOutcome::Dormant => {
                state.stats.dormant_ticks += 1;
            }
            StepOutcome::Terminated(cause) => {
                state.stats.terminations += 1;
                match cause {
                    TerminationCause::OutOfBounds => state.stats.out_of_bounds += 1,
                    TerminationCause::Collision { .. } => state.stats.collisions += 1,
                }
                log::debug!(
                    "Crack {} terminated at step {}: {:?}",
                    state.cracks[i].id,
                    state.time_steps,
                    cause
                );

                if !state.reseed_crack(i) {
                    state.stats.failed_reseeds += 1;
                    log::debug!("Crack {} went dormant, no start point found", state.cracks[i].id);
                }
                state.spawn_crack();
            }
        }
    }
}

/// Fill the whole canvas with the background color
pub fn paint_background<C: DrawingContext>(config: &SimConfig, ctx: &mut C) {
    ctx.set_fill_color(config.background, 1.0);
    ctx.fill_rect(0.0, 0.0, config.width as f32, config.height as f32);
}

/// Run `steps` global steps
pub fn run_steps<C: DrawingContext>(state: &mut SubstrateState, ctx: &mut C, steps: u32) {
    for _ in 0..steps {
        step(state, ctx);
    }
}

/// Run a full simulation with explicit settings.
///
/// Validation (palette, dimensions, population) happens before anything is drawn.
pub fn run_with_config<C: DrawingContext>(
    config: &SimConfig,
    palette: &Palette,
    seed: u64,
    ctx: &mut C,
) -> SubstrateResult<RunSummary> {
    let mut state = SubstrateState::new(config.clone(), palette.clone(), seed)?;
    log::info!(
        "Substrate run: seed={seed} field={}x{} max_cracks={} steps={} palette={}",
        config.width,
        config.height,
        config.max_cracks,
        config.steps,
        palette.len()
    );

    paint_background(config, ctx);
    run_steps(&mut state, ctx, config.steps);

    let summary = RunSummary::from_state(&state);
    log::info!(
        "Substrate done: {} cracks, {} occupied cells, {} terminations, {} dropped spawns",
        summary.population,
        summary.occupied_cells,
        summary.stats.terminations,
        summary.stats.dropped_spawns
    );
    Ok(summary)
}

/// Run with default settings for everything but size, population and palette
pub fn run<C: DrawingContext>(
    width: usize,
    height: usize,
    max_cracks: usize,
    palette: &[Color],
    seed: u64,
    ctx: &mut C,
) -> SubstrateResult<RunSummary> {
    let palette = Palette::new(palette.to_vec())?;
    run_with_config(&SimConfig::new(width, height, max_cracks), &palette, seed, ctx)
}
