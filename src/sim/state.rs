//! Simulation state
//!
//! Everything a run touches lives in [`SubstrateState`]: the field, the crack
//! population, the palette and the single RNG stream. No globals.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::crack::{Crack, CrackPhase};
use super::field::CrackField;
use super::sand::SandPainter;
use crate::error::SubstrateResult;
use crate::palette::Palette;
use crate::settings::SimConfig;

/// Counters accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Cracks added to the population
    pub spawned: u64,
    /// Spawn requests dropped because the population was full
    pub dropped_spawns: u64,
    /// Total terminations (collisions + out of bounds)
    pub terminations: u64,
    pub collisions: u64,
    pub out_of_bounds: u64,
    /// Terminated cracks that found no new start point and went dormant
    pub failed_reseeds: u64,
    /// Crack-steps spent without a start point
    pub dormant_ticks: u64,
}

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct SubstrateState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: SimConfig,
    pub palette: Palette,
    pub field: CrackField,
    /// Active cracks in creation order
    pub cracks: Vec<Crack>,
    /// Global steps completed
    pub time_steps: u64,
    pub stats: RunStats,
    pub(crate) rng: Pcg32,
    /// Next crack ID
    next_id: u32,
}

impl SubstrateState {
    /// Validate inputs and build an empty field with no cracks.
    ///
    /// Use [`SubstrateState::new`] for a ready-to-run state.
    pub fn empty(config: SimConfig, palette: Palette, seed: u64) -> SubstrateResult<Self> {
        config.validate()?;
        Ok(Self {
            seed,
            field: CrackField::new(config.width, config.height),
            config,
            palette,
            cracks: Vec::new(),
            time_steps: 0,
            stats: RunStats::default(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        })
    }

    /// Validated state with initial seeds scattered and starting cracks spawned
    pub fn new(config: SimConfig, palette: Palette, seed: u64) -> SubstrateResult<Self> {
        let mut state = Self::empty(config, palette, seed)?;
        state.scatter_seeds(state.config.initial_seeds);

        let starting = state.config.starting_cracks.min(state.config.max_cracks);
        for _ in 0..starting {
            state.spawn_crack();
        }
        Ok(state)
    }

    /// Allocate a new crack ID
    fn next_crack_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Mark `count` random cells with whole-degree angles.
    ///
    /// Draws (x, y, angle) per seed. Cells may repeat.
    pub fn scatter_seeds(&mut self, count: usize) {
        for _ in 0..count {
            let (x, y) = self.field.random_cell(&mut self.rng);
            let angle = self.rng.random_range(0..360u32) as f32;
            self.field.set_angle(x, y, angle);
        }
    }

    /// Add a crack if the population has room.
    ///
    /// Draws (palette index, initial grain) then runs a start search.
    /// Returns the new crack's ID, or `None` when the request was dropped.
    pub fn spawn_crack(&mut self) -> Option<u32> {
        if self.cracks.len() >= self.config.max_cracks {
            self.stats.dropped_spawns += 1;
            log::debug!("Spawn dropped, population full at {}", self.cracks.len());
            return None;
        }

        let id = self.next_crack_id();
        let grains = self.config.grain_detail.grains();
        let painter = SandPainter::from_palette(&self.palette, &mut self.rng, grains);
        let mut crack = Crack::new(id, painter);
        if !crack.find_start(&self.field, &mut self.rng) {
            log::debug!("Crack {id} spawned dormant, no start point found");
        }
        self.cracks.push(crack);
        self.stats.spawned += 1;
        Some(id)
    }

    /// Restart a terminated crack in place
    pub fn reseed_crack(&mut self, index: usize) -> bool {
        let Self { field, cracks, rng, .. } = self;
        cracks[index].find_start(field, rng)
    }

    /// Number of cracks currently growing
    pub fn growing_count(&self) -> usize {
        self.cracks.iter().filter(|c| c.phase == CrackPhase::Growing).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubstrateError;
    use crate::palette::Color;

    fn palette() -> Palette {
        Palette::new(vec![Color::rgb(200, 120, 40), Color::rgb(40, 80, 160)]).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = SubstrateState::new(SimConfig::new(0, 10, 3), palette(), 1).unwrap_err();
        assert!(matches!(err, SubstrateError::InvalidDimensions { .. }));
        let err = SubstrateState::new(SimConfig::new(10, 10, 0), palette(), 1).unwrap_err();
        assert!(matches!(err, SubstrateError::ZeroPopulation));
    }

    #[test]
    fn test_new_scatters_seeds_and_spawns() {
        let state = SubstrateState::new(SimConfig::new(100, 80, 5), palette(), 42).unwrap();
        let occupied = state.field.occupied_count();
        assert!(occupied >= 1 && occupied <= state.config.initial_seeds);
        assert_eq!(state.cracks.len(), state.config.starting_cracks);
        assert_eq!(state.stats.spawned, state.config.starting_cracks as u64);
        assert!(state.growing_count() <= state.cracks.len());
        assert!(state.field.cells().iter().flatten().all(|a| a.fract() == 0.0));
    }

    #[test]
    fn test_crack_ids_follow_creation_order() {
        let state = SubstrateState::new(SimConfig::new(50, 50, 10), palette(), 3).unwrap();
        let ids: Vec<u32> = state.cracks.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_starting_cracks_capped() {
        let mut cfg = SimConfig::new(30, 30, 2);
        cfg.starting_cracks = 10;
        let state = SubstrateState::new(cfg, palette(), 5).unwrap();
        assert_eq!(state.cracks.len(), 2);
        assert_eq!(state.stats.dropped_spawns, 0);
    }

    #[test]
    fn test_spawn_dropped_when_full() {
        let mut state = SubstrateState::new(SimConfig::new(30, 30, 3), palette(), 5).unwrap();
        assert_eq!(state.cracks.len(), 3);
        assert_eq!(state.spawn_crack(), None);
        assert_eq!(state.cracks.len(), 3);
        assert_eq!(state.stats.dropped_spawns, 1);
    }

    #[test]
    fn test_spawn_on_empty_field_is_dormant() {
        let mut state = SubstrateState::empty(SimConfig::new(30, 30, 3), palette(), 9).unwrap();
        assert_eq!(state.spawn_crack(), Some(1));
        assert_eq!(state.cracks[0].phase, CrackPhase::SeekingStart);
        assert_eq!(state.growing_count(), 0);
    }

    #[test]
    fn test_painter_colors_come_from_palette() {
        let mut cfg = SimConfig::new(60, 60, 20);
        cfg.starting_cracks = 20;
        let state = SubstrateState::new(cfg, palette(), 77).unwrap();
        for crack in &state.cracks {
            assert!(state.palette.colors().contains(&crack.painter.color));
        }
    }
}
