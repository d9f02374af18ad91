//! Simulation settings
//!
//! Persisted as JSON. Every field has a default so partial files load.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::COLLISION_TOLERANCE;
use crate::error::{SubstrateError, SubstrateResult};
use crate::palette::Color;

/// Grain detail presets for the sand painter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GrainDetail {
    Coarse,
    Medium,
    #[default]
    Fine,
}

impl GrainDetail {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrainDetail::Coarse => "Coarse",
            GrainDetail::Medium => "Medium",
            GrainDetail::Fine => "Fine",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "coarse" | "low" => Some(GrainDetail::Coarse),
            "medium" | "med" => Some(GrainDetail::Medium),
            "fine" | "high" => Some(GrainDetail::Fine),
            _ => None,
        }
    }

    /// Grains laid down per sand stroke
    pub fn grains(&self) -> usize {
        match self {
            GrainDetail::Coarse => 32,
            GrainDetail::Medium => 48,
            GrainDetail::Fine => 64,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Field ===
    /// Grid width in cells (one cell per canvas unit)
    pub width: usize,
    /// Grid height in cells
    pub height: usize,

    // === Population ===
    /// Upper bound on simultaneously active cracks
    pub max_cracks: usize,
    /// Cracks spawned at the start of a run (capped at max_cracks)
    pub starting_cracks: usize,
    /// Random occupied cells scattered before the first crack
    pub initial_seeds: usize,

    // === Growth ===
    /// Global steps per run
    pub steps: u32,
    /// Max circular angle difference (degrees) that still counts as compatible
    pub tolerance_deg: f32,

    // === Rendering ===
    pub grain_detail: GrainDetail,
    pub background: Color,
    pub crack_color: Color,
    pub crack_alpha: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 900,

            max_cracks: 200,
            starting_cracks: 3,
            initial_seeds: 16,

            steps: 3000,
            tolerance_deg: COLLISION_TOLERANCE,

            grain_detail: GrainDetail::Fine,
            background: Color::WHITE,
            crack_color: Color::BLACK,
            crack_alpha: crate::consts::CRACK_ALPHA,
        }
    }
}

impl SimConfig {
    /// Defaults with the given field size and population cap
    pub fn new(width: usize, height: usize, max_cracks: usize) -> Self {
        Self {
            width,
            height,
            max_cracks,
            ..Self::default()
        }
    }

    /// Reject configurations the growth loop can't run with
    pub fn validate(&self) -> SubstrateResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SubstrateError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_cracks == 0 {
            return Err(SubstrateError::ZeroPopulation);
        }
        if !self.tolerance_deg.is_finite() || self.tolerance_deg < 0.0 {
            return Err(SubstrateError::InvalidTolerance(self.tolerance_deg));
        }
        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SubstrateResult<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(config)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> SubstrateResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
