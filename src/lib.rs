//! Substrate - crack-growth generative art
//!
//! Core modules:
//! - `sim`: Deterministic simulation (crack field, cracks, sand painters, scheduler)
//! - `draw`: Drawing context capability plus recording/counting implementations
//! - `palette`: Colors and validated palettes
//! - `settings`: Data-driven simulation configuration
//! - `error`: Error type for boundary validation

pub mod draw;
pub mod error;
pub mod palette;
pub mod settings;
pub mod sim;

pub use draw::{CountingContext, DrawCall, DrawingContext, RecordingContext};
pub use error::{SubstrateError, SubstrateResult};
pub use palette::{Color, Palette};
pub use settings::{GrainDetail, SimConfig};
pub use sim::{RunSummary, run, run_with_config};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Distance a crack advances per step
    pub const STEP_LENGTH: f32 = 0.42;
    /// Offset along the new heading when a crack starts (avoids instant self-collision)
    pub const START_OFFSET: f32 = 0.61;
    /// Step size of the perpendicular open-space probe
    pub const PROBE_STEP: f32 = 0.81;
    /// Max jitter applied per axis to the lookahead cell
    pub const LOOKAHEAD_FUZZ: f32 = 0.33;

    /// Random cells sampled by a single start search
    pub const START_ATTEMPTS: u32 = 1000;
    /// Base turn away from the parent crack (degrees)
    pub const START_TURN: f32 = 90.0;
    /// Symmetric jitter on the start turn (degrees)
    pub const START_JITTER: f32 = 2.0;

    /// Default collision tolerance (degrees)
    pub const COLLISION_TOLERANCE: f32 = 5.0;

    /// Alpha of the first grain in a sand stroke
    pub const GRAIN_ALPHA: f32 = 0.1;
    /// Max grain drift per render call
    pub const GRAIN_DRIFT: f32 = 0.05;
    /// Initial grain range for new painters
    pub const GRAIN_INIT_MIN: f32 = 0.01;
    pub const GRAIN_INIT_MAX: f32 = 0.1;

    /// Alpha of the crack line itself (85/255)
    pub const CRACK_ALPHA: f32 = 85.0 / 255.0;

    /// Upper bound on palette size
    pub const MAX_PALETTE: usize = 512;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Absolute circular difference between two angles in degrees, in [0, 180]
#[inline]
pub fn circular_difference(a: f32, b: f32) -> f32 {
    let d = normalize_degrees(a - b);
    d.min(360.0 - d)
}

/// Unit heading vector for an angle in degrees
#[inline]
pub fn heading(angle_deg: f32) -> Vec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Vec2::new(cos, sin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        let tiny = normalize_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_circular_difference_wraps() {
        assert_eq!(circular_difference(10.0, 15.0), 5.0);
        assert_eq!(circular_difference(358.0, 3.0), 5.0);
        assert_eq!(circular_difference(-2.0, 3.0), 5.0);
        assert_eq!(circular_difference(0.0, 180.0), 180.0);
        assert_eq!(circular_difference(90.0, 450.0), 0.0);
    }

    #[test]
    fn test_heading_axes() {
        let east = heading(0.0);
        assert!((east - Vec2::X).length() < 1e-6);
        let south = heading(90.0);
        assert!((south - Vec2::Y).length() < 1e-6);
    }
}
